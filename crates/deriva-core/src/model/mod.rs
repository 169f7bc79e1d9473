mod entity;

pub use entity::{DEFAULT_IDENTITY, PersistentEntity, PersistentProperty};
