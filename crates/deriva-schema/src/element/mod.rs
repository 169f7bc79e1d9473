mod class;
mod method;
mod property;
mod repository;

pub use class::{ClassElement, TypeArgument};
pub use method::{MethodElement, ParameterElement};
pub use property::PropertyElement;
pub use repository::RepositoryElement;

// serde default for abstract-by-default methods
const fn default_true() -> bool {
    true
}
