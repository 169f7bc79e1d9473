//! Structural view of repository interfaces handed over by type introspection.
//!
//! Nothing here interprets the elements; it only models declared names,
//! generic type arguments, assignability, and annotation values so the
//! processor can match method shapes without touching a compiler API.

pub mod annotation;
pub mod element;
pub mod types;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        annotation::{Annotation, AnnotationMetadata, AnnotationValue, FromAnnotationValue},
        element::{
            ClassElement, MethodElement, ParameterElement, PropertyElement, RepositoryElement,
            TypeArgument,
        },
        types::{marker, member, name},
    };
    pub use serde::{Deserialize, Serialize};
}
