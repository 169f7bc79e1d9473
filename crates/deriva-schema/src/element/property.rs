use crate::{
    annotation::{Annotation, AnnotationMetadata},
    element::ClassElement,
    types::{marker, member},
};
use serde::{Deserialize, Serialize};

///
/// PropertyElement
/// One declared property of a (potentially persisted) type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyElement {
    pub name: String,
    pub ty: ClassElement,

    #[serde(default, skip_serializing_if = "AnnotationMetadata::is_empty")]
    pub annotations: AnnotationMetadata,
}

impl PropertyElement {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ClassElement) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: AnnotationMetadata::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.add(annotation);
        self
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.annotations.has_annotation(marker::ID)
    }

    /// Role this property declares itself as the default source for.
    #[must_use]
    pub fn role(&self) -> Option<String> {
        self.annotations
            .value::<String>(marker::PARAMETER_ROLE, member::ROLE)
            .filter(|role| !role.is_empty())
    }
}
