use crate::{
    annotation::{Annotation, AnnotationMetadata},
    element::{ClassElement, default_true},
};
use serde::{Deserialize, Serialize};

///
/// ParameterElement
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParameterElement {
    pub name: String,

    /// Declared (erased) type.
    pub ty: ClassElement,

    /// Fully resolved generic type, when it differs from the declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_type: Option<ClassElement>,

    #[serde(default, skip_serializing_if = "AnnotationMetadata::is_empty")]
    pub annotations: AnnotationMetadata,
}

impl ParameterElement {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ClassElement) -> Self {
        Self {
            name: name.into(),
            ty,
            generic_type: None,
            annotations: AnnotationMetadata::new(),
        }
    }

    #[must_use]
    pub fn with_generic_type(mut self, ty: ClassElement) -> Self {
        self.generic_type = Some(ty);
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.add(annotation);
        self
    }

    /// The generic type when resolved, else the declared type.
    #[must_use]
    pub fn generic(&self) -> &ClassElement {
        self.generic_type.as_ref().unwrap_or(&self.ty)
    }
}

///
/// MethodElement
///
/// One method declared on a repository interface. Only abstract, non-static
/// methods with a return type are candidates for derivation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodElement {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ClassElement>,

    #[serde(default = "default_true")]
    pub is_abstract: bool,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default, skip_serializing_if = "AnnotationMetadata::is_empty")]
    pub annotations: AnnotationMetadata,
}

impl MethodElement {
    /// An abstract instance method with no parameters and no return type yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            is_abstract: true,
            is_static: false,
            annotations: AnnotationMetadata::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterElement) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn returning(mut self, ty: ClassElement) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.add(annotation);
        self
    }

    #[must_use]
    pub const fn concrete(mut self) -> Self {
        self.is_abstract = false;
        self
    }

    #[must_use]
    pub const fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// True when the method is a candidate for query derivation.
    #[must_use]
    pub const fn is_processable(&self) -> bool {
        self.is_abstract && !self.is_static && self.return_type.is_some()
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterElement> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// `name(T1, T2)`; distinguishes overloads in descriptor lookups.
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.generic().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}({params})", self.name)
    }
}

///
/// TESTS
///
