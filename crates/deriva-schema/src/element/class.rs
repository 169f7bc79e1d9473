use crate::{
    annotation::{Annotation, AnnotationMetadata},
    element::PropertyElement,
    types::{marker, name},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TypeArgument
/// One named, resolved generic type argument.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeArgument {
    pub name: String,
    pub ty: ClassElement,
}

///
/// ClassElement
///
/// A resolved type reference. `supertypes` lists every name the type is
/// assignable to besides its own; type arguments keep declaration order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassElement {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeArgument>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,

    #[serde(default, skip_serializing_if = "AnnotationMetadata::is_empty")]
    pub annotations: AnnotationMetadata,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyElement>,
}

impl ClassElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_type_argument(mut self, name: impl Into<String>, ty: Self) -> Self {
        self.type_arguments.push(TypeArgument {
            name: name.into(),
            ty,
        });
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.add(annotation);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyElement) -> Self {
        self.properties.push(property);
        self
    }

    /// Name after the last `.` separator.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// True when a value of this type can be used where `name` is expected.
    #[must_use]
    pub fn is_assignable(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|s| s == name)
    }

    #[must_use]
    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.has_annotation(marker)
    }

    /// True when the type carries the persisted-entity marker.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.has_annotation(marker::PERSISTED)
    }

    #[must_use]
    pub fn type_argument(&self, name: &str) -> Option<&Self> {
        self.type_arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.ty)
    }

    #[must_use]
    pub fn first_type_argument(&self) -> Option<&Self> {
        self.type_arguments.first().map(|arg| &arg.ty)
    }

    /// Type arguments in declaration order.
    pub fn type_argument_values(&self) -> impl Iterator<Item = &Self> {
        self.type_arguments.iter().map(|arg| &arg.ty)
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.name == name::VOID
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.is_assignable(name::BOOLEAN) || self.is_assignable(name::BOOLEAN_OBJECT)
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        name::NUMERIC_PRIMITIVES.contains(&self.name.as_str()) || self.is_assignable(name::NUMBER)
    }

    #[must_use]
    pub fn is_iterable(&self) -> bool {
        self.is_assignable(name::ITERABLE)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyElement> {
        self.properties.iter().find(|p| p.name == name)
    }
}

// renders the generic form, e.g. `Page<User>`
impl fmt::Display for ClassElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg.ty)?;
            }
            f.write_str(">")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
