use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// AnnotationValue
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Class(String),
    Array(Vec<Self>),
    Nested(Annotation),
}

impl AnnotationValue {
    /// Class-literal value, referring to a type by name.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Annotation> for AnnotationValue {
    fn from(value: Annotation) -> Self {
        Self::Nested(value)
    }
}

impl<T: Into<AnnotationValue>> From<Vec<T>> for AnnotationValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

///
/// FromAnnotationValue
///
/// Typed extraction of a member value. A value of the wrong shape reads as
/// absent rather than failing; callers decide whether absence is an error.
///

pub trait FromAnnotationValue: Sized {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self>;
}

impl FromAnnotationValue for String {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        match value {
            AnnotationValue::Str(s) | AnnotationValue::Class(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromAnnotationValue for i64 {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        match value {
            AnnotationValue::Int(n) => Some(*n),
            AnnotationValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromAnnotationValue for u32 {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        i64::from_annotation_value(value).and_then(|n| Self::try_from(n).ok())
    }
}

impl FromAnnotationValue for bool {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        match value {
            AnnotationValue::Bool(b) => Some(*b),
            AnnotationValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromAnnotationValue for Annotation {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        match value {
            AnnotationValue::Nested(a) => Some(a.clone()),
            _ => None,
        }
    }
}

// a single value reads as a one-element array
impl<T: FromAnnotationValue> FromAnnotationValue for Vec<T> {
    fn from_annotation_value(value: &AnnotationValue) -> Option<Self> {
        match value {
            AnnotationValue::Array(values) => values.iter().map(T::from_annotation_value).collect(),
            other => T::from_annotation_value(other).map(|v| vec![v]),
        }
    }
}

///
/// Annotation
/// One marker occurrence with its named members.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Annotation {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Set a member value, replacing any previous value.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get<T: FromAnnotationValue>(&self, member: &str) -> Option<T> {
        self.members.get(member).and_then(T::from_annotation_value)
    }
}

///
/// AnnotationMetadata
/// All annotations on one element, keyed by marker name.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnnotationMetadata {
    annotations: BTreeMap<String, Annotation>,
}

impl AnnotationMetadata {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            annotations: BTreeMap::new(),
        }
    }

    /// Add (or replace) an annotation.
    pub fn add(&mut self, annotation: Annotation) {
        self.annotations.insert(annotation.name.clone(), annotation);
    }

    #[must_use]
    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.contains_key(marker)
    }

    #[must_use]
    pub fn annotation(&self, marker: &str) -> Option<&Annotation> {
        self.annotations.get(marker)
    }

    /// Typed lookup of one member of one marker.
    #[must_use]
    pub fn value<T: FromAnnotationValue>(&self, marker: &str, member: &str) -> Option<T> {
        self.annotation(marker).and_then(|a| a.get(member))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }
}

impl FromIterator<Annotation> for AnnotationMetadata {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for annotation in iter {
            metadata.add(annotation);
        }

        metadata
    }
}

///
/// TESTS
///
