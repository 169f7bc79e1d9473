use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// QueryParameter
///
/// Reference to a method parameter supplying a value at runtime. A dotted
/// name (`user.id`) refers to a property of the parameter.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryParameter(String);

impl QueryParameter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Property `property` of parameter `parameter`.
    #[must_use]
    pub fn property_of(parameter: &str, property: &str) -> Self {
        Self(format!("{parameter}.{property}"))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    Ilike,
    Rlike,
    StartsWith,
    EndsWith,
    Contains,
    In,
    NotIn,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub parameter: QueryParameter,
}

///
/// Predicate
///
/// Filter tree of the abstract query. Opaque to the processor beyond
/// construction; materializers give it meaning.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    Between {
        field: String,
        from: QueryParameter,
        to: QueryParameter,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    IsEmpty {
        field: String,
    },
    IsNotEmpty {
        field: String,
    },
    IsTrue {
        field: String,
    },
    IsFalse {
        field: String,
    },
}

impl Predicate {
    #[must_use]
    pub fn compare(field: impl Into<String>, op: CompareOp, parameter: QueryParameter) -> Self {
        Self::Compare(ComparePredicate {
            field: field.into(),
            op,
            parameter,
        })
    }

    #[must_use]
    pub fn equals(field: impl Into<String>, parameter: QueryParameter) -> Self {
        Self::compare(field, CompareOp::Eq, parameter)
    }

    /// Combine predicates with AND; a single predicate is returned as is.
    #[must_use]
    pub fn all(mut predicates: Vec<Self>) -> Option<Self> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Self::And(predicates)),
        }
    }

    /// Combine predicates with OR; a single predicate is returned as is.
    #[must_use]
    pub fn any(mut predicates: Vec<Self>) -> Option<Self> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Self::Or(predicates)),
        }
    }

    /// Parameters referenced by the tree, left to right.
    #[must_use]
    pub fn parameters(&self) -> Vec<&QueryParameter> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);

        out
    }

    fn collect_parameters<'a>(&'a self, out: &mut Vec<&'a QueryParameter>) {
        match self {
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_parameters(out);
                }
            }
            Self::Not(inner) => inner.collect_parameters(out),
            Self::Compare(cmp) => out.push(&cmp.parameter),
            Self::Between { from, to, .. } => {
                out.push(from);
                out.push(to);
            }
            Self::IsNull { .. }
            | Self::IsNotNull { .. }
            | Self::IsEmpty { .. }
            | Self::IsNotEmpty { .. }
            | Self::IsTrue { .. }
            | Self::IsFalse { .. } => {}
        }
    }
}

///
/// TESTS
///
