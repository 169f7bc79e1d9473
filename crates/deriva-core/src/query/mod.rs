//! Abstract query object produced by candidate strategies.

mod binding;
mod model;
pub mod predicate;
mod raw;

pub use binding::{Binding, ParameterBinding};
pub use model::{OrderDirection, OrderSpec, PageSpec, Projection, QueryModel};
pub use raw::RawQuery;

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// OperationKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    #[display("READ")]
    Read,
    #[display("COUNT")]
    Count,
    #[display("EXISTS")]
    Exists,
    #[display("DELETE")]
    Delete,
    #[display("UPDATE")]
    Update,
    #[display("INSERT")]
    Insert,
}

///
/// QueryObject
/// Either a model awaiting materialization or pre-declared raw text.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryObject {
    Model(QueryModel),
    Raw(RawQuery),
}

impl QueryObject {
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    #[must_use]
    pub const fn page(&self) -> PageSpec {
        match self {
            Self::Model(model) => model.page(),
            Self::Raw(_) => PageSpec {
                max: None,
                offset: 0,
            },
        }
    }
}

impl From<QueryModel> for QueryObject {
    fn from(model: QueryModel) -> Self {
        Self::Model(model)
    }
}

impl From<RawQuery> for QueryObject {
    fn from(raw: RawQuery) -> Self {
        Self::Raw(raw)
    }
}
