use crate::query::predicate::Predicate;
use serde::{Deserialize, Serialize};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// OrderSpec
/// Sort keys in priority order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

///
/// PageSpec
///
/// `max` of `None` is unbounded; an `offset` of zero means none.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub max: Option<u32>,
    pub offset: u64,
}

///
/// Projection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    Entity,
    Count,
    Exists,
}

///
/// QueryModel
///
/// Operation-agnostic query intent against one entity. Which statement it
/// becomes (select, delete, update) is decided by the materializer entry
/// point it is handed to.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryModel {
    entity: String,
    predicate: Option<Predicate>,
    order: Option<OrderSpec>,
    page: PageSpec,
    projection: Projection,
    distinct: bool,
}

impl QueryModel {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            predicate: None,
            order: None,
            page: PageSpec::default(),
            projection: Projection::Entity,
            distinct: false,
        }
    }

    /// Add a predicate, implicitly AND-ing with any existing predicate.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Predicate::And(vec![existing, predicate])),
            None => Some(predicate),
        };
        self
    }

    /// Apply an optional predicate.
    #[must_use]
    pub fn filter_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => self.filter(predicate),
            None => self,
        }
    }

    /// Replace the sort order; an empty spec clears it.
    #[must_use]
    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = (!order.fields.is_empty()).then_some(order);
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.push_order(field.into(), OrderDirection::Asc)
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.push_order(field.into(), OrderDirection::Desc)
    }

    #[must_use]
    pub const fn max(mut self, max: u32) -> Self {
        self.page.max = Some(max);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.page.offset = offset;
        self
    }

    #[must_use]
    pub const fn project(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    #[must_use]
    pub const fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub const fn order_spec(&self) -> Option<&OrderSpec> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn page(&self) -> PageSpec {
        self.page
    }

    #[must_use]
    pub const fn projection(&self) -> Projection {
        self.projection
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    fn push_order(mut self, field: String, direction: OrderDirection) -> Self {
        self.order
            .get_or_insert_with(OrderSpec::default)
            .fields
            .push((field, direction));
        self
    }
}

///
/// TESTS
///
