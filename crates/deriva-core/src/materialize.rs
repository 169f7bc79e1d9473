//! Query materializer boundary.
//!
//! Materializers turn an abstract `QueryModel` into backend text plus the
//! placeholder bindings. Dialects live entirely on the other side of this
//! trait; the processor only selects the entry point by operation kind.

use crate::{
    error::MissingMaterializerError,
    query::{ParameterBinding, QueryModel},
};
use std::{collections::BTreeMap, error::Error, fmt};
use thiserror::Error as ThisError;

///
/// PreparedQuery
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreparedQuery {
    pub text: String,
    pub binding: ParameterBinding,
}

impl PreparedQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, binding: ParameterBinding) -> Self {
        Self {
            text: text.into(),
            binding,
        }
    }
}

///
/// MaterializeError
/// Implementation-defined materializer failure.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct MaterializeError {
    pub message: String,

    #[source]
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl MaterializeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

///
/// QueryMaterializer
///

pub trait QueryMaterializer {
    fn build_query(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError>;

    fn build_delete(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError>;

    fn build_update(
        &self,
        query: &QueryModel,
        properties: &[String],
    ) -> Result<PreparedQuery, MaterializeError>;
}

/// Constructor for a named materializer; run once per repository.
pub type MaterializerFactory =
    Box<dyn Fn() -> Result<Box<dyn QueryMaterializer>, MaterializeError> + Send + Sync>;

///
/// MaterializerRegistry
///
/// Named materializer factories available to the processor. Repositories
/// select one by name; resolution failures are repository-level diagnostics.
///

#[derive(Default)]
pub struct MaterializerRegistry {
    factories: BTreeMap<String, MaterializerFactory>,
}

impl MaterializerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a factory under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn QueryMaterializer>, MaterializeError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the materializer registered under `name`.
    pub fn instantiate(
        &self,
        name: &str,
    ) -> Result<Box<dyn QueryMaterializer>, MissingMaterializerError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| MissingMaterializerError::NotRegistered(name.to_string()))?;

        factory().map_err(|e| MissingMaterializerError::Instantiation {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

impl fmt::Debug for MaterializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterializerRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl QueryMaterializer for Echo {
        fn build_query(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
            Ok(PreparedQuery::new(query.entity(), ParameterBinding::new()))
        }

        fn build_delete(&self, _: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
            Err(MaterializeError::new("unsupported"))
        }

        fn build_update(
            &self,
            _: &QueryModel,
            _: &[String],
        ) -> Result<PreparedQuery, MaterializeError> {
            Err(MaterializeError::new("unsupported"))
        }
    }

    #[test]
    fn instantiates_registered_factories() {
        let mut registry = MaterializerRegistry::new();
        registry.register("echo", || Ok(Box::new(Echo) as Box<dyn QueryMaterializer>));

        let materializer = registry.instantiate("echo").unwrap();
        let prepared = materializer.build_query(&QueryModel::new("User")).unwrap();

        assert_eq!(prepared.text, "User");
        assert!(registry.contains("echo"));
    }

    #[test]
    fn resolution_failures_are_typed() {
        let mut registry = MaterializerRegistry::new();
        registry.register("broken", || Err(MaterializeError::new("missing driver")));

        assert_eq!(
            registry.instantiate("absent").err(),
            Some(MissingMaterializerError::NotRegistered("absent".into()))
        );
        assert_eq!(
            registry.instantiate("broken").err(),
            Some(MissingMaterializerError::Instantiation {
                name: "broken".into(),
                message: "missing driver".into(),
            })
        );
    }
}
