//! Candidate strategy registry and external strategy discovery.

use crate::finders::{self, MethodCandidate};
use deriva_schema::prelude::*;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use thiserror::Error as ThisError;
use tracing::warn;

///
/// PROVIDERS
/// Process-wide candidate providers, consulted by every registry build.
///

static PROVIDERS: LazyLock<RwLock<Vec<Arc<dyn CandidateProvider>>>> =
    LazyLock::new(|| RwLock::new(Vec::new()));

/// Register a provider for every registry built from now on.
pub fn register_provider(provider: impl CandidateProvider + 'static) {
    PROVIDERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Arc::new(provider));
}

fn global_providers() -> Vec<Arc<dyn CandidateProvider>> {
    PROVIDERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

///
/// DiscoveryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("could not load method candidate [{name}]: {message}")]
pub struct DiscoveryError {
    pub name: String,
    pub message: String,
}

impl DiscoveryError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

///
/// CandidateProvider
/// Source of one externally supplied strategy.
///

pub trait CandidateProvider: Send + Sync {
    fn name(&self) -> &str;

    fn load(&self) -> Result<Box<dyn MethodCandidate>, DiscoveryError>;
}

///
/// StrategyRegistry
///
/// Builtin and discovered strategies, stably sorted by position once at
/// construction and immutable afterwards.
///

pub struct StrategyRegistry {
    candidates: Vec<Box<dyn MethodCandidate>>,
    warnings: Vec<DiscoveryError>,
}

impl StrategyRegistry {
    #[must_use]
    pub fn builder() -> StrategyRegistryBuilder {
        StrategyRegistryBuilder::default()
    }

    /// Builtin strategies plus the process-wide providers.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    /// First strategy accepting `method`.
    #[must_use]
    pub fn first_match(&self, method: &MethodElement) -> Option<&dyn MethodCandidate> {
        self.candidates
            .iter()
            .map(AsRef::as_ref)
            .find(|candidate| candidate.is_method_match(method))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MethodCandidate> {
        self.candidates.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(MethodCandidate::name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Providers that failed to load while building this registry.
    #[must_use]
    pub fn discovery_warnings(&self) -> &[DiscoveryError] {
        &self.warnings
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

///
/// StrategyRegistryBuilder
///

pub struct StrategyRegistryBuilder {
    builtins: bool,
    global_providers: bool,
    candidates: Vec<Box<dyn MethodCandidate>>,
    providers: Vec<Arc<dyn CandidateProvider>>,
}

impl Default for StrategyRegistryBuilder {
    fn default() -> Self {
        Self {
            builtins: true,
            global_providers: true,
            candidates: Vec::new(),
            providers: Vec::new(),
        }
    }
}

impl StrategyRegistryBuilder {
    #[must_use]
    pub const fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    #[must_use]
    pub const fn without_global_providers(mut self) -> Self {
        self.global_providers = false;
        self
    }

    /// Add an already constructed strategy.
    #[must_use]
    pub fn candidate(mut self, candidate: impl MethodCandidate + 'static) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: impl CandidateProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Assemble in discovery order (builtins, added candidates, providers),
    /// then stable-sort by position. Providers that fail are skipped.
    #[must_use]
    pub fn build(self) -> StrategyRegistry {
        let mut candidates = if self.builtins {
            finders::builtin()
        } else {
            Vec::new()
        };
        candidates.extend(self.candidates);

        let mut providers = self.providers;
        if self.global_providers {
            providers.extend(global_providers());
        }

        let mut warnings = Vec::new();
        for provider in providers {
            match provider.load() {
                Ok(candidate) => candidates.push(candidate),
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "skipping method candidate");
                    warnings.push(err);
                }
            }
        }

        candidates.sort_by_key(|candidate| candidate.position());

        StrategyRegistry {
            candidates,
            warnings,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::MatchContext, info::MethodMatchInfo};
    use deriva_core::error::ProcessError;
    use proptest::prelude::*;

    struct Named {
        name: String,
        position: i32,
    }

    impl MethodCandidate for Named {
        fn name(&self) -> &str {
            &self.name
        }

        fn position(&self) -> i32 {
            self.position
        }

        fn is_method_match(&self, _: &MethodElement) -> bool {
            true
        }

        fn build(&self, _: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
            Ok(None)
        }
    }

    struct Broken;

    impl CandidateProvider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn load(&self) -> Result<Box<dyn MethodCandidate>, DiscoveryError> {
            Err(DiscoveryError::new("broken", "missing class"))
        }
    }

    fn named(name: &str, position: i32) -> Named {
        Named {
            name: name.to_string(),
            position,
        }
    }

    #[test]
    fn builtins_keep_registration_order_behind_raw_queries() {
        let registry = StrategyRegistry::builder()
            .without_global_providers()
            .build();

        assert_eq!(
            registry.names(),
            vec![
                "generic-list-query",
                "generic-single-query",
                "existence-by-derived-name",
                "find-by-derived-name",
                "save-single",
                "save-batch",
                "list-all",
                "count-all",
                "delete-by-derived-name",
                "delete-all",
                "count-by-derived-name",
                "update",
                "update-by-derived-name",
            ]
        );
    }

    #[test]
    fn failing_provider_is_skipped_with_warning() {
        let registry = StrategyRegistry::builder()
            .without_builtins()
            .without_global_providers()
            .candidate(named("kept", 0))
            .provider(Broken)
            .build();

        assert_eq!(registry.names(), vec!["kept"]);
        assert_eq!(
            registry.discovery_warnings(),
            &[DiscoveryError::new("broken", "missing class")]
        );
    }

    proptest! {
        #[test]
        fn ordering_is_a_stable_sort_by_position(positions in prop::collection::vec(-3i32..3, 0..12)) {
            let builder = positions
                .iter()
                .enumerate()
                .fold(
                    StrategyRegistry::builder().without_builtins().without_global_providers(),
                    |builder, (i, position)| builder.candidate(named(&i.to_string(), *position)),
                );
            let registry = builder.build();

            let mut expected: Vec<(i32, usize)> =
                positions.iter().copied().zip(0..).collect();
            expected.sort_by_key(|(position, _)| *position);
            let expected: Vec<String> = expected.iter().map(|(_, i)| i.to_string()).collect();

            prop_assert_eq!(registry.names(), expected);
        }
    }
}
