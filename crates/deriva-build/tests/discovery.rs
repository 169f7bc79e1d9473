mod common;

use common::*;
use deriva_build::{prelude::*, registry::register_provider};

///
/// Marker
/// Accepts `mark*` methods and returns the entity itself.
///

struct Marker;

impl MethodCandidate for Marker {
    fn name(&self) -> &str {
        "marker"
    }

    fn position(&self) -> i32 {
        -10
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        method.name.starts_with("mark")
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        Ok(Some(
            MethodMatchInfo::new(OperationKind::Read, RuntimeHandler::FindOne)
                .with_result_type(ctx.entity.name()),
        ))
    }
}

struct MarkerProvider;

impl CandidateProvider for MarkerProvider {
    fn name(&self) -> &str {
        "marker"
    }

    fn load(&self) -> Result<Box<dyn MethodCandidate>, DiscoveryError> {
        Ok(Box::new(Marker))
    }
}

struct BrokenProvider;

impl CandidateProvider for BrokenProvider {
    fn name(&self) -> &str {
        "broken"
    }

    fn load(&self) -> Result<Box<dyn MethodCandidate>, DiscoveryError> {
        Err(DiscoveryError::new("broken", "missing constructor"))
    }
}

#[test]
fn registered_providers_join_every_registry_and_failures_become_warnings() {
    register_provider(MarkerProvider);
    register_provider(BrokenProvider);

    let registry = StrategyRegistry::builtin();
    assert_eq!(registry.names().first(), Some(&"generic-list-query"));
    assert!(registry.names().contains(&"marker"));
    assert_eq!(
        registry.discovery_warnings(),
        [DiscoveryError::new("broken", "missing constructor")]
    );

    let method = MethodElement::new("markSeen")
        .with_parameter(param("id", class("long")))
        .returning(user());
    let (materializers, _) = materializers(None);
    let report = Processor::new(materializers).process([&repository().with_method(method.clone())]);

    let warnings = report.diagnostics.warnings().collect::<Vec<_>>();
    assert_eq!(
        warnings,
        vec![(
            &Target::Run,
            "could not load method candidate [broken]: missing constructor"
        )]
    );

    let descriptor = report
        .descriptor("app.UserRepository", &method.signature())
        .unwrap();
    assert_eq!(descriptor.handler, RuntimeHandler::FindOne);
    assert!(!report.diagnostics.has_errors());
}
