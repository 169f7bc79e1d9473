//! One-shot commitment: the first accepting strategy owns the method.

use crate::{
    context::MatchContext, finders::MethodCandidate, info::MethodMatchInfo,
    registry::StrategyRegistry,
};
use deriva_core::error::{ProcessError, UnimplementableReason};
use deriva_schema::prelude::*;
use tracing::debug;

///
/// MatchState
///
/// UNRESOLVED → COMMITTED → (EMITTED | FAILED). Once committed, no other
/// strategy is consulted even if the build fails.
///

pub enum MatchState<'r> {
    Unresolved,
    Committed(&'r dyn MethodCandidate),
    Emitted(MethodMatchInfo),
    Failed(ProcessError),
}

impl<'r> MatchState<'r> {
    /// Scan `registry` in order and commit to the first acceptor. Only an
    /// unresolved state moves; any other state is returned as is.
    #[must_use]
    pub fn commit(
        self,
        registry: &'r StrategyRegistry,
        interface: &RepositoryElement,
        method: &MethodElement,
    ) -> Self {
        let Self::Unresolved = self else {
            return self;
        };

        match registry.first_match(method) {
            Some(candidate) => {
                debug!(
                    interface = %interface.name,
                    method = %method.name,
                    strategy = candidate.name(),
                    "committed to strategy"
                );
                Self::Committed(candidate)
            }
            None => Self::Failed(unimplementable(
                interface,
                method,
                UnimplementableReason::NoImplementations,
            )),
        }
    }

    /// Run the committed strategy's builder.
    #[must_use]
    pub fn build(self, ctx: &MatchContext<'_>) -> Self {
        let Self::Committed(candidate) = self else {
            return self;
        };

        match candidate.build(ctx) {
            Ok(Some(info)) => Self::Emitted(info),
            Ok(None) => Self::Failed(unimplementable(
                ctx.repository,
                ctx.method,
                UnimplementableReason::NoRuntimeImplementations,
            )),
            Err(err) => Self::Failed(err),
        }
    }

    /// Terminal result; a non-terminal state yields `None`.
    pub fn finish(self) -> Option<Result<MethodMatchInfo, ProcessError>> {
        match self {
            Self::Emitted(info) => Some(Ok(info)),
            Self::Failed(err) => Some(Err(err)),
            Self::Unresolved | Self::Committed(_) => None,
        }
    }
}

fn unimplementable(
    interface: &RepositoryElement,
    method: &MethodElement,
    reason: UnimplementableReason,
) -> ProcessError {
    ProcessError::Unimplementable {
        interface: interface.simple_name().to_string(),
        method: method.name.clone(),
        reason,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resolve::resolve_entity,
        test_support::{class, list_of, param, user, user_repository},
    };
    use deriva_core::{descriptor::RuntimeHandler, query::OperationKind, role::RoleMap};

    fn registry() -> StrategyRegistry {
        StrategyRegistry::builder().without_global_providers().build()
    }

    fn find_by_name() -> MethodElement {
        MethodElement::new("findByName")
            .with_parameter(param("name", class("String")))
            .returning(list_of(user()))
    }

    fn build(
        registry: &StrategyRegistry,
        method: &MethodElement,
    ) -> Option<Result<MethodMatchInfo, ProcessError>> {
        let repository = user_repository();
        let entity = resolve_entity(method, &repository).unwrap();
        let roles = RoleMap::new();
        let ctx = MatchContext {
            repository: &repository,
            entity: &entity,
            method,
            return_type: method.return_type.as_ref().unwrap(),
            roles: &roles,
        };

        MatchState::Unresolved
            .commit(registry, &repository, method)
            .build(&ctx)
            .finish()
    }

    #[test]
    fn unresolved_commits_to_the_first_acceptor() {
        let registry = registry();
        let method = find_by_name();
        let expected = registry.first_match(&method).map(|c| c.name());

        let state = MatchState::Unresolved.commit(&registry, &user_repository(), &method);

        assert!(matches!(&state, MatchState::Committed(c) if Some(c.name()) == expected));
        assert!(state.finish().is_none());
    }

    #[test]
    fn no_acceptor_fails_with_no_implementations() {
        let method = MethodElement::new("frobnicate").returning(class("void"));
        let registry = registry();

        let state = MatchState::Unresolved.commit(&registry, &user_repository(), &method);
        let Some(Err(err)) = state.finish() else {
            panic!("expected a failed match");
        };

        assert_eq!(
            err.unimplementable_reason(),
            Some(UnimplementableReason::NoImplementations)
        );
    }

    #[test]
    fn only_an_unresolved_state_commits() {
        let registry = registry();
        let repository = user_repository();
        let method = find_by_name();

        let failed = MatchState::Failed(ProcessError::EntityResolution)
            .commit(&registry, &repository, &method);
        assert!(matches!(
            failed.finish(),
            Some(Err(ProcessError::EntityResolution))
        ));

        let emitted = MatchState::Emitted(MethodMatchInfo::new(
            OperationKind::Read,
            RuntimeHandler::Count,
        ))
        .commit(&registry, &repository, &method);
        assert!(matches!(emitted, MatchState::Emitted(_)));

        assert!(MatchState::Unresolved.finish().is_none());
    }

    #[test]
    fn committed_strategy_emits_or_fails_without_fallback() {
        let registry = registry();

        assert!(matches!(build(&registry, &find_by_name()), Some(Ok(_))));

        let unbuildable = MethodElement::new("existsByName")
            .with_parameter(param("name", class("String")))
            .returning(class("String"));
        let Some(Err(err)) = build(&registry, &unbuildable) else {
            panic!("expected a failed build");
        };

        assert_eq!(
            err.unimplementable_reason(),
            Some(UnimplementableReason::NoRuntimeImplementations)
        );
    }
}
