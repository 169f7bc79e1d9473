//! Parameter role classification.

use deriva_config_build::RoleConflictPolicy;
use deriva_core::{
    error::ProcessError,
    role::{self, RoleMap, RoleSource},
};
use deriva_schema::prelude::*;
use std::sync::LazyLock;

static BUILTIN: LazyLock<RoleTable> = LazyLock::new(|| RoleTable {
    entries: vec![
        (name::PAGEABLE.to_string(), role::PAGEABLE.to_string()),
        (name::SORT.to_string(), role::SORT.to_string()),
    ],
});

///
/// RoleTable
///
/// `(marker type, role)` pairs consulted when classifying parameters. The
/// builtin table is shared by the whole run; each interface gets its own copy
/// extended with the roles it declares.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleTable {
    entries: Vec<(String, String)>,
}

impl RoleTable {
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builtin roles plus the custom roles declared on `repository`.
    #[must_use]
    pub fn for_repository(repository: &RepositoryElement) -> Self {
        repository
            .declared_roles()
            .into_iter()
            .fold(BUILTIN.clone(), |table, (role, ty)| table.with_role(ty, role))
    }

    /// Map parameters of type `ty` to `role`; a type maps to one role.
    #[must_use]
    pub fn with_role(mut self, ty: impl Into<String>, role: impl Into<String>) -> Self {
        let ty = ty.into();
        let role = role.into();

        match self.entries.iter_mut().find(|(t, _)| *t == ty) {
            Some(entry) => entry.1 = role,
            None => self.entries.push((ty, role)),
        }
        self
    }

    /// Roles a parameter of type `ty` qualifies for.
    pub fn roles_for<'a>(&'a self, ty: &'a ClassElement) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(|(marker, _)| ty.is_assignable(marker))
            .map(|(_, role)| role.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assign roles to `parameters` in declaration order.
    ///
    /// A later parameter replaces an earlier one in the same role. Under
    /// `Reject` that replacement is an `AmbiguousRole` error instead; entity
    /// property defaults may always be replaced.
    pub fn classify(
        &self,
        parameters: &[ParameterElement],
        policy: RoleConflictPolicy,
        roles: &mut RoleMap,
    ) -> Result<(), ProcessError> {
        for parameter in parameters {
            for role in self.roles_for(&parameter.ty) {
                let previous = roles.assign(role, RoleSource::Parameter(parameter.name.clone()));

                if let Some(RoleSource::Parameter(first)) = previous
                    && policy == RoleConflictPolicy::Reject
                {
                    return Err(ProcessError::AmbiguousRole {
                        role: role.to_string(),
                        first,
                        second: parameter.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn pageable(parameter: &str) -> ParameterElement {
        ParameterElement::new(
            parameter,
            ClassElement::new("PageRequest").with_supertype(name::PAGEABLE),
        )
    }

    #[test]
    fn last_parameter_wins_by_default() {
        let mut roles = RoleMap::new();
        RoleTable::builtin()
            .classify(
                &[pageable("p1"), pageable("p2")],
                RoleConflictPolicy::LastWins,
                &mut roles,
            )
            .unwrap();

        assert_eq!(roles.source_name(role::PAGEABLE), Some("p2"));
    }

    #[test]
    fn reject_policy_reports_both_parameters() {
        let mut roles = RoleMap::new();
        let err = RoleTable::builtin()
            .classify(
                &[pageable("p1"), pageable("p2")],
                RoleConflictPolicy::Reject,
                &mut roles,
            )
            .unwrap_err();

        assert_eq!(
            err,
            ProcessError::AmbiguousRole {
                role: role::PAGEABLE.into(),
                first: "p1".into(),
                second: "p2".into(),
            }
        );
    }

    #[test]
    fn parameters_replace_entity_defaults_even_when_rejecting() {
        let mut roles = RoleMap::new();
        roles.assign("tenant", RoleSource::Property("tenant".into()));

        let table = RoleTable::builtin().clone().with_role("TenantId", "tenant");
        table
            .classify(
                &[ParameterElement::new("t", ClassElement::new("TenantId"))],
                RoleConflictPolicy::Reject,
                &mut roles,
            )
            .unwrap();

        assert_eq!(roles.get("tenant"), Some(&RoleSource::Parameter("t".into())));
    }

    #[test]
    fn declared_roles_extend_a_fresh_copy() {
        let repository = RepositoryElement::new("Repo").annotated(
            Annotation::new(marker::REPOSITORY).member(
                member::ROLE_ARRAY,
                vec![
                    Annotation::new(marker::PARAMETER_ROLE)
                        .member(member::ROLE, "tenant")
                        .member(member::TYPE, AnnotationValue::class("TenantId")),
                ],
            ),
        );

        let table = RoleTable::for_repository(&repository);
        let tenant = ClassElement::new("TenantId");

        assert_eq!(table.roles_for(&tenant).collect::<Vec<_>>(), vec!["tenant"]);
        assert_eq!(RoleTable::builtin().roles_for(&tenant).count(), 0);
        assert_eq!(table.len(), RoleTable::builtin().len() + 1);
    }
}
