use crate::role::RoleTable;
use deriva_config_build::{ProcessorConfig, RoleConflictPolicy};
use deriva_core::{
    error::{MissingMaterializerError, ProcessError},
    materialize::{MaterializerRegistry, QueryMaterializer},
    model::PersistentEntity,
    role::{self, RoleMap},
};
use deriva_schema::prelude::*;

///
/// InterfaceContext
///
/// Per-interface state: the role table (builtin roles plus the interface's
/// own), the conflict policy, and the resolved materializer. Built fresh for
/// every interface so nothing leaks between repositories.
///

pub struct InterfaceContext<'a> {
    repository: &'a RepositoryElement,
    role_table: RoleTable,
    role_conflict: RoleConflictPolicy,
    materializer: Result<Box<dyn QueryMaterializer>, MissingMaterializerError>,
}

impl<'a> InterfaceContext<'a> {
    #[must_use]
    pub fn new(
        repository: &'a RepositoryElement,
        config: &ProcessorConfig,
        materializers: &MaterializerRegistry,
    ) -> Self {
        let materializer = repository
            .query_builder()
            .or_else(|| config.materializer.default.clone())
            .ok_or(MissingMaterializerError::NotConfigured)
            .and_then(|name| materializers.instantiate(&name));

        Self {
            repository,
            role_table: RoleTable::for_repository(repository),
            role_conflict: config.roles.conflict,
            materializer,
        }
    }

    #[must_use]
    pub const fn repository(&self) -> &'a RepositoryElement {
        self.repository
    }

    #[must_use]
    pub const fn role_table(&self) -> &RoleTable {
        &self.role_table
    }

    #[must_use]
    pub const fn role_conflict(&self) -> RoleConflictPolicy {
        self.role_conflict
    }

    pub fn materializer(&self) -> Result<&dyn QueryMaterializer, &MissingMaterializerError> {
        self.materializer.as_deref()
    }
}

///
/// MatchContext
/// Everything a committed strategy may inspect while building its result.
///

#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    pub repository: &'a RepositoryElement,
    pub entity: &'a PersistentEntity,
    pub method: &'a MethodElement,
    pub return_type: &'a ClassElement,
    pub roles: &'a RoleMap,
}

impl<'a> MatchContext<'a> {
    #[must_use]
    pub fn parameters(&self) -> &'a [ParameterElement] {
        &self.method.parameters
    }

    /// Parameters not occupying any role, in declaration order.
    pub fn bindable_parameters(&self) -> impl Iterator<Item = &'a ParameterElement> + use<'a> {
        let roles = self.roles;

        self.method
            .parameters
            .iter()
            .filter(move |p| !roles.is_parameter_in_role(&p.name))
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    #[must_use]
    pub fn has_pageable(&self) -> bool {
        self.has_role(role::PAGEABLE)
    }

    /// True when `ty` is the entity itself.
    #[must_use]
    pub fn is_entity(&self, ty: &ClassElement) -> bool {
        ty.is_assignable(self.entity.name())
    }

    /// Rejection attributed to this method.
    #[must_use]
    pub fn invalid(&self, message: impl AsRef<str>) -> ProcessError {
        ProcessError::invalid_method(format!(
            "{}.{}: {}",
            self.repository.simple_name(),
            self.method.name,
            message.as_ref()
        ))
    }
}
