//! Run driver: interfaces → methods → descriptors or diagnostics.

use crate::{
    context::{InterfaceContext, MatchContext},
    diagnostic::{Diagnostics, Target},
    emit::emit,
    materialize::materialize,
    matcher::MatchState,
    registry::StrategyRegistry,
    resolve::{resolve_entity, resolve_id_type, seed_entity_roles},
};
use deriva_config_build::ProcessorConfig;
use deriva_core::{
    descriptor::{DescriptorSet, MethodDescriptor},
    error::ProcessError,
    materialize::MaterializerRegistry,
    role::RoleMap,
};
use deriva_schema::prelude::*;
use tracing::{debug, info_span, warn};

///
/// ProcessReport
/// Everything a run produced.
///

#[derive(Clone, Debug, Default)]
pub struct ProcessReport {
    pub descriptors: DescriptorSet,
    pub diagnostics: Diagnostics,
}

impl ProcessReport {
    #[must_use]
    pub fn descriptor(&self, interface: &str, signature: &str) -> Option<&MethodDescriptor> {
        self.descriptors.get(interface, signature)
    }

    /// First error reported against a method.
    #[must_use]
    pub fn method_error(&self, interface: &str, signature: &str) -> Option<&ProcessError> {
        self.diagnostics
            .for_method(interface, signature)
            .find_map(|d| d.error())
    }

    #[must_use]
    pub fn interface_errors(&self, interface: &str) -> Vec<&ProcessError> {
        self.diagnostics
            .errors()
            .filter(|(target, _)| matches!(target, Target::Interface(name) if name == interface))
            .map(|(_, error)| error)
            .collect()
    }
}

///
/// Processor
///
/// Holds the run-wide immutable state: configuration, the sorted strategy
/// registry, and the named materializers.
///

pub struct Processor {
    config: ProcessorConfig,
    registry: StrategyRegistry,
    materializers: MaterializerRegistry,
}

impl Processor {
    /// Builtin strategies (plus registered providers) and the given
    /// materializers, with default configuration.
    #[must_use]
    pub fn new(materializers: MaterializerRegistry) -> Self {
        Self {
            config: ProcessorConfig::default(),
            registry: StrategyRegistry::builtin(),
            materializers,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process every repository; discovery warnings are reported first.
    pub fn process<'a>(
        &self,
        repositories: impl IntoIterator<Item = &'a RepositoryElement>,
    ) -> ProcessReport {
        let mut report = ProcessReport::default();

        for warning in self.registry.discovery_warnings() {
            report.diagnostics.warning(Target::Run, warning.to_string());
        }
        for repository in repositories {
            self.process_repository(repository, &mut report);
        }

        report
    }

    /// Process one repository into `report`.
    pub fn process_repository(&self, repository: &RepositoryElement, report: &mut ProcessReport) {
        let span = info_span!("interface", name = %repository.name);
        let _guard = span.enter();

        let interface = InterfaceContext::new(repository, &self.config, &self.materializers);
        if let Err(err) = interface.materializer() {
            warn!(error = %err, "query materializer unavailable");
            report.diagnostics.error(
                Target::Interface(repository.name.clone()),
                ProcessError::MissingMaterializer(err.clone()),
            );
        }

        for method in repository.methods.iter().filter(|m| m.is_processable()) {
            let target = Target::method(&repository.name, method.signature());

            match self.process_method(&interface, method) {
                Ok(descriptor) => {
                    report.descriptors.insert(descriptor);
                }
                Err(err) => {
                    debug!(method = %target, error = %err, "method rejected");
                    report.diagnostics.error(target, err);
                }
            }
        }
    }

    /// Derive one method: commit, resolve, classify, build, materialize,
    /// emit. The first failing stage decides the diagnostic.
    pub fn process_method(
        &self,
        interface: &InterfaceContext<'_>,
        method: &MethodElement,
    ) -> Result<MethodDescriptor, ProcessError> {
        let repository = interface.repository();
        let Some(return_type) = method.return_type.as_ref() else {
            return Err(ProcessError::invalid_method(format!(
                "{}.{}: method declares no return type",
                repository.simple_name(),
                method.name
            )));
        };

        let state = MatchState::Unresolved.commit(&self.registry, repository, method);
        if let MatchState::Failed(err) = state {
            return Err(err);
        }

        let entity = resolve_entity(method, repository)?;

        let mut roles = RoleMap::new();
        seed_entity_roles(&entity, &mut roles);
        interface
            .role_table()
            .classify(&method.parameters, interface.role_conflict(), &mut roles)?;

        let ctx = MatchContext {
            repository,
            entity: &entity,
            method,
            return_type,
            roles: &roles,
        };
        let info = state.build(&ctx).finish().unwrap_or_else(|| {
            Err(ProcessError::invalid_method("method matching did not complete"))
        })?;

        let prepared = materialize(&info, interface.materializer())?;
        let id_type = resolve_id_type(&entity, repository);

        Ok(emit(&ctx, info, prepared, id_type))
    }
}
