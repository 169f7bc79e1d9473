//! Fixtures shared by the unit tests.

use crate::{
    context::MatchContext, finders::MethodCandidate, info::MethodMatchInfo,
    processor::{ProcessReport, Processor}, registry::StrategyRegistry, resolve, role::RoleTable,
};
use deriva_config_build::RoleConflictPolicy;
use deriva_core::{
    error::ProcessError,
    materialize::{MaterializeError, MaterializerRegistry, PreparedQuery, QueryMaterializer},
    query::{ParameterBinding, QueryModel},
    role::RoleMap,
};
use deriva_schema::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};

pub(crate) const RECORDER: &str = "recorder";
pub(crate) const USER_REPOSITORY: &str = "app.UserRepository";

pub(crate) fn class(name: &str) -> ClassElement {
    ClassElement::new(name)
}

pub(crate) fn param(name: &str, ty: ClassElement) -> ParameterElement {
    ParameterElement::new(name, ty)
}

pub(crate) fn user() -> ClassElement {
    class("app.User")
        .annotated(Annotation::new(marker::PERSISTED))
        .with_property(PropertyElement::new("id", class("long")))
        .with_property(PropertyElement::new("name", class("String")))
        .with_property(PropertyElement::new("firstName", class("String")))
        .with_property(PropertyElement::new("age", class("int")))
        .with_property(PropertyElement::new("active", class("boolean")))
}

pub(crate) fn tenant_user() -> ClassElement {
    class("app.Member")
        .annotated(Annotation::new(marker::PERSISTED))
        .with_property(PropertyElement::new("id", class("long")))
        .with_property(
            PropertyElement::new("tenant", class("TenantId"))
                .annotated(Annotation::new(marker::PARAMETER_ROLE).member(member::ROLE, "tenant")),
        )
}

pub(crate) fn list_of(ty: ClassElement) -> ClassElement {
    class("List")
        .with_supertype(name::ITERABLE)
        .with_type_argument("E", ty)
}

pub(crate) fn page_of(ty: ClassElement) -> ClassElement {
    class(name::PAGE)
        .with_supertype(name::SLICE)
        .with_supertype(name::ITERABLE)
        .with_type_argument("T", ty)
}

pub(crate) fn optional_of(ty: ClassElement) -> ClassElement {
    class(name::OPTIONAL).with_type_argument("T", ty)
}

pub(crate) fn pageable(parameter: &str) -> ParameterElement {
    param(parameter, class("PageRequest").with_supertype(name::PAGEABLE))
}

pub(crate) fn user_repository() -> RepositoryElement {
    RepositoryElement::new(USER_REPOSITORY)
        .annotated(Annotation::new(marker::REPOSITORY).member(member::QUERY_BUILDER, RECORDER))
        .with_entity(user(), Some(class("Long")))
}

/// Run `candidate` against `method` the way the processor would after
/// committing to it.
pub(crate) fn build_with(
    candidate: &dyn MethodCandidate,
    repository: &RepositoryElement,
    method: &MethodElement,
) -> Result<Option<MethodMatchInfo>, ProcessError> {
    let entity = resolve::resolve_entity(method, repository)?;
    let mut roles = RoleMap::new();
    resolve::seed_entity_roles(&entity, &mut roles);
    RoleTable::for_repository(repository).classify(
        &method.parameters,
        RoleConflictPolicy::LastWins,
        &mut roles,
    )?;

    let Some(return_type) = method.return_type.as_ref() else {
        return Ok(None);
    };
    let ctx = MatchContext {
        repository,
        entity: &entity,
        method,
        return_type,
        roles: &roles,
    };

    candidate.build(&ctx)
}

/// Process `repository` with builtin strategies and a recording materializer.
pub(crate) fn process(repository: &RepositoryElement) -> (ProcessReport, CallLog) {
    let (materializers, log) = recording_materializers();
    let processor = Processor::new(materializers).with_registry(
        StrategyRegistry::builder()
            .without_global_providers()
            .build(),
    );

    (processor.process([repository]), log)
}

///
/// Recorder
/// Materializer stub recording which entry point ran.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    Query,
    Delete,
    Update(Vec<String>),
}

pub(crate) type CallLog = Arc<Mutex<Vec<Call>>>;

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    log: CallLog,
    failure: Option<String>,
}

impl Recorder {
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            log: CallLog::default(),
            failure: Some(message.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(
        &self,
        call: Call,
        verb: &str,
        query: &QueryModel,
        leading: &[String],
    ) -> Result<PreparedQuery, MaterializeError> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        if let Some(message) = &self.failure {
            return Err(MaterializeError::new(message.clone()));
        }

        let parameters = query
            .predicate()
            .map(|p| p.parameters())
            .unwrap_or_default();
        let binding = leading
            .iter()
            .map(String::as_str)
            .chain(parameters.iter().map(|p| p.name()))
            .enumerate()
            .map(|(i, value)| (format!("p{}", i + 1), value.to_string()))
            .collect::<ParameterBinding>();

        Ok(PreparedQuery::new(format!("{verb} {}", query.entity()), binding))
    }
}

impl QueryMaterializer for Recorder {
    fn build_query(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
        self.record(Call::Query, "SELECT", query, &[])
    }

    fn build_delete(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
        self.record(Call::Delete, "DELETE", query, &[])
    }

    fn build_update(
        &self,
        query: &QueryModel,
        properties: &[String],
    ) -> Result<PreparedQuery, MaterializeError> {
        self.record(Call::Update(properties.to_vec()), "UPDATE", query, properties)
    }
}

pub(crate) fn recording_materializers() -> (MaterializerRegistry, CallLog) {
    let log = CallLog::default();
    let shared = Arc::clone(&log);

    let mut materializers = MaterializerRegistry::new();
    materializers.register(RECORDER, move || {
        Ok(Box::new(Recorder {
            log: Arc::clone(&shared),
            failure: None,
        }) as Box<dyn QueryMaterializer>)
    });

    (materializers, log)
}
