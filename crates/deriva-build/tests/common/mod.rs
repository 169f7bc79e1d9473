#![allow(dead_code)]

use deriva_build::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};

pub const MATERIALIZER: &str = "recording";

pub fn class(name: &str) -> ClassElement {
    ClassElement::new(name)
}

pub fn param(name: &str, ty: ClassElement) -> ParameterElement {
    ParameterElement::new(name, ty)
}

pub fn string(name: &str) -> ParameterElement {
    param(name, class("String"))
}

pub fn user() -> ClassElement {
    class("app.User")
        .annotated(Annotation::new(marker::PERSISTED))
        .with_property(PropertyElement::new("id", class("long")))
        .with_property(PropertyElement::new("name", class("String")))
        .with_property(PropertyElement::new("age", class("int")))
}

pub fn list_of(ty: ClassElement) -> ClassElement {
    class("List")
        .with_supertype(name::ITERABLE)
        .with_type_argument("E", ty)
}

pub fn page_of(ty: ClassElement) -> ClassElement {
    class(name::PAGE)
        .with_supertype(name::SLICE)
        .with_supertype(name::ITERABLE)
        .with_type_argument("T", ty)
}

pub fn pageable(parameter: &str) -> ParameterElement {
    param(parameter, class("PageRequest").with_supertype(name::PAGEABLE))
}

pub fn query(text: &str) -> Annotation {
    Annotation::new(marker::QUERY).member(member::VALUE, text)
}

/// `UserRepository` typed over `app.User` using the recording materializer.
pub fn repository() -> RepositoryElement {
    repository_using(MATERIALIZER)
}

pub fn repository_using(materializer: &str) -> RepositoryElement {
    RepositoryElement::new("app.UserRepository")
        .annotated(Annotation::new(marker::REPOSITORY).member(member::QUERY_BUILDER, materializer))
        .with_entity(user(), Some(class("Long")))
}

///
/// Call
/// Materializer entry point that ran.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Query,
    Delete,
    Update(Vec<String>),
}

#[derive(Clone, Debug, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }
}

///
/// Recording
/// Materializer stub: renders `<VERB> <entity>` and binds `p1..pn`.
///

pub struct Recording {
    log: CallLog,
    failure: Option<String>,
}

impl Recording {
    fn prepare(
        &self,
        call: Call,
        verb: &str,
        query: &QueryModel,
        leading: &[String],
    ) -> Result<PreparedQuery, MaterializeError> {
        self.log.push(call);
        if let Some(message) = &self.failure {
            return Err(MaterializeError::new(message.clone()));
        }

        let parameters = query.predicate().map(Predicate::parameters).unwrap_or_default();
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

impl QueryMaterializer for Recording {
    fn build_query(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
        self.prepare(Call::Query, "SELECT", query, &[])
    }

    fn build_delete(&self, query: &QueryModel) -> Result<PreparedQuery, MaterializeError> {
        self.prepare(Call::Delete, "DELETE", query, &[])
    }

    fn build_update(
        &self,
        query: &QueryModel,
        properties: &[String],
    ) -> Result<PreparedQuery, MaterializeError> {
        self.prepare(Call::Update(properties.to_vec()), "UPDATE", query, properties)
    }
}

/// Registry holding the recording materializer; `failure` makes every
/// entry point fail with that message.
pub fn materializers(failure: Option<&str>) -> (MaterializerRegistry, CallLog) {
    let log = CallLog::default();
    let shared = log.clone();
    let failure = failure.map(ToString::to_string);

    let mut registry = MaterializerRegistry::new();
    registry.register(MATERIALIZER, move || {
        Ok(Box::new(Recording {
            log: shared.clone(),
            failure: failure.clone(),
        }) as Box<dyn QueryMaterializer>)
    });

    (registry, log)
}

/// Processor over the builtin strategies only.
pub fn processor(materializers: MaterializerRegistry) -> Processor {
    Processor::new(materializers).with_registry(
        StrategyRegistry::builder()
            .without_global_providers()
            .build(),
    )
}

/// Process one repository with builtin strategies and a working recorder.
pub fn process(repository: &RepositoryElement) -> (ProcessReport, CallLog) {
    let (materializers, log) = materializers(None);

    (processor(materializers).process([repository]), log)
}
