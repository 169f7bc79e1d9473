use crate::{context::MatchContext, info::MethodMatchInfo};
use deriva_core::{descriptor::MethodDescriptor, materialize::PreparedQuery};
use tracing::debug;

/// Record the final decision for one method.
#[must_use]
pub fn emit(
    ctx: &MatchContext<'_>,
    info: MethodMatchInfo,
    prepared: Option<PreparedQuery>,
    id_type: Option<String>,
) -> MethodDescriptor {
    let page = info.query().map(|q| q.page()).unwrap_or_default();
    let raw = info.query().is_some_and(|q| q.is_raw());

    let entity_parameter = ctx
        .parameters()
        .iter()
        .find(|p| ctx.is_entity(p.generic()))
        .map(|p| p.name.clone());

    let (query, parameter_binding) = match prepared {
        Some(prepared) => (Some(prepared.text), Some(prepared.binding)),
        None => (None, None),
    };

    let descriptor = MethodDescriptor {
        interface: ctx.repository.name.clone(),
        signature: ctx.method.signature(),
        operation: info.operation(),
        root_entity: ctx.entity.name().to_string(),
        id_type,
        handler: info.handler(),
        result_type: info.result_type().map(ToString::to_string),
        roles: ctx.roles.to_names(),
        entity_parameter,
        parameter_binding,
        query,
        raw,
        max: page.max,
        offset: (page.offset > 0).then_some(page.offset),
        update_properties: info.update_properties().to_vec(),
    };

    debug!(
        interface = %descriptor.interface,
        method = %descriptor.signature,
        handler = %descriptor.handler,
        "emitted method descriptor"
    );

    descriptor
}
