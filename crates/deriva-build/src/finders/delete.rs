use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, DELETE},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{
    descriptor::RuntimeHandler,
    error::ProcessError,
    query::{
        OperationKind, QueryModel,
        predicate::{CompareOp, Predicate, QueryParameter},
    },
};
use deriva_schema::prelude::*;

///
/// DeleteMethod
///
/// `deleteAll()`, `delete(entity)` and `deleteAll(entities)`. Instances are
/// matched on their identity.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DeleteMethod;

impl MethodCandidate for DeleteMethod {
    fn name(&self) -> &str {
        "delete-all"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        DELETE.matches(&method.name)
            && !criteria::has_criteria(DELETE, &method.name)
            && method.parameters.len() <= 1
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !result::is_void_or_numeric(ctx.return_type) {
            return Ok(None);
        }

        let query = QueryModel::new(ctx.entity.name());
        let (query, handler) = match ctx.bindable_parameters().collect::<Vec<_>>().as_slice() {
            [] => (query, RuntimeHandler::DeleteAll),
            [p] if ctx.is_entity(p.generic()) => (
                query.filter(identity_predicate(ctx, p, CompareOp::Eq)?),
                RuntimeHandler::DeleteOne,
            ),
            [p] if p.ty.is_iterable() && ctx.is_entity(result::element_type(p.generic())) => (
                query.filter(identity_predicate(ctx, p, CompareOp::In)?),
                RuntimeHandler::DeleteAll,
            ),
            _ => return Ok(None),
        };

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Delete, handler)
                .with_query(query)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}

// identity of the instance(s) passed as `parameter`
fn identity_predicate(
    ctx: &MatchContext<'_>,
    parameter: &ParameterElement,
    op: CompareOp,
) -> Result<Predicate, ProcessError> {
    let identity = ctx.entity.identity().ok_or_else(|| {
        ctx.invalid(format!(
            "entity [{}] declares no identity to delete by",
            ctx.entity.simple_name()
        ))
    })?;

    Ok(Predicate::compare(
        identity.name.clone(),
        op,
        QueryParameter::property_of(&parameter.name, &identity.name),
    ))
}
