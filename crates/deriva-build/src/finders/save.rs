use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, SAVE},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{descriptor::RuntimeHandler, error::ProcessError, query::OperationKind};
use deriva_schema::prelude::*;

// save-style name with exactly one parameter, iterable or not
fn is_save_shape(method: &MethodElement, iterable: bool) -> bool {
    SAVE.matches(&method.name)
        && !criteria::has_criteria(SAVE, &method.name)
        && matches!(method.parameters.as_slice(), [p] if p.ty.is_iterable() == iterable)
}

///
/// SaveMethod
/// Persists one entity instance.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SaveMethod;

impl MethodCandidate for SaveMethod {
    fn name(&self) -> &str {
        "save-single"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        is_save_shape(method, false)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let [parameter] = ctx.parameters() else {
            return Ok(None);
        };
        let returns = ctx.return_type;
        if !ctx.is_entity(parameter.generic()) || !(returns.is_void() || ctx.is_entity(returns)) {
            return Ok(None);
        }

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Insert, RuntimeHandler::SaveEntity)
                .with_result_type(ctx.entity.name()),
        ))
    }
}

///
/// SaveAllMethod
/// Persists an iterable of entity instances.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SaveAllMethod;

impl MethodCandidate for SaveAllMethod {
    fn name(&self) -> &str {
        "save-batch"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        is_save_shape(method, true)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let [parameter] = ctx.parameters() else {
            return Ok(None);
        };
        let returns = ctx.return_type;
        if !ctx.is_entity(result::element_type(parameter.generic()))
            || !(returns.is_void() || returns.is_iterable())
        {
            return Ok(None);
        }

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Insert, RuntimeHandler::SaveAll)
                .with_result_type(ctx.entity.name()),
        ))
    }
}
