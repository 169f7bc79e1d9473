use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, UPDATE},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{descriptor::RuntimeHandler, error::ProcessError, query::OperationKind};
use deriva_schema::prelude::*;

///
/// UpdateByMethod
///
/// `update…By…`: parameters consumed by the criteria select the rows, the
/// remaining parameters name the properties to update.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateByMethod;

impl MethodCandidate for UpdateByMethod {
    fn name(&self) -> &str {
        "update-by-derived-name"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        criteria::has_criteria(UPDATE, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !result::is_void_or_numeric(ctx.return_type) {
            return Ok(None);
        }

        let derived = criteria::derive(ctx, UPDATE)?;
        let properties = derived
            .remaining
            .iter()
            .map(|p| {
                ctx.entity
                    .property(&p.name)
                    .map(|property| property.name.clone())
                    .ok_or_else(|| criteria::no_such_property(ctx, &p.name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if properties.is_empty() {
            return Err(ctx.invalid("update methods must declare at least one property to update"));
        }

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Update, RuntimeHandler::Update)
                .with_query(derived.query)
                .with_update_properties(properties)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
