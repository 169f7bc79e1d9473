use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, COUNT},
    },
    info::MethodMatchInfo,
};
use deriva_core::{
    descriptor::RuntimeHandler,
    error::ProcessError,
    query::{OperationKind, Projection},
};
use deriva_schema::prelude::*;

///
/// CountMethod
/// `count` without criteria; parameters match entity properties by name.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CountMethod;

impl MethodCandidate for CountMethod {
    fn name(&self) -> &str {
        "count-all"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        COUNT.matches(&method.name) && !criteria::has_criteria(COUNT, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !ctx.return_type.is_numeric() {
            return Ok(None);
        }

        let derived = criteria::derive(ctx, COUNT)?;
        let predicate = criteria::named_criteria(ctx, &derived.remaining)?;
        let query = derived
            .query
            .filter_opt(predicate)
            .project(Projection::Count);

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Count, RuntimeHandler::Count)
                .with_query(query)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
