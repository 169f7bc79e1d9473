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
/// CountByMethod
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CountByMethod;

impl MethodCandidate for CountByMethod {
    fn name(&self) -> &str {
        "count-by-derived-name"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        criteria::has_criteria(COUNT, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !ctx.return_type.is_numeric() {
            return Ok(None);
        }
        let query = criteria::derive(ctx, COUNT)?
            .into_query(ctx)?
            .project(Projection::Count);

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Count, RuntimeHandler::Count)
                .with_query(query)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
