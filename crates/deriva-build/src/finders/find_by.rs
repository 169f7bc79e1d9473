use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, FIND},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{error::ProcessError, query::OperationKind};
use deriva_schema::prelude::*;

///
/// FindByMethod
/// `find…By…` and its synonyms.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FindByMethod;

impl MethodCandidate for FindByMethod {
    fn name(&self) -> &str {
        "find-by-derived-name"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        criteria::has_criteria(FIND, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let Some(handler) = result::find_handler(ctx)? else {
            return Ok(None);
        };
        let query = criteria::derive(ctx, FIND)?.into_query(ctx)?;

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Read, handler)
                .with_query(query)
                .with_result_type(ctx.entity.name()),
        ))
    }
}
