use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, DELETE},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{descriptor::RuntimeHandler, error::ProcessError, query::OperationKind};
use deriva_schema::prelude::*;

///
/// DeleteByMethod
/// `delete…By…`; removes every row matching the derived criteria.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DeleteByMethod;

impl MethodCandidate for DeleteByMethod {
    fn name(&self) -> &str {
        "delete-by-derived-name"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        criteria::has_criteria(DELETE, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !result::is_void_or_numeric(ctx.return_type) {
            return Ok(None);
        }
        let query = criteria::derive(ctx, DELETE)?.into_query(ctx)?;

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Delete, RuntimeHandler::DeleteAll)
                .with_query(query)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
