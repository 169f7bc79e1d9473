use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, EXISTS},
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
/// ExistsByMethod
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ExistsByMethod;

impl MethodCandidate for ExistsByMethod {
    fn name(&self) -> &str {
        "existence-by-derived-name"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        criteria::has_criteria(EXISTS, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !ctx.return_type.is_boolean() {
            return Ok(None);
        }
        let query = criteria::derive(ctx, EXISTS)?
            .into_query(ctx)?
            .project(Projection::Exists);

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Exists, RuntimeHandler::Exists)
                .with_query(query)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
