use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, LIST},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{error::ProcessError, query::OperationKind};
use deriva_schema::prelude::*;

///
/// ListMethod
///
/// `list`, `findAll` and other find verbs without criteria. Parameters
/// outside any role are matched by name against entity properties.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ListMethod;

impl MethodCandidate for ListMethod {
    fn name(&self) -> &str {
        "list-all"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        LIST.matches(&method.name) && !criteria::has_criteria(LIST, &method.name)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let Some(handler) = result::find_handler(ctx)? else {
            return Ok(None);
        };

        let derived = criteria::derive(ctx, LIST)?;
        let predicate = criteria::named_criteria(ctx, &derived.remaining)?;

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Read, handler)
                .with_query(derived.query.filter_opt(predicate))
                .with_result_type(ctx.entity.name()),
        ))
    }
}
