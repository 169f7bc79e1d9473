use crate::{
    context::MatchContext,
    finders::{
        MethodCandidate,
        criteria::{self, UPDATE},
        result,
    },
    info::MethodMatchInfo,
};
use deriva_core::{
    descriptor::RuntimeHandler,
    error::ProcessError,
    query::{
        OperationKind, QueryModel,
        predicate::{Predicate, QueryParameter},
    },
};
use deriva_schema::prelude::*;

///
/// UpdateMethod
///
/// `update(id, prop…)`: the parameter named after the identity selects the
/// row, every other parameter names a property to update.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateMethod;

impl MethodCandidate for UpdateMethod {
    fn name(&self) -> &str {
        "update"
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        UPDATE.matches(&method.name)
            && !criteria::has_criteria(UPDATE, &method.name)
            && method.parameters.len() > 1
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        if !result::is_void_or_numeric(ctx.return_type) {
            return Ok(None);
        }
        let Some(identity) = ctx.entity.identity() else {
            return Err(ctx.invalid(format!(
                "entity [{}] declares no identity to update by",
                ctx.entity.simple_name()
            )));
        };

        let mut id_parameter = None;
        let mut properties = Vec::new();
        for parameter in ctx.bindable_parameters() {
            if parameter.name == identity.name && id_parameter.is_none() {
                id_parameter = Some(parameter);
            } else {
                let property = ctx
                    .entity
                    .property(&parameter.name)
                    .ok_or_else(|| criteria::no_such_property(ctx, &parameter.name))?;
                properties.push(property.name.clone());
            }
        }

        let Some(id_parameter) = id_parameter else {
            return Err(ctx.invalid(format!(
                "update methods must declare a parameter named [{}]",
                identity.name
            )));
        };
        if properties.is_empty() {
            return Err(ctx.invalid("update methods must declare at least one property to update"));
        }

        let query = QueryModel::new(ctx.entity.name()).filter(Predicate::equals(
            identity.name.clone(),
            QueryParameter::new(id_parameter.name.clone()),
        ));

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Update, RuntimeHandler::Update)
                .with_query(query)
                .with_update_properties(properties)
                .with_result_type(ctx.return_type.name.clone()),
        ))
    }
}
