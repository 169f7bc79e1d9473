//! Strategies for methods carrying their own `Query` text.

use crate::{
    context::MatchContext,
    finders::{MethodCandidate, RAW_QUERY_POSITION, result},
    info::MethodMatchInfo,
};
use deriva_core::{
    descriptor::RuntimeHandler,
    error::ProcessError,
    query::{OperationKind, ParameterBinding, RawQuery},
};
use deriva_schema::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

// `:name` placeholders; `::` casts are not placeholders
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^:\w]):([A-Za-z_]\w*)").expect("static regex"));

fn declared_query(method: &MethodElement) -> Option<String> {
    method
        .annotations
        .value::<String>(marker::QUERY, member::VALUE)
        .filter(|text| !text.trim().is_empty())
}

fn is_raw_list(method: &MethodElement) -> bool {
    method.return_type.as_ref().is_some_and(result::is_list_shaped)
}

/// The declared query with its binding: the declared `parameterBinding`
/// verbatim, else one entry per distinct placeholder.
fn raw_query(ctx: &MatchContext<'_>) -> Result<RawQuery, ProcessError> {
    let text = declared_query(ctx.method).ok_or_else(|| ctx.invalid("query text is empty"))?;

    let declared = ctx
        .method
        .annotations
        .value::<Vec<Annotation>>(marker::QUERY, member::PARAMETER_BINDING);

    let binding = match declared {
        Some(entries) => entries
            .iter()
            .map(|entry| {
                let name = entry.get::<String>(member::NAME);
                let value = entry.get::<String>(member::VALUE);
                name.zip(value)
                    .ok_or_else(|| ctx.invalid("query parameter binding requires a name and a value"))
            })
            .collect::<Result<ParameterBinding, _>>()?,
        None => placeholder_binding(ctx, &text)?,
    };

    Ok(RawQuery::new(text, binding))
}

fn placeholder_binding(ctx: &MatchContext<'_>, text: &str) -> Result<ParameterBinding, ProcessError> {
    let mut binding = ParameterBinding::new();

    for captures in PLACEHOLDER.captures_iter(text) {
        let name = &captures[1];
        if binding.value_of(name).is_some() {
            continue;
        }
        if ctx.method.parameter(name).is_none() {
            return Err(ctx.invalid(format!(
                "query placeholder [:{name}] does not match any method parameter"
            )));
        }
        binding.push(name, name);
    }

    Ok(binding)
}

fn result_type(ctx: &MatchContext<'_>) -> String {
    result::element_type(ctx.return_type).name.clone()
}

///
/// QueryListMethod
/// Declared query text returning a collection, page, slice, or stream.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct QueryListMethod;

impl MethodCandidate for QueryListMethod {
    fn name(&self) -> &str {
        "generic-list-query"
    }

    fn position(&self) -> i32 {
        RAW_QUERY_POSITION
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        declared_query(method).is_some() && is_raw_list(method)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let Some(handler) = result::find_handler(ctx)? else {
            return Ok(None);
        };

        Ok(Some(
            MethodMatchInfo::new(OperationKind::Read, handler)
                .with_query(raw_query(ctx)?)
                .with_result_type(result_type(ctx)),
        ))
    }
}

///
/// QueryOneMethod
///
/// Declared query text with any other return. Text opening with `delete` or
/// `update` runs as that statement.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct QueryOneMethod;

impl MethodCandidate for QueryOneMethod {
    fn name(&self) -> &str {
        "generic-single-query"
    }

    fn position(&self) -> i32 {
        RAW_QUERY_POSITION
    }

    fn is_method_match(&self, method: &MethodElement) -> bool {
        declared_query(method).is_some() && !is_raw_list(method)
    }

    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError> {
        let query = raw_query(ctx)?;
        let returns = ctx.return_type;

        let (operation, handler) = match query.statement_keyword().as_str() {
            "delete" | "update" if !result::is_void_or_numeric(returns) => return Ok(None),
            "delete" => (OperationKind::Delete, RuntimeHandler::DeleteAll),
            "update" => (OperationKind::Update, RuntimeHandler::Update),
            _ if returns.is_void() => return Ok(None),
            _ if returns.is_assignable(name::OPTIONAL) => {
                (OperationKind::Read, RuntimeHandler::FindOptional)
            }
            _ => (OperationKind::Read, RuntimeHandler::FindOne),
        };

        Ok(Some(
            MethodMatchInfo::new(operation, handler)
                .with_query(query)
                .with_result_type(result_type(ctx)),
        ))
    }
}
