//! Return-shape rules shared by the strategies.

use crate::context::MatchContext;
use deriva_core::{descriptor::RuntimeHandler, error::ProcessError};
use deriva_schema::prelude::*;

/// True for return types read as a collection of rows.
pub(crate) fn is_list_shaped(ty: &ClassElement) -> bool {
    ty.is_assignable(name::PAGE)
        || ty.is_assignable(name::SLICE)
        || ty.is_assignable(name::STREAM)
        || ty.is_iterable()
}

/// Find handler for the return type, or `None` when no runtime
/// implementation can produce it.
pub(crate) fn find_handler(ctx: &MatchContext<'_>) -> Result<Option<RuntimeHandler>, ProcessError> {
    let ty = ctx.return_type;

    let handler = if ty.is_assignable(name::PAGE) {
        require_pageable(ctx, name::PAGE)?;
        RuntimeHandler::FindPage
    } else if ty.is_assignable(name::SLICE) {
        require_pageable(ctx, name::SLICE)?;
        RuntimeHandler::FindSlice
    } else if ty.is_assignable(name::STREAM) {
        RuntimeHandler::FindStream
    } else if ty.is_iterable() {
        RuntimeHandler::FindAll
    } else if ty.is_assignable(name::OPTIONAL) {
        RuntimeHandler::FindOptional
    } else if ctx.is_entity(ty) {
        RuntimeHandler::FindOne
    } else {
        return Ok(None);
    };

    Ok(Some(handler))
}

/// Void or a numeric count of affected rows.
pub(crate) fn is_void_or_numeric(ty: &ClassElement) -> bool {
    ty.is_void() || ty.is_numeric()
}

/// Element type of a single or collection return, else the return type.
pub(crate) fn element_type(ty: &ClassElement) -> &ClassElement {
    if is_list_shaped(ty) || ty.is_assignable(name::OPTIONAL) {
        ty.first_type_argument().unwrap_or(ty)
    } else {
        ty
    }
}

fn require_pageable(ctx: &MatchContext<'_>, shape: &str) -> Result<(), ProcessError> {
    if ctx.has_pageable() {
        Ok(())
    } else {
        Err(ctx.invalid(format!(
            "methods returning {shape} must declare a Pageable parameter"
        )))
    }
}
