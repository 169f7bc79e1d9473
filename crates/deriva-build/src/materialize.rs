//! Hands a match result's query to the materializer entry point for its
//! operation. Raw queries skip materialization.

use crate::info::MethodMatchInfo;
use deriva_core::{
    error::{MissingMaterializerError, ProcessError},
    materialize::{PreparedQuery, QueryMaterializer},
    query::{OperationKind, QueryObject},
};

/// Prepared query text and binding, or `None` when the result carries no
/// query at all.
pub fn materialize(
    info: &MethodMatchInfo,
    materializer: Result<&dyn QueryMaterializer, &MissingMaterializerError>,
) -> Result<Option<PreparedQuery>, ProcessError> {
    let model = match info.query() {
        None => return Ok(None),
        Some(QueryObject::Raw(raw)) => {
            return Ok(Some(PreparedQuery::new(raw.text(), raw.binding().clone())));
        }
        Some(QueryObject::Model(model)) => model,
    };

    let materializer = materializer.map_err(|err| ProcessError::MissingMaterializer(err.clone()))?;

    let prepared = match info.operation() {
        OperationKind::Delete => materializer.build_delete(model),
        OperationKind::Update => materializer.build_update(model, info.update_properties()),
        OperationKind::Insert => {
            return Err(ProcessError::query_build(
                "INSERT queries cannot be materialized",
            ));
        }
        OperationKind::Read | OperationKind::Count | OperationKind::Exists => {
            materializer.build_query(model)
        }
    };

    prepared
        .map(Some)
        .map_err(|err| ProcessError::query_build(err.to_string()))
}

///
/// TESTS
///
