use deriva_core::{
    descriptor::RuntimeHandler,
    query::{OperationKind, QueryObject},
};

///
/// MethodMatchInfo
///
/// What a committed strategy decided: the operation, the query (if any),
/// update targets, result shape, and runtime handler.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodMatchInfo {
    operation: OperationKind,
    handler: RuntimeHandler,
    query: Option<QueryObject>,
    update_properties: Vec<String>,
    result_type: Option<String>,
}

impl MethodMatchInfo {
    #[must_use]
    pub const fn new(operation: OperationKind, handler: RuntimeHandler) -> Self {
        Self {
            operation,
            handler,
            query: None,
            update_properties: Vec::new(),
            result_type: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<QueryObject>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_update_properties(mut self, properties: Vec<String>) -> Self {
        self.update_properties = properties;
        self
    }

    #[must_use]
    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }

    #[must_use]
    pub const fn operation(&self) -> OperationKind {
        self.operation
    }

    #[must_use]
    pub const fn handler(&self) -> RuntimeHandler {
        self.handler
    }

    #[must_use]
    pub const fn query(&self) -> Option<&QueryObject> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn update_properties(&self) -> &[String] {
        &self.update_properties
    }

    #[must_use]
    pub fn result_type(&self) -> Option<&str> {
        self.result_type.as_deref()
    }
}
