use crate::query::binding::ParameterBinding;
use serde::{Deserialize, Serialize};

///
/// RawQuery
///
/// Query text declared on the method itself. Its binding was validated where
/// it was declared and bypasses materialization.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawQuery {
    text: String,
    binding: ParameterBinding,
}

impl RawQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, binding: ParameterBinding) -> Self {
        Self {
            text: text.into(),
            binding,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn binding(&self) -> &ParameterBinding {
        &self.binding
    }

    /// Leading keyword, lowercased (`select`, `delete`, `update`, ...).
    #[must_use]
    pub fn statement_keyword(&self) -> String {
        self.text
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}
