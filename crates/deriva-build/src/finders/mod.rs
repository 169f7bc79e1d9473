//! Builtin candidate strategies.
//!
//! Each strategy pairs a structural acceptance predicate over the method
//! signature with a builder that runs only after the strategy has been
//! committed to.

mod count;
mod count_by;
mod criteria;
mod delete;
mod delete_by;
mod exists_by;
mod find_by;
mod list;
mod query;
mod result;
mod save;
mod update;
mod update_by;

pub use count::CountMethod;
pub use count_by::CountByMethod;
pub use delete::DeleteMethod;
pub use delete_by::DeleteByMethod;
pub use exists_by::ExistsByMethod;
pub use find_by::FindByMethod;
pub use list::ListMethod;
pub use query::{QueryListMethod, QueryOneMethod};
pub use save::{SaveAllMethod, SaveMethod};
pub use update::UpdateMethod;
pub use update_by::UpdateByMethod;

use crate::{context::MatchContext, info::MethodMatchInfo};
use deriva_core::error::ProcessError;
use deriva_schema::prelude::*;

/// Default position; lower positions are tried first.
pub const DEFAULT_POSITION: i32 = 0;

/// Position of the raw-query strategies, ahead of every name convention.
pub const RAW_QUERY_POSITION: i32 = -100;

///
/// MethodCandidate
///
/// A pluggable matching strategy. Strategies are stateless and shared across
/// every method of the run.
///

pub trait MethodCandidate: Send + Sync {
    fn name(&self) -> &str;

    fn position(&self) -> i32 {
        DEFAULT_POSITION
    }

    /// Structural acceptance; accepting commits the method to this strategy.
    fn is_method_match(&self, method: &MethodElement) -> bool;

    /// `Ok(None)` means no runtime implementation fits the signature.
    fn build(&self, ctx: &MatchContext<'_>) -> Result<Option<MethodMatchInfo>, ProcessError>;
}

/// The builtin strategies, in registration order.
#[must_use]
pub fn builtin() -> Vec<Box<dyn MethodCandidate>> {
    vec![
        Box::new(ExistsByMethod),
        Box::new(FindByMethod),
        Box::new(SaveMethod),
        Box::new(SaveAllMethod),
        Box::new(ListMethod),
        Box::new(CountMethod),
        Box::new(DeleteByMethod),
        Box::new(DeleteMethod),
        Box::new(QueryListMethod),
        Box::new(QueryOneMethod),
        Box::new(CountByMethod),
        Box::new(UpdateMethod),
        Box::new(UpdateByMethod),
    ]
}
