//! Build-time engine that derives query semantics for repository methods.
//!
//! For every abstract method of a repository interface the processor resolves
//! the mapped entity, classifies parameter roles, commits to the first
//! accepting candidate strategy, materializes the resulting query, and emits
//! a `MethodDescriptor`, or reports exactly one diagnostic instead.
#![warn(unreachable_pub)]

pub mod context;
pub mod diagnostic;
pub mod emit;
pub mod finders;
pub mod info;
pub mod materialize;
pub mod matcher;
pub mod processor;
pub mod registry;
pub mod resolve;
pub mod role;

#[cfg(test)]
mod test_support;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        context::MatchContext,
        diagnostic::{Diagnostic, Diagnostics, Target},
        finders::MethodCandidate,
        info::MethodMatchInfo,
        processor::{ProcessReport, Processor},
        registry::{CandidateProvider, DiscoveryError, StrategyRegistry},
    };
    pub use deriva_config_build::{ProcessorConfig, RoleConflictPolicy};
    pub use deriva_core::{
        error::{MissingMaterializerError, ProcessError, UnimplementableReason},
        materialize::{MaterializeError, MaterializerRegistry, PreparedQuery, QueryMaterializer},
        prelude::*,
        query::ParameterBinding,
    };
    pub use deriva_schema::prelude::*;
}
