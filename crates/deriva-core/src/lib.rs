//! Core vocabulary for derived repository queries: mapped entities, parameter
//! roles, the abstract query model, the materializer boundary, and the method
//! descriptors handed to runtime dispatch.
#![warn(unreachable_pub)]

pub mod descriptor;
pub mod error;
pub mod materialize;
pub mod model;
pub mod query;
pub mod role;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or materializer registries are re-exported here.
///

pub mod prelude {
    pub use crate::{
        descriptor::{DescriptorSet, MethodDescriptor, RuntimeHandler},
        model::{PersistentEntity, PersistentProperty},
        query::{
            OperationKind, QueryModel, QueryObject, RawQuery,
            predicate::{CompareOp, Predicate},
        },
        role::{RoleMap, RoleSource},
    };
}
