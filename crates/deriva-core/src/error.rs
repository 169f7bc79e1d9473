use derive_more::Display;
use thiserror::Error as ThisError;

///
/// ProcessError
///
/// Build-time diagnostic raised while deriving one method (or, for
/// `MissingMaterializer`, one repository). Never aborts the run.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProcessError {
    #[error("unable to establish persistent entity to query")]
    EntityResolution,

    #[error("unable to implement repository method {interface}.{method}(..): {reason}")]
    Unimplementable {
        interface: String,
        method: String,
        reason: UnimplementableReason,
    },

    #[error("invalid query method: {message}")]
    QueryBuild { message: String },

    #[error(transparent)]
    MissingMaterializer(#[from] MissingMaterializerError),

    /// A committed strategy rejected the method with its own diagnostic.
    #[error("{message}")]
    InvalidMethod { message: String },

    #[error("parameters '{first}' and '{second}' both qualify for role '{role}'")]
    AmbiguousRole {
        role: String,
        first: String,
        second: String,
    },
}

impl ProcessError {
    pub fn invalid_method(message: impl Into<String>) -> Self {
        Self::InvalidMethod {
            message: message.into(),
        }
    }

    pub fn query_build(message: impl Into<String>) -> Self {
        Self::QueryBuild {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn unimplementable_reason(&self) -> Option<UnimplementableReason> {
        match self {
            Self::Unimplementable { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

///
/// UnimplementableReason
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum UnimplementableReason {
    /// No strategy accepted the method.
    #[display("no possible implementations found")]
    NoImplementations,

    /// The committed strategy produced no result.
    #[display("no possible runtime implementations found")]
    NoRuntimeImplementations,
}

///
/// MissingMaterializerError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MissingMaterializerError {
    #[error("no query materializer configured for repository")]
    NotConfigured,

    #[error("query materializer '{0}' not present on the processor path")]
    NotRegistered(String),

    #[error("query materializer '{name}' could not be instantiated: {message}")]
    Instantiation { name: String, message: String },
}
