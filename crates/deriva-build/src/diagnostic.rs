use derive_more::{Deref, Display, IntoIterator};
use deriva_core::error::ProcessError;

///
/// Target
/// What a diagnostic is bound to.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Target {
    #[display("<run>")]
    Run,
    #[display("{_0}")]
    Interface(String),
    #[display("{interface}.{signature}")]
    Method { interface: String, signature: String },
}

impl Target {
    #[must_use]
    pub fn method(interface: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::Method {
            interface: interface.into(),
            signature: signature.into(),
        }
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Diagnostic {
    #[display("error: {target}: {error}")]
    Error { target: Target, error: ProcessError },
    #[display("warning: {target}: {message}")]
    Warning { target: Target, message: String },
}

impl Diagnostic {
    #[must_use]
    pub const fn target(&self) -> &Target {
        match self {
            Self::Error { target, .. } | Self::Warning { target, .. } => target,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ProcessError> {
        match self {
            Self::Error { error, .. } => Some(error),
            Self::Warning { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

///
/// Diagnostics
/// Ordered diagnostics of one processing run.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn error(&mut self, target: Target, error: ProcessError) {
        self.0.push(Diagnostic::Error { target, error });
    }

    pub fn warning(&mut self, target: Target, message: impl Into<String>) {
        self.0.push(Diagnostic::Warning {
            target,
            message: message.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = (&Target, &ProcessError)> {
        self.0.iter().filter_map(|d| match d {
            Diagnostic::Error { target, error } => Some((target, error)),
            Diagnostic::Warning { .. } => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = (&Target, &str)> {
        self.0.iter().filter_map(|d| match d {
            Diagnostic::Warning { target, message } => Some((target, message.as_str())),
            Diagnostic::Error { .. } => None,
        })
    }

    /// Diagnostics bound to one method. The items borrow `self` only.
    pub fn for_method<'a, 'k>(
        &'a self,
        interface: &'k str,
        signature: &'k str,
    ) -> impl Iterator<Item = &'a Diagnostic> + use<'a, 'k> {
        self.0.iter().filter(move |d| {
            matches!(
                d.target(),
                Target::Method { interface: i, signature: s } if i == interface && s == signature
            )
        })
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }
}

///
/// TESTS
///
