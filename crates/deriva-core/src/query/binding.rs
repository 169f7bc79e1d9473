use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Binding
/// One query placeholder and the parameter (or parameter path) feeding it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

///
/// ParameterBinding
/// Ordered placeholder bindings of a materialized or raw query.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterBinding(Vec<Binding>);

impl ParameterBinding {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Binding {
            name: name.into(),
            value: value.into(),
        });
    }

    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.value.as_str())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParameterBinding {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut binding = Self::new();
        for (name, value) in iter {
            binding.push(name, value);
        }

        binding
    }
}
