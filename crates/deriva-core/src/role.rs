use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a parameter carrying a paging request.
pub const PAGEABLE: &str = "PAGEABLE";

/// Role of a parameter carrying a sort specification.
pub const SORT: &str = "SORT";

///
/// RoleSource
/// Where a role's value comes from at runtime.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// A method parameter, by name.
    Parameter(String),

    /// An entity property declaring itself the role's default.
    Property(String),
}

impl RoleSource {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Parameter(name) | Self::Property(name) => name,
        }
    }

    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }
}

///
/// RoleMap
///
/// Role name → the single source occupying it. Built fresh for every method;
/// an assignment replaces whatever held the role before.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleMap(BTreeMap<String, RoleSource>);

impl RoleMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Occupy `role` with `source`, returning the previous occupant.
    pub fn assign(&mut self, role: impl Into<String>, source: RoleSource) -> Option<RoleSource> {
        self.0.insert(role.into(), source)
    }

    #[must_use]
    pub fn source_name(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(RoleSource::name)
    }

    /// True when the named parameter occupies at least one role.
    #[must_use]
    pub fn is_parameter_in_role(&self, parameter: &str) -> bool {
        self.0
            .values()
            .any(|source| source.is_parameter() && source.name() == parameter)
    }

    /// Role name → source name, the shape recorded on descriptors.
    #[must_use]
    pub fn to_names(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(role, source)| (role.clone(), source.name().to_string()))
            .collect()
    }
}

///
/// TESTS
///
