use deriva_schema::prelude::*;

/// Property name treated as the identity when no property carries `Id`.
pub const DEFAULT_IDENTITY: &str = "id";

///
/// PersistentProperty
/// Query-relevant view of one entity property.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PersistentProperty {
    pub name: String,
    pub type_name: String,

    /// Role this property supplies a default for, if any.
    pub role: Option<String>,
}

impl PersistentProperty {
    fn from_element(element: &PropertyElement) -> Self {
        Self {
            name: element.name.clone(),
            type_name: element.ty.name.clone(),
            role: element.role(),
        }
    }
}

///
/// PersistentEntity
///
/// Mapped entity resolved for one method. Built from a class carrying the
/// persisted marker; lives only as long as that method's processing.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PersistentEntity {
    name: String,
    identity: Option<PersistentProperty>,
    properties: Vec<PersistentProperty>,
}

impl PersistentEntity {
    /// Build the entity view of a class. The identity is the property
    /// marked `Id`, falling back to a property named `id`.
    #[must_use]
    pub fn from_class(class: &ClassElement) -> Self {
        let identity_index = class
            .properties
            .iter()
            .position(PropertyElement::is_identity)
            .or_else(|| {
                class
                    .properties
                    .iter()
                    .position(|p| p.name == DEFAULT_IDENTITY)
            });

        let mut identity = None;
        let mut properties = Vec::with_capacity(class.properties.len());
        for (i, element) in class.properties.iter().enumerate() {
            let property = PersistentProperty::from_element(element);
            if Some(i) == identity_index {
                identity = Some(property);
            } else {
                properties.push(property);
            }
        }

        Self {
            name: class.name.clone(),
            identity,
            properties,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&PersistentProperty> {
        self.identity.as_ref()
    }

    /// Non-identity properties in declaration order.
    #[must_use]
    pub fn persistent_properties(&self) -> &[PersistentProperty] {
        &self.properties
    }

    /// Look up any property by name, identity included.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PersistentProperty> {
        self.identity
            .iter()
            .chain(&self.properties)
            .find(|p| p.name == name)
    }

    /// `(role, property)` for every property declaring a role stereotype.
    pub fn role_properties(&self) -> impl Iterator<Item = (&str, &PersistentProperty)> {
        self.identity
            .iter()
            .chain(&self.properties)
            .filter_map(|p| p.role.as_deref().map(|role| (role, p)))
    }
}

///
/// TESTS
///
