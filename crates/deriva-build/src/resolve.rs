//! Entity resolution.

use deriva_core::{
    error::ProcessError,
    model::PersistentEntity,
    role::{RoleMap, RoleSource},
};
use deriva_schema::prelude::*;

/// Resolve the entity `method` operates on.
///
/// Order: the return type (depth-first, left-to-right through type
/// arguments), then the repository's `E` argument, then the parameter types.
pub fn resolve_entity(
    method: &MethodElement,
    repository: &RepositoryElement,
) -> Result<PersistentEntity, ProcessError> {
    method
        .return_type
        .as_ref()
        .and_then(find_persisted)
        .or_else(|| repository.entity_type())
        .or_else(|| {
            method
                .parameters
                .iter()
                .find_map(|p| find_persisted(p.generic()))
        })
        .map(PersistentEntity::from_class)
        .ok_or(ProcessError::EntityResolution)
}

/// First type carrying the persisted marker, searching `ty` itself and then
/// its type arguments depth-first.
#[must_use]
pub fn find_persisted(ty: &ClassElement) -> Option<&ClassElement> {
    if ty.is_persisted() {
        return Some(ty);
    }

    ty.type_argument_values().find_map(find_persisted)
}

/// Register every role-declaring entity property as that role's default.
pub fn seed_entity_roles(entity: &PersistentEntity, roles: &mut RoleMap) {
    for (role, property) in entity.role_properties() {
        roles.assign(role, RoleSource::Property(property.name.clone()));
    }
}

/// Identity type: the repository's `ID` argument, else the identity
/// property's declared type.
#[must_use]
pub fn resolve_id_type(entity: &PersistentEntity, repository: &RepositoryElement) -> Option<String> {
    repository
        .id_type()
        .map(|ty| ty.name.clone())
        .or_else(|| entity.identity().map(|p| p.type_name.clone()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn nested_return_type_resolves_first_persisted_argument() {
        let ret = ClassElement::new("Map")
            .with_type_argument("K", ClassElement::new("String"))
            .with_type_argument("V", page_of(user()));
        let method = MethodElement::new("findGrouped").returning(ret);

        let entity = resolve_entity(&method, &RepositoryElement::new("Repo")).unwrap();
        assert_eq!(entity.name(), "app.User");
    }

    #[test]
    fn falls_back_to_repository_then_parameters() {
        let method = MethodElement::new("count").returning(ClassElement::new("long"));
        let typed = user_repository();
        assert_eq!(resolve_entity(&method, &typed).unwrap().name(), "app.User");

        let method = MethodElement::new("save")
            .with_parameter(ParameterElement::new("user", user()))
            .returning(ClassElement::new("void"));
        let untyped = RepositoryElement::new("Repo");
        assert_eq!(resolve_entity(&method, &untyped).unwrap().name(), "app.User");
    }

    #[test]
    fn unresolvable_entity_is_an_error() {
        let method = MethodElement::new("findByName")
            .with_parameter(ParameterElement::new("name", ClassElement::new("String")))
            .returning(ClassElement::new("String"));

        assert_eq!(
            resolve_entity(&method, &RepositoryElement::new("Repo")),
            Err(ProcessError::EntityResolution)
        );
    }

    #[test]
    fn id_type_prefers_repository_argument() {
        let entity = PersistentEntity::from_class(&user());

        assert_eq!(resolve_id_type(&entity, &user_repository()).as_deref(), Some("Long"));
        assert_eq!(
            resolve_id_type(&entity, &RepositoryElement::new("Repo")).as_deref(),
            Some("long")
        );
    }

    #[test]
    fn entity_roles_are_seeded_as_property_sources() {
        let entity = PersistentEntity::from_class(&tenant_user());
        let mut roles = RoleMap::new();
        seed_entity_roles(&entity, &mut roles);

        assert_eq!(roles.get("tenant"), Some(&RoleSource::Property("tenant".into())));
    }
}
