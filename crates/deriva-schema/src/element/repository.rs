use crate::{
    annotation::{Annotation, AnnotationMetadata},
    element::{ClassElement, MethodElement, TypeArgument},
    types::{marker, member, name},
};
use serde::{Deserialize, Serialize};

///
/// RepositoryElement
///
/// A repository interface. `type_arguments` are the arguments bound to the
/// generic repository supertype (`E` entity, `ID` identity), when declared.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RepositoryElement {
    pub name: String,

    #[serde(default, skip_serializing_if = "AnnotationMetadata::is_empty")]
    pub annotations: AnnotationMetadata,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeArgument>,

    #[serde(default)]
    pub methods: Vec<MethodElement>,
}

impl RepositoryElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: AnnotationMetadata::new(),
            type_arguments: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.add(annotation);
        self
    }

    /// Bind the generic repository supertype's entity and identity arguments.
    #[must_use]
    pub fn with_entity(mut self, entity: ClassElement, id: Option<ClassElement>) -> Self {
        self.type_arguments.push(TypeArgument {
            name: name::ENTITY_ARGUMENT.to_string(),
            ty: entity,
        });
        if let Some(id) = id {
            self.type_arguments.push(TypeArgument {
                name: name::ID_ARGUMENT.to_string(),
                ty: id,
            });
        }
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodElement) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn type_argument(&self, name: &str) -> Option<&ClassElement> {
        self.type_arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.ty)
    }

    #[must_use]
    pub fn entity_type(&self) -> Option<&ClassElement> {
        self.type_argument(name::ENTITY_ARGUMENT)
    }

    #[must_use]
    pub fn id_type(&self) -> Option<&ClassElement> {
        self.type_argument(name::ID_ARGUMENT)
    }

    /// Declared `Repository(queryBuilder)` name, if any.
    #[must_use]
    pub fn query_builder(&self) -> Option<String> {
        self.annotations
            .value::<String>(marker::REPOSITORY, member::QUERY_BUILDER)
            .filter(|name| !name.is_empty())
    }

    /// Declared custom `(role, type)` pairs; incomplete entries are skipped.
    #[must_use]
    pub fn declared_roles(&self) -> Vec<(String, String)> {
        self.annotations
            .value::<Vec<Annotation>>(marker::REPOSITORY, member::ROLE_ARRAY)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let role = entry.get::<String>(member::ROLE).filter(|r| !r.is_empty())?;
                let ty = entry.get::<String>(member::TYPE)?;

                Some((role, ty))
            })
            .collect()
    }
}

///
/// TESTS
///
