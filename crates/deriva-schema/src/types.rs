//! Canonical names that type introspection normalizes markers and well-known
//! types to. Matching is exact; the introspection side owns the mapping from
//! source-language names onto these.

///
/// marker
/// Annotation markers the processor reads.
///

pub mod marker {
    /// Carried by every mapped entity type.
    pub const PERSISTED: &str = "Persisted";

    /// Carried by the identity property (or an identity parameter).
    pub const ID: &str = "Id";

    /// Carried by entity properties that supply a default for a named role.
    pub const PARAMETER_ROLE: &str = "ParameterRole";

    /// Carried by repository interfaces.
    pub const REPOSITORY: &str = "Repository";

    /// Carried by methods with a pre-declared raw query.
    pub const QUERY: &str = "Query";
}

///
/// member
/// Annotation member names.
///

pub mod member {
    pub const VALUE: &str = "value";
    pub const ROLE: &str = "role";
    pub const TYPE: &str = "type";
    pub const NAME: &str = "name";

    /// `Repository(queryBuilder = "...")`
    pub const QUERY_BUILDER: &str = "queryBuilder";

    /// `Repository(roleArray = [{ role, type }])`
    pub const ROLE_ARRAY: &str = "roleArray";

    /// `Query(parameterBinding = [{ name, value }])`
    pub const PARAMETER_BINDING: &str = "parameterBinding";
}

///
/// name
/// Well-known type names.
///

pub mod name {
    pub const PAGEABLE: &str = "Pageable";
    pub const SORT: &str = "Sort";

    pub const PAGE: &str = "Page";
    pub const SLICE: &str = "Slice";
    pub const ITERABLE: &str = "Iterable";
    pub const OPTIONAL: &str = "Optional";
    pub const STREAM: &str = "Stream";

    pub const VOID: &str = "void";
    pub const BOOLEAN: &str = "boolean";
    pub const BOOLEAN_OBJECT: &str = "Boolean";
    pub const NUMBER: &str = "Number";

    /// Primitive numeric names; boxed numerics declare `Number` as a supertype.
    pub const NUMERIC_PRIMITIVES: [&str; 6] = ["byte", "short", "int", "long", "float", "double"];

    /// Repository type argument naming the entity.
    pub const ENTITY_ARGUMENT: &str = "E";

    /// Repository type argument naming the identity type.
    pub const ID_ARGUMENT: &str = "ID";
}
