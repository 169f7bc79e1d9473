//! Method descriptors: the only artifact handed to runtime dispatch.

use crate::query::{OperationKind, ParameterBinding};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// RuntimeHandler
/// Runtime implementation chosen for a method; the display form is the
/// stable key and equals the serialized name.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHandler {
    #[display("find_one")]
    FindOne,
    #[display("find_optional")]
    FindOptional,
    #[display("find_all")]
    FindAll,
    #[display("find_page")]
    FindPage,
    #[display("find_slice")]
    FindSlice,
    #[display("find_stream")]
    FindStream,
    #[display("count")]
    Count,
    #[display("exists")]
    Exists,
    #[display("delete_all")]
    DeleteAll,
    #[display("delete_one")]
    DeleteOne,
    #[display("save_entity")]
    SaveEntity,
    #[display("save_all")]
    SaveAll,
    #[display("update")]
    Update,
}

///
/// MethodDescriptor
///
/// Final decision for one repository method. Optional members are omitted
/// from the serialized form when absent, mirroring "only record what is set".
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodDescriptor {
    pub interface: String,
    pub signature: String,
    pub operation: OperationKind,
    pub root_entity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,

    pub handler: RuntimeHandler,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,

    /// Role name → parameter (or entity property) name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roles: BTreeMap<String, String>,

    /// First parameter assignable to the root entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_parameter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_binding: Option<ParameterBinding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default)]
    pub raw: bool,

    /// Present only when bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,

    /// Present only when greater than zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update_properties: Vec<String>,
}

///
/// DescriptorSet
/// Descriptors keyed by interface name, then method signature.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DescriptorSet {
    interfaces: BTreeMap<String, BTreeMap<String, MethodDescriptor>>,
}

impl DescriptorSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interfaces: BTreeMap::new(),
        }
    }

    /// Insert a descriptor, returning any previous one for the same key.
    pub fn insert(&mut self, descriptor: MethodDescriptor) -> Option<MethodDescriptor> {
        self.interfaces
            .entry(descriptor.interface.clone())
            .or_default()
            .insert(descriptor.signature.clone(), descriptor)
    }

    #[must_use]
    pub fn get(&self, interface: &str, signature: &str) -> Option<&MethodDescriptor> {
        self.interfaces.get(interface)?.get(signature)
    }

    pub fn for_interface<'a>(
        &'a self,
        interface: &str,
    ) -> impl Iterator<Item = &'a MethodDescriptor> + use<'a> {
        self.interfaces
            .get(interface)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.interfaces.values().flat_map(BTreeMap::values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(signature: &str) -> MethodDescriptor {
        MethodDescriptor {
            interface: "app.UserRepository".into(),
            signature: signature.into(),
            operation: OperationKind::Read,
            root_entity: "app.User".into(),
            id_type: Some("Long".into()),
            handler: RuntimeHandler::FindOne,
            result_type: Some("app.User".into()),
            roles: BTreeMap::new(),
            entity_parameter: None,
            parameter_binding: Some(ParameterBinding::new().bind("p1", "name")),
            query: Some("SELECT".into()),
            raw: false,
            max: None,
            offset: None,
            update_properties: Vec::new(),
        }
    }

    #[test]
    fn keyed_lookup_by_interface_and_signature() {
        let mut set = DescriptorSet::new();
        set.insert(descriptor("findByName(String)"));
        set.insert(descriptor("findByName(String, Pageable)"));

        assert_eq!(set.len(), 2);
        assert!(set.get("app.UserRepository", "findByName(String)").is_some());
        assert!(set.get("app.UserRepository", "findByAge(int)").is_none());
        assert!(set.get("app.Other", "findByName(String)").is_none());
        assert_eq!(set.for_interface("app.UserRepository").count(), 2);
    }

    #[test]
    fn serialized_form_omits_unset_members() {
        let json = serde_json::to_value(descriptor("findByName(String)")).unwrap();

        assert_eq!(json["handler"], "find_one");
        assert_eq!(json["operation"], "READ");
        assert!(json.get("max").is_none());
        assert!(json.get("offset").is_none());
        assert_eq!(json["parameter_binding"][0]["value"], "name");
    }

    #[test]
    fn handler_display_matches_serialized_id() {
        let handlers = [
            RuntimeHandler::FindOne,
            RuntimeHandler::FindOptional,
            RuntimeHandler::FindAll,
            RuntimeHandler::FindPage,
            RuntimeHandler::FindSlice,
            RuntimeHandler::FindStream,
            RuntimeHandler::Count,
            RuntimeHandler::Exists,
            RuntimeHandler::DeleteAll,
            RuntimeHandler::DeleteOne,
            RuntimeHandler::SaveEntity,
            RuntimeHandler::SaveAll,
            RuntimeHandler::Update,
        ];

        for handler in handlers {
            assert_eq!(
                serde_json::to_value(handler).unwrap(),
                handler.to_string(),
                "{handler:?}"
            );
        }
    }
}
