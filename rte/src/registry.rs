// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The wire schema registry.
//!
//! Maps the exact type names used in rule descriptions to their type, payload shape and, for
//! actions, configuration policy. A [`Registry`] is built once and handed to validators by
//! reference; it is never mutated.

use std::collections::BTreeMap;

use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::action::{ActionType, ConfPolicy};
use crate::decode::DecodeError;
use crate::item::ItemType;
use crate::wire::{ActionConf, ActionShape, ItemShape, ItemSpec};

/// A type name which is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} type '{name}'")]
pub struct UnknownType {
    pub kind: &'static str,
    pub name: String,
}

/// Registry entry of an item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEntry {
    pub ty: ItemType,
    /// `None` for inert types.
    pub shape: Option<ItemShape>,
}

impl ItemEntry {
    /// True if the type is valid but carries no payload.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.shape.is_none()
    }

    /// Decode a raw payload, `Ok(None)` for inert types.
    ///
    /// # Errors
    ///
    /// Fails if the payload does not fit the shape.
    pub fn decode(&self, raw: &Value) -> Result<Option<ItemSpec>, DecodeError> {
        self.shape.map(|shape| shape.decode(raw)).transpose()
    }
}

/// Registry entry of an action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEntry {
    pub ty: ActionType,
    /// `None` for inert types.
    pub shape: Option<ActionShape>,
    pub conf: ConfPolicy,
}

impl ActionEntry {
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.shape.is_none()
    }

    /// Decode a raw configuration, `Ok(None)` for inert types.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not fit the shape.
    pub fn decode(&self, raw: &Value) -> Result<Option<ActionConf>, DecodeError> {
        self.shape.map(|shape| shape.decode(raw)).transpose()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    items: BTreeMap<&'static str, ItemEntry>,
    actions: BTreeMap<&'static str, ActionEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Build the registry of every known item and action type.
    #[must_use]
    pub fn new() -> Self {
        let items: BTreeMap<_, _> = ItemType::iter()
            .map(|ty| {
                (
                    ty.name(),
                    ItemEntry {
                        ty,
                        shape: ty.shape(),
                    },
                )
            })
            .collect();
        let actions: BTreeMap<_, _> = ActionType::iter()
            .map(|ty| {
                (
                    ty.name(),
                    ActionEntry {
                        ty,
                        shape: ty.shape(),
                        conf: ty.conf_policy(),
                    },
                )
            })
            .collect();
        debug!(
            "wire schema registry: {} item types, {} action types",
            items.len(),
            actions.len()
        );
        Self { items, actions }
    }

    /// Resolve an item type name. Names are case sensitive.
    ///
    /// # Errors
    ///
    /// [`UnknownType`] if no item type has that exact name.
    pub fn resolve_item(&self, name: &str) -> Result<ItemEntry, UnknownType> {
        self.items.get(name).copied().ok_or_else(|| UnknownType {
            kind: "item",
            name: name.to_string(),
        })
    }

    /// Resolve an action type name. Names are case sensitive.
    ///
    /// # Errors
    ///
    /// [`UnknownType`] if no action type has that exact name.
    pub fn resolve_action(&self, name: &str) -> Result<ActionEntry, UnknownType> {
        self.actions.get(name).copied().ok_or_else(|| UnknownType {
            kind: "action",
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_known_names() {
        let registry = Registry::new();
        let eth = registry.resolve_item("RTE_FLOW_ITEM_TYPE_ETH").unwrap();
        assert_eq!(eth.ty, ItemType::Eth);
        assert_eq!(eth.shape, Some(ItemShape::Eth));
        let vf = registry.resolve_action("RTE_FLOW_ACTION_TYPE_VF").unwrap();
        assert_eq!(vf.shape, Some(ActionShape::Vf));
        assert_eq!(vf.conf, ConfPolicy::Required);
    }

    #[test]
    fn inert_is_not_unknown() {
        let registry = Registry::new();
        for name in [
            "RTE_FLOW_ITEM_TYPE_END",
            "RTE_FLOW_ITEM_TYPE_VOID",
            "RTE_FLOW_ITEM_TYPE_INVERT",
            "RTE_FLOW_ITEM_TYPE_PF",
        ] {
            let entry = registry.resolve_item(name).unwrap();
            assert!(entry.is_inert(), "{name}");
            assert_eq!(entry.decode(&json!({"anything": 1})), Ok(None));
        }
        let drop = registry.resolve_action("RTE_FLOW_ACTION_TYPE_DROP").unwrap();
        assert!(drop.is_inert());
        assert_eq!(drop.conf, ConfPolicy::Forbidden);
    }

    #[test]
    fn unknown_names_are_reported() {
        let registry = Registry::new();
        let err = registry
            .resolve_item("RTE_FLOW_ITEM_TYPE_Eth")
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown item type 'RTE_FLOW_ITEM_TYPE_Eth'");
        assert!(registry.resolve_action("VF").is_err());
    }

    #[test]
    fn shared_shapes_resolve_alike() {
        let registry = Registry::new();
        let shape = |name| registry.resolve_item(name).unwrap().shape;
        assert_eq!(
            shape("RTE_FLOW_ITEM_TYPE_PPPOES"),
            shape("RTE_FLOW_ITEM_TYPE_PPPOED")
        );
        assert_eq!(
            shape("RTE_FLOW_ITEM_TYPE_GTPC"),
            shape("RTE_FLOW_ITEM_TYPE_GTPU")
        );
    }

    #[test]
    fn every_type_is_registered() {
        let registry = Registry::new();
        for ty in ItemType::iter() {
            assert_eq!(registry.resolve_item(ty.name()).unwrap().ty, ty);
        }
        for ty in ActionType::iter() {
            assert_eq!(registry.resolve_action(ty.name()).unwrap().ty, ty);
        }
    }
}
