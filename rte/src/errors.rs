// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Rule validation errors.
//!
//! Validation is fail-fast: the first violation is returned, located by the index and type of
//! the offending pattern item or action.

use crate::action::ActionType;
use crate::decode::DecodeError;
use crate::field::{FieldError, Role};
use crate::item::ItemType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("pattern[{index}]: unknown item type '{name}'")]
    UnknownItemType { index: usize, name: String },
    #[error("action[{index}]: unknown action type '{name}'")]
    UnknownActionType { index: usize, name: String },

    #[error("pattern[{index}] ({item}): cannot decode {role}: {source}")]
    ItemDecode {
        index: usize,
        item: ItemType,
        role: Role,
        source: DecodeError,
    },
    #[error("pattern[{index}] ({item}): {role} requires a spec")]
    ItemMissingSpec {
        index: usize,
        item: ItemType,
        role: Role,
    },
    #[error("pattern[{index}] ({item}): {role}: {source}")]
    ItemField {
        index: usize,
        item: ItemType,
        role: Role,
        source: FieldError,
    },
    #[error("last pattern element must be RTE_FLOW_ITEM_TYPE_END, got {0}")]
    PatternNotTerminated(ItemType),

    #[error("action[{index}] ({action}): conf is required")]
    ConfMissing { index: usize, action: ActionType },
    #[error("action[{index}] ({action}): conf is not allowed")]
    ConfForbidden { index: usize, action: ActionType },
    #[error("action[{index}] ({action}): cannot decode conf: {source}")]
    ActionDecode {
        index: usize,
        action: ActionType,
        source: DecodeError,
    },
    #[error("action[{index}] ({action}): conf: {source}")]
    ActionField {
        index: usize,
        action: ActionType,
        source: FieldError,
    },
    #[error("last action element must be RTE_FLOW_ACTION_TYPE_END, got {0}")]
    ActionsNotTerminated(ActionType),
    #[error("a rule needs at least one action")]
    NoActions,

    #[error("attr.{flag} must be 0 or 1, got {value}")]
    InvalidAttr { flag: &'static str, value: u32 },
}
