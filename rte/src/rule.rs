// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Flow rules as written by users.
//!
//! Type names are kept as strings and payloads as raw JSON until validation resolves them
//! against the [`crate::registry::Registry`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::RteFlowAttr;

/// A single pattern item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowItem {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Value>,
}

impl FlowItem {
    #[must_use]
    pub fn new(r#type: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_spec(mut self, spec: Value) -> Self {
        self.spec = Some(spec);
        self
    }

    #[must_use]
    pub fn with_last(mut self, last: Value) -> Self {
        self.last = Some(last);
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: Value) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// A single action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowAction {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<Value>,
}

impl FlowAction {
    #[must_use]
    pub fn new(r#type: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            conf: None,
        }
    }

    #[must_use]
    pub fn with_conf(mut self, conf: Value) -> Self {
        self.conf = Some(conf);
        self
    }
}

/// A node level flow rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlowRule {
    #[serde(default)]
    pub port_id: u32,
    #[serde(default)]
    pub pattern: Vec<FlowItem>,
    #[serde(default)]
    pub action: Vec<FlowAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<RteFlowAttr>,
}
