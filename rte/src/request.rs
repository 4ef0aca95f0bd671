// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Wire form of a validated rule, as sent to the flow service.

use prost::Message;
use serde::{Deserialize, Serialize};

/// Rule attributes.
#[derive(Clone, PartialEq, Eq, Hash, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowAttr {
    #[prost(uint32, tag = "1")]
    pub group: u32,
    #[prost(uint32, tag = "2")]
    pub priority: u32,
    #[prost(uint32, tag = "3")]
    pub ingress: u32,
    #[prost(uint32, tag = "4")]
    pub egress: u32,
    #[prost(uint32, tag = "5")]
    pub transfer: u32,
    #[prost(uint32, tag = "6")]
    pub reserved: u32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RteFlowItem {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub spec: Option<prost_types::Any>,
    #[prost(message, optional, tag = "3")]
    pub last: Option<prost_types::Any>,
    #[prost(message, optional, tag = "4")]
    pub mask: Option<prost_types::Any>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RteFlowAction {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub conf: Option<prost_types::Any>,
}

/// A rule creation (or validation) request.
#[derive(Clone, PartialEq, Message)]
pub struct RequestFlowCreate {
    #[prost(uint32, tag = "1")]
    pub port_id: u32,
    #[prost(message, optional, tag = "2")]
    pub attr: Option<RteFlowAttr>,
    #[prost(message, repeated, tag = "3")]
    pub pattern: Vec<RteFlowItem>,
    #[prost(message, repeated, tag = "4")]
    pub action: Vec<RteFlowAction>,
}
