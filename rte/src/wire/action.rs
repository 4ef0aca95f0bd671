// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Action configuration shapes.
//!
//! Unlike item payloads, action configurations decode leniently: unknown fields are ignored so
//! that newer action schemas are still accepted.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::decode::DecodeError;
use crate::field::{FieldCheck, FieldError, Role};

/// Redirects packets to a group.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionJump {
    #[prost(uint32, tag = "1")]
    pub group: u32,
}

/// Attaches an integer value to packets.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionMark {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

/// Assigns packets to a given queue index.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionQueue {
    #[prost(uint32, tag = "1")]
    pub index: u32,
}

/// Adds a counter to the rule.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionCount {
    #[prost(uint32, tag = "1")]
    pub shared: u32,
    #[prost(uint32, tag = "2")]
    pub reserved: u32,
    #[prost(uint32, tag = "3")]
    pub id: u32,
}

/// Spreads packets among several queues.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionRss {
    #[prost(uint32, tag = "1")]
    pub func: u32,
    #[prost(uint32, tag = "2")]
    pub level: u32,
    #[prost(uint64, tag = "3")]
    pub types: u64,
    #[prost(uint32, tag = "4")]
    pub key_len: u32,
    #[prost(uint32, tag = "5")]
    pub queue_num: u32,
    #[prost(bytes = "vec", tag = "6")]
    pub key: Vec<u8>,
    #[prost(uint32, repeated, tag = "7")]
    pub queue: Vec<u32>,
}

/// Directs matching traffic to a given virtual function.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionVf {
    #[prost(uint32, tag = "1")]
    pub original: u32,
    #[prost(uint32, tag = "2")]
    pub reserved: u32,
    #[prost(uint32, tag = "3")]
    pub id: u32,
}

/// Directs packets to a given physical port index.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionPhyPort {
    #[prost(uint32, tag = "1")]
    pub original: u32,
    #[prost(uint32, tag = "2")]
    pub reserved: u32,
    #[prost(uint32, tag = "3")]
    pub index: u32,
}

/// Directs matching traffic to a given DPDK port id.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionPortId {
    #[prost(uint32, tag = "1")]
    pub original: u32,
    #[prost(uint32, tag = "2")]
    pub reserved: u32,
    #[prost(uint32, tag = "3")]
    pub id: u32,
}

/// Traffic metering and policing.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionMeter {
    #[prost(uint32, tag = "1")]
    pub mtr_id: u32,
}

/// Performs a security action on a security session.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSecurity {
    #[prost(uint64, tag = "1")]
    pub security_session: u64,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfSetMplsTtl {
    #[prost(uint32, tag = "1")]
    pub mpls_ttl: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfSetNwTtl {
    #[prost(uint32, tag = "1")]
    pub nw_ttl: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfPushVlan {
    #[prost(uint32, tag = "1")]
    pub ethertype: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfSetVlanVid {
    #[prost(uint32, tag = "1")]
    pub vlan_vid: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfSetVlanPcp {
    #[prost(uint32, tag = "1")]
    pub vlan_pcp: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfPopMpls {
    #[prost(uint32, tag = "1")]
    pub ethertype: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionOfPushMpls {
    #[prost(uint32, tag = "1")]
    pub ethertype: u32,
}

/// Adds an outer header whose template is provided in its data buffer.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionRawEncap {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub preserve: Vec<u8>,
    #[prost(uint32, tag = "3")]
    pub size: u32,
}

/// Removes an outer header whose template is provided in its data buffer.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionRawDecap {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub size: u32,
}

/// Sets the IPv4 source or destination address.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetIpv4 {
    #[prost(uint32, tag = "1")]
    pub ipv4_addr: u32,
}

/// Sets the IPv6 source or destination address.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetIpv6 {
    #[prost(bytes = "vec", tag = "1")]
    pub ipv6_addr: Vec<u8>,
}

/// Sets the TCP/UDP source or destination port.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetTp {
    #[prost(uint32, tag = "1")]
    pub port: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetTtl {
    #[prost(uint32, tag = "1")]
    pub ttl_value: u32,
}

/// Sets the source or destination MAC address.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetMac {
    #[prost(bytes = "vec", tag = "1")]
    pub mac_addr: Vec<u8>,
}

/// Increases or decreases the TCP sequence or acknowledgment number.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionTcpDelta {
    #[prost(uint32, tag = "1")]
    pub value: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetTag {
    #[prost(uint32, tag = "1")]
    pub data: u32,
    #[prost(uint32, tag = "2")]
    pub mask: u32,
    #[prost(uint32, tag = "3")]
    pub index: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetMeta {
    #[prost(uint32, tag = "1")]
    pub data: u32,
    #[prost(uint32, tag = "2")]
    pub mask: u32,
}

/// Sets the DSCP bits of the IPv4 or IPv6 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionSetDscp {
    #[prost(uint32, tag = "1")]
    pub dscp: u32,
}

/// Reports flows which have not been hit for `timeout` seconds.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionAge {
    #[prost(uint32, tag = "1")]
    pub timeout: u32,
    #[prost(uint32, tag = "2")]
    pub reserved: u32,
}

/// Directs matching traffic to the virtual function with the given PCI address.
///
/// Resolved to a [`RteFlowActionVf`] on the node before the rule is sent.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RteFlowActionVfPciAddr {
    #[prost(string, tag = "1")]
    pub addr: String,
}
wire_shapes! {
    /// Wire shape of an action configuration.
    shape ActionShape;
    /// A decoded action configuration.
    payload ActionConf;
    {
        Jump(RteFlowActionJump) = "flow.RteFlowActionJump",
        Mark(RteFlowActionMark) = "flow.RteFlowActionMark",
        Queue(RteFlowActionQueue) = "flow.RteFlowActionQueue",
        Count(RteFlowActionCount) = "flow.RteFlowActionCount",
        Rss(RteFlowActionRss) = "flow.RteFlowActionRss",
        Vf(RteFlowActionVf) = "flow.RteFlowActionVf",
        PhyPort(RteFlowActionPhyPort) = "flow.RteFlowActionPhyPort",
        PortId(RteFlowActionPortId) = "flow.RteFlowActionPortId",
        Meter(RteFlowActionMeter) = "flow.RteFlowActionMeter",
        Security(RteFlowActionSecurity) = "flow.RteFlowActionSecurity",
        OfSetMplsTtl(RteFlowActionOfSetMplsTtl) = "flow.RteFlowActionOfSetMplsTtl",
        OfSetNwTtl(RteFlowActionOfSetNwTtl) = "flow.RteFlowActionOfSetNwTtl",
        OfPushVlan(RteFlowActionOfPushVlan) = "flow.RteFlowActionOfPushVlan",
        OfSetVlanVid(RteFlowActionOfSetVlanVid) = "flow.RteFlowActionOfSetVlanVid",
        OfSetVlanPcp(RteFlowActionOfSetVlanPcp) = "flow.RteFlowActionOfSetVlanPcp",
        OfPopMpls(RteFlowActionOfPopMpls) = "flow.RteFlowActionOfPopMpls",
        OfPushMpls(RteFlowActionOfPushMpls) = "flow.RteFlowActionOfPushMpls",
        Opaque(prost_types::Struct) = "google.protobuf.Struct" via crate::decode::decode_struct,
        RawEncap(RteFlowActionRawEncap) = "flow.RteFlowActionRawEncap",
        RawDecap(RteFlowActionRawDecap) = "flow.RteFlowActionRawDecap",
        SetIpv4(RteFlowActionSetIpv4) = "flow.RteFlowActionSetIpv4",
        SetIpv6(RteFlowActionSetIpv6) = "flow.RteFlowActionSetIpv6",
        SetTp(RteFlowActionSetTp) = "flow.RteFlowActionSetTp",
        SetTtl(RteFlowActionSetTtl) = "flow.RteFlowActionSetTtl",
        SetMac(RteFlowActionSetMac) = "flow.RteFlowActionSetMac",
        TcpDelta(RteFlowActionTcpDelta) = "flow.RteFlowActionTcpDelta",
        SetTag(RteFlowActionSetTag) = "flow.RteFlowActionSetTag",
        SetMeta(RteFlowActionSetMeta) = "flow.RteFlowActionSetMeta",
        SetDscp(RteFlowActionSetDscp) = "flow.RteFlowActionSetDscp",
        Age(RteFlowActionAge) = "flow.RteFlowActionAge",
        VfPciAddr(RteFlowActionVfPciAddr) = "flow.RteFlowActionVfPciAddr",
    }
}
