// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Item payload shapes (`spec`, `last` and `mask` of a pattern item).
//!
//! Item payloads decode strictly: an unknown field is an error, typos in a rule should not
//! silently widen a match.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::decode::DecodeError;
use crate::field::{FieldCheck, FieldError, Role};

/// Matches any protocol in place of the current layer.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemAny {
    #[prost(uint32, tag = "1")]
    pub num: u32,
}

/// Matches traffic originating from (ingress) or going to (egress) a given VF.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemVf {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

/// Matches traffic on a given physical port.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemPhyPort {
    #[prost(uint32, tag = "1")]
    pub index: u32,
}

/// Matches traffic on a given DPDK port id.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemPortId {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

/// Matches a byte string of a given length at a given offset.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemRaw {
    #[prost(uint32, tag = "1")]
    pub relative: u32,
    #[prost(uint32, tag = "2")]
    pub search: u32,
    #[prost(uint32, tag = "3")]
    pub reserved: u32,
    #[prost(int32, tag = "4")]
    pub offset: i32,
    #[prost(uint32, tag = "5")]
    pub limit: u32,
    #[prost(uint32, tag = "6")]
    pub length: u32,
    #[prost(bytes = "vec", tag = "7")]
    pub pattern: Vec<u8>,
}

/// An ethernet address as six raw octets.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteEtherAddr {
    #[prost(bytes = "vec", tag = "1")]
    pub addr_bytes: Vec<u8>,
}

/// Matches an ethernet header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemEth {
    #[prost(message, optional, tag = "1")]
    pub dst: Option<RteEtherAddr>,
    #[prost(message, optional, tag = "2")]
    pub src: Option<RteEtherAddr>,
    #[prost(uint32, tag = "3")]
    pub r#type: u32,
}

/// Matches an 802.1Q/ad VLAN tag.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemVlan {
    #[prost(uint32, tag = "1")]
    pub tci: u32,
    #[prost(uint32, tag = "2")]
    pub inner_type: u32,
}

/// IPv4 header, addresses as host order integers.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteIpv4Hdr {
    #[prost(uint32, tag = "1")]
    pub version_ihl: u32,
    #[prost(uint32, tag = "2")]
    pub type_of_service: u32,
    #[prost(uint32, tag = "3")]
    pub total_length: u32,
    #[prost(uint32, tag = "4")]
    pub packet_id: u32,
    #[prost(uint32, tag = "5")]
    pub fragment_offset: u32,
    #[prost(uint32, tag = "6")]
    pub time_to_live: u32,
    #[prost(uint32, tag = "7")]
    pub next_proto_id: u32,
    #[prost(uint32, tag = "8")]
    pub hdr_checksum: u32,
    #[prost(uint32, tag = "9")]
    pub src_addr: u32,
    #[prost(uint32, tag = "10")]
    pub dst_addr: u32,
}

/// Matches an IPv4 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIpv4 {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteIpv4Hdr>,
}

/// IPv6 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteIpv6Hdr {
    #[prost(uint32, tag = "1")]
    pub vtc_flow: u32,
    #[prost(uint32, tag = "2")]
    pub payload_len: u32,
    #[prost(uint32, tag = "3")]
    pub proto: u32,
    #[prost(uint32, tag = "4")]
    pub hop_limits: u32,
    #[prost(bytes = "vec", tag = "5")]
    pub src_addr: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub dst_addr: Vec<u8>,
}

/// Matches an IPv6 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIpv6 {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteIpv6Hdr>,
}

/// ICMP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteIcmpHdr {
    #[prost(uint32, tag = "1")]
    pub icmp_type: u32,
    #[prost(uint32, tag = "2")]
    pub icmp_code: u32,
    #[prost(uint32, tag = "3")]
    pub icmp_cksum: u32,
    #[prost(uint32, tag = "4")]
    pub icmp_ident: u32,
    #[prost(uint32, tag = "5")]
    pub icmp_seq_nb: u32,
}

/// Matches an ICMP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteIcmpHdr>,
}

/// UDP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteUdpHdr {
    #[prost(uint32, tag = "1")]
    pub src_port: u32,
    #[prost(uint32, tag = "2")]
    pub dst_port: u32,
    #[prost(uint32, tag = "3")]
    pub dgram_len: u32,
    #[prost(uint32, tag = "4")]
    pub dgram_cksum: u32,
}

/// Matches a UDP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemUdp {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteUdpHdr>,
}

/// TCP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteTcpHdr {
    #[prost(uint32, tag = "1")]
    pub src_port: u32,
    #[prost(uint32, tag = "2")]
    pub dst_port: u32,
    #[prost(uint32, tag = "3")]
    pub sent_seq: u32,
    #[prost(uint32, tag = "4")]
    pub recv_ack: u32,
    #[prost(uint32, tag = "5")]
    pub data_off: u32,
    #[prost(uint32, tag = "6")]
    pub tcp_flags: u32,
    #[prost(uint32, tag = "7")]
    pub rx_win: u32,
    #[prost(uint32, tag = "8")]
    pub cksum: u32,
    #[prost(uint32, tag = "9")]
    pub tcp_urp: u32,
}

/// Matches a TCP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemTcp {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteTcpHdr>,
}

/// SCTP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteSctpHdr {
    #[prost(uint32, tag = "1")]
    pub src_port: u32,
    #[prost(uint32, tag = "2")]
    pub dst_port: u32,
    #[prost(uint32, tag = "3")]
    pub tag: u32,
    #[prost(uint32, tag = "4")]
    pub cksum: u32,
}

/// Matches a SCTP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemSctp {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteSctpHdr>,
}

/// Matches a VXLAN header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemVxlan {
    #[prost(uint32, tag = "1")]
    pub flags: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub rsvd0: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub vni: Vec<u8>,
    #[prost(uint32, tag = "4")]
    pub rsvd1: u32,
}

/// Matches an E-TAG header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemETag {
    #[prost(uint32, tag = "1")]
    pub epcp_edei_in_ecid_b: u32,
    #[prost(uint32, tag = "2")]
    pub rsvd_grp_ecid_b: u32,
    #[prost(uint32, tag = "3")]
    pub in_ecid_e: u32,
    #[prost(uint32, tag = "4")]
    pub ecid_e: u32,
    #[prost(uint32, tag = "5")]
    pub inner_type: u32,
}

/// Matches a NVGRE header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemNvgre {
    #[prost(uint32, tag = "1")]
    pub c_k_s_rsvd0_ver: u32,
    #[prost(uint32, tag = "2")]
    pub protocol: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub tni: Vec<u8>,
    #[prost(uint32, tag = "4")]
    pub flow_id: u32,
}

/// Matches a MPLS header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemMpls {
    #[prost(bytes = "vec", tag = "1")]
    pub label_tc_s: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub ttl: u32,
}

/// Matches a GRE header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemGre {
    #[prost(uint32, tag = "1")]
    pub c_rsvd0_ver: u32,
    #[prost(uint32, tag = "2")]
    pub protocol: u32,
}

/// Fuzzy pattern match threshold.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemFuzzy {
    #[prost(uint32, tag = "1")]
    pub thresh: u32,
}

/// Matches a GTP header (GTP, GTP-C and GTP-U).
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemGtp {
    #[prost(uint32, tag = "1")]
    pub v_pt_rsv_flags: u32,
    #[prost(uint32, tag = "2")]
    pub msg_type: u32,
    #[prost(uint32, tag = "3")]
    pub msg_len: u32,
    #[prost(uint32, tag = "4")]
    pub teid: u32,
}

/// ESP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteEspHdr {
    #[prost(uint32, tag = "1")]
    pub spi: u32,
    #[prost(uint32, tag = "2")]
    pub seq: u32,
}

/// Matches an ESP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemEsp {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteEspHdr>,
}

/// Matches a GENEVE header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemGeneve {
    #[prost(uint32, tag = "1")]
    pub ver_opt_len_o_c_rsvd0: u32,
    #[prost(uint32, tag = "2")]
    pub protocol: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub vni: Vec<u8>,
    #[prost(uint32, tag = "4")]
    pub rsvd1: u32,
}

/// Matches a VXLAN-GPE header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemVxlanGpe {
    #[prost(uint32, tag = "1")]
    pub flags: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub rsvd0: Vec<u8>,
    #[prost(uint32, tag = "3")]
    pub protocol: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub vni: Vec<u8>,
    #[prost(uint32, tag = "5")]
    pub rsvd1: u32,
}

/// Matches an ARP header for Ethernet/IPv4.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemArpEthIpv4 {
    #[prost(uint32, tag = "1")]
    pub hrd: u32,
    #[prost(uint32, tag = "2")]
    pub pro: u32,
    #[prost(uint32, tag = "3")]
    pub hln: u32,
    #[prost(uint32, tag = "4")]
    pub pln: u32,
    #[prost(uint32, tag = "5")]
    pub op: u32,
    #[prost(message, optional, tag = "6")]
    pub sha: Option<RteEtherAddr>,
    #[prost(uint32, tag = "7")]
    pub spa: u32,
    #[prost(message, optional, tag = "8")]
    pub tha: Option<RteEtherAddr>,
    #[prost(uint32, tag = "9")]
    pub tpa: u32,
}

/// Matches the presence of any IPv6 extension header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIpv6Ext {
    #[prost(uint32, tag = "1")]
    pub next_hdr: u32,
}

/// Matches any ICMPv6 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6 {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub code: u32,
    #[prost(uint32, tag = "3")]
    pub checksum: u32,
}

/// Matches an ICMPv6 neighbor discovery solicitation.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6NdNs {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub code: u32,
    #[prost(uint32, tag = "3")]
    pub checksum: u32,
    #[prost(uint32, tag = "4")]
    pub reserved: u32,
    #[prost(bytes = "vec", tag = "5")]
    pub target_addr: Vec<u8>,
}

/// Matches an ICMPv6 neighbor discovery advertisement.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6NdNa {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub code: u32,
    #[prost(uint32, tag = "3")]
    pub checksum: u32,
    #[prost(uint32, tag = "4")]
    pub rso_reserved: u32,
    #[prost(bytes = "vec", tag = "5")]
    pub target_addr: Vec<u8>,
}

/// Matches the presence of any ICMPv6 neighbor discovery option.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6NdOpt {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub length: u32,
}

/// Matches an ICMPv6 neighbor discovery source link-layer address option.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6NdOptSlaEth {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub length: u32,
    #[prost(message, optional, tag = "3")]
    pub sla: Option<RteEtherAddr>,
}

/// Matches an ICMPv6 neighbor discovery target link-layer address option.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIcmp6NdOptTlaEth {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub length: u32,
    #[prost(message, optional, tag = "3")]
    pub tla: Option<RteEtherAddr>,
}

/// Matches a mark set by a previous rule.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemMark {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

/// Matches a metadata value.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemMeta {
    #[prost(uint32, tag = "1")]
    pub data: u32,
}

/// Matches a GRE optional key field.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemGreKey {
    #[prost(uint32, tag = "1")]
    pub key: u32,
}

/// Matches a GTP PDU session container extension header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemGtpPsc {
    #[prost(uint32, tag = "1")]
    pub pdu_type: u32,
    #[prost(uint32, tag = "2")]
    pub qfi: u32,
}

/// Matches a PPPoE header (session and discovery stages).
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemPppoe {
    #[prost(uint32, tag = "1")]
    pub version_type: u32,
    #[prost(uint32, tag = "2")]
    pub code: u32,
    #[prost(uint32, tag = "3")]
    pub session_id: u32,
    #[prost(uint32, tag = "4")]
    pub length: u32,
}

/// Matches a PPPoE optional proto_id field.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemPppoeProtoId {
    #[prost(uint32, tag = "1")]
    pub proto_id: u32,
}

/// Matches a network service header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemNsh {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(uint32, tag = "2")]
    pub oam_pkt: u32,
    #[prost(uint32, tag = "3")]
    pub reserved: u32,
    #[prost(uint32, tag = "4")]
    pub ttl: u32,
    #[prost(uint32, tag = "5")]
    pub length: u32,
    #[prost(uint32, tag = "6")]
    pub reserved1: u32,
    #[prost(uint32, tag = "7")]
    pub mdtype: u32,
    #[prost(uint32, tag = "8")]
    pub next_proto: u32,
    #[prost(uint32, tag = "9")]
    pub spi: u32,
    #[prost(uint32, tag = "10")]
    pub sindex: u32,
}

/// Matches an IGMP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemIgmp {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub max_resp_time: u32,
    #[prost(uint32, tag = "3")]
    pub checksum: u32,
    #[prost(uint32, tag = "4")]
    pub group: u32,
}

/// Matches an IP authentication header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemAh {
    #[prost(uint32, tag = "1")]
    pub next_hdr: u32,
    #[prost(uint32, tag = "2")]
    pub payload_len: u32,
    #[prost(uint32, tag = "3")]
    pub reserved: u32,
    #[prost(uint32, tag = "4")]
    pub spi: u32,
    #[prost(uint32, tag = "5")]
    pub seq_num: u32,
}

/// HiGig2 fabric routing control fields.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteHigig2Frc {
    #[prost(uint32, tag = "1")]
    pub ksop: u32,
    #[prost(uint32, tag = "2")]
    pub tc: u32,
    #[prost(uint32, tag = "3")]
    pub mcst: u32,
    #[prost(uint32, tag = "4")]
    pub resv: u32,
    #[prost(uint32, tag = "5")]
    pub dst_modid: u32,
    #[prost(uint32, tag = "6")]
    pub dst_pid: u32,
    #[prost(uint32, tag = "7")]
    pub src_modid: u32,
    #[prost(uint32, tag = "8")]
    pub src_pid: u32,
    #[prost(uint32, tag = "9")]
    pub lbid: u32,
    #[prost(uint32, tag = "10")]
    pub ppd_type: u32,
    #[prost(uint32, tag = "11")]
    pub resv1: u32,
    #[prost(uint32, tag = "12")]
    pub dp: u32,
}

/// Matches a HiGig2 header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemHigig2Hdr {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteHigig2Frc>,
}

/// Matches a tag value.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemTag {
    #[prost(uint32, tag = "1")]
    pub data: u32,
    #[prost(uint32, tag = "2")]
    pub index: u32,
}

/// Matches a L2TPv3 over IP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemL2tpv3oip {
    #[prost(uint32, tag = "1")]
    pub session_id: u32,
}

/// Matches a PFCP header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemPfcp {
    #[prost(uint32, tag = "1")]
    pub s_field: u32,
    #[prost(uint32, tag = "2")]
    pub msg_type: u32,
    #[prost(uint32, tag = "3")]
    pub msg_len: u32,
    #[prost(uint64, tag = "4")]
    pub seid: u64,
}

/// eCPRI common header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteEcpriCommonHdr {
    #[prost(uint32, tag = "1")]
    pub revision: u32,
    #[prost(uint32, tag = "2")]
    pub c: u32,
    #[prost(uint32, tag = "3")]
    pub r#type: u32,
    #[prost(uint32, tag = "4")]
    pub size: u32,
}

/// Matches an eCPRI header.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RteFlowItemEcpri {
    #[prost(message, optional, tag = "1")]
    pub hdr: Option<RteEcpriCommonHdr>,
    #[prost(uint32, repeated, tag = "2")]
    pub payload: Vec<u32>,
}
wire_shapes! {
    /// Wire shape of an item payload.
    shape ItemShape;
    /// A decoded item payload.
    payload ItemSpec;
    {
        Any(RteFlowItemAny) = "flow.RteFlowItemAny",
        Vf(RteFlowItemVf) = "flow.RteFlowItemVf",
        PhyPort(RteFlowItemPhyPort) = "flow.RteFlowItemPhyPort",
        PortId(RteFlowItemPortId) = "flow.RteFlowItemPortId",
        Raw(RteFlowItemRaw) = "flow.RteFlowItemRaw",
        Eth(RteFlowItemEth) = "flow.RteFlowItemEth" via crate::decode::decode_eth,
        Vlan(RteFlowItemVlan) = "flow.RteFlowItemVlan",
        Ipv4(RteFlowItemIpv4) = "flow.RteFlowItemIpv4" via crate::decode::decode_ipv4,
        Ipv6(RteFlowItemIpv6) = "flow.RteFlowItemIpv6",
        Icmp(RteFlowItemIcmp) = "flow.RteFlowItemIcmp",
        Udp(RteFlowItemUdp) = "flow.RteFlowItemUdp",
        Tcp(RteFlowItemTcp) = "flow.RteFlowItemTcp",
        Sctp(RteFlowItemSctp) = "flow.RteFlowItemSctp",
        Vxlan(RteFlowItemVxlan) = "flow.RteFlowItemVxlan",
        ETag(RteFlowItemETag) = "flow.RteFlowItemETag",
        Nvgre(RteFlowItemNvgre) = "flow.RteFlowItemNvgre",
        Mpls(RteFlowItemMpls) = "flow.RteFlowItemMpls",
        Gre(RteFlowItemGre) = "flow.RteFlowItemGre",
        Fuzzy(RteFlowItemFuzzy) = "flow.RteFlowItemFuzzy",
        Gtp(RteFlowItemGtp) = "flow.RteFlowItemGtp",
        Esp(RteFlowItemEsp) = "flow.RteFlowItemEsp",
        Geneve(RteFlowItemGeneve) = "flow.RteFlowItemGeneve",
        VxlanGpe(RteFlowItemVxlanGpe) = "flow.RteFlowItemVxlanGpe",
        ArpEthIpv4(RteFlowItemArpEthIpv4) = "flow.RteFlowItemArpEthIpv4",
        Ipv6Ext(RteFlowItemIpv6Ext) = "flow.RteFlowItemIpv6Ext",
        Icmp6(RteFlowItemIcmp6) = "flow.RteFlowItemIcmp6",
        Icmp6NdNs(RteFlowItemIcmp6NdNs) = "flow.RteFlowItemIcmp6NdNs",
        Icmp6NdNa(RteFlowItemIcmp6NdNa) = "flow.RteFlowItemIcmp6NdNa",
        Icmp6NdOpt(RteFlowItemIcmp6NdOpt) = "flow.RteFlowItemIcmp6NdOpt",
        Icmp6NdOptSlaEth(RteFlowItemIcmp6NdOptSlaEth) = "flow.RteFlowItemIcmp6NdOptSlaEth",
        Icmp6NdOptTlaEth(RteFlowItemIcmp6NdOptTlaEth) = "flow.RteFlowItemIcmp6NdOptTlaEth",
        Mark(RteFlowItemMark) = "flow.RteFlowItemMark",
        Meta(RteFlowItemMeta) = "flow.RteFlowItemMeta",
        GreKey(RteFlowItemGreKey) = "flow.RteFlowItemGreKey",
        GtpPsc(RteFlowItemGtpPsc) = "flow.RteFlowItemGtpPsc",
        Pppoe(RteFlowItemPppoe) = "flow.RteFlowItemPppoe",
        PppoeProtoId(RteFlowItemPppoeProtoId) = "flow.RteFlowItemPppoeProtoId",
        Nsh(RteFlowItemNsh) = "flow.RteFlowItemNsh",
        Igmp(RteFlowItemIgmp) = "flow.RteFlowItemIgmp",
        Ah(RteFlowItemAh) = "flow.RteFlowItemAh",
        Higig2(RteFlowItemHigig2Hdr) = "flow.RteFlowItemHigig2Hdr",
        Tag(RteFlowItemTag) = "flow.RteFlowItemTag",
        L2tpv3oip(RteFlowItemL2tpv3oip) = "flow.RteFlowItemL2tpv3oip",
        Pfcp(RteFlowItemPfcp) = "flow.RteFlowItemPfcp",
        Ecpri(RteFlowItemEcpri) = "flow.RteFlowItemEcpri",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_decode_rejects_unknown_fields() {
        let ok = ItemShape::Vlan.decode(&json!({"tci": 10})).unwrap();
        assert_eq!(
            ok,
            ItemSpec::Vlan(RteFlowItemVlan {
                tci: 10,
                inner_type: 0
            })
        );
        let err = ItemShape::Vlan.decode(&json!({"tci": 10, "tcI": 3})).unwrap_err();
        assert!(matches!(err, DecodeError::Json(msg) if msg.contains("unknown field")));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let spec = ItemShape::Udp
            .decode(&json!({"hdr": {"dst_port": 4789}}))
            .unwrap();
        let ItemSpec::Udp(udp) = spec else {
            panic!("unexpected shape {spec:?}");
        };
        let hdr = udp.hdr.unwrap();
        assert_eq!(hdr.dst_port, 4789);
        assert_eq!(hdr.src_port, 0);
    }

    #[test]
    fn packs_with_qualified_type_url() {
        let spec = ItemSpec::Mark(RteFlowItemMark { id: 7 });
        let any = spec.to_any();
        assert_eq!(any.type_url, "type.googleapis.com/flow.RteFlowItemMark");
        assert_eq!(RteFlowItemMark::decode(any.value.as_slice()).unwrap().id, 7);
    }

    #[test]
    fn strictness_is_per_shape() {
        assert!(ItemShape::Eth.is_strict());
        assert!(ItemShape::Pppoe.is_strict());
        assert!(!ItemShape::Geneve.is_strict());
        assert!(!ItemShape::Raw.is_strict());
    }

    #[test]
    fn validate_across_shapes_is_a_mismatch() {
        let mark = ItemSpec::Mark(RteFlowItemMark { id: 1 });
        let meta = ItemSpec::Meta(RteFlowItemMeta { data: 1 });
        assert!(matches!(
            mark.validate(&meta, Role::Mask),
            Err(FieldError::ShapeMismatch { .. })
        ));
    }
}
