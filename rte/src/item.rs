// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Pattern item types.
//!
//! Basically everything that is `RTE_FLOW_ITEM_TYPE_*` in DPDK, numbered the way DPDK numbers
//! them since the discriminant is what goes on the wire.

use crate::wire::ItemShape;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(i32)]
pub enum ItemType {
    /// [META] End marker for item lists.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_END")]
    End = 0,
    /// [META] Placeholder, ignored by PMDs.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_VOID")]
    Void = 1,
    /// [META] Inverted matching.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_INVERT")]
    Invert = 2,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ANY")]
    Any = 3,
    /// [META] Traffic from/to the physical function.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PF")]
    Pf = 4,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_VF")]
    Vf = 5,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PHY_PORT")]
    PhyPort = 6,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PORT_ID")]
    PortId = 7,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_RAW")]
    Raw = 8,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ETH")]
    Eth = 9,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_VLAN")]
    Vlan = 10,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_IPV4")]
    Ipv4 = 11,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_IPV6")]
    Ipv6 = 12,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP")]
    Icmp = 13,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_UDP")]
    Udp = 14,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_TCP")]
    Tcp = 15,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_SCTP")]
    Sctp = 16,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_VXLAN")]
    Vxlan = 17,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_E_TAG")]
    ETag = 18,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_NVGRE")]
    Nvgre = 19,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_MPLS")]
    Mpls = 20,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GRE")]
    Gre = 21,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_FUZZY")]
    Fuzzy = 22,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GTP")]
    Gtp = 23,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GTPC")]
    Gtpc = 24,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GTPU")]
    Gtpu = 25,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ESP")]
    Esp = 26,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GENEVE")]
    Geneve = 27,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_VXLAN_GPE")]
    VxlanGpe = 28,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ARP_ETH_IPV4")]
    ArpEthIpv4 = 29,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_IPV6_EXT")]
    Ipv6Ext = 30,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6")]
    Icmp6 = 31,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6_ND_NS")]
    Icmp6NdNs = 32,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6_ND_NA")]
    Icmp6NdNa = 33,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6_ND_OPT")]
    Icmp6NdOpt = 34,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6_ND_OPT_SLA_ETH")]
    Icmp6NdOptSlaEth = 35,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ICMP6_ND_OPT_TLA_ETH")]
    Icmp6NdOptTlaEth = 36,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_MARK")]
    Mark = 37,
    /// [META] Matches a metadata value.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_META")]
    Meta = 38,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GRE_KEY")]
    GreKey = 39,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_GTP_PSC")]
    GtpPsc = 40,
    /// PPPoE session stage.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PPPOES")]
    Pppoes = 41,
    /// PPPoE discovery stage.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PPPOED")]
    Pppoed = 42,
    /// Only applies to PPPoE session packets.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PPPOE_PROTO_ID")]
    PppoeProtoId = 43,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_NSH")]
    Nsh = 44,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_IGMP")]
    Igmp = 45,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_AH")]
    Ah = 46,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_HIGIG2")]
    Higig2 = 47,
    /// [META] Matches a tag value.
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_TAG")]
    Tag = 48,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_L2TPV3OIP")]
    L2tpv3oip = 49,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_PFCP")]
    Pfcp = 50,
    #[strum(serialize = "RTE_FLOW_ITEM_TYPE_ECPRI")]
    Ecpri = 51,
}

impl ItemType {
    /// The exact type name accepted in a rule description.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The wire discriminant.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// The wire shape of the `spec`/`last`/`mask` payloads of this item.
    ///
    /// `None` means the type is inert: valid, but it carries no payload.
    #[must_use]
    pub const fn shape(self) -> Option<ItemShape> {
        use ItemType as T;
        let shape = match self {
            T::End | T::Void | T::Invert | T::Pf => return None,
            T::Any => ItemShape::Any,
            T::Vf => ItemShape::Vf,
            T::PhyPort => ItemShape::PhyPort,
            T::PortId => ItemShape::PortId,
            T::Raw => ItemShape::Raw,
            T::Eth => ItemShape::Eth,
            T::Vlan => ItemShape::Vlan,
            T::Ipv4 => ItemShape::Ipv4,
            T::Ipv6 => ItemShape::Ipv6,
            T::Icmp => ItemShape::Icmp,
            T::Udp => ItemShape::Udp,
            T::Tcp => ItemShape::Tcp,
            T::Sctp => ItemShape::Sctp,
            T::Vxlan => ItemShape::Vxlan,
            T::ETag => ItemShape::ETag,
            T::Nvgre => ItemShape::Nvgre,
            T::Mpls => ItemShape::Mpls,
            T::Gre => ItemShape::Gre,
            T::Fuzzy => ItemShape::Fuzzy,
            T::Gtp | T::Gtpc | T::Gtpu => ItemShape::Gtp,
            T::Esp => ItemShape::Esp,
            T::Geneve => ItemShape::Geneve,
            T::VxlanGpe => ItemShape::VxlanGpe,
            T::ArpEthIpv4 => ItemShape::ArpEthIpv4,
            T::Ipv6Ext => ItemShape::Ipv6Ext,
            T::Icmp6 => ItemShape::Icmp6,
            T::Icmp6NdNs => ItemShape::Icmp6NdNs,
            T::Icmp6NdNa => ItemShape::Icmp6NdNa,
            T::Icmp6NdOpt => ItemShape::Icmp6NdOpt,
            T::Icmp6NdOptSlaEth => ItemShape::Icmp6NdOptSlaEth,
            T::Icmp6NdOptTlaEth => ItemShape::Icmp6NdOptTlaEth,
            T::Mark => ItemShape::Mark,
            T::Meta => ItemShape::Meta,
            T::GreKey => ItemShape::GreKey,
            T::GtpPsc => ItemShape::GtpPsc,
            T::Pppoes | T::Pppoed => ItemShape::Pppoe,
            T::PppoeProtoId => ItemShape::PppoeProtoId,
            T::Nsh => ItemShape::Nsh,
            T::Igmp => ItemShape::Igmp,
            T::Ah => ItemShape::Ah,
            T::Higig2 => ItemShape::Higig2,
            T::Tag => ItemShape::Tag,
            T::L2tpv3oip => ItemShape::L2tpv3oip,
            T::Pfcp => ItemShape::Pfcp,
            T::Ecpri => ItemShape::Ecpri,
        };
        Some(shape)
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
