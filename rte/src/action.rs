// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Action types.
//!
//! Everything that is `RTE_FLOW_ACTION_TYPE_*` in DPDK, plus the operator specific
//! [`ActionType::VfPciAddr`] which names a virtual function by PCI address instead of index.

use crate::wire::ActionShape;

/// Whether an action takes a configuration payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfPolicy {
    /// `conf` must be absent.
    Forbidden,
    /// `conf` may be absent.
    Optional,
    /// `conf` must be present.
    Required,
}

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
pub enum ActionType {
    /// End marker for action lists.
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_END")]
    End = 0,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_VOID")]
    Void = 1,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_PASSTHRU")]
    Passthru = 2,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_JUMP")]
    Jump = 3,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_MARK")]
    Mark = 4,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_FLAG")]
    Flag = 5,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_QUEUE")]
    Queue = 6,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_DROP")]
    Drop = 7,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_COUNT")]
    Count = 8,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_RSS")]
    Rss = 9,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_PF")]
    Pf = 10,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_VF")]
    Vf = 11,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_PHY_PORT")]
    PhyPort = 12,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_PORT_ID")]
    PortId = 13,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_METER")]
    Meter = 14,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SECURITY")]
    Security = 15,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_SET_MPLS_TTL")]
    OfSetMplsTtl = 16,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_DEC_MPLS_TTL")]
    OfDecMplsTtl = 17,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_SET_NW_TTL")]
    OfSetNwTtl = 18,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_DEC_NW_TTL")]
    OfDecNwTtl = 19,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_COPY_TTL_OUT")]
    OfCopyTtlOut = 20,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_COPY_TTL_IN")]
    OfCopyTtlIn = 21,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_POP_VLAN")]
    OfPopVlan = 22,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_PUSH_VLAN")]
    OfPushVlan = 23,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_SET_VLAN_VID")]
    OfSetVlanVid = 24,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_SET_VLAN_PCP")]
    OfSetVlanPcp = 25,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_POP_MPLS")]
    OfPopMpls = 26,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_OF_PUSH_MPLS")]
    OfPushMpls = 27,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_VXLAN_ENCAP")]
    VxlanEncap = 28,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_VXLAN_DECAP")]
    VxlanDecap = 29,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_NVGRE_ENCAP")]
    NvgreEncap = 30,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_NVGRE_DECAP")]
    NvgreDecap = 31,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_RAW_ENCAP")]
    RawEncap = 32,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_RAW_DECAP")]
    RawDecap = 33,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV4_SRC")]
    SetIpv4Src = 34,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV4_DST")]
    SetIpv4Dst = 35,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV6_SRC")]
    SetIpv6Src = 36,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV6_DST")]
    SetIpv6Dst = 37,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_TP_SRC")]
    SetTpSrc = 38,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_TP_DST")]
    SetTpDst = 39,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_MAC_SWAP")]
    MacSwap = 40,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_DEC_TTL")]
    DecTtl = 41,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_TTL")]
    SetTtl = 42,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_MAC_SRC")]
    SetMacSrc = 43,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_MAC_DST")]
    SetMacDst = 44,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_INC_TCP_SEQ")]
    IncTcpSeq = 45,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_DEC_TCP_SEQ")]
    DecTcpSeq = 46,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_INC_TCP_ACK")]
    IncTcpAck = 47,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_DEC_TCP_ACK")]
    DecTcpAck = 48,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_TAG")]
    SetTag = 49,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_META")]
    SetMeta = 50,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV4_DSCP")]
    SetIpv4Dscp = 51,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SET_IPV6_DSCP")]
    SetIpv6Dscp = 52,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_AGE")]
    Age = 53,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SAMPLE")]
    Sample = 54,
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_SHARED")]
    Shared = 55,
    /// Redirect to a VF named by its PCI address.
    ///
    /// Never sent to the flow service as such: the node agent rewrites it into
    /// [`ActionType::Vf`] once the VF index behind the address is known.
    #[strum(serialize = "RTE_FLOW_ACTION_TYPE_VFPCIADDR")]
    VfPciAddr = 1000,
}

impl ActionType {
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

    /// The wire shape of the configuration payload, `None` for inert actions.
    #[must_use]
    pub const fn shape(self) -> Option<ActionShape> {
        use ActionType as T;
        let shape = match self {
            T::End
            | T::Void
            | T::Passthru
            | T::Flag
            | T::Drop
            | T::Pf
            | T::OfDecMplsTtl
            | T::OfDecNwTtl
            | T::OfCopyTtlOut
            | T::OfCopyTtlIn
            | T::OfPopVlan
            | T::VxlanDecap
            | T::NvgreDecap
            | T::MacSwap
            | T::DecTtl => return None,
            T::Jump => ActionShape::Jump,
            T::Mark => ActionShape::Mark,
            T::Queue => ActionShape::Queue,
            T::Count => ActionShape::Count,
            T::Rss => ActionShape::Rss,
            T::Vf => ActionShape::Vf,
            T::PhyPort => ActionShape::PhyPort,
            T::PortId => ActionShape::PortId,
            T::Meter => ActionShape::Meter,
            T::Security => ActionShape::Security,
            T::OfSetMplsTtl => ActionShape::OfSetMplsTtl,
            T::OfSetNwTtl => ActionShape::OfSetNwTtl,
            T::OfPushVlan => ActionShape::OfPushVlan,
            T::OfSetVlanVid => ActionShape::OfSetVlanVid,
            T::OfSetVlanPcp => ActionShape::OfSetVlanPcp,
            T::OfPopMpls => ActionShape::OfPopMpls,
            T::OfPushMpls => ActionShape::OfPushMpls,
            T::VxlanEncap | T::NvgreEncap | T::Sample | T::Shared => ActionShape::Opaque,
            T::RawEncap => ActionShape::RawEncap,
            T::RawDecap => ActionShape::RawDecap,
            T::SetIpv4Src | T::SetIpv4Dst => ActionShape::SetIpv4,
            T::SetIpv6Src | T::SetIpv6Dst => ActionShape::SetIpv6,
            T::SetTpSrc | T::SetTpDst => ActionShape::SetTp,
            T::SetTtl => ActionShape::SetTtl,
            T::SetMacSrc | T::SetMacDst => ActionShape::SetMac,
            T::IncTcpSeq | T::DecTcpSeq | T::IncTcpAck | T::DecTcpAck => ActionShape::TcpDelta,
            T::SetTag => ActionShape::SetTag,
            T::SetMeta => ActionShape::SetMeta,
            T::SetIpv4Dscp | T::SetIpv6Dscp => ActionShape::SetDscp,
            T::Age => ActionShape::Age,
            T::VfPciAddr => ActionShape::VfPciAddr,
        };
        Some(shape)
    }

    /// Whether `conf` must, may or must not be present for this action.
    #[must_use]
    pub const fn conf_policy(self) -> ConfPolicy {
        match (self, self.shape()) {
            (_, None) => ConfPolicy::Forbidden,
            (ActionType::Count, Some(_)) => ConfPolicy::Optional,
            (_, Some(_)) => ConfPolicy::Required,
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
