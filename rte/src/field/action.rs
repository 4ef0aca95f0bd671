// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Field rules of action configurations.

use super::{FieldCheck, FieldError, Role, check_max, check_width_u8, check_width_u16};
use crate::pci::PciAddress;
use crate::wire::action::{
    RteFlowActionAge, RteFlowActionCount, RteFlowActionJump, RteFlowActionMark,
    RteFlowActionMeter, RteFlowActionOfPopMpls, RteFlowActionOfPushMpls, RteFlowActionOfPushVlan,
    RteFlowActionOfSetMplsTtl, RteFlowActionOfSetNwTtl, RteFlowActionOfSetVlanPcp,
    RteFlowActionOfSetVlanVid, RteFlowActionPhyPort, RteFlowActionPortId, RteFlowActionQueue,
    RteFlowActionRawDecap, RteFlowActionRawEncap, RteFlowActionRss, RteFlowActionSecurity,
    RteFlowActionSetDscp, RteFlowActionSetIpv4, RteFlowActionSetIpv6, RteFlowActionSetMac,
    RteFlowActionSetMeta, RteFlowActionSetTag, RteFlowActionSetTp, RteFlowActionSetTtl,
    RteFlowActionTcpDelta, RteFlowActionVf, RteFlowActionVfPciAddr,
};

const MAX_VLAN_VID: u32 = 0xfff;
const MAX_VLAN_PCP: u32 = 0x7;
const MAX_DSCP: u32 = 0x3f;

impl FieldCheck for RteFlowActionVf {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_max("original", self.original, 1)?;
        check_width_u8("id", self.id)
    }
}

impl FieldCheck for RteFlowActionQueue {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u16("index", self.index)
    }
}

impl FieldCheck for RteFlowActionMark {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        Ok(())
    }
}

impl FieldCheck for RteFlowActionJump {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        Ok(())
    }
}

impl FieldCheck for RteFlowActionPortId {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_max("original", self.original, 1)?;
        check_width_u16("id", self.id)
    }
}

impl FieldCheck for RteFlowActionSetTag {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u8("index", self.index)
    }
}

impl FieldCheck for RteFlowActionSetMeta {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        Ok(())
    }
}

impl FieldCheck for RteFlowActionSetTtl {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u8("ttl_value", self.ttl_value)
    }
}

impl FieldCheck for RteFlowActionOfSetNwTtl {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u8("nw_ttl", self.nw_ttl)
    }
}

impl FieldCheck for RteFlowActionOfSetMplsTtl {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u8("mpls_ttl", self.mpls_ttl)
    }
}

impl FieldCheck for RteFlowActionSetTp {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_width_u16("port", self.port)
    }
}

impl FieldCheck for RteFlowActionSetDscp {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_max("dscp", self.dscp, MAX_DSCP)
    }
}

impl FieldCheck for RteFlowActionOfSetVlanVid {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_max("vlan_vid", self.vlan_vid, MAX_VLAN_VID)
    }
}

impl FieldCheck for RteFlowActionOfSetVlanPcp {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        check_max("vlan_pcp", self.vlan_pcp, MAX_VLAN_PCP)
    }
}

impl FieldCheck for RteFlowActionVfPciAddr {
    fn validate(&self, _spec: &Self, _role: Role) -> Result<(), FieldError> {
        PciAddress::try_from(self.addr.as_str())
            .map(|_| ())
            .map_err(|e| FieldError::Invalid {
                field: "addr",
                reason: e.to_string(),
            })
    }
}

unvalidated!(
    RteFlowActionCount,
    RteFlowActionRss,
    RteFlowActionPhyPort,
    RteFlowActionMeter,
    RteFlowActionSecurity,
    RteFlowActionOfPushVlan,
    RteFlowActionOfPopMpls,
    RteFlowActionOfPushMpls,
    prost_types::Struct,
    RteFlowActionRawEncap,
    RteFlowActionRawDecap,
    RteFlowActionSetIpv4,
    RteFlowActionSetIpv6,
    RteFlowActionSetMac,
    RteFlowActionTcpDelta,
    RteFlowActionAge,
);
