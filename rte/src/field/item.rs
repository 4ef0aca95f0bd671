// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Field rules of pattern items.

use super::{FieldCheck, FieldError, Role, check_field, check_max, check_u8, check_u16};
use crate::mac::Mac;
use crate::wire::item::{
    RteEtherAddr, RteFlowItemAh, RteFlowItemAny, RteFlowItemArpEthIpv4, RteFlowItemETag,
    RteFlowItemEcpri, RteFlowItemEsp, RteFlowItemEth, RteFlowItemFuzzy, RteFlowItemGeneve,
    RteFlowItemGre, RteFlowItemGreKey, RteFlowItemGtp, RteFlowItemGtpPsc, RteFlowItemHigig2Hdr,
    RteFlowItemIcmp, RteFlowItemIcmp6, RteFlowItemIcmp6NdNa, RteFlowItemIcmp6NdNs,
    RteFlowItemIcmp6NdOpt, RteFlowItemIcmp6NdOptSlaEth, RteFlowItemIcmp6NdOptTlaEth,
    RteFlowItemIgmp, RteFlowItemIpv4, RteFlowItemIpv6, RteFlowItemIpv6Ext, RteFlowItemL2tpv3oip,
    RteFlowItemMark, RteFlowItemMeta, RteFlowItemMpls, RteFlowItemNsh, RteFlowItemNvgre,
    RteFlowItemPfcp, RteFlowItemPhyPort, RteFlowItemPortId, RteFlowItemPppoe,
    RteFlowItemPppoeProtoId, RteFlowItemRaw, RteFlowItemSctp, RteFlowItemTag, RteFlowItemTcp,
    RteFlowItemUdp, RteFlowItemVf, RteFlowItemVlan, RteFlowItemVxlan, RteFlowItemVxlanGpe,
};

/// Addresses of the wrong length count as unset, their length is checked separately.
fn mac_value(addr: Option<&RteEtherAddr>) -> u64 {
    addr.and_then(|a| <[u8; 6]>::try_from(a.addr_bytes.as_slice()).ok())
        .map_or(0, |octets| Mac::from(octets).as_u64())
}

/// Big endian value of a fixed width byte field such as a 24 bit VNI.
fn check_bytes(field: &'static str, bytes: &[u8], width: usize) -> Result<u64, FieldError> {
    if bytes.len() > width {
        return Err(FieldError::Invalid {
            field,
            reason: format!("at most {width} bytes, got {}", bytes.len()),
        });
    }
    Ok(bytes
        .iter()
        .fold(0u64, |acc, octet| (acc << 8) | u64::from(*octet)))
}

impl FieldCheck for RteFlowItemEth {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        for (field, addr, spec_addr) in [
            ("dst", &self.dst, &spec.dst),
            ("src", &self.src, &spec.src),
        ] {
            if let Some(addr) = addr
                && addr.addr_bytes.len() != 6
            {
                return Err(FieldError::Invalid {
                    field,
                    reason: format!("expected 6 address bytes, got {}", addr.addr_bytes.len()),
                });
            }
            check_field(
                field,
                mac_value(spec_addr.as_ref()),
                mac_value(addr.as_ref()),
                role,
            )?;
        }
        // an unset ethertype means any ethertype
        if self.r#type != 0 {
            check_u16("type", spec.r#type, self.r#type, role)?;
        }
        Ok(())
    }
}

impl FieldCheck for RteFlowItemVlan {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_u16("tci", spec.tci, self.tci, role)?;
        check_u16("inner_type", spec.inner_type, self.inner_type, role)
    }
}

impl FieldCheck for RteFlowItemIpv4 {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        let hdr = self.hdr.clone().unwrap_or_default();
        let spec = spec.hdr.clone().unwrap_or_default();
        check_u8("hdr.version_ihl", spec.version_ihl, hdr.version_ihl, role)?;
        check_u8(
            "hdr.type_of_service",
            spec.type_of_service,
            hdr.type_of_service,
            role,
        )?;
        check_u16("hdr.total_length", spec.total_length, hdr.total_length, role)?;
        check_u16("hdr.packet_id", spec.packet_id, hdr.packet_id, role)?;
        check_u16(
            "hdr.fragment_offset",
            spec.fragment_offset,
            hdr.fragment_offset,
            role,
        )?;
        check_u8("hdr.time_to_live", spec.time_to_live, hdr.time_to_live, role)?;
        check_u8("hdr.next_proto_id", spec.next_proto_id, hdr.next_proto_id, role)?;
        check_u16("hdr.hdr_checksum", spec.hdr_checksum, hdr.hdr_checksum, role)?;
        check_field("hdr.src_addr", spec.src_addr, hdr.src_addr, role)?;
        check_field("hdr.dst_addr", spec.dst_addr, hdr.dst_addr, role)
    }
}

impl FieldCheck for RteFlowItemIcmp {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        let hdr = self.hdr.clone().unwrap_or_default();
        let spec = spec.hdr.clone().unwrap_or_default();
        check_u8("hdr.icmp_type", spec.icmp_type, hdr.icmp_type, role)?;
        check_u8("hdr.icmp_code", spec.icmp_code, hdr.icmp_code, role)?;
        check_u16("hdr.icmp_cksum", spec.icmp_cksum, hdr.icmp_cksum, role)?;
        check_u16("hdr.icmp_ident", spec.icmp_ident, hdr.icmp_ident, role)?;
        check_u16("hdr.icmp_seq_nb", spec.icmp_seq_nb, hdr.icmp_seq_nb, role)
    }
}

impl FieldCheck for RteFlowItemUdp {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        let hdr = self.hdr.clone().unwrap_or_default();
        let spec = spec.hdr.clone().unwrap_or_default();
        for (field, spec, candidate) in [
            ("hdr.src_port", spec.src_port, hdr.src_port),
            ("hdr.dst_port", spec.dst_port, hdr.dst_port),
            ("hdr.dgram_len", spec.dgram_len, hdr.dgram_len),
            ("hdr.dgram_cksum", spec.dgram_cksum, hdr.dgram_cksum),
        ] {
            // only fields set in the candidate are looked at
            if candidate != 0 {
                check_u16(field, spec, candidate, role)?;
            }
        }
        Ok(())
    }
}

impl FieldCheck for RteFlowItemTcp {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        let hdr = self.hdr.clone().unwrap_or_default();
        let spec = spec.hdr.clone().unwrap_or_default();
        check_u16("hdr.src_port", spec.src_port, hdr.src_port, role)?;
        check_u16("hdr.dst_port", spec.dst_port, hdr.dst_port, role)?;
        check_field("hdr.sent_seq", spec.sent_seq, hdr.sent_seq, role)?;
        check_field("hdr.recv_ack", spec.recv_ack, hdr.recv_ack, role)?;
        check_u8("hdr.data_off", spec.data_off, hdr.data_off, role)?;
        check_u8("hdr.tcp_flags", spec.tcp_flags, hdr.tcp_flags, role)?;
        check_u16("hdr.rx_win", spec.rx_win, hdr.rx_win, role)?;
        check_u16("hdr.cksum", spec.cksum, hdr.cksum, role)?;
        check_u16("hdr.tcp_urp", spec.tcp_urp, hdr.tcp_urp, role)
    }
}

impl FieldCheck for RteFlowItemSctp {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        let hdr = self.hdr.clone().unwrap_or_default();
        let spec = spec.hdr.clone().unwrap_or_default();
        check_u16("hdr.src_port", spec.src_port, hdr.src_port, role)?;
        check_u16("hdr.dst_port", spec.dst_port, hdr.dst_port, role)?;
        check_field("hdr.tag", spec.tag, hdr.tag, role)?;
        check_field("hdr.cksum", spec.cksum, hdr.cksum, role)
    }
}

impl FieldCheck for RteFlowItemVxlan {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_u8("flags", spec.flags, self.flags, role)?;
        check_field(
            "rsvd0",
            check_bytes("rsvd0", &spec.rsvd0, 3)?,
            check_bytes("rsvd0", &self.rsvd0, 3)?,
            role,
        )?;
        check_field(
            "vni",
            check_bytes("vni", &spec.vni, 3)?,
            check_bytes("vni", &self.vni, 3)?,
            role,
        )?;
        check_u8("rsvd1", spec.rsvd1, self.rsvd1, role)
    }
}

impl FieldCheck for RteFlowItemPppoe {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        for (field, spec, candidate, width) in [
            ("version_type", spec.version_type, self.version_type, u32::from(u8::MAX)),
            ("code", spec.code, self.code, u32::from(u8::MAX)),
            ("session_id", spec.session_id, self.session_id, u32::from(u16::MAX)),
            ("length", spec.length, self.length, u32::from(u16::MAX)),
        ] {
            // only fields set in the spec are cross checked
            if spec != 0 {
                check_field(field, spec, candidate, role)?;
            }
            check_max(field, candidate, width)?;
        }
        Ok(())
    }
}

impl FieldCheck for RteFlowItemPppoeProtoId {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_u16("proto_id", spec.proto_id, self.proto_id, role)
    }
}

impl FieldCheck for RteFlowItemMark {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_field("id", spec.id, self.id, role)
    }
}

impl FieldCheck for RteFlowItemMeta {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_field("data", spec.data, self.data, role)
    }
}

impl FieldCheck for RteFlowItemTag {
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError> {
        check_field("data", spec.data, self.data, role)?;
        check_u8("index", spec.index, self.index, role)
    }
}

unvalidated!(
    RteFlowItemAny,
    RteFlowItemVf,
    RteFlowItemPhyPort,
    RteFlowItemPortId,
    RteFlowItemRaw,
    RteFlowItemIpv6,
    RteFlowItemETag,
    RteFlowItemNvgre,
    RteFlowItemMpls,
    RteFlowItemGre,
    RteFlowItemFuzzy,
    RteFlowItemGtp,
    RteFlowItemEsp,
    RteFlowItemGeneve,
    RteFlowItemVxlanGpe,
    RteFlowItemArpEthIpv4,
    RteFlowItemIpv6Ext,
    RteFlowItemIcmp6,
    RteFlowItemIcmp6NdNs,
    RteFlowItemIcmp6NdNa,
    RteFlowItemIcmp6NdOpt,
    RteFlowItemIcmp6NdOptSlaEth,
    RteFlowItemIcmp6NdOptTlaEth,
    RteFlowItemGreKey,
    RteFlowItemGtpPsc,
    RteFlowItemNsh,
    RteFlowItemIgmp,
    RteFlowItemAh,
    RteFlowItemHigig2Hdr,
    RteFlowItemL2tpv3oip,
    RteFlowItemPfcp,
    RteFlowItemEcpri,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::item::{RteIcmpHdr, RteIpv4Hdr, RteSctpHdr, RteTcpHdr, RteUdpHdr};

    type Setter<H> = fn(&mut H, u32);

    /// `max` passes in every role, `max + 1` is out of range in every role.
    fn assert_width<T: FieldCheck>(field: &'static str, max: u32, build: impl Fn(u32) -> T) {
        let at_max = build(max);
        let wide = build(max + 1);
        let out_of_range = Err(FieldError::OutOfRange {
            field,
            max: u64::from(max),
            value: u64::from(max) + 1,
        });
        assert_eq!(at_max.validate(&at_max, Role::Spec), Ok(()), "{field} at {max}");
        assert_eq!(wide.validate(&wide, Role::Spec), out_of_range, "spec.{field}");
        assert_eq!(wide.validate(&at_max, Role::Mask), out_of_range, "mask.{field}");
        assert_eq!(wide.validate(&at_max, Role::Last), out_of_range, "last.{field}");
    }

    fn tcp(set: Setter<RteTcpHdr>, value: u32) -> RteFlowItemTcp {
        let mut hdr = RteTcpHdr::default();
        set(&mut hdr, value);
        RteFlowItemTcp { hdr: Some(hdr) }
    }

    fn sctp(set: Setter<RteSctpHdr>, value: u32) -> RteFlowItemSctp {
        let mut hdr = RteSctpHdr::default();
        set(&mut hdr, value);
        RteFlowItemSctp { hdr: Some(hdr) }
    }

    fn icmp(set: Setter<RteIcmpHdr>, value: u32) -> RteFlowItemIcmp {
        let mut hdr = RteIcmpHdr::default();
        set(&mut hdr, value);
        RteFlowItemIcmp { hdr: Some(hdr) }
    }

    fn ipv4(src_addr: u32) -> RteFlowItemIpv4 {
        RteFlowItemIpv4 {
            hdr: Some(RteIpv4Hdr {
                src_addr,
                ..Default::default()
            }),
        }
    }

    fn udp(src_port: u32, dst_port: u32) -> RteFlowItemUdp {
        RteFlowItemUdp {
            hdr: Some(RteUdpHdr {
                src_port,
                dst_port,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn ipv4_last_below_spec() {
        let spec = ipv4(0x0a38_d909);
        assert!(matches!(
            ipv4(0x0a38_d908).validate(&spec, Role::Last),
            Err(FieldError::LastBelowSpec {
                field: "hdr.src_addr",
                ..
            })
        ));
        assert_eq!(ipv4(0x0a38_d90a).validate(&spec, Role::Last), Ok(()));
        assert_eq!(ipv4(0xffff_ff00).validate(&spec, Role::Mask), Ok(()));
    }

    #[test]
    fn vlan_width_applies_to_every_role() {
        let spec = RteFlowItemVlan {
            tci: 70_000,
            inner_type: 0,
        };
        for role in [Role::Spec, Role::Mask, Role::Last] {
            assert!(matches!(
                spec.validate(&spec, role),
                Err(FieldError::OutOfRange { field: "tci", .. })
            ));
        }
    }

    #[test]
    fn eth_type_ignored_when_unset() {
        let spec = RteFlowItemEth {
            r#type: 0x0800,
            ..Default::default()
        };
        let mask = RteFlowItemEth::default();
        assert_eq!(mask.validate(&spec, Role::Mask), Ok(()));
        let mask = RteFlowItemEth {
            r#type: 0xffff,
            ..Default::default()
        };
        assert_eq!(mask.validate(&spec, Role::Mask), Ok(()));
        let no_type = RteFlowItemEth::default();
        assert!(matches!(
            mask.validate(&no_type, Role::Mask),
            Err(FieldError::SpecMissing { field: "type", .. })
        ));
    }

    #[test]
    fn eth_mask_address_requires_spec_address() {
        let spec = RteFlowItemEth::default();
        let mask = RteFlowItemEth {
            dst: Some(RteEtherAddr {
                addr_bytes: vec![0xff; 6],
            }),
            ..Default::default()
        };
        assert!(matches!(
            mask.validate(&spec, Role::Mask),
            Err(FieldError::SpecMissing { field: "dst", .. })
        ));
    }

    #[test]
    fn udp_checks_only_set_candidate_fields() {
        let spec = udp(0, 4789);
        assert_eq!(udp(0, 0).validate(&spec, Role::Last), Ok(()));
        assert_eq!(udp(0, 4790).validate(&spec, Role::Last), Ok(()));
        assert!(udp(0, 4000).validate(&spec, Role::Last).is_err());
        assert!(matches!(
            udp(1, 4789).validate(&spec, Role::Mask),
            Err(FieldError::SpecMissing {
                field: "hdr.src_port",
                ..
            })
        ));
    }

    #[test]
    fn pppoe_checks_only_set_spec_fields() {
        let spec = RteFlowItemPppoe {
            session_id: 10,
            ..Default::default()
        };
        let last = RteFlowItemPppoe {
            code: 9,
            session_id: 12,
            ..Default::default()
        };
        assert_eq!(last.validate(&spec, Role::Last), Ok(()));
        let last = RteFlowItemPppoe {
            session_id: 9,
            ..Default::default()
        };
        assert!(last.validate(&spec, Role::Last).is_err());
        let wide = RteFlowItemPppoe {
            code: 256,
            ..Default::default()
        };
        assert!(matches!(
            wide.validate(&spec, Role::Mask),
            Err(FieldError::OutOfRange { field: "code", .. })
        ));
    }

    #[test]
    fn vxlan_vni_is_three_bytes() {
        let spec = RteFlowItemVxlan {
            vni: vec![0, 0, 1, 0],
            ..Default::default()
        };
        assert!(matches!(
            spec.validate(&spec, Role::Spec),
            Err(FieldError::Invalid { field: "vni", .. })
        ));
    }

    #[test]
    fn tcp_fields_bounds() {
        let widths: [(&str, u32, Setter<RteTcpHdr>); 7] = [
            ("hdr.src_port", 0xffff, |h, v| h.src_port = v),
            ("hdr.dst_port", 0xffff, |h, v| h.dst_port = v),
            ("hdr.data_off", 0xff, |h, v| h.data_off = v),
            ("hdr.tcp_flags", 0xff, |h, v| h.tcp_flags = v),
            ("hdr.rx_win", 0xffff, |h, v| h.rx_win = v),
            ("hdr.cksum", 0xffff, |h, v| h.cksum = v),
            ("hdr.tcp_urp", 0xffff, |h, v| h.tcp_urp = v),
        ];
        for (field, max, set) in widths {
            assert_width(field, max, |value| tcp(set, value));
        }

        let spec = tcp(|h, v| h.dst_port = v, 443);
        assert_eq!(
            tcp(|h, v| h.dst_port = v, 442).validate(&spec, Role::Last),
            Err(FieldError::LastBelowSpec {
                field: "hdr.dst_port",
                spec: 443,
                last: 442,
            })
        );
        assert_eq!(tcp(|h, v| h.dst_port = v, 8443).validate(&spec, Role::Last), Ok(()));

        // sequence numbers span 32 bits and are only cross checked
        let seq = tcp(|h, v| h.sent_seq = v, u32::MAX);
        assert_eq!(seq.validate(&seq, Role::Spec), Ok(()));
        assert_eq!(
            tcp(|h, v| h.recv_ack = v, 1).validate(&seq, Role::Mask),
            Err(FieldError::SpecMissing {
                field: "hdr.recv_ack",
                role: Role::Mask,
            })
        );
    }

    #[test]
    fn sctp_fields_bounds() {
        let widths: [(&str, u32, Setter<RteSctpHdr>); 2] = [
            ("hdr.src_port", 0xffff, |h, v| h.src_port = v),
            ("hdr.dst_port", 0xffff, |h, v| h.dst_port = v),
        ];
        for (field, max, set) in widths {
            assert_width(field, max, |value| sctp(set, value));
        }
        let tag = sctp(|h, v| h.tag = v, u32::MAX);
        assert_eq!(tag.validate(&tag, Role::Spec), Ok(()));
        assert_eq!(
            tag.validate(&sctp(|h, v| h.cksum = v, 1), Role::Mask),
            Err(FieldError::SpecMissing {
                field: "hdr.tag",
                role: Role::Mask,
            })
        );
    }

    #[test]
    fn icmp_fields_bounds() {
        let widths: [(&str, u32, Setter<RteIcmpHdr>); 5] = [
            ("hdr.icmp_type", 0xff, |h, v| h.icmp_type = v),
            ("hdr.icmp_code", 0xff, |h, v| h.icmp_code = v),
            ("hdr.icmp_cksum", 0xffff, |h, v| h.icmp_cksum = v),
            ("hdr.icmp_ident", 0xffff, |h, v| h.icmp_ident = v),
            ("hdr.icmp_seq_nb", 0xffff, |h, v| h.icmp_seq_nb = v),
        ];
        for (field, max, set) in widths {
            assert_width(field, max, |value| icmp(set, value));
        }
    }

    #[test]
    fn tag_mark_meta_fields() {
        assert_width("index", 0xff, |index| RteFlowItemTag { data: 0, index });

        let tag = RteFlowItemTag {
            data: 0x10,
            index: 0,
        };
        let last = RteFlowItemTag {
            data: 0x0f,
            index: 0,
        };
        assert_eq!(
            last.validate(&tag, Role::Last),
            Err(FieldError::LastBelowSpec {
                field: "data",
                spec: 0x10,
                last: 0x0f,
            })
        );

        let mark = RteFlowItemMark { id: u32::MAX };
        assert_eq!(mark.validate(&mark, Role::Spec), Ok(()));
        assert_eq!(
            mark.validate(&RteFlowItemMark { id: 0 }, Role::Mask),
            Err(FieldError::SpecMissing {
                field: "id",
                role: Role::Mask,
            })
        );
        assert_eq!(
            RteFlowItemMark { id: 6 }.validate(&RteFlowItemMark { id: 7 }, Role::Last),
            Err(FieldError::LastBelowSpec {
                field: "id",
                spec: 7,
                last: 6,
            })
        );

        let meta = RteFlowItemMeta { data: 0xff00 };
        assert_eq!(
            RteFlowItemMeta { data: 0xffff }.validate(&meta, Role::Mask),
            Ok(())
        );
        assert_eq!(
            meta.validate(&RteFlowItemMeta { data: 0 }, Role::Last),
            Err(FieldError::SpecMissing {
                field: "data",
                role: Role::Last,
            })
        );
    }

    #[test]
    fn u16_fields_reject_wide_values() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|value: u32| {
                let spec = RteFlowItemPppoeProtoId { proto_id: value };
                assert_eq!(spec.validate(&spec, Role::Spec).is_err(), value > 65535);
            });
    }
}
