// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Raw-to-wire decoding helpers.
//!
//! Most shapes decode straight from JSON (see [`crate::wire`]). Ethernet and IPv4 items are
//! written by humans with colon-hex MAC and dotted-decimal addresses, so they go through an
//! intermediate form first.

use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::mac::Mac;
use crate::wire::from_json;
use crate::wire::item::{RteEtherAddr, RteFlowItemEth, RteFlowItemIpv4, RteIpv4Hdr};

/// Errors produced while decoding a raw payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(String),
    #[error("invalid mac address in field '{field}': '{value}'")]
    Mac { field: &'static str, value: String },
    #[error("invalid ipv4 address in field '{field}': '{value}'")]
    Ipv4 { field: &'static str, value: String },
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct EthJson {
    dst: String,
    src: String,
    r#type: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct Ipv4Json {
    hdr: Ipv4HdrJson,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct Ipv4HdrJson {
    version_ihl: u32,
    type_of_service: u32,
    total_length: u32,
    packet_id: u32,
    fragment_offset: u32,
    time_to_live: u32,
    next_proto_id: u32,
    hdr_checksum: u32,
    src_addr: String,
    dst_addr: String,
}

/// Convert a dotted-decimal address to its big endian integer value.
///
/// Returns 0 for the empty string and for anything that is not an IPv4 address.
#[must_use]
pub fn ip_to_u32(addr: &str) -> u32 {
    Ipv4Addr::from_str(addr).map_or(0, u32::from)
}

#[must_use]
pub fn u32_to_ip(addr: u32) -> Ipv4Addr {
    Ipv4Addr::from(addr)
}

fn parse_mac(field: &'static str, value: &str) -> Result<Option<RteEtherAddr>, DecodeError> {
    if value.is_empty() {
        return Ok(None);
    }
    let mac = Mac::try_from(value).map_err(|_| DecodeError::Mac {
        field,
        value: value.to_string(),
    })?;
    Ok(Some(RteEtherAddr {
        addr_bytes: mac.0.to_vec(),
    }))
}

fn parse_ipv4(field: &'static str, value: &str) -> Result<u32, DecodeError> {
    if value.is_empty() {
        return Ok(0);
    }
    Ipv4Addr::from_str(value)
        .map(u32::from)
        .map_err(|_| DecodeError::Ipv4 {
            field,
            value: value.to_string(),
        })
}

/// Decode an ethernet item from `{"dst": "<mac>", "src": "<mac>", "type": <u32>}`.
///
/// An empty (or absent) address leaves the field unset.
///
/// # Errors
///
/// Fails on unknown fields and on addresses which are not colon-hex MACs.
pub fn decode_eth(raw: &Value) -> Result<RteFlowItemEth, DecodeError> {
    let eth: EthJson = from_json(raw)?;
    Ok(RteFlowItemEth {
        dst: parse_mac("dst", &eth.dst)?,
        src: parse_mac("src", &eth.src)?,
        r#type: eth.r#type,
    })
}

/// Decode an IPv4 item whose addresses are dotted-decimal strings.
///
/// Empty addresses are wildcards and decode to 0.
///
/// # Errors
///
/// Fails on unknown fields and on non-empty addresses which do not parse.
pub fn decode_ipv4(raw: &Value) -> Result<RteFlowItemIpv4, DecodeError> {
    let Ipv4Json { hdr } = from_json(raw)?;
    let src_addr = parse_ipv4("hdr.src_addr", &hdr.src_addr)?;
    let dst_addr = parse_ipv4("hdr.dst_addr", &hdr.dst_addr)?;
    trace!("ipv4 item: src {src_addr:#010x} dst {dst_addr:#010x}");
    Ok(RteFlowItemIpv4 {
        hdr: Some(RteIpv4Hdr {
            version_ihl: hdr.version_ihl,
            type_of_service: hdr.type_of_service,
            total_length: hdr.total_length,
            packet_id: hdr.packet_id,
            fragment_offset: hdr.fragment_offset,
            time_to_live: hdr.time_to_live,
            next_proto_id: hdr.next_proto_id,
            hdr_checksum: hdr.hdr_checksum,
            src_addr,
            dst_addr,
        }),
    })
}

fn to_proto_value(value: &Value) -> prost_types::Value {
    use prost_types::value::Kind;
    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue.into()),
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(values) => Kind::ListValue(prost_types::ListValue {
            values: values.iter().map(to_proto_value).collect(),
        }),
        Value::Object(map) => Kind::StructValue(prost_types::Struct {
            fields: map
                .iter()
                .map(|(k, v)| (k.clone(), to_proto_value(v)))
                .collect(),
        }),
    };
    prost_types::Value { kind: Some(kind) }
}

/// Carry an arbitrary JSON object as a `google.protobuf.Struct`.
///
/// # Errors
///
/// Fails if `raw` is not an object.
pub fn decode_struct(raw: &Value) -> Result<prost_types::Struct, DecodeError> {
    let Value::Object(map) = raw else {
        let found = match raw {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        return Err(DecodeError::NotAnObject(found));
    };
    Ok(prost_types::Struct {
        fields: map
            .iter()
            .map(|(k, v)| (k.clone(), to_proto_value(v)))
            .collect(),
    })
}
