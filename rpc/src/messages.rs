// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Messages of the `flow.FlowService` protocol, besides the rule itself
//! ([`rte::request::RequestFlowCreate`]).

use prost::Message;

use crate::RpcError;

/// Error reported by the flow service in a successful call. Type 0 means no error.
#[derive(Clone, PartialEq, Message)]
pub struct RteFlowError {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(string, tag = "2")]
    pub mesg: String,
}

impl RteFlowError {
    pub(crate) fn check(error: Option<&RteFlowError>) -> Result<(), RpcError> {
        match error {
            Some(e) if e.r#type != 0 => Err(RpcError::Flow {
                kind: e.r#type,
                message: e.mesg.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct ResponseFlow {
    #[prost(message, optional, tag = "1")]
    pub error_info: Option<RteFlowError>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ResponseFlowCreate {
    #[prost(message, optional, tag = "1")]
    pub error_info: Option<RteFlowError>,
    #[prost(uint32, tag = "2")]
    pub flow_id: u32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RequestFlowofPort {
    #[prost(uint32, tag = "1")]
    pub port_id: u32,
    #[prost(uint32, tag = "2")]
    pub flow_id: u32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RequestofPort {
    #[prost(uint32, tag = "1")]
    pub port_id: u32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RequestFlowIsolate {
    #[prost(uint32, tag = "1")]
    pub port_id: u32,
    #[prost(int32, tag = "2")]
    pub set: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RequestListPorts {}

/// Hit and byte counters of a rule with a COUNT action.
#[derive(Clone, PartialEq, Message)]
pub struct RteFlowQueryCount {
    #[prost(uint32, tag = "1")]
    pub reset: u32,
    #[prost(uint32, tag = "2")]
    pub hits_set: u32,
    #[prost(uint32, tag = "3")]
    pub bytes_set: u32,
    #[prost(uint64, tag = "4")]
    pub hits: u64,
    #[prost(uint64, tag = "5")]
    pub bytes: u64,
}

#[derive(Clone, PartialEq, Message)]
pub struct ResponseFlowQuery {
    #[prost(message, optional, tag = "1")]
    pub error_info: Option<RteFlowError>,
    #[prost(message, optional, tag = "2")]
    pub count: Option<RteFlowQueryCount>,
}

#[derive(Clone, PartialEq, Message)]
pub struct FlowInfo {
    #[prost(uint32, tag = "1")]
    pub flow_id: u32,
    #[prost(string, tag = "2")]
    pub description: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct ResponseFlowList {
    #[prost(message, optional, tag = "1")]
    pub error_info: Option<RteFlowError>,
    #[prost(message, repeated, tag = "2")]
    pub flows: Vec<FlowInfo>,
}

/// A port known to the flow service.
#[derive(Clone, PartialEq, Message)]
pub struct PortsInformation {
    #[prost(uint32, tag = "1")]
    pub port_id: u32,
    #[prost(string, tag = "2")]
    pub port_mode: String,
    #[prost(string, tag = "3")]
    pub port_name: String,
    /// PCI address of the physical function behind the port.
    #[prost(string, tag = "4")]
    pub port_pci: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct ResponseListPorts {
    #[prost(message, repeated, tag = "1")]
    pub ports: Vec<PortsInformation>,
}
