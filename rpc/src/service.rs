// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use async_trait::async_trait;
use rte::request::RequestFlowCreate;

use crate::RpcError;
use crate::messages::{FlowInfo, PortsInformation, RteFlowQueryCount};

/// Operations of the node flow service.
///
/// Calls are not retried: errors go back to the caller, which retries on its next
/// reconciliation.
#[async_trait]
pub trait FlowService: Send + Sync {
    /// Check that a rule could be created, without creating it.
    async fn validate(&self, request: RequestFlowCreate) -> Result<(), RpcError>;
    /// Create a rule and return its flow id.
    async fn create(&self, request: RequestFlowCreate) -> Result<u32, RpcError>;
    async fn destroy(&self, port_id: u32, flow_id: u32) -> Result<(), RpcError>;
    async fn query(&self, port_id: u32, flow_id: u32) -> Result<RteFlowQueryCount, RpcError>;
    async fn list(&self, port_id: u32) -> Result<Vec<FlowInfo>, RpcError>;
    /// Destroy every rule of a port.
    async fn flush(&self, port_id: u32) -> Result<(), RpcError>;
    /// Restrict ingress traffic of a port to the traffic matched by rules.
    async fn isolate(&self, port_id: u32, set: bool) -> Result<(), RpcError>;
    async fn list_ports(&self) -> Result<Vec<PortsInformation>, RpcError>;
}
