// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! In-memory [`FlowService`] for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rte::request::RequestFlowCreate;

use crate::messages::{FlowInfo, PortsInformation, RteFlowQueryCount};
use crate::{FlowService, RpcError};

#[derive(Debug, Default)]
struct State {
    ports: Vec<PortsInformation>,
    flows: BTreeMap<(u32, u32), RequestFlowCreate>,
    next_flow_id: u32,
    list_ports_failures: u32,
    create_failures: u32,
    destroy_failures: u32,
    calls: Vec<String>,
}

/// A flow service keeping its rules in memory.
///
/// Failures of individual operations can be injected.
#[derive(Debug, Default)]
pub struct FakeFlowService {
    state: Mutex<State>,
}

fn unavailable() -> RpcError {
    RpcError::Status {
        code: tonic::Code::Unavailable,
        message: "injected failure".to_string(),
    }
}

impl FakeFlowService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn add_port(&self, port_id: u32, pci: &str) {
        self.with_state(|s| {
            s.ports.push(PortsInformation {
                port_id,
                port_mode: "hw".to_string(),
                port_name: format!("port{port_id}"),
                port_pci: pci.to_string(),
            });
        });
    }

    pub fn fail_next_list_ports(&self, count: u32) {
        self.with_state(|s| s.list_ports_failures = count);
    }

    pub fn fail_next_create(&self, count: u32) {
        self.with_state(|s| s.create_failures = count);
    }

    pub fn fail_next_destroy(&self, count: u32) {
        self.with_state(|s| s.destroy_failures = count);
    }

    /// Rules currently installed, by `(port_id, flow_id)`.
    #[must_use]
    pub fn flows(&self) -> BTreeMap<(u32, u32), RequestFlowCreate> {
        self.with_state(|s| s.flows.clone())
    }

    /// Names of the operations called so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }
}

fn take_failure(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}

#[async_trait]
impl FlowService for FakeFlowService {
    async fn validate(&self, _request: RequestFlowCreate) -> Result<(), RpcError> {
        self.with_state(|s| s.calls.push("validate".to_string()));
        Ok(())
    }

    async fn create(&self, request: RequestFlowCreate) -> Result<u32, RpcError> {
        self.with_state(|s| {
            s.calls.push("create".to_string());
            if take_failure(&mut s.create_failures) {
                return Err(unavailable());
            }
            let flow_id = s.next_flow_id;
            s.next_flow_id += 1;
            s.flows.insert((request.port_id, flow_id), request);
            Ok(flow_id)
        })
    }

    async fn destroy(&self, port_id: u32, flow_id: u32) -> Result<(), RpcError> {
        self.with_state(|s| {
            s.calls.push("destroy".to_string());
            if take_failure(&mut s.destroy_failures) {
                return Err(unavailable());
            }
            match s.flows.remove(&(port_id, flow_id)) {
                Some(_) => Ok(()),
                None => Err(RpcError::Flow {
                    kind: 1,
                    message: format!("no flow {flow_id} on port {port_id}"),
                }),
            }
        })
    }

    async fn query(&self, port_id: u32, flow_id: u32) -> Result<RteFlowQueryCount, RpcError> {
        self.with_state(|s| {
            s.calls.push("query".to_string());
            if s.flows.contains_key(&(port_id, flow_id)) {
                Ok(RteFlowQueryCount::default())
            } else {
                Err(RpcError::Flow {
                    kind: 1,
                    message: format!("no flow {flow_id} on port {port_id}"),
                })
            }
        })
    }

    async fn list(&self, port_id: u32) -> Result<Vec<FlowInfo>, RpcError> {
        self.with_state(|s| {
            s.calls.push("list".to_string());
            Ok(s.flows
                .keys()
                .filter(|(port, _)| *port == port_id)
                .map(|(_, flow_id)| FlowInfo {
                    flow_id: *flow_id,
                    description: String::new(),
                })
                .collect())
        })
    }

    async fn flush(&self, port_id: u32) -> Result<(), RpcError> {
        self.with_state(|s| {
            s.calls.push("flush".to_string());
            s.flows.retain(|(port, _), _| *port != port_id);
            Ok(())
        })
    }

    async fn isolate(&self, _port_id: u32, _set: bool) -> Result<(), RpcError> {
        self.with_state(|s| s.calls.push("isolate".to_string()));
        Ok(())
    }

    async fn list_ports(&self) -> Result<Vec<PortsInformation>, RpcError> {
        self.with_state(|s| {
            s.calls.push("list_ports".to_string());
            if take_failure(&mut s.list_ports_failures) {
                return Err(unavailable());
            }
            Ok(s.ports.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_list_destroy() {
        let service = FakeFlowService::new();
        let request = RequestFlowCreate {
            port_id: 1,
            ..Default::default()
        };
        let id = service.create(request.clone()).await.unwrap();
        assert_eq!(service.list(1).await.unwrap().len(), 1);
        assert!(service.list(0).await.unwrap().is_empty());
        service.destroy(1, id).await.unwrap();
        assert!(service.destroy(1, id).await.is_err());
        assert!(service.flows().is_empty());
    }
}
