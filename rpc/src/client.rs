// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! gRPC client of the flow service.

use std::time::Duration;

use async_trait::async_trait;
use rte::request::RequestFlowCreate;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, instrument};

use crate::messages::{
    FlowInfo, PortsInformation, RequestFlowIsolate, RequestFlowofPort, RequestListPorts,
    RequestofPort, ResponseFlow, ResponseFlowCreate, ResponseFlowList, ResponseFlowQuery,
    ResponseListPorts, RteFlowError, RteFlowQueryCount,
};
use crate::{FlowService, RpcError};

const VALIDATE: &str = "/flow.FlowService/Validate";
const CREATE: &str = "/flow.FlowService/Create";
const DESTROY: &str = "/flow.FlowService/Destroy";
const QUERY: &str = "/flow.FlowService/Query";
const LIST: &str = "/flow.FlowService/List";
const FLUSH: &str = "/flow.FlowService/Flush";
const ISOLATE: &str = "/flow.FlowService/Isolate";
const LIST_PORTS: &str = "/flow.FlowService/ListPorts";

/// [`FlowService`] over a gRPC channel.
///
/// Cloning is cheap, clones share the channel.
#[derive(Debug, Clone)]
pub struct GrpcFlowClient {
    inner: Grpc<Channel>,
}

impl GrpcFlowClient {
    /// Create a client for `endpoint` (e.g. `http://localhost:31000`).
    ///
    /// The connection is only established on the first call. Every call is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if `endpoint` is not a valid URI.
    pub fn connect_lazy(endpoint: &str, timeout: Duration) -> Result<Self, RpcError> {
        let channel = Endpoint::from_shared(endpoint.to_string())
            .map_err(|e| RpcError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?
            .timeout(timeout)
            .connect_timeout(timeout)
            .connect_lazy();
        debug!("flow service client for {endpoint}, timeout {timeout:?}");
        Ok(Self {
            inner: Grpc::new(channel),
        })
    }

    async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> Result<Resp, RpcError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        let codec = tonic_prost::ProstCodec::default();
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl FlowService for GrpcFlowClient {
    #[instrument(level = "debug", skip_all, fields(port_id = request.port_id))]
    async fn validate(&self, request: RequestFlowCreate) -> Result<(), RpcError> {
        let response: ResponseFlow = self.unary(VALIDATE, request).await?;
        RteFlowError::check(response.error_info.as_ref())
    }

    #[instrument(level = "debug", skip_all, fields(port_id = request.port_id))]
    async fn create(&self, request: RequestFlowCreate) -> Result<u32, RpcError> {
        let response: ResponseFlowCreate = self.unary(CREATE, request).await?;
        RteFlowError::check(response.error_info.as_ref())?;
        Ok(response.flow_id)
    }

    #[instrument(level = "debug", skip(self))]
    async fn destroy(&self, port_id: u32, flow_id: u32) -> Result<(), RpcError> {
        let response: ResponseFlow = self
            .unary(DESTROY, RequestFlowofPort { port_id, flow_id })
            .await?;
        RteFlowError::check(response.error_info.as_ref())
    }

    #[instrument(level = "debug", skip(self))]
    async fn query(&self, port_id: u32, flow_id: u32) -> Result<RteFlowQueryCount, RpcError> {
        let response: ResponseFlowQuery = self
            .unary(QUERY, RequestFlowofPort { port_id, flow_id })
            .await?;
        RteFlowError::check(response.error_info.as_ref())?;
        Ok(response.count.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    async fn list(&self, port_id: u32) -> Result<Vec<FlowInfo>, RpcError> {
        let response: ResponseFlowList = self.unary(LIST, RequestofPort { port_id }).await?;
        RteFlowError::check(response.error_info.as_ref())?;
        Ok(response.flows)
    }

    #[instrument(level = "debug", skip(self))]
    async fn flush(&self, port_id: u32) -> Result<(), RpcError> {
        let response: ResponseFlow = self.unary(FLUSH, RequestofPort { port_id }).await?;
        RteFlowError::check(response.error_info.as_ref())
    }

    #[instrument(level = "debug", skip(self))]
    async fn isolate(&self, port_id: u32, set: bool) -> Result<(), RpcError> {
        let request = RequestFlowIsolate {
            port_id,
            set: i32::from(set),
        };
        let response: ResponseFlow = self.unary(ISOLATE, request).await?;
        RteFlowError::check(response.error_info.as_ref())
    }

    async fn list_ports(&self) -> Result<Vec<PortsInformation>, RpcError> {
        let response: ResponseListPorts = self.unary(LIST_PORTS, RequestListPorts {}).await?;
        Ok(response.ports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_endpoint() {
        let err = GrpcFlowClient::connect_lazy("not a uri", Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, RpcError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        // nothing listens on the discard port
        let client =
            GrpcFlowClient::connect_lazy("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        assert!(client.list_ports().await.is_err());
    }
}
