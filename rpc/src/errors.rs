// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use tonic::Code;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("invalid flow service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("flow service unreachable: {0}")]
    Transport(String),
    #[error("flow service call failed ({code}): {message}")]
    Status { code: Code, message: String },
    #[error("flow service error {kind}: {message}")]
    Flow { kind: u32, message: String },
    #[error("flow service not ready after {attempts} attempts")]
    NotReady {
        attempts: u32,
        #[source]
        last: Option<Box<RpcError>>,
    },
}

impl From<tonic::Status> for RpcError {
    fn from(status: tonic::Status) -> Self {
        RpcError::Status {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}
