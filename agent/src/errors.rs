// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::path::PathBuf;

use cluster::TranslateError;
use rpc::RpcError;
use rte::FlowError;

use crate::vf::VfError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum AgentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
    #[error("rule {index}: {source}")]
    Flow { index: usize, source: FlowError },
    #[error("cluster rule {index}: {source}")]
    ClusterRule {
        index: usize,
        source: TranslateError,
    },
    #[error("rule {index}: {source}")]
    Vf { index: usize, source: VfError },
    #[error("rule {index}: no port {port_id} on the flow service")]
    UnknownPort { index: usize, port_id: u32 },
    #[error("rule file is for node '{found}', this is node '{expected}'")]
    WrongNode { expected: String, found: String },
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("invalid tracing configuration: {0}")]
    Tracing(String),
}
