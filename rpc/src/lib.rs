// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::module_name_repetitions)]

//! Client side of the flow service running on every node.
//!
//! The service programs `rte_flow` rules on the NICs of the node. It is reached over gRPC
//! ([`GrpcFlowClient`]); the rest of the workspace only sees the [`FlowService`] trait.

mod client;
mod errors;
pub mod messages;
mod ready;
mod service;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

pub use client::GrpcFlowClient;
pub use errors::RpcError;
pub use ready::{Backoff, wait_ready};
pub use service::FlowService;
