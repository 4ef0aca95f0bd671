// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Record of the flow rules a node agent has installed.

mod fingerprint;
mod store;

pub use fingerprint::{Fingerprint, fingerprint};
pub use store::{FlowCache, FlowRecord};
