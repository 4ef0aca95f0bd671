// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::module_name_repetitions)]

//! Cluster level flow rules.
//!
//! A [`ClusterFlowConfig`] selects pods by label and states its actions in terms of the pods'
//! network interfaces. It is turned into one [`NodeFlowConfig`] per node hosting a selected pod,
//! with every pod interface resolved to the PCI address of the VF behind it.

pub mod device;
mod errors;
pub mod network_status;
pub mod pod;
pub mod rule;
mod translate;

pub use errors::TranslateError;
pub use rule::{
    ClusterFlowAction, ClusterFlowActionType, ClusterFlowConfig, ClusterFlowRule, NodeFlowConfig,
};
pub use translate::{
    check_action, check_rule, fan_out, translate_action, translate_for_pod, translate_rule,
};
