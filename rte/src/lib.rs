// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::module_name_repetitions)]

//! `rte_flow` rule model and validation.
//!
//! Rules are written against DPDK's `rte_flow` vocabulary (`RTE_FLOW_ITEM_TYPE_*`,
//! `RTE_FLOW_ACTION_TYPE_*`). This crate resolves their type names, decodes their payloads into
//! typed wire messages, validates them and produces the [`request::RequestFlowCreate`] sent to
//! the flow service.

pub mod action;
pub mod decode;
pub mod errors;
pub mod field;
pub mod item;
pub mod mac;
pub mod pci;
pub mod registry;
pub mod request;
pub mod rule;
pub mod validate;
pub mod wire;

pub use errors::FlowError;
pub use registry::Registry;
pub use rule::{FlowAction, FlowItem, FlowRule};
pub use validate::{Scope, ValidatedRule, Validator, Verdict};
