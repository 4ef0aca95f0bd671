// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The network status annotation set on pods by multus.

use serde::{Deserialize, Serialize};

/// Annotation key of the network status of a pod.
pub const NETWORK_STATUS_ANNOTATION: &str = "k8s.v1.cni.cncf.io/network-status";

/// One network attachment of a pod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkStatus {
    pub name: String,
    pub interface: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
    pub default: bool,
    #[serde(rename = "device-info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub r#type: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pci: Option<PciDevice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PciDevice {
    #[serde(rename = "pci-address")]
    pub pci_address: String,
    #[serde(rename = "pf-pci-address", skip_serializing_if = "String::is_empty")]
    pub pf_pci_address: String,
}

/// Parse the value of the [`NETWORK_STATUS_ANNOTATION`].
///
/// # Errors
///
/// Fails if the value is not a JSON array of attachments.
pub fn parse(value: &str) -> Result<Vec<NetworkStatus>, serde_json::Error> {
    serde_json::from_str(value)
}
