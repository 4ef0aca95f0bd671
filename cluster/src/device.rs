// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NICs observed on a node and the selectors matched against them.

use serde::{Deserialize, Serialize};

use rte::pci::PciAddress;

/// A NIC physical function as seen on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub pci_address: PciAddress,
    /// PCI vendor id, lower case hex without prefix (`8086`).
    pub vendor_id: String,
    pub device_id: String,
    pub driver: String,
}

/// Matches devices on every field that is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pci_address: Option<PciAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

impl DeviceSelector {
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        fn field<T: PartialEq>(want: Option<&T>, have: &T) -> bool {
            want.is_none_or(|want| want == have)
        }
        field(self.vendor_id.as_ref(), &device.vendor_id)
            && field(self.device_id.as_ref(), &device.device_id)
            && field(self.pci_address.as_ref(), &device.pci_address)
            && field(self.driver.as_ref(), &device.driver)
    }
}
