// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! PCI device addressing.
//!
//! Virtual functions handed to pods are identified by their PCI address in the extended BDF
//! format `domain:bus:device.function` (e.g. `0000:18:02.5`).

use std::fmt::Display;
use std::str::FromStr;

/// A PCI device address.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PciAddress {
    /// PCI domain (segment) number.
    pub domain: u16,
    /// PCI bus number.
    pub bus: u8,
    /// Device number on the bus (5 bits).
    pub device: u8,
    /// Function number within the device (3 bits).
    pub function: u8,
}

/// Errors that can occur when parsing a PCI address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPciAddress {
    #[error("invalid PCI address '{0}': should be domain:bus:device.function")]
    Syntax(String),
    #[error("invalid PCI address '{value}': {component} '{found}' is not valid")]
    Component {
        value: String,
        component: &'static str,
        found: String,
    },
}

impl PciAddress {
    const MAX_DEVICE: u8 = 0x1f;
    const MAX_FUNCTION: u8 = 0x7;

    /// Creates a new PCI address from its components.
    ///
    /// # Errors
    ///
    /// Fails if the device or function number exceed their bit width.
    pub fn new(domain: u16, bus: u8, device: u8, function: u8) -> Result<Self, InvalidPciAddress> {
        let address = Self {
            domain,
            bus,
            device,
            function,
        };
        if device > Self::MAX_DEVICE {
            return Err(address.component_error("device", device.to_string()));
        }
        if function > Self::MAX_FUNCTION {
            return Err(address.component_error("function", function.to_string()));
        }
        Ok(address)
    }

    fn component_error(&self, component: &'static str, found: String) -> InvalidPciAddress {
        InvalidPciAddress::Component {
            value: self.to_string(),
            component,
            found,
        }
    }
}

impl Display for PciAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04x}:{:02x}:{:02x}.{:01x}",
            self.domain, self.bus, self.device, self.function
        )
    }
}

impl TryFrom<&str> for PciAddress {
    type Error = InvalidPciAddress;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let syntax = || InvalidPciAddress::Syntax(value.to_string());
        if !value.is_ascii() || value.len() != 12 {
            return Err(syntax());
        }
        let mut parts = value.split(':');
        let (Some(domain), Some(bus), Some(devfn), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(syntax());
        };
        let Some((device, function)) = devfn.split_once('.') else {
            return Err(syntax());
        };
        if domain.len() != 4 || bus.len() != 2 || device.len() != 2 || function.len() != 1 {
            return Err(syntax());
        }
        let component = |name: &'static str, found: &str| InvalidPciAddress::Component {
            value: value.to_string(),
            component: name,
            found: found.to_string(),
        };
        // from_str_radix also takes a leading sign
        for (name, found) in [
            ("domain", domain),
            ("bus", bus),
            ("device", device),
            ("function", function),
        ] {
            if !found.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(component(name, found));
            }
        }
        let domain = u16::from_str_radix(domain, 16).map_err(|_| component("domain", domain))?;
        let bus = u8::from_str_radix(bus, 16).map_err(|_| component("bus", bus))?;
        let device_num = u8::from_str_radix(device, 16).map_err(|_| component("device", device))?;
        let function_num =
            u8::from_str_radix(function, 16).map_err(|_| component("function", function))?;
        if device_num > Self::MAX_DEVICE {
            return Err(component("device", device));
        }
        if function_num > Self::MAX_FUNCTION {
            return Err(component("function", function));
        }
        Ok(Self {
            domain,
            bus,
            device: device_num,
            function: function_num,
        })
    }
}

impl TryFrom<String> for PciAddress {
    type Error = InvalidPciAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PciAddress::try_from(value.as_str())
    }
}

impl FromStr for PciAddress {
    type Err = InvalidPciAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PciAddress::try_from(s)
    }
}

impl From<PciAddress> for String {
    fn from(value: PciAddress) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vf_address() {
        let addr = PciAddress::try_from("0000:18:02.5").unwrap();
        assert_eq!(addr, PciAddress::new(0, 0x18, 2, 5).unwrap());
        assert_eq!(addr.to_string(), "0000:18:02.5");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        for bad in ["", "0000:18:02", "0000:18:02.5.1", "0000-18-02.5", "000:018:02.5"] {
            assert!(PciAddress::try_from(bad).is_err(), "{bad} should not parse");
        }
        assert!(matches!(
            PciAddress::try_from("0000:18:20.5"),
            Err(InvalidPciAddress::Component {
                component: "device",
                ..
            })
        ));
        assert!(matches!(
            PciAddress::try_from("0000:18:02.8"),
            Err(InvalidPciAddress::Component {
                component: "function",
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_signs() {
        for (bad, name) in [
            ("+000:18:02.5", "domain"),
            ("-000:18:02.5", "domain"),
            ("0000:+1:02.5", "bus"),
            ("0000:18:+2.5", "device"),
            ("0000:18:02.+", "function"),
        ] {
            assert!(
                matches!(
                    PciAddress::try_from(bad),
                    Err(InvalidPciAddress::Component { component, .. }) if component == name
                ),
                "{bad} should fail on {name}"
            );
        }
    }

    #[test]
    fn serde_as_string() {
        let addr: PciAddress = serde_json::from_str("\"0000:af:00.1\"").unwrap();
        assert_eq!(addr, PciAddress::new(0, 0xaf, 0, 1).unwrap());
        assert_eq!(serde_json::to_string(&addr).unwrap(), "\"0000:af:00.1\"");
    }

    #[test]
    fn display_parse_back() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|(domain, bus, device, function): (u16, u8, u8, u8)| {
                let addr = PciAddress::new(domain, bus, device & 0x1f, function & 0x7).unwrap();
                assert_eq!(PciAddress::try_from(addr.to_string().as_str()).unwrap(), addr);
            });
    }
}
