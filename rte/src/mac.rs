// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Mac address type used by the human readable form of the ethernet item.

use std::fmt::Display;

/// A [MAC Address] in colon-hex notation (`00:00:5f:00:53:01`).
///
/// [MAC Address]: https://en.wikipedia.org/wiki/MAC_address
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Mac(pub [u8; 6]);

impl From<[u8; 6]> for Mac {
    fn from(value: [u8; 6]) -> Self {
        Mac(value)
    }
}

impl From<Mac> for [u8; 6] {
    fn from(value: Mac) -> Self {
        value.0
    }
}

impl AsRef<[u8; 6]> for Mac {
    fn as_ref(&self) -> &[u8; 6] {
        &self.0
    }
}

/// Errors which can occur while converting a string to a [`Mac`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacFromStringError {
    /// Invalid string representation of mac address
    #[error("invalid string representation of mac address: '{0}'")]
    Invalid(String),
}

impl TryFrom<&str> for Mac {
    type Error = MacFromStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = || MacFromStringError::Invalid(value.to_string());
        let mut octets = [0u8; 6];
        let mut parts = value.split(':');
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Mac(octets))
    }
}

impl Mac {
    /// Interpret the address as a 48 bit big endian integer.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, octet| (acc << 8) | u64::from(*octet))
    }
}

impl Display for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colon_hex() {
        let mac = Mac::try_from("00:00:5f:00:53:01").unwrap();
        assert_eq!(mac, Mac([0x00, 0x00, 0x5f, 0x00, 0x53, 0x01]));
        assert_eq!(mac.to_string(), "00:00:5f:00:53:01");
        assert_eq!(mac.as_u64(), 0x0000_5f00_5301);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in [
            "",
            "00:00:5f:00:53",
            "00:00:5f:00:53:01:02",
            "00-00-5f-00-53-01",
            "0:00:5f:00:53:01",
            "zz:00:5f:00:53:01",
        ] {
            assert_eq!(
                Mac::try_from(bad),
                Err(MacFromStringError::Invalid(bad.to_string())),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    #[cfg_attr(kani, kani::proof)]
    fn display_parse_back() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|octets: [u8; 6]| {
                let mac = Mac::from(octets);
                let parsed = Mac::try_from(mac.to_string().as_str()).unwrap();
                assert_eq!(<[u8; 6]>::from(parsed), octets);
            });
    }
}
