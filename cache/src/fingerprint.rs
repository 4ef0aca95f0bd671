// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::fmt::{Debug, Display};

use prost::Message;
use rte::request::RequestFlowCreate;
use sha2::{Digest, Sha256};

/// SHA-256 of the protobuf encoding of a [`RequestFlowCreate`].
///
/// Two requests built from equal rules encode identically, so they share a fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl From<[u8; 32]> for Fingerprint {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for octet in &self.0 {
            write!(f, "{octet:02x}")?;
        }
        Ok(())
    }
}

impl Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Fingerprint a rule creation request.
#[must_use]
pub fn fingerprint(request: &RequestFlowCreate) -> Fingerprint {
    Fingerprint(Sha256::digest(request.encode_to_vec()).into())
}
