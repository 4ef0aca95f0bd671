// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::collections::{BTreeMap, BTreeSet};

use rte::request::RequestFlowCreate;
use tracing::debug;

use crate::Fingerprint;

/// A rule installed on the flow service.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRecord {
    /// Handle returned by the flow service.
    pub flow_id: u32,
    pub rule: RequestFlowCreate,
}

/// Installed rules, keyed by fingerprint.
///
/// Only rules confirmed by the flow service are recorded. The cache has a single owner which
/// performs every mutation.
#[derive(Debug, Default)]
pub struct FlowCache {
    records: BTreeMap<Fingerprint, FlowRecord>,
}

impl FlowCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an installed rule. The first record of a fingerprint wins.
    ///
    /// Returns false if the fingerprint was already recorded.
    pub fn add(&mut self, fingerprint: Fingerprint, flow_id: u32, rule: RequestFlowCreate) -> bool {
        if self.records.contains_key(&fingerprint) {
            debug!("flow {fingerprint} already recorded");
            return false;
        }
        self.records
            .insert(fingerprint, FlowRecord { flow_id, rule });
        true
    }

    pub fn delete(&mut self, fingerprint: &Fingerprint) -> Option<FlowRecord> {
        self.records.remove(fingerprint)
    }

    #[must_use]
    pub fn has(&self, fingerprint: &Fingerprint) -> bool {
        self.records.contains_key(fingerprint)
    }

    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&FlowRecord> {
        self.records.get(fingerprint)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fingerprints of every record, in order.
    pub fn fingerprints(&self) -> impl Iterator<Item = &Fingerprint> {
        self.records.keys()
    }

    /// Every record whose fingerprint is not in `known`.
    ///
    /// With the fingerprints of the desired rules, these are the rules to tear down.
    #[must_use]
    pub fn complement(&self, known: &[Fingerprint]) -> BTreeMap<Fingerprint, FlowRecord> {
        let known: BTreeSet<&Fingerprint> = known.iter().collect();
        self.records
            .iter()
            .filter(|(fp, _)| !known.contains(fp))
            .map(|(fp, record)| (*fp, record.clone()))
            .collect()
    }
}
