// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The parts of a pod the translation looks at.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TranslateError;
use crate::network_status::{self, NETWORK_STATUS_ANNOTATION, NetworkStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    /// Unset until the pod is scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl Pod {
    /// `namespace/name`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// The network attachments of the pod.
    ///
    /// # Errors
    ///
    /// Fails if the annotation is missing or does not parse.
    pub fn network_status(&self) -> Result<Vec<NetworkStatus>, TranslateError> {
        let value = self.annotations.get(NETWORK_STATUS_ANNOTATION).ok_or_else(|| {
            TranslateError::MissingAnnotation { pod: self.key() }
        })?;
        network_status::parse(value).map_err(|e| TranslateError::BadAnnotation {
            pod: self.key(),
            reason: e.to_string(),
        })
    }
}

/// Equality based label selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSelector {
    pub match_labels: BTreeMap<String, String>,
}

impl LabelSelector {
    /// An empty selector matches every pod.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.match_labels
            .iter()
            .all(|(k, v)| labels.get(k) == Some(v))
    }
}
