// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Rule files.

use std::path::Path;

use cache::{Fingerprint, fingerprint};
use cluster::pod::Pod;
use cluster::{ClusterFlowConfig, NodeFlowConfig, check_rule, fan_out};
use rte::validate::validate_attr;
use rte::{FlowRule, Registry, Scope, Validator, Verdict};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AgentError;

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, AgentError> {
    let text = std::fs::read_to_string(path).map_err(|source| AgentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_yaml_ng::from_str(&text).map_err(|source| AgentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {}", path.display());
    Ok(value)
}

pub(crate) fn load_node_config(path: &Path) -> Result<NodeFlowConfig, AgentError> {
    load(path)
}

pub(crate) fn load_cluster_config(path: &Path) -> Result<ClusterFlowConfig, AgentError> {
    load(path)
}

pub(crate) fn load_pods(path: &Path) -> Result<Vec<Pod>, AgentError> {
    load(path)
}

/// Outcome of the offline validation of one node rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckedRule {
    pub node: String,
    pub index: usize,
    pub fingerprint: Fingerprint,
    pub verdict: Verdict,
}

/// Validate the rules of a node.
pub(crate) fn check_node_rules(
    registry: &Registry,
    node: &str,
    rules: &[FlowRule],
) -> Result<Vec<CheckedRule>, AgentError> {
    let validator = Validator::new(registry, Scope::Node);
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let validated = validator
                .validate_rule(rule)
                .map_err(|source| AgentError::Flow { index, source })?;
            Ok(CheckedRule {
                node: node.to_string(),
                index,
                fingerprint: fingerprint(&validated.to_request()),
                verdict: validated.verdict(),
            })
        })
        .collect()
}

/// Validate cluster rules, then the node rules they translate to for `pods`.
///
/// Cluster actions are checked even when no pod is selected.
pub(crate) fn check_cluster_rules(
    registry: &Registry,
    config: &ClusterFlowConfig,
    pods: &[Pod],
) -> Result<Vec<CheckedRule>, AgentError> {
    let validator = Validator::new(registry, Scope::Cluster);
    for (index, rule) in config.rules.iter().enumerate() {
        let flow = |source| AgentError::Flow { index, source };
        validator.validate_pattern(&rule.pattern).map_err(flow)?;
        validate_attr(&rule.attr.clone().unwrap_or_default()).map_err(flow)?;
        check_rule(rule).map_err(|source| AgentError::ClusterRule { index, source })?;
    }
    let mut checked = Vec::new();
    for node in fan_out(config, pods)? {
        checked.extend(check_node_rules(registry, &node.node_name, &node.rules)?);
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rte::FlowError;
    use cluster::{ClusterFlowAction, TranslateError};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    const NODE_RULES: &str = r#"
nodeName: worker-1
rules:
  - portId: 0
    pattern:
      - type: RTE_FLOW_ITEM_TYPE_ETH
        spec:
          dst: "00:00:5f:00:53:01"
      - type: RTE_FLOW_ITEM_TYPE_END
    action:
      - type: RTE_FLOW_ACTION_TYPE_QUEUE
        conf:
          index: 1
      - type: RTE_FLOW_ACTION_TYPE_END
"#;

    const CLUSTER_RULES: &str = r"
podSelector:
  matchLabels:
    app: cnf
rules:
  - pattern:
      - type: RTE_FLOW_ITEM_TYPE_ETH
      - type: RTE_FLOW_ITEM_TYPE_END
    action:
      - type: to-pod-interface
        conf:
          podInterface: net1
";

    const PODS: &str = r#"
- name: cnf-a
  namespace: default
  nodeName: worker-1
  labels:
    app: cnf
  annotations:
    k8s.v1.cni.cncf.io/network-status: '[{"name":"sriov","interface":"net1","device-info":{"type":"pci","version":"1.0.0","pci":{"pci-address":"0000:18:02.5"}}}]'
"#;

    #[test]
    fn node_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "node.yaml", NODE_RULES);
        let config = load_node_config(&path).unwrap();
        assert_eq!(config.node_name, "worker-1");
        let checked = check_node_rules(&Registry::new(), &config.node_name, &config.rules).unwrap();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].verdict, Verdict::Accepted);
        assert_eq!(checked[0].fingerprint.to_string().len(), 64);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_node_config(Path::new("/nonexistent/flowconfig.yaml")),
            Err(AgentError::Io { .. })
        ));
    }

    #[test]
    fn unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "broken.yaml", "nodeName: [");
        assert!(matches!(
            load_node_config(&path),
            Err(AgentError::Parse { .. })
        ));
    }

    #[test]
    fn cluster_file_with_pods() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_cluster_config(&write(&dir, "cluster.yaml", CLUSTER_RULES)).unwrap();
        let pods = load_pods(&write(&dir, "pods.yaml", PODS)).unwrap();
        let checked = check_cluster_rules(&Registry::new(), &config, &pods).unwrap();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].node, "worker-1");
    }

    #[test]
    fn cluster_file_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = load_cluster_config(&write(&dir, "cluster.yaml", CLUSTER_RULES)).unwrap();
        config.rules[0].pattern.pop();
        assert!(matches!(
            check_cluster_rules(&Registry::new(), &config, &[]),
            Err(AgentError::Flow {
                index: 0,
                source: FlowError::PatternNotTerminated(_)
            })
        ));
    }

    #[test]
    fn cluster_actions_checked_without_pods() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = load_cluster_config(&write(&dir, "cluster.yaml", CLUSTER_RULES)).unwrap();
        assert!(check_cluster_rules(&Registry::new(), &config, &[]).unwrap().is_empty());

        config.rules[0].action = vec![
            ClusterFlowAction {
                r#type: "RTE_FLOW_ACTION_TYPE_DROP".to_string(),
                conf: None,
            },
            ClusterFlowAction::to_pod_interface(""),
        ];
        assert!(matches!(
            check_cluster_rules(&Registry::new(), &config, &[]),
            Err(AgentError::ClusterRule {
                index: 0,
                source: TranslateError::UnsupportedAction(_)
            })
        ));

        config.rules[0].action = vec![ClusterFlowAction::to_pod_interface("")];
        assert!(matches!(
            check_cluster_rules(&Registry::new(), &config, &[]),
            Err(AgentError::ClusterRule {
                index: 0,
                source: TranslateError::EmptyInterface
            })
        ));
    }
}
