// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Cluster and node flow configurations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rte::request::RteFlowAttr;
use rte::{FlowItem, FlowRule};

use crate::pod::LabelSelector;

/// Actions a cluster rule may use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum ClusterFlowActionType {
    /// Send matching packets to the VF behind a pod network interface.
    #[strum(to_string = "route-to-pod-interface", serialize = "to-pod-interface")]
    ToPodInterface,
}

impl ClusterFlowActionType {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Configuration of [`ClusterFlowActionType::ToPodInterface`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToPodInterfaceConf {
    #[serde(alias = "podInterfaceName")]
    pub pod_interface: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterFlowAction {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<Value>,
}

impl ClusterFlowAction {
    #[must_use]
    pub fn to_pod_interface(interface: &str) -> Self {
        Self {
            r#type: ClusterFlowActionType::ToPodInterface.name().to_string(),
            conf: Some(serde_json::json!({ "podInterface": interface })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterFlowRule {
    #[serde(default)]
    pub port_id: u32,
    #[serde(default)]
    pub pattern: Vec<FlowItem>,
    #[serde(default)]
    pub action: Vec<ClusterFlowAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<RteFlowAttr>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterFlowConfig {
    #[serde(default)]
    pub pod_selector: LabelSelector,
    #[serde(default)]
    pub rules: Vec<ClusterFlowRule>,
}

/// The flow rules of one node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeFlowConfig {
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub rules: Vec<FlowRule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cluster_config_from_yaml() {
        let yaml = r"
podSelector:
  matchLabels:
    app: upf
rules:
  - pattern:
      - type: RTE_FLOW_ITEM_TYPE_ETH
      - type: RTE_FLOW_ITEM_TYPE_IPV4
        spec:
          hdr:
            dst_addr: 10.56.217.9
      - type: RTE_FLOW_ITEM_TYPE_END
    action:
      - type: route-to-pod-interface
        conf:
          podInterface: net0
";
        let config: ClusterFlowConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.pod_selector.match_labels["app"], "upf");
        assert_eq!(config.rules.len(), 1);
        assert_eq!(
            config.rules[0].action,
            vec![ClusterFlowAction::to_pod_interface("net0")]
        );
    }

    #[test]
    fn action_type_names() {
        use std::str::FromStr;
        for name in ["route-to-pod-interface", "to-pod-interface"] {
            assert_eq!(
                ClusterFlowActionType::from_str(name),
                Ok(ClusterFlowActionType::ToPodInterface)
            );
        }
        assert_eq!(
            ClusterFlowActionType::ToPodInterface.name(),
            "route-to-pod-interface"
        );
        assert!(ClusterFlowActionType::from_str("to-pod").is_err());
    }

    #[test]
    fn pod_interface_name_alias() {
        let conf: ToPodInterfaceConf =
            serde_json::from_value(serde_json::json!({"podInterfaceName": "net1"})).unwrap();
        assert_eq!(conf.pod_interface, "net1");
    }
}
