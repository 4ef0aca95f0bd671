// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::collections::BTreeMap;
use std::str::FromStr;

use rte::action::ActionType;
use rte::{FlowAction, FlowRule};
use serde_json::json;
use tracing::{debug, warn};

use crate::TranslateError;
use crate::network_status::NetworkStatus;
use crate::pod::Pod;
use crate::rule::{
    ClusterFlowAction, ClusterFlowActionType, ClusterFlowConfig, ClusterFlowRule, NodeFlowConfig,
    ToPodInterfaceConf,
};

const PCI_DEVICE_TYPE: &str = "pci";

fn vf_pci_address(
    pod: &Pod,
    statuses: &[NetworkStatus],
    interface: &str,
) -> Result<String, TranslateError> {
    let status = statuses
        .iter()
        .find(|s| s.interface == interface)
        .ok_or_else(|| TranslateError::InterfaceNotFound {
            pod: pod.key(),
            interface: interface.to_string(),
        })?;
    let device = status.device_info.clone().unwrap_or_default();
    if device.r#type != PCI_DEVICE_TYPE {
        return Err(TranslateError::IncorrectDeviceType {
            pod: pod.key(),
            interface: interface.to_string(),
            found: device.r#type,
        });
    }
    match device.pci {
        Some(pci) if !pci.pci_address.is_empty() => Ok(pci.pci_address),
        _ => Err(TranslateError::MissingPciAddress {
            pod: pod.key(),
            interface: interface.to_string(),
        }),
    }
}

/// Check a cluster action on its own, without a pod to resolve it for.
///
/// # Errors
///
/// Fails on unsupported action types and bad configurations.
pub fn check_action(action: &ClusterFlowAction) -> Result<ToPodInterfaceConf, TranslateError> {
    let ty = ClusterFlowActionType::from_str(&action.r#type)
        .map_err(|_| TranslateError::UnsupportedAction(action.r#type.clone()))?;
    match ty {
        ClusterFlowActionType::ToPodInterface => {
            let raw = action.conf.clone().unwrap_or_default();
            let conf: ToPodInterfaceConf =
                serde_json::from_value(raw).map_err(|e| TranslateError::InvalidConf {
                    action: ty.name(),
                    reason: e.to_string(),
                })?;
            if conf.pod_interface.is_empty() {
                return Err(TranslateError::EmptyInterface);
            }
            Ok(conf)
        }
    }
}

/// Check every action of a cluster rule.
///
/// # Errors
///
/// Fails on the first action [`check_action`] rejects.
pub fn check_rule(rule: &ClusterFlowRule) -> Result<(), TranslateError> {
    rule.action.iter().try_for_each(|a| check_action(a).map(|_| ()))
}

/// Translate a cluster action into the node action it stands for on `pod`.
///
/// `route-to-pod-interface` becomes `RTE_FLOW_ACTION_TYPE_VFPCIADDR` with the PCI address of the VF
/// attached to the named pod interface.
///
/// # Errors
///
/// Fails on unsupported action types, bad configurations, and interfaces which are not backed
/// by a PCI device.
pub fn translate_action(action: &ClusterFlowAction, pod: &Pod) -> Result<FlowAction, TranslateError> {
    let conf = check_action(action)?;
    let statuses = pod.network_status()?;
    let addr = vf_pci_address(pod, &statuses, &conf.pod_interface)?;
    debug!(
        "pod {} interface {} is VF {addr}",
        pod.key(),
        conf.pod_interface
    );
    Ok(FlowAction::new(ActionType::VfPciAddr.name()).with_conf(json!({ "addr": addr })))
}

/// Translate a cluster rule for `pod`. The resulting action list is always END terminated.
///
/// # Errors
///
/// Fails on the first action which does not translate.
pub fn translate_rule(rule: &ClusterFlowRule, pod: &Pod) -> Result<FlowRule, TranslateError> {
    let mut action = rule
        .action
        .iter()
        .map(|a| translate_action(a, pod))
        .collect::<Result<Vec<_>, _>>()?;
    action.push(FlowAction::new(ActionType::End.name()));
    Ok(FlowRule {
        port_id: rule.port_id,
        pattern: rule.pattern.clone(),
        action,
        attr: rule.attr.clone(),
    })
}

/// Translate every rule of `config` for `pod`.
///
/// # Errors
///
/// Fails on the first rule which does not translate.
pub fn translate_for_pod(
    config: &ClusterFlowConfig,
    pod: &Pod,
) -> Result<Vec<FlowRule>, TranslateError> {
    config
        .rules
        .iter()
        .map(|rule| translate_rule(rule, pod))
        .collect()
}

/// Compute the node configurations of `config`, one per node hosting a selected pod.
///
/// Pods which are not scheduled yet, or have no network status yet, are skipped.
///
/// # Errors
///
/// Fails on the first rule which does not translate.
pub fn fan_out(
    config: &ClusterFlowConfig,
    pods: &[Pod],
) -> Result<Vec<NodeFlowConfig>, TranslateError> {
    let mut selected: Vec<&Pod> = pods
        .iter()
        .filter(|pod| config.pod_selector.matches(&pod.labels))
        .collect();
    selected.sort_by_key(|pod| pod.key());

    let mut nodes: BTreeMap<String, Vec<FlowRule>> = BTreeMap::new();
    for pod in selected {
        let Some(node_name) = &pod.node_name else {
            warn!("pod {} is not scheduled, skipping", pod.key());
            continue;
        };
        if let Err(e @ TranslateError::MissingAnnotation { .. }) = pod.network_status() {
            warn!("{e}, skipping");
            continue;
        }
        let rules = translate_for_pod(config, pod)?;
        nodes.entry(node_name.clone()).or_default().extend(rules);
    }
    Ok(nodes
        .into_iter()
        .map(|(node_name, rules)| NodeFlowConfig { node_name, rules })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network_status::NETWORK_STATUS_ANNOTATION;
    use crate::pod::LabelSelector;
    use pretty_assertions::assert_eq;
    use rte::FlowItem;
    use tracing_test::traced_test;

    fn pod(name: &str, node: Option<&str>, annotation: Option<&str>) -> Pod {
        let mut pod = Pod {
            name: name.to_string(),
            namespace: "default".to_string(),
            node_name: node.map(str::to_string),
            ..Default::default()
        };
        pod.labels.insert("app".to_string(), "upf".to_string());
        if let Some(annotation) = annotation {
            pod.annotations
                .insert(NETWORK_STATUS_ANNOTATION.to_string(), annotation.to_string());
        }
        pod
    }

    fn sriov_status(interface: &str, pci: &str) -> String {
        json!([
            {"name": "cbr0", "interface": "eth0", "default": true},
            {
                "name": "default/sriov-net",
                "interface": interface,
                "device-info": {"type": "pci", "version": "1.0.0", "pci": {"pci-address": pci}}
            }
        ])
        .to_string()
    }

    #[test]
    fn to_pod_interface_becomes_vf_pci_addr() {
        let pod = pod("upf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.5")));
        let action = translate_action(&ClusterFlowAction::to_pod_interface("net0"), &pod).unwrap();
        assert_eq!(
            action,
            FlowAction::new("RTE_FLOW_ACTION_TYPE_VFPCIADDR")
                .with_conf(json!({"addr": "0000:18:02.5"}))
        );
    }

    #[test]
    fn unsupported_action() {
        let pod = pod("upf-0", Some("node-a"), None);
        let action = ClusterFlowAction {
            r#type: "RTE_FLOW_ACTION_TYPE_DROP".to_string(),
            conf: None,
        };
        assert_eq!(
            translate_action(&action, &pod),
            Err(TranslateError::UnsupportedAction(
                "RTE_FLOW_ACTION_TYPE_DROP".to_string()
            ))
        );
    }

    #[test]
    fn bad_confs() {
        let pod = pod("upf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.5")));
        assert_eq!(
            translate_action(&ClusterFlowAction::to_pod_interface(""), &pod),
            Err(TranslateError::EmptyInterface)
        );
        let missing = ClusterFlowAction {
            conf: None,
            ..ClusterFlowAction::to_pod_interface("net0")
        };
        assert!(matches!(
            translate_action(&missing, &pod),
            Err(TranslateError::InvalidConf { .. })
        ));
        assert!(matches!(
            translate_action(&ClusterFlowAction::to_pod_interface("net1"), &pod),
            Err(TranslateError::InterfaceNotFound { .. })
        ));
    }

    #[test]
    fn actions_checked_without_pod() {
        assert_eq!(
            check_action(&ClusterFlowAction::to_pod_interface("net0")).map(|c| c.pod_interface),
            Ok("net0".to_string())
        );
        assert_eq!(
            check_action(&ClusterFlowAction::to_pod_interface("")),
            Err(TranslateError::EmptyInterface)
        );
        let rule = ClusterFlowRule {
            action: vec![
                ClusterFlowAction {
                    r#type: "RTE_FLOW_ACTION_TYPE_DROP".to_string(),
                    conf: None,
                },
                ClusterFlowAction::to_pod_interface(""),
            ],
            ..Default::default()
        };
        assert_eq!(
            check_rule(&rule),
            Err(TranslateError::UnsupportedAction(
                "RTE_FLOW_ACTION_TYPE_DROP".to_string()
            ))
        );
        assert!(check_rule(&ClusterFlowRule::default()).is_ok());
    }

    #[test]
    fn interface_must_be_a_pci_device() {
        let status = json!([
            {"interface": "net0", "device-info": {"type": "vdpa", "pci": {"pci-address": "0000:18:02.5"}}},
            {"interface": "net1", "device-info": {"type": "pci", "pci": {"pci-address": ""}}},
            {"interface": "net2"}
        ])
        .to_string();
        let pod = pod("upf-0", Some("node-a"), Some(&status));
        let err = translate_action(&ClusterFlowAction::to_pod_interface("net0"), &pod).unwrap_err();
        assert!(err.to_string().contains("incorrect device type"), "{err}");
        let err = translate_action(&ClusterFlowAction::to_pod_interface("net1"), &pod).unwrap_err();
        assert!(err.to_string().contains("missing pci-address"), "{err}");
        let err = translate_action(&ClusterFlowAction::to_pod_interface("net2"), &pod).unwrap_err();
        assert!(matches!(err, TranslateError::IncorrectDeviceType { .. }));
    }

    #[test]
    fn rule_gets_end() {
        let pod = pod("upf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.5")));
        let rule = ClusterFlowRule {
            pattern: vec![FlowItem::new("RTE_FLOW_ITEM_TYPE_END")],
            ..Default::default()
        };
        let translated = translate_rule(&rule, &pod).unwrap();
        assert_eq!(translated.action, vec![FlowAction::new("RTE_FLOW_ACTION_TYPE_END")]);
        assert_eq!(translated.pattern, rule.pattern);

        let rule = ClusterFlowRule {
            action: vec![ClusterFlowAction::to_pod_interface("net0")],
            ..rule
        };
        let translated = translate_rule(&rule, &pod).unwrap();
        assert_eq!(translated.action.len(), 2);
        assert_eq!(translated.action[1].r#type, "RTE_FLOW_ACTION_TYPE_END");
    }

    #[test]
    #[traced_test]
    fn fan_out_per_node() {
        let config = ClusterFlowConfig {
            pod_selector: LabelSelector {
                match_labels: [("app".to_string(), "upf".to_string())].into(),
            },
            rules: vec![ClusterFlowRule {
                pattern: vec![FlowItem::new("RTE_FLOW_ITEM_TYPE_END")],
                action: vec![ClusterFlowAction::to_pod_interface("net0")],
                ..Default::default()
            }],
        };
        let mut other = pod("smf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.1")));
        other.labels.insert("app".to_string(), "smf".to_string());
        let pods = vec![
            pod("upf-1", Some("node-b"), Some(&sriov_status("net0", "0000:af:02.0"))),
            pod("upf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.5"))),
            pod("upf-2", None, Some(&sriov_status("net0", "0000:af:02.1"))),
            pod("upf-3", Some("node-b"), None),
            other,
        ];
        let nodes = fan_out(&config, &pods).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_name, "node-a");
        assert_eq!(nodes[0].rules.len(), 1);
        assert_eq!(
            nodes[0].rules[0].action[0].conf,
            Some(json!({"addr": "0000:18:02.5"}))
        );
        assert_eq!(nodes[1].node_name, "node-b");
        assert_eq!(nodes[1].rules.len(), 1);
        assert!(logs_contain("pod default/upf-2 is not scheduled"));
        assert!(logs_contain("no network status annotation"));
    }

    #[test]
    fn fan_out_is_fail_fast() {
        let config = ClusterFlowConfig {
            rules: vec![ClusterFlowRule {
                action: vec![ClusterFlowAction::to_pod_interface("net9")],
                ..Default::default()
            }],
            ..Default::default()
        };
        let pods = vec![pod("upf-0", Some("node-a"), Some(&sriov_status("net0", "0000:18:02.5")))];
        assert!(matches!(
            fan_out(&config, &pods),
            Err(TranslateError::InterfaceNotFound { .. })
        ));
    }
}
