// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Node reconciliation.
//!
//! The reconciler brings the flow service in line with the rules of the node: rules not yet in
//! the [`FlowCache`] are created, cached rules no longer wanted are destroyed. The cache records
//! only what the service acknowledged, so a failed pass is simply repeated on the next resync.

use cache::{Fingerprint, FlowCache, fingerprint};
use rpc::FlowService;
use rpc::messages::PortsInformation;
use rte::action::ActionType;
use rte::field::Role;
use rte::pci::PciAddress;
use rte::validate::{ValidatedAction, ValidatedRule};
use rte::wire::ActionConf;
use rte::wire::action::RteFlowActionVf;
use rte::{FlowError, FlowRule, Registry, Scope, Validator, Verdict};
use tracing::{debug, info, warn};

use crate::errors::AgentError;
use crate::vf::{VfError, VfLookup};

/// What a reconciliation pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReconcileReport {
    pub created: usize,
    pub destroyed: usize,
    pub unchanged: usize,
    /// Desired rules holding elements without field rules.
    pub unvalidated: usize,
}

pub(crate) struct NodeReconciler<S, L> {
    service: S,
    lookup: L,
    registry: Registry,
    cache: FlowCache,
}

impl<S: FlowService, L: VfLookup> NodeReconciler<S, L> {
    pub(crate) fn new(service: S, lookup: L, registry: Registry) -> Self {
        Self {
            service,
            lookup,
            registry,
            cache: FlowCache::new(),
        }
    }

    pub(crate) fn cache(&self) -> &FlowCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn service(&self) -> &S {
        &self.service
    }

    /// Reconcile the flow service with `rules`.
    ///
    /// Every rule is validated before anything is sent to the service.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid rule, or on the first failed remote call. Rules created before
    /// a failure stay cached.
    #[tracing::instrument(level = "info", skip_all, fields(rules = rules.len()))]
    pub(crate) async fn reconcile(
        &mut self,
        rules: &[FlowRule],
    ) -> Result<ReconcileReport, AgentError> {
        let validator = Validator::new(&self.registry, Scope::Node);
        let mut validated = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                validator
                    .validate_rule(rule)
                    .map_err(|source| AgentError::Flow { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if validated.iter().any(has_vf_pci_addr) {
            let ports = self.service.list_ports().await?;
            for (index, rule) in validated.iter_mut().enumerate() {
                self.resolve_vf_pci_addr(index, rule, &ports)?;
            }
        }

        let mut report = ReconcileReport::default();
        let mut desired = Vec::with_capacity(validated.len());
        for rule in &validated {
            let request = rule.to_request();
            let fp = fingerprint(&request);
            desired.push(fp);
            if rule.verdict() == Verdict::AcceptedUnvalidated {
                report.unvalidated += 1;
            }
            if self.cache.has(&fp) {
                report.unchanged += 1;
                continue;
            }
            let flow_id = self.service.create(request.clone()).await?;
            debug!("created flow {flow_id} on port {} ({fp})", request.port_id);
            self.cache.add(fp, flow_id, request);
            report.created += 1;
        }

        for (fp, record) in self.cache.complement(&desired) {
            self.destroy(&fp, record.rule.port_id, record.flow_id).await?;
            report.destroyed += 1;
        }

        info!(
            "created {} destroyed {} unchanged {} rules",
            report.created, report.destroyed, report.unchanged
        );
        if report.unvalidated > 0 {
            warn!("{} rules were only partially validated", report.unvalidated);
        }
        Ok(report)
    }

    async fn destroy(
        &mut self,
        fp: &Fingerprint,
        port_id: u32,
        flow_id: u32,
    ) -> Result<(), AgentError> {
        self.service.destroy(port_id, flow_id).await?;
        self.cache.delete(fp);
        debug!("destroyed flow {flow_id} on port {port_id} ({fp})");
        Ok(())
    }

    /// Replace the VFPCIADDR actions of a rule by VF actions.
    fn resolve_vf_pci_addr(
        &self,
        index: usize,
        rule: &mut ValidatedRule,
        ports: &[PortsInformation],
    ) -> Result<(), AgentError> {
        if !has_vf_pci_addr(rule) {
            return Ok(());
        }
        let port = ports
            .iter()
            .find(|p| p.port_id == rule.port_id)
            .ok_or(AgentError::UnknownPort {
                index,
                port_id: rule.port_id,
            })?;
        let vf_error = |source: VfError| AgentError::Vf { index, source };
        let pf = PciAddress::try_from(port.port_pci.as_str()).map_err(|e| vf_error(e.into()))?;

        for (position, action) in rule.action.iter_mut().enumerate() {
            let Some(ActionConf::VfPciAddr(conf)) = &action.conf else {
                continue;
            };
            let vf = PciAddress::try_from(conf.addr.as_str()).map_err(|e| vf_error(e.into()))?;
            let id = self.lookup.vf_index(&pf, &vf).map_err(vf_error)?;
            let conf = ActionConf::Vf(RteFlowActionVf {
                original: 0,
                reserved: 0,
                id,
            });
            conf.validate(&conf, Role::Spec)
                .map_err(|source| AgentError::Flow {
                    index,
                    source: FlowError::ActionField {
                        index: position,
                        action: ActionType::Vf,
                        source,
                    },
                })?;
            debug!("port {}: {vf} is VF {id} of {pf}", rule.port_id);
            *action = ValidatedAction {
                ty: ActionType::Vf,
                conf: Some(conf),
                verdict: Verdict::Accepted,
            };
        }
        Ok(())
    }
}

fn has_vf_pci_addr(rule: &ValidatedRule) -> bool {
    rule.action.iter().any(|a| a.ty == ActionType::VfPciAddr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vf::tests::StaticVfLookup;
    use pretty_assertions::assert_eq;
    use rpc::fake::FakeFlowService;
    use rte::{FlowAction, FlowItem};
    use serde_json::json;

    const PF: &str = "0000:18:00.0";
    const VF: &str = "0000:18:02.5";

    fn reconciler() -> NodeReconciler<FakeFlowService, StaticVfLookup> {
        let service = FakeFlowService::new();
        service.add_port(0, PF);
        let mut lookup = StaticVfLookup::default();
        lookup.0.insert(
            (PciAddress::try_from(PF).unwrap(), PciAddress::try_from(VF).unwrap()),
            7,
        );
        NodeReconciler::new(service, lookup, Registry::new())
    }

    fn end_item() -> FlowItem {
        FlowItem::new("RTE_FLOW_ITEM_TYPE_END")
    }

    fn end_action() -> FlowAction {
        FlowAction::new("RTE_FLOW_ACTION_TYPE_END")
    }

    fn queue_rule(dst: &str, queue: u32) -> FlowRule {
        FlowRule {
            port_id: 0,
            pattern: vec![
                FlowItem::new("RTE_FLOW_ITEM_TYPE_ETH").with_spec(json!({"dst": dst})),
                end_item(),
            ],
            action: vec![
                FlowAction::new("RTE_FLOW_ACTION_TYPE_QUEUE").with_conf(json!({"index": queue})),
                end_action(),
            ],
            attr: None,
        }
    }

    fn vf_pci_rule(addr: &str) -> FlowRule {
        FlowRule {
            port_id: 0,
            pattern: vec![FlowItem::new("RTE_FLOW_ITEM_TYPE_ETH"), end_item()],
            action: vec![
                FlowAction::new("RTE_FLOW_ACTION_TYPE_VFPCIADDR").with_conf(json!({"addr": addr})),
                end_action(),
            ],
            attr: None,
        }
    }

    #[tokio::test]
    async fn creates_then_converges() {
        let mut reconciler = reconciler();
        let rules = vec![
            queue_rule("00:00:5f:00:53:01", 1),
            queue_rule("00:00:5f:00:53:02", 2),
        ];
        let report = reconciler.reconcile(&rules).await.unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(reconciler.cache().size(), 2);
        assert_eq!(reconciler.service().flows().len(), 2);

        let report = reconciler.reconcile(&rules).await.unwrap();
        assert_eq!(
            report,
            ReconcileReport {
                unchanged: 2,
                ..ReconcileReport::default()
            }
        );
        assert_eq!(reconciler.service().flows().len(), 2);
    }

    #[tokio::test]
    async fn destroys_rules_no_longer_wanted() {
        let mut reconciler = reconciler();
        let first = queue_rule("00:00:5f:00:53:01", 1);
        let second = queue_rule("00:00:5f:00:53:02", 2);
        reconciler
            .reconcile(&[first.clone(), second])
            .await
            .unwrap();

        let report = reconciler.reconcile(&[first]).await.unwrap();
        assert_eq!(report.destroyed, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(reconciler.cache().size(), 1);
        assert_eq!(reconciler.service().flows().len(), 1);

        let report = reconciler.reconcile(&[]).await.unwrap();
        assert_eq!(report.destroyed, 1);
        assert!(reconciler.cache().is_empty());
        assert!(reconciler.service().flows().is_empty());
    }

    #[tokio::test]
    async fn duplicate_rules_are_created_once() {
        let mut reconciler = reconciler();
        let rule = queue_rule("00:00:5f:00:53:01", 1);
        let report = reconciler
            .reconcile(&[rule.clone(), rule])
            .await
            .unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(reconciler.service().flows().len(), 1);
    }

    #[tokio::test]
    async fn invalid_rule_sends_nothing() {
        let mut reconciler = reconciler();
        let mut bad = queue_rule("00:00:5f:00:53:02", 2);
        bad.action.pop();
        let err = reconciler
            .reconcile(&[queue_rule("00:00:5f:00:53:01", 1), bad])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Flow {
                index: 1,
                source: FlowError::ActionsNotTerminated(_)
            }
        ));
        assert!(reconciler.service().calls().is_empty());
        assert!(reconciler.cache().is_empty());
    }

    #[tokio::test]
    async fn failed_create_is_not_cached() {
        let mut reconciler = reconciler();
        reconciler.service().fail_next_create(1);
        let rules = vec![queue_rule("00:00:5f:00:53:01", 1)];
        assert!(matches!(
            reconciler.reconcile(&rules).await,
            Err(AgentError::Rpc(_))
        ));
        assert!(reconciler.cache().is_empty());

        let report = reconciler.reconcile(&rules).await.unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(reconciler.cache().size(), 1);
    }

    #[tokio::test]
    async fn failed_destroy_stays_cached() {
        let mut reconciler = reconciler();
        reconciler
            .reconcile(&[queue_rule("00:00:5f:00:53:01", 1)])
            .await
            .unwrap();
        reconciler.service().fail_next_destroy(1);
        assert!(reconciler.reconcile(&[]).await.is_err());
        assert_eq!(reconciler.cache().size(), 1);

        let report = reconciler.reconcile(&[]).await.unwrap();
        assert_eq!(report.destroyed, 1);
        assert!(reconciler.cache().is_empty());
    }

    #[tokio::test]
    async fn vf_pci_addr_becomes_vf_index() {
        let mut reconciler = reconciler();
        reconciler.reconcile(&[vf_pci_rule(VF)]).await.unwrap();
        let flows = reconciler.service().flows();
        let request = flows.values().next().unwrap();
        assert_eq!(request.action[0].r#type, ActionType::Vf.as_i32());
        let expected = ActionConf::Vf(RteFlowActionVf {
            original: 0,
            reserved: 0,
            id: 7,
        })
        .to_any();
        assert_eq!(request.action[0].conf.as_ref(), Some(&expected));
        assert!(reconciler.service().calls().contains(&"list_ports".to_string()));
    }

    #[tokio::test]
    async fn unknown_vf_is_an_error() {
        let mut reconciler = reconciler();
        let err = reconciler
            .reconcile(&[vf_pci_rule("0000:18:03.0")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Vf {
                index: 0,
                source: VfError::NotFound { .. }
            }
        ));
        assert!(reconciler.service().flows().is_empty());
    }

    #[tokio::test]
    async fn unknown_port_is_an_error() {
        let mut reconciler = reconciler();
        let mut rule = vf_pci_rule(VF);
        rule.port_id = 3;
        assert!(matches!(
            reconciler.reconcile(&[rule]).await,
            Err(AgentError::UnknownPort {
                index: 0,
                port_id: 3
            })
        ));
    }

    #[tokio::test]
    async fn counts_unvalidated_rules() {
        let mut reconciler = reconciler();
        let rule = FlowRule {
            port_id: 0,
            pattern: vec![
                FlowItem::new("RTE_FLOW_ITEM_TYPE_GENEVE").with_spec(json!({"protocol": 25944})),
                end_item(),
            ],
            action: vec![FlowAction::new("RTE_FLOW_ACTION_TYPE_DROP"), end_action()],
            attr: None,
        };
        let report = reconciler.reconcile(&[rule]).await.unwrap();
        assert_eq!(report.unvalidated, 1);
        assert_eq!(report.created, 1);
    }
}
