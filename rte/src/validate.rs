// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Pattern / action validation.
//!
//! A [`Validator`] walks the pattern and action lists of a [`FlowRule`], decodes every payload
//! through the [`Registry`] and runs the field rules on the result. The first violation aborts
//! validation of the whole rule.

use serde_json::Value;
use tracing::{debug, warn};

use crate::action::{ActionType, ConfPolicy};
use crate::errors::FlowError;
use crate::field::Role;
use crate::item::ItemType;
use crate::registry::{ItemEntry, Registry};
use crate::request::{RequestFlowCreate, RteFlowAction, RteFlowAttr, RteFlowItem};
use crate::rule::{FlowAction, FlowItem, FlowRule};
use crate::wire::{ActionConf, ItemSpec};

/// Where a rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rules sent to the flow service: the action list must be non-empty and END terminated.
    Node,
    /// Rules of a cluster resource: an empty action list is tolerated.
    Cluster,
}

/// Outcome of the validation of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    /// Every field rule of the element was checked.
    Accepted,
    /// The element decoded, but no field rules exist for its shape.
    AcceptedUnvalidated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    pub ty: ItemType,
    pub spec: Option<ItemSpec>,
    pub last: Option<ItemSpec>,
    pub mask: Option<ItemSpec>,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAction {
    pub ty: ActionType,
    pub conf: Option<ActionConf>,
    pub verdict: Verdict,
}

/// A rule whose payloads are decoded and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRule {
    pub port_id: u32,
    pub attr: RteFlowAttr,
    pub pattern: Vec<ValidatedItem>,
    pub action: Vec<ValidatedAction>,
}

impl ValidatedRule {
    /// The weakest verdict of all elements of the rule.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.pattern
            .iter()
            .map(|i| i.verdict)
            .chain(self.action.iter().map(|a| a.verdict))
            .max()
            .unwrap_or(Verdict::Accepted)
    }

    /// Build the wire request for the flow service.
    #[must_use]
    pub fn to_request(&self) -> RequestFlowCreate {
        RequestFlowCreate {
            port_id: self.port_id,
            attr: Some(self.attr.clone()),
            pattern: self
                .pattern
                .iter()
                .map(|item| RteFlowItem {
                    r#type: item.ty.as_i32(),
                    spec: item.spec.as_ref().map(ItemSpec::to_any),
                    last: item.last.as_ref().map(ItemSpec::to_any),
                    mask: item.mask.as_ref().map(ItemSpec::to_any),
                })
                .collect(),
            action: self
                .action
                .iter()
                .map(|action| RteFlowAction {
                    r#type: action.ty.as_i32(),
                    conf: action.conf.as_ref().map(ActionConf::to_any),
                })
                .collect(),
        }
    }
}

pub struct Validator<'r> {
    registry: &'r Registry,
    scope: Scope,
}

impl<'r> Validator<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry, scope: Scope) -> Self {
        Self { registry, scope }
    }

    /// Validate the pattern, actions and attributes of a rule.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    #[tracing::instrument(level = "debug", skip_all, fields(port_id = rule.port_id))]
    pub fn validate_rule(&self, rule: &FlowRule) -> Result<ValidatedRule, FlowError> {
        let pattern = self.validate_pattern(&rule.pattern)?;
        let action = self.validate_actions(&rule.action)?;
        let attr = rule.attr.clone().unwrap_or_default();
        validate_attr(&attr)?;
        Ok(ValidatedRule {
            port_id: rule.port_id,
            attr,
            pattern,
            action,
        })
    }

    /// Validate a pattern list.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid item, or if a non-empty list does not end with END.
    pub fn validate_pattern(&self, pattern: &[FlowItem]) -> Result<Vec<ValidatedItem>, FlowError> {
        let items = pattern
            .iter()
            .enumerate()
            .map(|(index, item)| self.validate_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(last) = items.last()
            && last.ty != ItemType::End
        {
            return Err(FlowError::PatternNotTerminated(last.ty));
        }
        Ok(items)
    }

    /// Validate an action list.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid action, if a non-empty list does not end with END, or if the
    /// list is empty in [`Scope::Node`].
    pub fn validate_actions(
        &self,
        actions: &[FlowAction],
    ) -> Result<Vec<ValidatedAction>, FlowError> {
        if actions.is_empty() && self.scope == Scope::Node {
            return Err(FlowError::NoActions);
        }
        let validated = actions
            .iter()
            .enumerate()
            .map(|(index, action)| self.validate_action(index, action))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(last) = validated.last()
            && last.ty != ActionType::End
        {
            return Err(FlowError::ActionsNotTerminated(last.ty));
        }
        Ok(validated)
    }

    fn validate_item(&self, index: usize, item: &FlowItem) -> Result<ValidatedItem, FlowError> {
        let entry = self
            .registry
            .resolve_item(&item.r#type)
            .map_err(|e| FlowError::UnknownItemType {
                index,
                name: e.name,
            })?;
        let ty = entry.ty;
        let Some(shape) = entry.shape else {
            if item.spec.is_some() || item.last.is_some() || item.mask.is_some() {
                debug!("pattern[{index}] ({ty}): ignoring payload of an inert item");
            }
            return Ok(ValidatedItem {
                ty,
                spec: None,
                last: None,
                mask: None,
                verdict: Verdict::Accepted,
            });
        };

        let decode = |role: Role, raw: Option<&Value>| decode_item(&entry, index, role, raw);
        let spec = decode(Role::Spec, item.spec.as_ref())?;
        let last = decode(Role::Last, item.last.as_ref())?;
        let mask = decode(Role::Mask, item.mask.as_ref())?;

        let field_error = |role: Role| {
            move |source| FlowError::ItemField {
                index,
                item: ty,
                role,
                source,
            }
        };
        match &spec {
            Some(spec) => {
                spec.validate(spec, Role::Spec)
                    .map_err(field_error(Role::Spec))?;
                if let Some(last) = &last {
                    last.validate(spec, Role::Last)
                        .map_err(field_error(Role::Last))?;
                }
                if let Some(mask) = &mask {
                    mask.validate(spec, Role::Mask)
                        .map_err(field_error(Role::Mask))?;
                }
            }
            None => {
                if last.is_some() {
                    return Err(FlowError::ItemMissingSpec {
                        index,
                        item: ty,
                        role: Role::Last,
                    });
                }
                if mask.is_some() {
                    return Err(FlowError::ItemMissingSpec {
                        index,
                        item: ty,
                        role: Role::Mask,
                    });
                }
            }
        }

        let verdict = if shape.is_strict() {
            Verdict::Accepted
        } else {
            warn!("pattern[{index}] ({ty}): no field validation for this item type");
            Verdict::AcceptedUnvalidated
        };
        Ok(ValidatedItem {
            ty,
            spec,
            last,
            mask,
            verdict,
        })
    }

    fn validate_action(
        &self,
        index: usize,
        action: &FlowAction,
    ) -> Result<ValidatedAction, FlowError> {
        let entry = self
            .registry
            .resolve_action(&action.r#type)
            .map_err(|e| FlowError::UnknownActionType {
                index,
                name: e.name,
            })?;
        let ty = entry.ty;
        let raw = match (entry.conf, &action.conf) {
            (ConfPolicy::Forbidden, Some(_)) => {
                return Err(FlowError::ConfForbidden { index, action: ty });
            }
            (ConfPolicy::Required, None) => {
                return Err(FlowError::ConfMissing { index, action: ty });
            }
            (_, raw) => raw.as_ref(),
        };
        let Some(raw) = raw else {
            return Ok(ValidatedAction {
                ty,
                conf: None,
                verdict: Verdict::Accepted,
            });
        };
        let conf = entry
            .decode(raw)
            .map_err(|source| FlowError::ActionDecode {
                index,
                action: ty,
                source,
            })?;
        let verdict = match &conf {
            Some(conf) => {
                conf.validate(conf, Role::Spec)
                    .map_err(|source| FlowError::ActionField {
                        index,
                        action: ty,
                        source,
                    })?;
                if conf.shape().is_strict() {
                    Verdict::Accepted
                } else {
                    warn!("action[{index}] ({ty}): no field validation for this action type");
                    Verdict::AcceptedUnvalidated
                }
            }
            None => Verdict::Accepted,
        };
        Ok(ValidatedAction { ty, conf, verdict })
    }
}

fn decode_item(
    entry: &ItemEntry,
    index: usize,
    role: Role,
    raw: Option<&Value>,
) -> Result<Option<ItemSpec>, FlowError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    entry.decode(raw).map_err(|source| FlowError::ItemDecode {
        index,
        item: entry.ty,
        role,
        source,
    })
}

/// Check the boolean flags of the attributes.
///
/// # Errors
///
/// [`FlowError::InvalidAttr`] naming the first flag which is neither 0 nor 1.
pub fn validate_attr(attr: &RteFlowAttr) -> Result<(), FlowError> {
    for (flag, value) in [
        ("ingress", attr.ingress),
        ("egress", attr.egress),
        ("transfer", attr.transfer),
    ] {
        if value > 1 {
            return Err(FlowError::InvalidAttr { flag, value });
        }
    }
    Ok(())
}
