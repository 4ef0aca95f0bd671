// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unsupported cluster action type '{0}'")]
    UnsupportedAction(String),
    #[error("invalid conf of cluster action '{action}': {reason}")]
    InvalidConf { action: &'static str, reason: String },
    #[error("podInterface must not be empty")]
    EmptyInterface,
    #[error("pod {pod}: no network status annotation")]
    MissingAnnotation { pod: String },
    #[error("pod {pod}: cannot parse network status annotation: {reason}")]
    BadAnnotation { pod: String, reason: String },
    #[error("pod {pod}: no network attachment with interface '{interface}'")]
    InterfaceNotFound { pod: String, interface: String },
    #[error("pod {pod}, interface {interface}: incorrect device type '{found}', expected 'pci'")]
    IncorrectDeviceType {
        pod: String,
        interface: String,
        found: String,
    },
    #[error("pod {pod}, interface {interface}: missing pci-address")]
    MissingPciAddress { pod: String, interface: String },
}
