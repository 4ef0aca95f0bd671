// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Tracing set-up of the agent.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;

use crate::errors::AgentError;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Targets too chatty at the default level.
const QUIET_TARGETS: &[&str] = &["tonic=error", "h2=error", "tower=error", "hyper=error"];

fn directive(value: &str) -> Result<Directive, AgentError> {
    value
        .parse()
        .map_err(|e| AgentError::Tracing(format!("'{value}': {e}")))
}

/// Build the filter from the default level, the quiet targets and `config`.
///
/// `config` is a comma separated list of `target=level` directives. A bare level changes the
/// default level. Without `config`, `RUST_LOG` is used if set.
pub(crate) fn env_filter(config: Option<&str>) -> Result<EnvFilter, AgentError> {
    let user = match config {
        Some(config) => Some(config.to_string()),
        None => std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    };
    let mut filter = EnvFilter::default().add_directive(DEFAULT_LEVEL.into());
    for quiet in QUIET_TARGETS {
        filter = filter.add_directive(directive(quiet)?);
    }
    for part in user.iter().flat_map(|u| u.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        filter = filter.add_directive(directive(part)?);
    }
    Ok(filter)
}

/// Install the global subscriber.
pub(crate) fn init(config: Option<&str>) -> Result<(), AgentError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true);
    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AgentError::Tracing(e.to_string()))
}
