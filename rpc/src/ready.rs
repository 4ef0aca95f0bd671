// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Readiness wait for the flow service.

use std::time::Duration;

use tracing::{info, warn};

use crate::messages::PortsInformation;
use crate::{FlowService, RpcError};

/// Exponential backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub factor: u32,
    pub attempts: u32,
}

impl Default for Backoff {
    /// 50ms, doubling, 10 attempts.
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(50),
            factor: 2,
            attempts: 10,
        }
    }
}

impl Backoff {
    /// The delay following each attempt.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let (initial, factor) = (self.initial, self.factor);
        (0..self.attempts).map(move |n| initial.saturating_mul(factor.saturating_pow(n)))
    }

    /// Total time spent waiting when every attempt fails.
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Call `ListPorts` on the flow service until it answers.
///
/// Returns the ports of the first successful answer.
///
/// # Errors
///
/// [`RpcError::NotReady`] carrying the last failure once every attempt failed.
pub async fn wait_ready<S: FlowService + ?Sized>(
    service: &S,
    backoff: &Backoff,
) -> Result<Vec<PortsInformation>, RpcError> {
    let mut last = None;
    for (attempt, delay) in (1..).zip(backoff.delays()) {
        match service.list_ports().await {
            Ok(ports) => {
                info!("flow service ready after {attempt} attempt(s), {} port(s)", ports.len());
                return Ok(ports);
            }
            Err(e) => {
                warn!(
                    "flow service not ready (attempt {attempt}/{}): {e}, retrying in {delay:?}",
                    backoff.attempts
                );
                last = Some(Box::new(e));
                tokio::time::sleep(delay).await;
            }
        }
    }
    Err(RpcError::NotReady {
        attempts: backoff.attempts,
        last,
    })
}
