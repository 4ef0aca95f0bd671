// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;
mod config;
mod errors;
mod logging;
mod reconcile;
mod vf;

use std::process::ExitCode;

use rpc::{Backoff, GrpcFlowClient, wait_ready};
use rte::Registry;
use tracing::{debug, error, info, warn};

use crate::args::{CmdArgs, Command, Parser, RuleFileKind, RunArgs, ValidateArgs};
use crate::config::{
    CheckedRule, check_cluster_rules, check_node_rules, load_cluster_config, load_node_config,
    load_pods,
};
use crate::errors::AgentError;
use crate::reconcile::NodeReconciler;
use crate::vf::SysfsVfLookup;

fn validate(args: &ValidateArgs) -> Result<(), AgentError> {
    let registry = Registry::new();
    let checked = match args.kind() {
        RuleFileKind::Node => {
            let config = load_node_config(args.file())?;
            check_node_rules(&registry, &config.node_name, &config.rules)?
        }
        RuleFileKind::Cluster => {
            let config = load_cluster_config(args.file())?;
            let pods = match args.pods() {
                Some(path) => load_pods(path)?,
                None => Vec::new(),
            };
            check_cluster_rules(&registry, &config, &pods)?
        }
    };
    for CheckedRule {
        node,
        index,
        fingerprint,
        verdict,
    } in checked
    {
        println!("{node}\t{index}\t{fingerprint}\t{verdict:?}");
    }
    Ok(())
}

/// One reconciliation from the rule file.
async fn resync(
    args: &RunArgs,
    reconciler: &mut NodeReconciler<GrpcFlowClient, SysfsVfLookup>,
) -> Result<(), AgentError> {
    let config = load_node_config(args.rules())?;
    if !config.node_name.is_empty() && config.node_name != args.node_name() {
        return Err(AgentError::WrongNode {
            expected: args.node_name().to_string(),
            found: config.node_name,
        });
    }
    reconciler.reconcile(&config.rules).await?;
    Ok(())
}

async fn run(args: &RunArgs) -> Result<(), AgentError> {
    let client = GrpcFlowClient::connect_lazy(args.grpc_endpoint(), args.rpc_timeout())?;
    let ports = wait_ready(&client, &Backoff::default()).await?;
    info!(
        "flow service at {} is ready with {} ports",
        args.grpc_endpoint(),
        ports.len()
    );

    let lookup = SysfsVfLookup::new(args.sysfs());
    let mut reconciler = NodeReconciler::new(client, lookup, Registry::new());
    let mut ticker = tokio::time::interval(args.resync_period());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = resync(args, &mut reconciler).await;
                if args.once() {
                    return result;
                }
                if let Err(e) = result {
                    warn!("reconciliation failed, retrying in {:?}: {e}", args.resync_period());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping, {} rules installed", reconciler.cache().size());
                for fingerprint in reconciler.cache().fingerprints() {
                    debug!("left installed: {fingerprint}");
                }
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CmdArgs::parse();
    if let Err(e) = logging::init(args.tracing()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    let result = match args.command() {
        Command::Validate(validate_args) => validate(validate_args),
        Command::Run(run_args) => {
            info!("starting flow agent on node {}", run_args.node_name());
            run(run_args).await
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
