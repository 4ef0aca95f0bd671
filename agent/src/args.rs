// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) use clap::Parser;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "flowconfig-agent")]
#[command(version = "1.0")]
#[command(about = "Programs NIC flow rules on a node", long_about = None)]
pub(crate) struct CmdArgs {
    #[arg(
        long,
        value_name = "tracing configuration",
        help = "Comma separated list of target=level directives (or a bare level for the default)"
    )]
    tracing: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl CmdArgs {
    pub(crate) fn tracing(&self) -> Option<&str> {
        self.tracing.as_deref()
    }
    pub(crate) fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Validate a rule file offline and print the fingerprint of every rule
    Validate(ValidateArgs),
    /// Reconcile the rules of this node with the flow service
    Run(RunArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleFileKind {
    /// Rules of a single node
    Node,
    /// Rules targeting the pods of the cluster
    Cluster,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    #[arg(value_name = "FILE", help = "Rule file (YAML or JSON)")]
    file: PathBuf,

    #[arg(long, value_enum, default_value = "node", help = "Kind of rule file")]
    kind: RuleFileKind,

    #[arg(
        long,
        value_name = "FILE",
        help = "Pods to translate cluster rules for (YAML list)"
    )]
    pods: Option<PathBuf>,
}

impl ValidateArgs {
    pub(crate) fn file(&self) -> &Path {
        &self.file
    }
    pub(crate) fn kind(&self) -> RuleFileKind {
        self.kind
    }
    pub(crate) fn pods(&self) -> Option<&Path> {
        self.pods.as_deref()
    }
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    #[arg(long, value_name = "NAME", help = "Name of this node")]
    node_name: String,

    #[arg(
        long,
        value_name = "URI",
        default_value = "http://127.0.0.1:31000",
        help = "Endpoint of the flow service"
    )]
    grpc_endpoint: String,

    #[arg(
        long,
        value_name = "MILLISECONDS",
        default_value_t = 2000,
        help = "Timeout of each remote call"
    )]
    rpc_timeout: u64,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 30,
        help = "Period between two reconciliations"
    )]
    resync_period: u64,

    #[arg(long, value_name = "FILE", help = "Rules of this node (YAML or JSON)")]
    rules: PathBuf,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "/sys",
        help = "Mount point of sysfs"
    )]
    sysfs: PathBuf,

    #[arg(long, help = "Reconcile once and exit")]
    once: bool,
}

impl RunArgs {
    pub(crate) fn node_name(&self) -> &str {
        &self.node_name
    }
    pub(crate) fn grpc_endpoint(&self) -> &str {
        &self.grpc_endpoint
    }
    pub(crate) fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout)
    }
    pub(crate) fn resync_period(&self) -> Duration {
        Duration::from_secs(self.resync_period.max(1))
    }
    pub(crate) fn rules(&self) -> &Path {
        &self.rules
    }
    pub(crate) fn sysfs(&self) -> &Path {
        &self.sysfs
    }
    pub(crate) fn once(&self) -> bool {
        self.once
    }
}
