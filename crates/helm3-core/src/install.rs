//! Install step: decoding and helm command synthesis

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::command::CommandInvocation;
use crate::error::{Error, Result};
use crate::outputs::HelmOutput;

/// Shape of the install-phase payload: `{ install: [ { helm3: ... } ] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallAction {
    #[serde(default, rename = "install")]
    pub steps: Vec<InstallStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallStep {
    #[serde(rename = "helm3")]
    pub arguments: InstallArguments,
}

/// One declarative chart install or upgrade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallArguments {
    pub description: String,
    pub outputs: Vec<HelmOutput>,

    pub namespace: String,
    pub name: String,
    pub chart: String,
    pub repo: String,
    pub version: String,
    #[serde(alias = "dependencyupdate")]
    pub dependency_update: bool,
    pub devel: bool,
    #[serde(alias = "nohooks")]
    pub no_hooks: bool,
    pub replace: bool,
    pub upsert: bool,
    pub wait: bool,
    pub set: HashMap<String, String>,
    pub values: Vec<String>,
    pub username: String,
    pub password: String,
}

impl InstallAction {
    /// Decode an install payload.
    pub fn parse(payload: &str) -> Result<Self> {
        serde_yaml::from_str(payload).map_err(|e| Error::InvalidPayload {
            message: e.to_string(),
        })
    }

    /// The single step this action must contain.
    pub fn into_single_step(self) -> Result<InstallArguments> {
        let mut steps = self.steps;
        if steps.len() != 1 {
            return Err(Error::StepCount { found: steps.len() });
        }
        Ok(steps.remove(0).arguments)
    }
}

/// Build the helm invocation for one install step.
///
/// The argument order is fixed. `upgrade --install` is used whether or
/// not `upsert` is set, so a release that already exists is upgraded in
/// place.
pub fn synthesize(program: &str, step: &InstallArguments) -> CommandInvocation {
    let mut cmd = CommandInvocation::new(program);
    cmd.args(["upgrade", "--install", step.name.as_str(), step.chart.as_str()]);

    if !step.namespace.is_empty() {
        cmd.args(["--namespace", step.namespace.as_str()]);
    }
    if !step.version.is_empty() {
        cmd.args(["--version", step.version.as_str()]);
    }
    if step.replace {
        cmd.arg("--replace");
    }
    if step.wait {
        cmd.arg("--wait");
    }
    if step.devel {
        cmd.arg("--devel");
    }
    for values in &step.values {
        cmd.args(["--values", values.as_str()]);
    }
    if step.dependency_update {
        cmd.arg("--dependency-update");
    }
    if step.no_hooks {
        cmd.arg("--no-hooks");
    }

    // Roll the release back on failure, and create its namespace if needed
    cmd.arg("--atomic");
    cmd.arg("--create-namespace");

    cmd.args(set_arguments(&step.set));
    cmd
}

/// `--set key=value` pairs in key order.
pub fn set_arguments(set: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<&String> = set.keys().collect();
    keys.sort();

    let mut args = Vec::with_capacity(keys.len() * 2);
    for key in keys {
        args.push("--set".to_string());
        args.push(format!("{key}={}", set[key]));
    }
    args
}
