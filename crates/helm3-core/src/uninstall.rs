//! Uninstall step: decoding and helm command synthesis

use serde::{Deserialize, Serialize};

use crate::command::CommandInvocation;
use crate::error::{Error, Result};

/// Shape of the uninstall payload: `{ uninstall: [ { helm3: ... } ] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UninstallAction {
    #[serde(default, rename = "uninstall")]
    pub steps: Vec<UninstallStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UninstallStep {
    #[serde(rename = "helm3")]
    pub arguments: UninstallArguments,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UninstallArguments {
    pub description: String,
    pub namespace: String,
    pub releases: Vec<String>,
    pub wait: bool,
    #[serde(alias = "nohooks")]
    pub no_hooks: bool,
}

impl UninstallAction {
    pub fn parse(payload: &str) -> Result<Self> {
        serde_yaml::from_str(payload).map_err(|e| Error::InvalidPayload {
            message: e.to_string(),
        })
    }

    pub fn into_single_step(self) -> Result<UninstallArguments> {
        let mut steps = self.steps;
        if steps.len() != 1 {
            return Err(Error::StepCount { found: steps.len() });
        }
        Ok(steps.remove(0).arguments)
    }
}

/// Build `helm3 uninstall <releases...>` for one step.
pub fn synthesize(program: &str, step: &UninstallArguments) -> Result<CommandInvocation> {
    if step.releases.is_empty() {
        return Err(Error::InvalidPayload {
            message: "uninstall requires at least one release".to_string(),
        });
    }

    let mut cmd = CommandInvocation::new(program);
    cmd.arg("uninstall");
    cmd.args(step.releases.iter().map(String::as_str));

    if !step.namespace.is_empty() {
        cmd.args(["--namespace", step.namespace.as_str()]);
    }
    if step.wait {
        cmd.arg("--wait");
    }
    if step.no_hooks {
        cmd.arg("--no-hooks");
    }
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninstall_command() {
        let payload = "uninstall:\n  - helm3:\n      namespace: db\n      releases: [mysql, redis]\n      wait: true\n";
        let step = UninstallAction::parse(payload)
            .unwrap()
            .into_single_step()
            .unwrap();

        assert_eq!(
            synthesize("helm3", &step).unwrap().render(),
            "helm3 uninstall mysql redis --namespace db --wait"
        );
    }

    #[test]
    fn uninstall_without_releases_is_rejected() {
        let step = UninstallArguments::default();
        assert!(matches!(
            synthesize("helm3", &step),
            Err(Error::InvalidPayload { .. })
        ));
    }

    #[test]
    fn uninstall_step_count_must_be_one() {
        let err = UninstallAction::parse("uninstall: []\n")
            .unwrap()
            .into_single_step()
            .unwrap_err();
        assert!(matches!(err, Error::StepCount { found: 0 }));
    }
}
