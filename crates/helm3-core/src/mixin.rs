//! Runtime context shared by the mixin commands
//!
//! A [`Mixin`] owns the output streams, the command runner and the cluster
//! client. Commands receive their payload as text and write instructions
//! or command lines to `out` as they go; nothing is buffered and discarded
//! on failure.

use std::io::{self, Write};
use std::path::PathBuf;

use helm3_fs::NormalizedPath;

use crate::build;
use crate::command::{CommandInvocation, CommandRunner, ProcessRunner};
use crate::config::{ConfigResolver, EffectiveConfig, resolve_config};
use crate::error::{Error, Result};
use crate::install::{self, InstallAction};
use crate::outputs::{ClusterClient, KubectlClient, resolve_outputs};
use crate::uninstall::{self, UninstallAction};

/// Directory porter collects step outputs from
pub const DEFAULT_OUTPUTS_DIR: &str = "/cnab/app/porter/outputs";

/// Name of the helm client installed by the default profile
pub const DEFAULT_HELM_BINARY: &str = "helm3";

/// Client used to read step outputs back from the cluster
pub const DEFAULT_KUBECTL_BINARY: &str = "kubectl";

/// Install-phase settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub helm_binary: String,
    pub kubectl_binary: String,
    pub outputs_dir: PathBuf,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            helm_binary: DEFAULT_HELM_BINARY.to_string(),
            kubectl_binary: DEFAULT_KUBECTL_BINARY.to_string(),
            outputs_dir: PathBuf::from(DEFAULT_OUTPUTS_DIR),
        }
    }
}

pub struct Mixin {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    runner: Box<dyn CommandRunner>,
    /// Replaces the kubectl client built from `settings` when set
    cluster: Option<Box<dyn ClusterClient>>,
    porter_home: Option<PathBuf>,
    debug: bool,
    settings: InstallSettings,
}

impl Default for Mixin {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixin {
    /// A context wired to the process streams and real subprocesses.
    ///
    /// Outputs are read with `kubectl` unless a cluster client is supplied.
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            runner: Box::new(ProcessRunner),
            cluster: None,
            porter_home: None,
            debug: false,
            settings: InstallSettings::default(),
        }
    }

    pub fn with_output(
        mut self,
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
    ) -> Self {
        self.out = Box::new(out);
        self.err = Box::new(err);
        self
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_cluster_client(mut self, client: impl ClusterClient + 'static) -> Self {
        self.cluster = Some(Box::new(client));
        self
    }

    /// Use `porter_home` instead of reading `$PORTER_HOME`.
    pub fn with_porter_home(mut self, porter_home: impl Into<PathBuf>) -> Self {
        self.porter_home = Some(porter_home.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_settings(mut self, settings: InstallSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &InstallSettings {
        &self.settings
    }

    fn resolver(&self) -> Result<ConfigResolver> {
        match &self.porter_home {
            Some(home) => Ok(ConfigResolver::with_porter_home(home.clone())),
            None => ConfigResolver::from_env(),
        }
    }

    /// Write the Dockerfile lines for the invocation image.
    pub fn build(&mut self, payload: &str) -> Result<EffectiveConfig> {
        let platforms = self.resolver()?.load_platforms()?;
        let config = resolve_config(payload)?;

        let instructions = build::emit(&config, &platforms);
        if self.debug {
            for skipped in &instructions.skipped {
                writeln!(
                    self.err,
                    "DEBUG: addition of repository failed: {}",
                    skipped.reason
                )?;
            }
        }

        self.out.write_all(instructions.render().as_bytes())?;
        self.out.flush()?;
        Ok(config)
    }

    /// Install or upgrade the release described by the payload, then
    /// write its declared outputs.
    ///
    /// Returns the outputs that were written.
    pub fn install(&mut self, payload: &str) -> Result<Vec<(String, String)>> {
        let step = InstallAction::parse(payload)?.into_single_step()?;
        if !step.description.is_empty() {
            tracing::info!(description = %step.description, "Running install step");
        }

        let cmd = install::synthesize(&self.settings.helm_binary, &step);
        self.execute(&cmd)?;

        let kubectl;
        let cluster: &dyn ClusterClient = match &self.cluster {
            Some(client) => &**client,
            None => {
                kubectl = KubectlClient::new(self.settings.kubectl_binary.as_str());
                &kubectl
            }
        };
        let mut resolved = resolve_outputs(cluster, &step.namespace, &step.outputs);
        let mut written = Vec::with_capacity(resolved.values.len());
        for (name, value) in std::mem::take(&mut resolved.values) {
            match self.write_output(&name, &value) {
                Ok(()) => written.push((name, value)),
                Err(err) => resolved.failures.push(format!("{name}: {err}")),
            }
        }
        resolved.values = written;
        resolved.into_result()
    }

    /// Remove the releases named by the payload.
    pub fn uninstall(&mut self, payload: &str) -> Result<()> {
        let step = UninstallAction::parse(payload)?.into_single_step()?;
        let cmd = uninstall::synthesize(&self.settings.helm_binary, &step)?;
        self.execute(&cmd)
    }

    /// Print the command line, then run it to completion.
    fn execute(&mut self, cmd: &CommandInvocation) -> Result<()> {
        let rendered = cmd.render();
        writeln!(self.out, "{rendered}")?;
        self.out.flush()?;

        tracing::debug!(program = %cmd.program, args = cmd.args.len(), "Executing command");
        let status = self.runner.run(cmd).map_err(|source| Error::CommandStart {
            command: rendered.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: rendered,
                code: status.code,
            })
        }
    }

    fn write_output(&self, name: &str, value: &str) -> Result<()> {
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::InvalidOutput {
                name: name.to_string(),
                message: "output names cannot contain path separators".to_string(),
            });
        }
        let path = NormalizedPath::new(&self.settings.outputs_dir).join(name);
        helm3_fs::io::write_text(&path, value)?;
        Ok(())
    }
}
