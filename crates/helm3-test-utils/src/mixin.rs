//! [`TestMixin`] harness for mixin command tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use helm3_core::config::MIXIN_CONFIG_SUFFIX;
use helm3_core::{CommandInvocation, InstallSettings, Mixin};

use crate::{FakeCluster, RecordingRunner, SharedBuffer};

/// A temporary porter home with captured streams and fake collaborators.
///
/// # Example
///
/// ```rust,no_run
/// use helm3_test_utils::TestMixin;
///
/// let t = TestMixin::new();
/// t.mixin().build("config:\n  imagePlatform: none\n").unwrap();
/// assert_eq!(t.output(), "# helm mixin buildtime ouput was supressed\n");
/// ```
pub struct TestMixin {
    temp_dir: TempDir,
    out: SharedBuffer,
    err: SharedBuffer,
    /// Runner shared with every `Mixin` this harness creates
    pub runner: RecordingRunner,
    /// Cluster shared with every `Mixin` this harness creates
    pub cluster: FakeCluster,
    debug: bool,
}

impl Default for TestMixin {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMixin {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            out: SharedBuffer::new(),
            err: SharedBuffer::new(),
            runner: RecordingRunner::new(),
            cluster: FakeCluster::new(),
            debug: false,
        }
    }

    /// Enable debug diagnostics on created mixins.
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    pub fn porter_home(&self) -> PathBuf {
        self.temp_dir.path().join("porter")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.temp_dir.path().join("outputs")
    }

    pub fn host_config_path(&self) -> PathBuf {
        self.porter_home().join(MIXIN_CONFIG_SUFFIX)
    }

    /// Write the host override file before a build.
    pub fn write_host_config(&self, content: &str) {
        let path = self.host_config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// A mixin wired to this harness.
    pub fn mixin(&self) -> Mixin {
        Mixin::new()
            .with_output(self.out.clone(), self.err.clone())
            .with_runner(self.runner.clone())
            .with_cluster_client(self.cluster.clone())
            .with_porter_home(self.porter_home())
            .with_debug(self.debug)
            .with_settings(InstallSettings {
                outputs_dir: self.outputs_dir(),
                ..InstallSettings::default()
            })
    }

    /// Captured standard output.
    pub fn output(&self) -> String {
        self.out.contents()
    }

    /// Captured standard error.
    pub fn error_output(&self) -> String {
        self.err.contents()
    }

    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.runner.invocations()
    }

    /// Content of a written step output, if any.
    pub fn read_output(&self, name: &str) -> Option<String> {
        read_optional(&self.outputs_dir().join(name))
    }
}

fn read_optional(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}
