//! Stand-ins for the helm binary and the cluster.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use helm3_core::{ClusterClient, CommandInvocation, CommandRunner, CommandStatus, Error, Result};

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Exit(i32),
    StartFailure,
}

#[derive(Debug)]
struct RunnerState {
    invocations: Vec<CommandInvocation>,
    outcome: Outcome,
}

/// Records every invocation instead of running it.
///
/// Clones share state, so a clone handed to a `Mixin` can be inspected
/// through the original.
#[derive(Debug, Clone)]
pub struct RecordingRunner {
    state: Arc<Mutex<RunnerState>>,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(RunnerState {
                invocations: Vec::new(),
                outcome: Outcome::Exit(0),
            })),
        }
    }
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `code` as the exit status of subsequent runs.
    pub fn exit_with(&self, code: i32) {
        self.state.lock().unwrap().outcome = Outcome::Exit(code);
    }

    /// Fail subsequent runs as if the program did not exist.
    pub fn fail_to_start(&self) {
        self.state.lock().unwrap().outcome = Outcome::StartFailure;
    }

    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.state.lock().unwrap().invocations.clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &CommandInvocation) -> io::Result<CommandStatus> {
        let mut state = self.state.lock().unwrap();
        state.invocations.push(invocation.clone());
        match state.outcome {
            Outcome::Exit(code) => Ok(CommandStatus::from_code(code)),
            Outcome::StartFailure => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "executable file not found in $PATH",
            )),
        }
    }
}

/// In-memory cluster state keyed by namespace and object.
#[derive(Debug, Clone, Default)]
pub struct FakeCluster {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_secret(&self, namespace: &str, secret: &str, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(format!("{namespace}/secret/{secret}/{key}"), value.to_string());
    }

    pub fn insert_resource(
        &self,
        namespace: &str,
        resource_type: &str,
        resource_name: &str,
        json_path: &str,
        value: &str,
    ) {
        self.values.lock().unwrap().insert(
            format!("{namespace}/{resource_type}/{resource_name}/{json_path}"),
            value.to_string(),
        );
    }

    fn lookup(&self, key: String) -> Result<String> {
        self.values
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(Error::Cluster {
                message: format!("{key} not found"),
            })
    }
}

impl ClusterClient for FakeCluster {
    fn secret_value(&self, namespace: &str, secret: &str, key: &str) -> Result<String> {
        self.lookup(format!("{namespace}/secret/{secret}/{key}"))
    }

    fn resource_value(
        &self,
        namespace: &str,
        resource_type: &str,
        resource_name: &str,
        json_path: &str,
    ) -> Result<String> {
        self.lookup(format!("{namespace}/{resource_type}/{resource_name}/{json_path}"))
    }
}
