//! Step outputs read back from the live cluster
//!
//! Outputs are resolved after the helm command has succeeded. Each
//! declaration is looked up on its own: one failure does not stop the
//! others and never undoes the applied release.

use serde::{Deserialize, Serialize};
use std::process::Command;

use crate::error::{Error, Result};

/// A named output declared on a step
///
/// Either `secret` + `key`, or `resourceType` + `resourceName` + `jsonPath`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelmOutput {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub json_path: String,
    /// Overrides the step namespace for resource lookups
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// Read access to cluster state
pub trait ClusterClient: Send {
    /// Decoded value of `key` in secret `secret`.
    fn secret_value(&self, namespace: &str, secret: &str, key: &str) -> Result<String>;

    /// Result of evaluating `json_path` against one resource.
    fn resource_value(
        &self,
        namespace: &str,
        resource_type: &str,
        resource_name: &str,
        json_path: &str,
    ) -> Result<String>;
}

/// Resolved output values and per-output failures, in declaration order
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub values: Vec<(String, String)>,
    pub failures: Vec<String>,
}

impl ResolvedOutputs {
    /// Convert collected failures into an error, if any.
    pub fn into_result(self) -> Result<Vec<(String, String)>> {
        if self.failures.is_empty() {
            Ok(self.values)
        } else {
            Err(Error::OutputResolution {
                failures: self.failures,
            })
        }
    }
}

/// Resolve every declaration against the cluster.
pub fn resolve_outputs(
    client: &dyn ClusterClient,
    namespace: &str,
    declarations: &[HelmOutput],
) -> ResolvedOutputs {
    let mut resolved = ResolvedOutputs::default();

    for output in declarations {
        match resolve_one(client, namespace, output) {
            Ok(value) => {
                tracing::debug!(output = %output.name, "Resolved output");
                resolved.values.push((output.name.clone(), value));
            }
            Err(err) => {
                tracing::warn!(output = %output.name, "Failed to resolve output: {err}");
                resolved.failures.push(format!("{}: {err}", output.name));
            }
        }
    }

    resolved
}

fn resolve_one(client: &dyn ClusterClient, namespace: &str, output: &HelmOutput) -> Result<String> {
    if output.name.is_empty() {
        return Err(Error::InvalidOutput {
            name: String::new(),
            message: "output name must be supplied".to_string(),
        });
    }

    if !output.secret.is_empty() && !output.key.is_empty() {
        if output.key.chars().any(char::is_control) {
            return Err(Error::InvalidOutput {
                name: output.name.clone(),
                message: "secret key cannot contain control characters".to_string(),
            });
        }
        return client.secret_value(namespace, &output.secret, &output.key);
    }

    if !output.resource_type.is_empty()
        && !output.resource_name.is_empty()
        && !output.json_path.is_empty()
    {
        let ns = if output.namespace.is_empty() {
            namespace
        } else {
            output.namespace.as_str()
        };
        return client.resource_value(
            ns,
            &output.resource_type,
            &output.resource_name,
            &output.json_path,
        );
    }

    Err(Error::InvalidOutput {
        name: output.name.clone(),
        message: "expected either secret and key, or resourceType, resourceName and jsonPath"
            .to_string(),
    })
}

/// Queries the cluster through the `kubectl` CLI
#[derive(Debug, Clone)]
pub struct KubectlClient {
    program: String,
}

impl Default for KubectlClient {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl KubectlClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn get(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("get")
            .args(args)
            .output()
            .map_err(|e| Error::Cluster {
                message: format!("could not run {}: {e}", self.program),
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(Error::Cluster {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl ClusterClient for KubectlClient {
    fn secret_value(&self, namespace: &str, secret: &str, key: &str) -> Result<String> {
        self.get(&secret_query(namespace, secret, key))
    }

    fn resource_value(
        &self,
        namespace: &str,
        resource_type: &str,
        resource_name: &str,
        json_path: &str,
    ) -> Result<String> {
        self.get(&resource_query(namespace, resource_type, resource_name, json_path))
    }
}

fn namespace_args(namespace: &str) -> Vec<String> {
    if namespace.is_empty() {
        Vec::new()
    } else {
        vec!["--namespace".to_string(), namespace.to_string()]
    }
}

/// `kubectl get` arguments returning a base64-decoded secret value.
fn secret_query(namespace: &str, secret: &str, key: &str) -> Vec<String> {
    let mut args = vec!["secret".to_string(), secret.to_string()];
    args.extend(namespace_args(namespace));
    args.push("-o".to_string());
    args.push(format!(
        "go-template={{{{index .data {} | base64decode}}}}",
        template_string(key)
    ));
    args
}

/// Double-quoted template string literal; only `"` and `\` need escaping.
fn template_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `kubectl get` arguments evaluating a JSONPath against a resource.
fn resource_query(
    namespace: &str,
    resource_type: &str,
    resource_name: &str,
    json_path: &str,
) -> Vec<String> {
    let mut args = vec![resource_type.to_string(), resource_name.to_string()];
    args.extend(namespace_args(namespace));
    args.push("-o".to_string());
    args.push(format!("jsonpath={json_path}"));
    args
}
