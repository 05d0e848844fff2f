//! Error types for helm3-core

/// Result type for helm3-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in helm3-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host root environment variable is unset or empty
    #[error("{var} is not set; cannot locate the helm3 mixin configuration")]
    PorterHomeNotSet { var: String },

    /// A client version that is not a semantic version
    #[error("supplied client version {version:?} cannot be parsed as semver: {message}")]
    InvalidVersion { version: String, message: String },

    /// A malformed semantic-version range
    #[error("unable to parse version constraint {constraint:?}: {message}")]
    InvalidConstraint { constraint: String, message: String },

    /// A client version outside the supported range
    #[error("supplied clientVersion {version:?} does not meet semver constraint {constraint:?}")]
    UnsupportedClientVersion { version: String, constraint: String },

    /// The per-invocation payload could not be decoded
    #[error("invalid mixin input: {message}")]
    InvalidPayload { message: String },

    /// The action did not contain exactly one step
    #[error("expected a single step, but got {found}")]
    StepCount { found: usize },

    /// A repository entry without a URL
    #[error("repository url must be supplied for {name:?}")]
    RepositoryUrlMissing { name: String },

    /// The external command could not be started
    #[error("could not execute command, {command}: {source}")]
    CommandStart {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran and exited unsuccessfully
    #[error("command {command:?} exited with {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A query against the live cluster failed
    #[error("cluster query failed: {message}")]
    Cluster { message: String },

    /// An output declaration that is neither a secret nor a resource lookup
    #[error("output {name:?} is invalid: {message}")]
    InvalidOutput { name: String, message: String },

    /// One or more outputs could not be resolved after the step was applied
    #[error("failed to resolve outputs: {}", join_failures(.failures))]
    OutputResolution { failures: Vec<String> },

    // Transparent wrappers for underlying errors
    /// Filesystem error from helm3-fs
    #[error(transparent)]
    Fs(#[from] helm3_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn join_failures(failures: &[String]) -> String {
    failures.join("; ")
}

impl Error {
    /// Exit code the process should terminate with for this error.
    ///
    /// A failed external command propagates its own status unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}
