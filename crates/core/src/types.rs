use thiserror::Error;

/// The main error type for minimake operations
#[derive(Debug, Error)]
pub enum MakeError {
    #[error("invalid rule file format, at line {line:?}")]
    InvalidMakefileFormat { line: String },

    #[error("target must be specified")]
    NoTarget,

    /// The path is the traversal stack at the moment the back edge was
    /// found, so it may carry an acyclic lead-in ahead of the cycle itself.
    #[error("cyclic dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    #[error("target '{0}' not found")]
    TargetNotFound(String),

    #[error("dependency '{dependency}' of target '{target}' is not defined by any rule")]
    DependencyNotFound { target: String, dependency: String },

    #[error("couldn't execute command {command:?}: {detail}")]
    CommandExecutionFailed { command: String, detail: String },
}

/// Result type alias for minimake operations
pub type MakeResult<T> = Result<T, MakeError>;
