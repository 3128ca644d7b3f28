use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A selection that cannot be turned into an invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("executable path is empty or does not exist")]
    MissingExecutable,
    #[error("input image path is empty or does not exist")]
    MissingInput,
    #[error("mode requires a parameter but none was given")]
    MissingParameter,
    #[error("parameter is empty")]
    EmptyParameter,
    #[error("parameter is not a number")]
    NotANumber,
    #[error("parameter is out of range")]
    OutOfRange,
}

/// The external program did not complete successfully
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("failed to launch {program}: {reason}")]
    Launch { program: PathBuf, reason: String },
    #[error("program exited with status {exit_code}")]
    NonZeroExit { exit_code: i32, stderr: String },
    #[error("program was killed after {limit:?}")]
    TimedOut { limit: Duration, stderr: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("program exited cleanly but {path} was not written")]
    MissingOutputArtifact { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {path}: {reason}")]
pub struct DecodeError {
    pub path: PathBuf,
    pub reason: String,
}

/// First failure of a run; every kind ends the run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("background worker failed: {0}")]
    Worker(String),
}
