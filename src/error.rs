//! Error types for jobdeck.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("List error: {0}")]
    List(#[from] ListError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Deep copy error: {0}")]
    DeepCopy(#[from] CloneError),

    #[error("Job error: {0}")]
    Job(#[from] JobError),

    #[error("Run error: {0}")]
    Run(#[from] RunError),

    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Structural job list errors. A failed operation leaves the list untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("Index {index} out of range for list of {len} slots")]
    OutOfRange { index: usize, len: usize },
}

/// Value editing errors. All of them are non-fatal for an edit pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Unsupported shape: {shape}")]
    UnsupportedShape { shape: String },

    #[error("Could not parse {input:?}: {reason}")]
    ParseFailure { input: String, reason: String },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Record {record} has no member {member}")]
    UnknownMember { record: String, member: String },
}

/// Deep copy errors. A failed member keeps the copy's own default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CloneError {
    #[error("Could not copy {kind}.{member}: {reason}")]
    CloneFailure {
        kind: String,
        member: String,
        reason: String,
    },
}

/// Errors raised by a job's execute operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JobError {
    #[error("Job {job} execution failed: {reason}")]
    ExecutionFailed { job: String, reason: String },
}

/// Errors surfaced by the orchestrator's run operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error("Sequential run stopped: {0}")]
    Job(#[from] JobError),

    #[error("{} of the parallel jobs failed (first: {})", .failures.len(), first_failure(.failures))]
    Parallel { failures: Vec<JobError> },
}

fn first_failure(failures: &[JobError]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// Panel controller errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("Job list is running; structural changes are disabled")]
    Busy,

    #[error("Unknown job kind: {0}")]
    UnknownKind(String),

    #[error("Slot {0} is empty")]
    EmptySlot(usize),
}

/// Result type alias for jobdeck.
pub type Result<T> = std::result::Result<T, Error>;
