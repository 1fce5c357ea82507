//! Error types for the invocation module.

use thiserror::Error;

/// Separator placed between a process error description and the tool's stderr.
pub const FAILURE_SEPARATOR: &str = ". ";

/// Errors that can occur while running an external tool.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// `run` was called without any input configured.
    #[error("Undefined input")]
    MissingInput,

    /// `run` was called without an output sink configured.
    #[error("Undefined output")]
    MissingOutput,

    /// More inputs were configured than the operation accepts.
    #[error("{operation} accepts at most {accepted} input(s)")]
    UnsupportedInput {
        operation: &'static str,
        accepted: usize,
    },

    /// The executable could not be resolved or started.
    ///
    /// Composed like a process failure, with empty diagnostic text.
    #[error("{}", launch_message(.program, .reason))]
    LaunchFailure { program: String, reason: String },

    /// The child process ran and failed.
    ///
    /// Displays as the description, the separator and the raw stderr text.
    #[error("{}", compose_failure(.description, .stderr))]
    ProcessFailure { description: String, stderr: String },

    /// I/O error while preparing inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvocationError {
    /// Creates a launch failure for the given program.
    pub fn launch_failure(program: impl Into<String>, reason: impl ToString) -> Self {
        Self::LaunchFailure {
            program: program.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a process failure from an error description and captured stderr.
    pub fn process_failure(description: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::ProcessFailure {
            description: description.into(),
            stderr: stderr.into(),
        }
    }

    /// Raw diagnostic text attached to this error, empty for everything but
    /// process failures.
    pub fn stderr(&self) -> &str {
        match self {
            Self::ProcessFailure { stderr, .. } => stderr,
            _ => "",
        }
    }
}

/// Joins a process error description with the tool's diagnostic output.
///
/// The separator is kept even when `stderr` is empty.
pub fn compose_failure(description: &str, stderr: &str) -> String {
    format!("{description}{FAILURE_SEPARATOR}{stderr}")
}

fn launch_message(program: &str, reason: &str) -> String {
    compose_failure(&format!("Failed to launch {program}: {reason}"), "")
}
