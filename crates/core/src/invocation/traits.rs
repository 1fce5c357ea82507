//! Trait definitions for the invocation module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::InvocationError;
use super::types::{InputArgs, InputStream, OutputSink, ProcessOutcome};

/// Resolves a logical tool name to an executable on disk.
pub trait ExecutableLocator: Send + Sync {
    /// Returns the path of the executable for `name`.
    ///
    /// Fails with [`InvocationError::LaunchFailure`] when nothing is found.
    fn locate(&self, name: &str) -> Result<PathBuf, InvocationError>;
}

/// Launches a child process and drives its standard streams to completion.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args`.
    ///
    /// When `stdin` is given it is written to the child in full and then
    /// closed. When `stdout` is given every byte the child emits is forwarded
    /// to it. Stderr is always captured into the outcome.
    ///
    /// A non-zero exit is reported as an `Ok` outcome; `Err` is reserved for
    /// launch failures and broken stream pumps.
    async fn execute(
        &self,
        program: &Path,
        args: &[String],
        stdin: Option<InputStream>,
        stdout: Option<OutputSink>,
    ) -> Result<ProcessOutcome, InvocationError>;
}

/// Maps an invocation's input shape to the argument vector of one tool.
pub trait ArgumentPolicy: Send + Sync {
    /// Operation name used in logs and errors.
    fn operation(&self) -> &'static str;

    /// Logical executable name handed to the locator.
    fn tool(&self) -> &'static str;

    /// How many inputs the operation accepts.
    fn max_inputs(&self) -> usize {
        1
    }

    /// Builds the ordered argument vector.
    ///
    /// Must be deterministic: the same input shape always yields the same
    /// vector.
    fn assemble(&self, input: &InputArgs<'_>) -> Vec<String>;

    /// Arguments that make the tool print its version.
    fn version_args(&self) -> Vec<String> {
        vec!["-version".to_string()]
    }
}
