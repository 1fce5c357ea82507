//! Mock process runner for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::invocation::{InputStream, InvocationError, OutputSink, ProcessOutcome, ProcessRunner};

/// A recorded process execution for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The resolved executable.
    pub program: PathBuf,
    /// The full argument vector.
    pub args: Vec<String>,
    /// Bytes received on stdin, if stdin was wired.
    pub stdin: Option<Vec<u8>>,
    /// Whether an output sink was wired.
    pub had_stdout: bool,
    /// Contents of every argument that named an existing file at launch.
    pub files: HashMap<PathBuf, Vec<u8>>,
}

/// Mock implementation of the ProcessRunner trait.
///
/// Provides controllable behavior for testing:
/// - Record every execution with its arguments and stdin bytes
/// - Emit canned stdout bytes into the sink
/// - Replay scripted outcomes or errors, one per call
///
/// # Example
///
/// ```rust,ignore
/// use webpbin_core::testing::MockRunner;
///
/// let runner = MockRunner::new();
/// runner.push_outcome(ProcessOutcome::failure(1, "Could not decode"));
///
/// // Run an invocation...
///
/// assert_eq!(runner.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    outcomes: Arc<Mutex<VecDeque<ProcessOutcome>>>,
    next_error: Arc<Mutex<Option<InvocationError>>>,
    stdout: Arc<Mutex<Vec<u8>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRunner {
    /// Create a new mock runner that succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written to the sink by every successful call.
    pub fn set_stdout(&self, bytes: Vec<u8>) {
        *lock(&self.stdout) = bytes;
    }

    /// Queue the outcome of a future call. Calls beyond the queue succeed.
    pub fn push_outcome(&self, outcome: ProcessOutcome) {
        lock(&self.outcomes).push_back(outcome);
    }

    /// Configure the next call to fail with the given error.
    pub fn set_next_error(&self, error: InvocationError) {
        *lock(&self.next_error) = Some(error);
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Get the number of calls performed.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Clear recorded calls.
    pub fn clear_recorded(&self) {
        lock(&self.calls).clear();
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn execute(
        &self,
        program: &Path,
        args: &[String],
        stdin: Option<InputStream>,
        stdout: Option<OutputSink>,
    ) -> Result<ProcessOutcome, InvocationError> {
        let stdin = match stdin {
            Some(mut reader) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).await?;
                Some(bytes)
            }
            None => None,
        };

        let files = args
            .iter()
            .map(PathBuf::from)
            .filter(|path| path.is_file())
            .filter_map(|path| std::fs::read(&path).ok().map(|bytes| (path, bytes)))
            .collect();

        lock(&self.calls).push(RecordedCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
            stdin,
            had_stdout: stdout.is_some(),
            files,
        });

        if let Some(err) = lock(&self.next_error).take() {
            return Err(err);
        }

        let outcome = lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| ProcessOutcome::success(""));

        if outcome.exit.success() {
            if let Some(mut sink) = stdout {
                let bytes = lock(&self.stdout).clone();
                sink.write_all(&bytes).await?;
                sink.flush().await?;
            }
        }

        Ok(outcome)
    }
}
