//! Child-process runner built on `tokio::process`.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use super::error::InvocationError;
use super::traits::ProcessRunner;
use super::types::{ExitState, InputStream, OutputSink, ProcessOutcome};

/// Runs tools as real child processes.
///
/// Stdin feeding, stdout draining and stderr capture run concurrently so a
/// tool that writes before it has consumed all of its input cannot deadlock
/// against us. If either pump fails the other is dropped and the child is
/// killed. The child is also killed if the returned future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new runner.
    pub fn new() -> Self {
        Self
    }
}

/// Writes the whole source into the child's stdin, then closes it.
async fn feed_stdin(source: Option<InputStream>, pipe: Option<ChildStdin>) -> io::Result<()> {
    let (Some(mut source), Some(mut pipe)) = (source, pipe) else {
        return Ok(());
    };

    // A child that exits without reading everything is judged by its exit
    // status, not by the broken pipe.
    let result = match tokio::io::copy(&mut source, &mut pipe).await {
        Ok(_) => pipe.shutdown().await,
        Err(e) => Err(e),
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Forwards the child's stdout into the sink as it is produced.
async fn drain_stdout(pipe: Option<ChildStdout>, sink: Option<OutputSink>) -> io::Result<()> {
    let (Some(mut pipe), Some(mut sink)) = (pipe, sink) else {
        return Ok(());
    };

    tokio::io::copy(&mut pipe, &mut sink).await?;
    sink.flush().await
}

async fn capture_stderr(pipe: Option<ChildStderr>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            warn!("Failed to read stderr: {}", e);
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn execute(
        &self,
        program: &Path,
        args: &[String],
        stdin: Option<InputStream>,
        stdout: Option<OutputSink>,
    ) -> Result<ProcessOutcome, InvocationError> {
        let stdin_mode = if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let stdout_mode = if stdout.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        debug!("Launching {:?} {:?}", program, args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(stdin_mode)
            .stdout(stdout_mode)
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| InvocationError::launch_failure(program.display().to_string(), e))?;

        let feed = feed_stdin(stdin, child.stdin.take());
        let drain = drain_stdout(child.stdout.take(), stdout);
        let capture = capture_stderr(child.stderr.take());

        let pumps = async {
            let result = tokio::try_join!(feed, drain);
            if result.is_err() {
                // Unblocks the stderr capture, which only ends when the child does.
                let _ = child.start_kill();
            }
            result
        };
        let (pumped, stderr) = tokio::join!(pumps, capture);

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => return Err(InvocationError::process_failure(e.to_string(), stderr)),
        };

        if let Err(e) = pumped {
            warn!("Stream pump for {:?} failed: {}", program, e);
            return Err(InvocationError::process_failure(e.to_string(), stderr));
        }

        Ok(ProcessOutcome {
            exit: ExitState::from_status(status),
            stderr,
        })
    }
}
