//! The reusable invocation builder.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, warn};

use super::error::InvocationError;
use super::traits::{ArgumentPolicy, ExecutableLocator, ProcessRunner};
use super::types::{ExitState, InputArgs, InputSource, InputStream, OutputBuffer, OutputSink};

/// One logical tool, configured fluently and run any number of times.
///
/// Pending input and output are consumed by every call to [`run`], whatever
/// its outcome, so nothing configured for one conversion can leak into the
/// next.
///
/// [`run`]: Invocation::run
pub struct Invocation<P: ArgumentPolicy> {
    policy: P,
    locator: Arc<dyn ExecutableLocator>,
    runner: Arc<dyn ProcessRunner>,
    input: Option<InputSource>,
    output: Option<OutputSink>,
}

impl<P: ArgumentPolicy> Invocation<P> {
    /// Creates an invocation for `policy`.
    pub fn new(
        policy: P,
        locator: Arc<dyn ExecutableLocator>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            policy,
            locator,
            runner,
            input: None,
            output: None,
        }
    }

    /// The policy that shapes this invocation's arguments.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Sets a reader to convert. Any file input set before is dropped.
    pub fn input(&mut self, reader: impl AsyncRead + Send + Unpin + 'static) -> &mut Self {
        self.input = Some(InputSource::Stream(Box::new(reader)));
        self
    }

    /// Sets two readers to convert, for operations taking a second input.
    /// Any file input set before is dropped.
    pub fn inputs(
        &mut self,
        reader: impl AsyncRead + Send + Unpin + 'static,
        second: impl AsyncRead + Send + Unpin + 'static,
    ) -> &mut Self {
        self.input = Some(InputSource::Streams(Box::new(reader), Box::new(second)));
        self
    }

    /// Sets a reader to convert plus a second input that is already a file,
    /// for operations taking a second input. Any input set before is dropped.
    pub fn input_with_file(
        &mut self,
        reader: impl AsyncRead + Send + Unpin + 'static,
        second: impl Into<PathBuf>,
    ) -> &mut Self {
        self.input = Some(InputSource::StreamWithFile(Box::new(reader), second.into()));
        self
    }

    /// Sets a file to convert. Any stream input set before is dropped.
    pub fn input_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.input = Some(InputSource::File(path.into()));
        self
    }

    /// Sets two files to convert, for operations taking a second input.
    /// Any stream input set before is dropped.
    pub fn input_files(
        &mut self,
        path: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
    ) -> &mut Self {
        self.input = Some(InputSource::Files(path.into(), second.into()));
        self
    }

    /// Sets the writer that receives the converted bytes.
    pub fn output(&mut self, writer: impl AsyncWrite + Send + Unpin + 'static) -> &mut Self {
        self.output = Some(Box::new(writer));
        self
    }

    /// Whether an input is pending.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Whether an output is pending.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Runs the tool once.
    ///
    /// Fails with [`InvocationError::MissingInput`] or
    /// [`InvocationError::MissingOutput`] before anything is located or
    /// launched.
    pub async fn run(&mut self) -> Result<(), InvocationError> {
        // Taking the pending state up front resets the builder on every path.
        let input = self.input.take();
        let output = self.output.take();

        let input = input.ok_or(InvocationError::MissingInput)?;
        let output = output.ok_or(InvocationError::MissingOutput)?;

        let accepted = self.policy.max_inputs();
        if input.count() > accepted {
            return Err(InvocationError::UnsupportedInput {
                operation: self.policy.operation(),
                accepted,
            });
        }

        let program = self.locator.locate(self.policy.tool())?;

        // Held until the process is done so the spooled frame outlives it.
        let mut spooled: Option<NamedTempFile> = None;
        let (stdin, args) = match input {
            InputSource::Stream(reader) => (Some(reader), self.policy.assemble(&InputArgs::stdin())),
            InputSource::Streams(reader, second) => {
                let file = spool(second).await?;
                let args = self.policy.assemble(&InputArgs::Stdin {
                    secondary: Some(file.path()),
                });
                spooled = Some(file);
                (Some(reader), args)
            }
            InputSource::StreamWithFile(reader, second) => {
                let args = self.policy.assemble(&InputArgs::Stdin {
                    secondary: Some(&second),
                });
                (Some(reader), args)
            }
            InputSource::File(path) => (None, self.policy.assemble(&InputArgs::file(&path))),
            InputSource::Files(path, second) => {
                let args = self.policy.assemble(&InputArgs::Files {
                    primary: &path,
                    secondary: Some(&second),
                });
                (None, args)
            }
        };

        let result = self
            .runner
            .execute(&program, &args, stdin, Some(output))
            .await;
        drop(spooled);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(operation = self.policy.operation(), "{}", e);
                return Err(e);
            }
        };

        match outcome.exit {
            ExitState::Success => {
                if !outcome.stderr.is_empty() {
                    debug!(
                        operation = self.policy.operation(),
                        "Tool diagnostics: {}",
                        outcome.stderr.trim_end()
                    );
                }
                Ok(())
            }
            ExitState::Failure { description, .. } => {
                let err = InvocationError::process_failure(description, outcome.stderr);
                warn!(operation = self.policy.operation(), "{}", err);
                Err(err)
            }
        }
    }

    /// Runs the tool's version query and returns its trimmed stdout.
    pub async fn version(&self) -> Result<String, InvocationError> {
        let program = self.locator.locate(self.policy.tool())?;
        let buffer = OutputBuffer::new();
        let outcome = self
            .runner
            .execute(
                &program,
                &self.policy.version_args(),
                None,
                Some(Box::new(buffer.clone())),
            )
            .await?;

        match outcome.exit {
            ExitState::Success => Ok(String::from_utf8_lossy(&buffer.take()).trim().to_string()),
            ExitState::Failure { description, .. } => {
                Err(InvocationError::process_failure(description, outcome.stderr))
            }
        }
    }
}

/// Copies a stream into a fresh temporary file.
async fn spool(mut reader: InputStream) -> Result<NamedTempFile, InvocationError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    let file = NamedTempFile::new()?;
    tokio::fs::write(file.path(), &bytes).await?;
    Ok(file)
}
