//! Types shared by the invocation builder, policies and runners.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite};

/// An in-memory readable that feeds a tool's standard input.
pub type InputStream = Box<dyn AsyncRead + Send + Unpin>;

/// A writable that receives a tool's standard output.
pub type OutputSink = Box<dyn AsyncWrite + Send + Unpin>;

/// The pending input of an invocation.
///
/// A single slot, so configuring one form always replaces the other.
pub enum InputSource {
    /// One stream, piped to stdin.
    Stream(InputStream),
    /// Two streams; the first is piped to stdin, the second is spooled to a
    /// temporary file before launch.
    Streams(InputStream, InputStream),
    /// One stream piped to stdin plus a second input already on disk.
    StreamWithFile(InputStream, PathBuf),
    /// One file path.
    File(PathBuf),
    /// Two file paths.
    Files(PathBuf, PathBuf),
}

impl InputSource {
    /// Number of inputs this source provides.
    pub fn count(&self) -> usize {
        match self {
            Self::Stream(_) | Self::File(_) => 1,
            Self::Streams(..) | Self::StreamWithFile(..) | Self::Files(..) => 2,
        }
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream"),
            Self::Streams(..) => f.write_str("Streams"),
            Self::StreamWithFile(_, second) => {
                f.debug_tuple("StreamWithFile").field(second).finish()
            }
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Files(first, second) => {
                f.debug_tuple("Files").field(first).field(second).finish()
            }
        }
    }
}

/// The input shape an argument policy sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputArgs<'a> {
    /// Primary input is read from stdin, optional second input is a path.
    Stdin { secondary: Option<&'a Path> },
    /// Inputs are named files.
    Files {
        primary: &'a Path,
        secondary: Option<&'a Path>,
    },
}

impl<'a> InputArgs<'a> {
    /// Stdin input without a second frame.
    pub fn stdin() -> Self {
        Self::Stdin { secondary: None }
    }

    /// A single named file.
    pub fn file(path: &'a Path) -> Self {
        Self::Files {
            primary: path,
            secondary: None,
        }
    }

    /// The optional second input.
    pub fn secondary(&self) -> Option<&'a Path> {
        match *self {
            Self::Stdin { secondary } | Self::Files { secondary, .. } => secondary,
        }
    }
}

/// How a child process terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitState {
    /// Exited with status zero.
    Success,
    /// Exited unsuccessfully or was terminated.
    Failure {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Human readable description, e.g. `exit status: 1`.
        description: String,
    },
}

impl ExitState {
    /// Builds an exit state from a process exit status.
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            Self::Failure {
                code: status.code(),
                description: status.to_string(),
            }
        }
    }

    /// Whether the process succeeded.
    pub fn success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of one child-process execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// How the process terminated.
    pub exit: ExitState,
    /// Everything the process wrote to stderr.
    pub stderr: String,
}

impl ProcessOutcome {
    /// A successful outcome with the given diagnostics.
    pub fn success(stderr: impl Into<String>) -> Self {
        Self {
            exit: ExitState::Success,
            stderr: stderr.into(),
        }
    }

    /// A failed outcome with an exit code.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit: ExitState::Failure {
                code: Some(code),
                description: format!("exit status: {}", code),
            },
            stderr: stderr.into(),
        }
    }
}

/// A cloneable in-memory sink.
///
/// Every clone shares the same buffer, so a caller can hand one clone to an
/// invocation and read the bytes through another once `run` returns.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl OutputBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copies out the bytes written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Takes the bytes written so far, leaving the buffer empty.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AsyncWrite for OutputBuffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.lock().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
