//! Invocation of external media-conversion tools.
//!
//! This module turns "convert this input into that output" into exactly one
//! child-process execution. Every operation shares the same machinery:
//!
//! - [`Invocation`]: the reusable builder holding pending input and output
//! - [`ArgumentPolicy`]: per-operation argument assembly, see [`policy`]
//! - [`ProcessRunner`]: launches the child and pumps its standard streams
//! - [`ExecutableLocator`]: resolves tool names to executables
//!
//! Failures of the child are reported as the process error description,
//! `". "`, and the tool's raw stderr.
//!
//! # Example
//!
//! ```ignore
//! use webpbin_core::{Config, OutputBuffer, ToolSet};
//!
//! let tools = ToolSet::new(&Config::default());
//! let output = OutputBuffer::new();
//!
//! let mut encode = tools.encode();
//! encode.input(tokio::fs::File::open("photo.png").await?).output(output.clone());
//! encode.run().await?;
//!
//! // The builder is empty again and can be reused.
//! let mut animate = tools.animate();
//! animate
//!     .input_files("first.png", "second.png")
//!     .output(tokio::fs::File::create("slideshow.webp").await?);
//! animate.run().await?;
//! ```

mod builder;
mod error;
mod locator;
pub mod policy;
mod runner;
mod toolset;
mod traits;
mod types;

pub use builder::Invocation;
pub use error::{compose_failure, InvocationError, FAILURE_SEPARATOR};
pub use locator::PathLocator;
pub use policy::{
    AnimationPolicy, ClipPolicy, EncodePolicy, Gif2WebpPolicy, Mp3Policy, MuxPolicy,
};
pub use runner::SystemRunner;
pub use toolset::ToolSet;
pub use traits::{ArgumentPolicy, ExecutableLocator, ProcessRunner};
pub use types::{
    ExitState, InputArgs, InputSource, InputStream, OutputBuffer, OutputSink, ProcessOutcome,
};
