//! Testing utilities and mock implementations.
//!
//! The mocks stand in for the executable locator and the process runner so
//! invocation behavior can be checked without the real tools installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use webpbin_core::testing::{MockLocator, MockRunner};
//!
//! let locator = MockLocator::new();
//! let runner = MockRunner::new();
//! runner.set_stdout(b"RIFF".to_vec());
//!
//! let tools = ToolSet::with_collaborators(&config, Arc::new(locator), Arc::new(runner));
//! ```

mod mock_locator;
mod mock_runner;

pub use mock_locator::MockLocator;
pub use mock_runner::{MockRunner, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    /// A 1x1 transparent RGBA PNG.
    pub const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    /// Whether `bytes` start with a RIFF/WEBP container header.
    pub fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }
}
