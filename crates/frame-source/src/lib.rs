//! Frame Source Library for the Photobooth Pipeline
//!
//! Provides the RGBA pixel-buffer type shared by the capture, enhancement,
//! and session crates, plus the trait abstracting whatever surface
//! (webcam, canvas, test fixture) supplies those buffers.

pub mod buffer;
pub mod region;

pub use buffer::FrameBuffer;
pub use region::FaceRegion;

use thiserror::Error;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No frame available from capture surface")]
    BufferUnavailable,

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Source of raw pixel buffers at native resolution.
///
/// A frame may be temporarily unavailable (camera warming up, surface
/// detached); that is a recoverable condition, not a session failure.
pub trait FrameSource {
    /// Native buffer dimensions (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Snapshot the current frame as an owned RGBA buffer.
    fn snapshot(&self) -> Result<FrameBuffer, CaptureError>;
}
