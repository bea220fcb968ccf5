//! Face Detection Seam for the Photobooth Pipeline
//!
//! The pipeline treats detection as an external capability: something that,
//! given a frame, returns zero or more faces with bounding boxes, landmarks,
//! expression probabilities, and age/gender estimates. This crate holds the
//! shared face types, the async `FaceDetector` trait the orchestrator polls,
//! and a scripted detector for deterministic tests.

pub mod face;
pub mod scripted;

pub use face::{AgeAndGender, BoundingBox, DetectedFace, Expressions, Landmark};
pub use scripted::ScriptedDetector;

use frame_source::FrameBuffer;
use std::future::Future;
use thiserror::Error;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Detector not ready")]
    NotReady,

    #[error("Detection backend failed: {0}")]
    Backend(String),
}

/// Asynchronous face detector.
///
/// May legitimately return an empty list. Callers must not issue a second
/// `detect` for the same session until the prior call resolves.
pub trait FaceDetector {
    fn detect(
        &mut self,
        frame: &FrameBuffer,
    ) -> impl Future<Output = Result<Vec<DetectedFace>, DetectError>> + Send;
}
