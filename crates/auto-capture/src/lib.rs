//! Emotion-Driven Auto Capture
//!
//! Decides when a photobooth should fire a photo on its own:
//! - Frame quality gating on detector confidence and smile probability
//! - Stability debouncing across consecutive frames (smooths single-frame
//!   detection noise)
//! - Cooldown between captures so one sustained smile cannot rapid-fire
//! - A 0-100 readiness score for UI feedback, advisory only
//!
//! All decisions take an injected `Instant`, so tests run without timers.

pub mod analyzer;
pub mod config;
pub mod controller;

pub use analyzer::{analyze, readiness_score, FrameQuality};
pub use config::{AutoCaptureConfig, ConfigError};
pub use controller::{AutoCaptureController, AutoCaptureState, MIN_CAPTURE_COOLDOWN};
