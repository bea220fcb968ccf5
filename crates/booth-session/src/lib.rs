//! Photobooth Session Orchestration
//!
//! Drives one photo session end to end:
//! - Polls the face detector at a fixed cadence while the session is active
//!   and not mid-countdown, awaiting each detection before the next
//! - Feeds detections to the auto-capture controller and fires captures on
//!   trigger (automatic) or countdown completion (manual)
//! - Runs captured frames through face enhancement and pixel filters
//! - Collects photos until the configured panel count is reached, then
//!   hands the ordered buffers to the (external) strip compositor

pub mod orchestrator;
pub mod session;

pub use orchestrator::{CaptureOrchestrator, SessionCommand, SessionEvent};
pub use session::{CapturedPhoto, PhotoSession, SessionConfig, SessionState};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Session error types
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid auto-capture config: {0}")]
    Config(#[from] auto_capture::ConfigError),

    #[error("Capture failed: {0}")]
    Capture(#[from] frame_source::CaptureError),

    #[error("Session already complete")]
    AlreadyComplete,

    #[error("Event channel closed")]
    ChannelClosed,
}

/// Initialize structured logging for the booth process.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
