//! Per-session photo collection state

use auto_capture::AutoCaptureConfig;
use chrono::{DateTime, Utc};
use face_enhance::{BackgroundFilter, EnhanceQuality, PixelFilter};
use frame_source::FrameBuffer;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Photos per strip
    pub panel_count: u32,
    /// Detector polling cadence
    pub poll_interval: Duration,
    /// Manual capture countdown length
    pub countdown: Duration,
    /// Auto-capture behavior
    pub auto_capture: AutoCaptureConfig,
    /// Face enhancement on captured photos; `None` disables it
    pub enhancement: Option<EnhanceQuality>,
    /// Whole-frame filters, applied in order after enhancement
    pub filters: Vec<PixelFilter>,
    /// Optional face-aware background treatment
    pub background_filter: Option<BackgroundFilter>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            panel_count: 4,
            poll_interval: Duration::from_millis(300),
            countdown: Duration::from_secs(3),
            auto_capture: AutoCaptureConfig::default(),
            enhancement: Some(EnhanceQuality::Offline),
            filters: Vec::new(),
            background_filter: None,
        }
    }
}

/// Session lifecycle. `Complete` is terminal; a new session starts from
/// scratch with fresh controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Collecting { taken: u32, target: u32 },
    Complete,
}

/// One captured photo with its finished pixel buffer.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub id: Uuid,
    /// Zero-based position within the strip
    pub index: u32,
    pub taken_at: DateTime<Utc>,
    /// Whether the auto-capture controller fired this one
    pub auto: bool,
    pub frame: FrameBuffer,
}

/// Ordered photo collection for one session.
#[derive(Debug)]
pub struct PhotoSession {
    id: Uuid,
    target: u32,
    photos: Vec<CapturedPhoto>,
}

impl PhotoSession {
    pub fn new(target: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            photos: Vec::with_capacity(target as usize),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        if self.photos.len() as u32 >= self.target {
            SessionState::Complete
        } else {
            SessionState::Collecting {
                taken: self.photos.len() as u32,
                target: self.target,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    pub fn taken(&self) -> u32 {
        self.photos.len() as u32
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    /// Append a finished frame. Returns the stored photo, or `None` once
    /// the session is already complete.
    pub fn push(&mut self, frame: FrameBuffer, auto: bool) -> Option<&CapturedPhoto> {
        if self.is_complete() {
            return None;
        }
        let photo = CapturedPhoto {
            id: Uuid::new_v4(),
            index: self.photos.len() as u32,
            taken_at: Utc::now(),
            auto,
            frame,
        };
        self.photos.push(photo);
        self.photos.last()
    }

    /// Drop the most recent photo (retake). Returns its strip index.
    pub fn discard_last(&mut self) -> Option<u32> {
        self.photos.pop().map(|p| p.index)
    }

    /// Hand the ordered buffers plus panel count to the strip compositor.
    pub fn into_strip_input(self) -> (Vec<FrameBuffer>, u32) {
        let target = self.target;
        (self.photos.into_iter().map(|p| p.frame).collect(), target)
    }
}
