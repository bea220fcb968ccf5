//! Capture orchestration loop
//!
//! Single logical flow: each poll tick snapshots a frame, awaits one
//! detection (never two in flight), feeds the result to the auto-capture
//! controller, and fires the capture pipeline on trigger. Manual captures
//! go through a cancellable countdown that re-checks the session is still
//! active before firing.

use crate::session::{PhotoSession, SessionConfig, SessionState};
use crate::SessionError;
use auto_capture::{AutoCaptureConfig, AutoCaptureController};
use face_detect::{DetectedFace, FaceDetector};
use face_enhance::{FaceEnhancementEngine, PixelFilter};
use frame_source::{FaceRegion, FrameSource};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Commands from the UI layer driving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin the manual countdown for the next photo.
    StartCountdown,
    /// Discard the most recent photo and keep collecting.
    Retake,
    /// End the session now (navigation away, reset).
    Stop,
}

/// Events surfaced to the caller as the session progresses.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Advisory capture-readiness feedback for the UI; never gates capture.
    Readiness { score: f32, face_count: usize },
    /// A photo landed in the session.
    PhotoCaptured { index: u32, auto: bool },
    /// A photo was discarded via retake.
    PhotoDiscarded { index: u32 },
    /// The strip is full; downstream compositing can start.
    Complete { session_id: Uuid },
}

/// Drives one photo session: polling, auto-capture, countdown, capture
/// pipeline, and completion.
pub struct CaptureOrchestrator<S, D> {
    config: SessionConfig,
    source: S,
    detector: D,
    controller: AutoCaptureController,
    session: PhotoSession,
    engine: Option<FaceEnhancementEngine>,
    /// Most recent detections and the dimensions of the frame they came
    /// from, for rescaling boxes into capture-buffer space.
    last_faces: Vec<DetectedFace>,
    detect_dims: Option<(u32, u32)>,
    active: bool,
}

impl<S: FrameSource, D: FaceDetector> CaptureOrchestrator<S, D> {
    pub fn new(config: SessionConfig, source: S, detector: D) -> Result<Self, SessionError> {
        let controller = AutoCaptureController::new(config.auto_capture)?;
        let engine = config.enhancement.map(FaceEnhancementEngine::with_quality);
        let session = PhotoSession::new(config.panel_count);
        info!(session_id = %session.id(), panels = config.panel_count, "session started");
        Ok(Self {
            config,
            source,
            detector,
            controller,
            session,
            engine,
            last_faces: Vec::new(),
            detect_dims: None,
            active: true,
        })
    }

    pub fn session(&self) -> &PhotoSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Swap auto-capture behavior mid-session; invalid configs are
    /// rejected and the current one stays installed.
    pub fn set_auto_capture(&mut self, config: AutoCaptureConfig) -> Result<(), SessionError> {
        self.controller.update_config(config)?;
        Ok(())
    }

    /// One polling tick: detect, evaluate, maybe capture. Detector and
    /// frame failures degrade to "no faces this frame" and never end the
    /// session.
    pub async fn poll_tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        if !self.active || self.session.is_complete() {
            return Vec::new();
        }

        let faces = match self.source.snapshot() {
            Ok(frame) => {
                let detected = match self.detector.detect(&frame).await {
                    Ok(faces) => faces,
                    Err(e) => {
                        warn!(error = %e, "detection failed, treating as no faces");
                        Vec::new()
                    }
                };
                self.detect_dims = Some((frame.width(), frame.height()));
                detected
            }
            Err(e) => {
                warn!(error = %e, "no frame for detection");
                Vec::new()
            }
        };

        let triggered = self.controller.evaluate(&faces, now);
        let score = self.controller.readiness(&faces);
        self.last_faces = faces;

        let mut events = vec![SessionEvent::Readiness {
            score,
            face_count: self.last_faces.len(),
        }];

        if triggered {
            match self.capture(true, now) {
                Ok(captured) => events.extend(captured),
                // Recoverable: skip this trigger, retry on a later tick.
                Err(e) => warn!(error = %e, "capture skipped"),
            }
        }

        events
    }

    /// Snapshot, enhance, filter, and store one photo.
    fn capture(&mut self, auto: bool, now: Instant) -> Result<Vec<SessionEvent>, SessionError> {
        if self.session.is_complete() {
            return Err(SessionError::AlreadyComplete);
        }

        let mut frame = self.source.snapshot()?;
        let regions = self.face_regions(frame.width(), frame.height());

        if let Some(engine) = &self.engine {
            engine.enhance(&mut frame, &regions);
        }
        if let Some(background) = self.config.background_filter {
            background.apply(&mut frame, &regions);
        }
        PixelFilter::apply_all(&self.config.filters, &mut frame);

        // push cannot fail here: completeness was checked above.
        let index = self.session.push(frame, auto).map(|p| p.index).unwrap_or(0);
        info!(index, auto, "photo captured");

        if auto {
            self.controller.reset_stability();
        } else {
            // Manual shots also arm the cooldown so an automatic trigger
            // cannot pile on immediately after.
            self.controller.record_capture(now);
        }

        let mut events = vec![SessionEvent::PhotoCaptured { index, auto }];
        if self.session.is_complete() {
            info!(session_id = %self.session.id(), "session complete");
            events.push(SessionEvent::Complete {
                session_id: self.session.id(),
            });
        }
        Ok(events)
    }

    /// Detector boxes rescaled into the capture buffer's pixel space.
    fn face_regions(&self, buf_width: u32, buf_height: u32) -> Vec<FaceRegion> {
        let (sx, sy) = match self.detect_dims {
            Some((dw, dh)) if dw > 0 && dh > 0 => {
                (buf_width as f32 / dw as f32, buf_height as f32 / dh as f32)
            }
            _ => (1.0, 1.0),
        };
        self.last_faces
            .iter()
            .map(|f| f.bounding_box.to_region(sx, sy))
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Run the session to completion (or until stopped), emitting events.
    ///
    /// Polling pauses during a countdown; a `Stop` command cancels any
    /// pending countdown, and a countdown that outlives the session does
    /// not fire.
    pub async fn run(
        mut self,
        events: mpsc::Sender<SessionEvent>,
        mut commands: mpsc::Receiver<SessionCommand>,
    ) -> Result<PhotoSession, SessionError> {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.active && !self.session.is_complete() {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    None | Some(SessionCommand::Stop) => {
                        info!("session stopped");
                        self.active = false;
                    }
                    Some(SessionCommand::Retake) => {
                        if let Some(index) = self.session.discard_last() {
                            debug!(index, "photo discarded");
                            Self::emit(&events, SessionEvent::PhotoDiscarded { index }).await?;
                        }
                    }
                    Some(SessionCommand::StartCountdown) => {
                        self.run_countdown(&events, &mut commands).await?;
                    }
                },
                _ = ticker.tick() => {
                    for event in self.poll_tick(Instant::now()).await {
                        Self::emit(&events, event).await?;
                    }
                }
            }
        }

        Ok(self.session)
    }

    /// Countdown for a manual capture. Cancellable by `Stop`; other
    /// commands arriving mid-countdown are ignored.
    async fn run_countdown(
        &mut self,
        events: &mpsc::Sender<SessionEvent>,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Result<(), SessionError> {
        debug!(seconds = self.config.countdown.as_secs(), "countdown started");
        let deadline = sleep(self.config.countdown);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                cmd = commands.recv() => {
                    if matches!(cmd, None | Some(SessionCommand::Stop)) {
                        info!("countdown cancelled");
                        self.active = false;
                        return Ok(());
                    }
                }
            }
        }

        // Timer fired; capture only if the session still stands.
        if self.active && !self.session.is_complete() {
            match self.capture(false, Instant::now()) {
                Ok(captured) => {
                    for event in captured {
                        Self::emit(events, event).await?;
                    }
                }
                Err(e) => warn!(error = %e, "manual capture skipped"),
            }
        }
        Ok(())
    }

    async fn emit(
        events: &mpsc::Sender<SessionEvent>,
        event: SessionEvent,
    ) -> Result<(), SessionError> {
        events
            .send(event)
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }
}
