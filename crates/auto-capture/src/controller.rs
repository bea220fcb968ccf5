//! Auto-capture debounce and cooldown state machine

use crate::analyzer::{analyze, readiness_score};
use crate::config::{AutoCaptureConfig, ConfigError};
use face_detect::DetectedFace;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Minimum elapsed time between automatic captures.
pub const MIN_CAPTURE_COOLDOWN: Duration = Duration::from_millis(1500);

/// Controller state for one photo session.
///
/// A plain value: the controller mutates it through `evaluate`, which takes
/// the clock as a parameter, so unit tests never touch real timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoCaptureState {
    /// Sequential frames meeting the quality criteria.
    pub consecutive_good_frames: u32,
    /// Most recent triggered capture; `None` permits immediate capture.
    pub last_capture: Option<Instant>,
}

impl AutoCaptureState {
    fn in_cooldown(&self, now: Instant) -> bool {
        match self.last_capture {
            Some(at) => now.saturating_duration_since(at) < MIN_CAPTURE_COOLDOWN,
            None => false,
        }
    }
}

/// Decides, across a sequence of frames, the exact frame on which to fire
/// an automatic capture.
#[derive(Debug)]
pub struct AutoCaptureController {
    config: AutoCaptureConfig,
    state: AutoCaptureState,
}

impl AutoCaptureController {
    /// Create a controller. The config is validated up front.
    pub fn new(config: AutoCaptureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: AutoCaptureState::default(),
        })
    }

    pub fn config(&self) -> &AutoCaptureConfig {
        &self.config
    }

    /// Replace the config; takes effect on the next evaluation. Invalid
    /// values are rejected and the previous config stays installed.
    pub fn update_config(&mut self, config: AutoCaptureConfig) -> Result<(), ConfigError> {
        config.validate()?;
        debug!(?config, "auto-capture config updated");
        self.config = config;
        Ok(())
    }

    /// Current stability streak, for readiness feedback.
    pub fn stability_count(&self) -> u32 {
        self.state.consecutive_good_frames
    }

    /// Readiness score for the given frame under the current streak.
    pub fn readiness(&self, faces: &[DetectedFace]) -> f32 {
        readiness_score(faces, self.state.consecutive_good_frames)
    }

    /// Evaluate one frame. Returns `true` exactly on the frame that should
    /// trigger a capture. Never panics; degenerate input yields `false`.
    pub fn evaluate(&mut self, faces: &[DetectedFace], now: Instant) -> bool {
        if !self.config.enabled || faces.is_empty() {
            self.state.consecutive_good_frames = 0;
            return false;
        }

        // Cooldown blocks regardless of frame quality, and deliberately
        // leaves the streak untouched.
        if self.state.in_cooldown(now) {
            debug!("auto-capture suppressed: in cooldown");
            return false;
        }

        let quality = analyze(faces, &self.config);
        if !quality.is_good {
            debug!(reason = %quality.reason, "bad frame, streak reset");
            self.state.consecutive_good_frames = 0;
            return false;
        }

        self.state.consecutive_good_frames += 1;
        debug!(
            streak = self.state.consecutive_good_frames,
            needed = self.config.stability_frames,
            "good frame"
        );

        if self.state.consecutive_good_frames >= self.config.stability_frames {
            self.state.last_capture = Some(now);
            self.state.consecutive_good_frames = 0;
            info!("auto-capture triggered");
            return true;
        }

        false
    }

    /// Zero the stability streak only. The cooldown timestamp persists, so
    /// eager resets after each photo cannot enable rapid-fire captures.
    pub fn reset_stability(&mut self) {
        self.state.consecutive_good_frames = 0;
    }

    /// Record a capture that happened outside this controller (manual
    /// countdown shot), so the cooldown also covers it.
    pub fn record_capture(&mut self, now: Instant) {
        self.state.last_capture = Some(now);
        self.state.consecutive_good_frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_detect::BoundingBox;

    fn face(confidence: f32, happy: f32) -> DetectedFace {
        DetectedFace::basic(BoundingBox::default(), confidence, happy)
    }

    fn config() -> AutoCaptureConfig {
        AutoCaptureConfig {
            enabled: true,
            require_all_smiling: true,
            smile_threshold: 0.5,
            confidence_threshold: 0.5,
            stability_frames: 3,
        }
    }

    fn controller() -> AutoCaptureController {
        AutoCaptureController::new(config()).unwrap()
    }

    #[test]
    fn fires_on_exactly_the_nth_good_frame() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.8)];
        let t0 = Instant::now();

        assert!(!ctrl.evaluate(&faces, t0));
        assert!(!ctrl.evaluate(&faces, t0 + Duration::from_millis(300)));
        assert!(ctrl.evaluate(&faces, t0 + Duration::from_millis(600)));
    }

    #[test]
    fn bad_frame_resets_streak_to_zero() {
        let mut ctrl = controller();
        let good = [face(0.9, 0.8)];
        let glum = [face(0.9, 0.1)];
        let t0 = Instant::now();

        assert!(!ctrl.evaluate(&good, t0));
        assert!(!ctrl.evaluate(&glum, t0)); // streak back to 0
        assert!(!ctrl.evaluate(&good, t0));
        assert!(!ctrl.evaluate(&good, t0));
        assert!(ctrl.evaluate(&good, t0)); // 3 consecutive after the reset
    }

    #[test]
    fn never_fires_twice_within_cooldown() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        for i in 0..3 {
            ctrl.evaluate(&faces, t0 + Duration::from_millis(i * 10));
        }
        // Triggered at t0+20ms; keep feeding perfect frames inside cooldown.
        for ms in (30..1500).step_by(100) {
            assert!(!ctrl.evaluate(&faces, t0 + Duration::from_millis(20 + ms)));
        }
    }

    #[test]
    fn fires_again_after_cooldown_expires() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        for i in 0..3 {
            ctrl.evaluate(&faces, t0 + Duration::from_millis(i * 10));
        }
        let after = t0 + Duration::from_millis(20) + MIN_CAPTURE_COOLDOWN;
        assert!(!ctrl.evaluate(&faces, after));
        assert!(!ctrl.evaluate(&faces, after + Duration::from_millis(10)));
        assert!(ctrl.evaluate(&faces, after + Duration::from_millis(20)));
    }

    #[test]
    fn cooldown_leaves_streak_untouched() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        assert!(!ctrl.evaluate(&faces, t0));
        assert_eq!(ctrl.stability_count(), 1);
        ctrl.record_capture(t0);
        // In cooldown now: evaluation is a no-op on the streak.
        assert!(!ctrl.evaluate(&faces, t0 + Duration::from_millis(100)));
        assert_eq!(ctrl.stability_count(), 0); // record_capture zeroed it
    }

    #[test]
    fn disabled_config_never_fires_and_resets() {
        let mut ctrl = AutoCaptureController::new(AutoCaptureConfig {
            enabled: false,
            ..config()
        })
        .unwrap();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        for _ in 0..10 {
            assert!(!ctrl.evaluate(&faces, t0));
        }
        assert_eq!(ctrl.stability_count(), 0);
    }

    #[test]
    fn empty_faces_reset_streak() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        ctrl.evaluate(&faces, t0);
        ctrl.evaluate(&faces, t0);
        assert_eq!(ctrl.stability_count(), 2);
        assert!(!ctrl.evaluate(&[], t0));
        assert_eq!(ctrl.stability_count(), 0);
    }

    #[test]
    fn reset_stability_preserves_cooldown() {
        let mut ctrl = controller();
        let faces = [face(0.9, 0.9)];
        let t0 = Instant::now();

        for _ in 0..3 {
            ctrl.evaluate(&faces, t0);
        }
        ctrl.reset_stability();
        // Still inside cooldown from the trigger above.
        assert!(!ctrl.evaluate(&faces, t0 + Duration::from_millis(500)));
    }

    #[test]
    fn stability_frames_of_one_fires_immediately() {
        let mut ctrl = AutoCaptureController::new(AutoCaptureConfig {
            stability_frames: 1,
            ..config()
        })
        .unwrap();
        assert!(ctrl.evaluate(&[face(0.9, 0.9)], Instant::now()));
    }

    #[test]
    fn invalid_update_keeps_previous_config() {
        let mut ctrl = controller();
        let bad = AutoCaptureConfig {
            smile_threshold: 2.0,
            ..config()
        };
        assert!(ctrl.update_config(bad).is_err());
        assert_eq!(ctrl.config().smile_threshold, 0.5);
    }
}
