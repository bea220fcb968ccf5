//! Frame quality analysis
//!
//! Pure functions: no state, no clock. The controller owns the debounce
//! state; this module only judges a single frame's detections.

use crate::config::AutoCaptureConfig;
use face_detect::DetectedFace;

/// Verdict on one frame's detections.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameQuality {
    pub is_good: bool,
    /// Human-readable reason, surfaced in logs and UI feedback.
    pub reason: String,
}

impl FrameQuality {
    fn good(faces: usize) -> Self {
        Self {
            is_good: true,
            reason: format!("all conditions met ({faces} face(s))"),
        }
    }

    fn bad(reason: String) -> Self {
        Self {
            is_good: false,
            reason,
        }
    }
}

/// Decide whether a frame meets the capture-readiness criteria.
///
/// An unreliable detection must never drive a capture, so any face below
/// the confidence threshold fails the whole frame.
pub fn analyze(faces: &[DetectedFace], config: &AutoCaptureConfig) -> FrameQuality {
    if faces.is_empty() {
        return FrameQuality::bad("no faces detected".to_string());
    }

    let low_confidence = faces
        .iter()
        .filter(|f| f.confidence < config.confidence_threshold)
        .count();
    if low_confidence > 0 {
        return FrameQuality::bad(format!("{low_confidence} face(s) with low confidence"));
    }

    if config.require_all_smiling {
        let not_smiling = faces
            .iter()
            .filter(|f| f.expressions.happy < config.smile_threshold)
            .count();
        if not_smiling > 0 {
            return FrameQuality::bad(format!("{not_smiling} face(s) not smiling enough"));
        }
    } else {
        let smiling = faces
            .iter()
            .any(|f| f.expressions.happy >= config.smile_threshold);
        if !smiling {
            return FrameQuality::bad("no one is smiling".to_string());
        }
    }

    FrameQuality::good(faces.len())
}

/// Capture-readiness score in [0, 100] for UI feedback.
///
/// Per face: confidence contributes up to 40 points, smile up to 40, and
/// the current stability streak up to 20 (4 per frame). The frame score is
/// the mean over faces, 0 with no faces. Advisory only; this value never
/// gates or triggers a capture.
pub fn readiness_score(faces: &[DetectedFace], stability_count: u32) -> f32 {
    if faces.is_empty() {
        return 0.0;
    }

    let stability_bonus = (stability_count as f32 * 4.0).min(20.0);
    let total: f32 = faces
        .iter()
        .map(|face| {
            (face.confidence * 40.0).min(40.0)
                + (face.expressions.happy * 40.0).min(40.0)
                + stability_bonus
        })
        .sum();

    (total / faces.len() as f32).min(100.0)
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

    #[test]
    fn empty_frame_is_not_good() {
        assert!(!analyze(&[], &config()).is_good);
    }

    #[test]
    fn low_confidence_fails_regardless_of_smiles() {
        // One strong face, one weak: weak detection poisons the frame.
        let faces = [face(0.9, 0.9), face(0.2, 0.9)];
        let quality = analyze(&faces, &config());
        assert!(!quality.is_good);
        assert!(quality.reason.contains("low confidence"));
    }

    #[test]
    fn require_all_smiling_fails_on_one_straight_face() {
        let faces = [face(0.9, 0.8), face(0.9, 0.1)];
        assert!(!analyze(&faces, &config()).is_good);
    }

    #[test]
    fn require_all_smiling_passes_when_all_smile() {
        let faces = [face(0.9, 0.8), face(0.9, 0.6)];
        assert!(analyze(&faces, &config()).is_good);
    }

    #[test]
    fn any_smiling_policy_needs_just_one() {
        let cfg = AutoCaptureConfig {
            require_all_smiling: false,
            ..config()
        };
        let faces = [face(0.9, 0.8), face(0.9, 0.1)];
        assert!(analyze(&faces, &cfg).is_good);

        let nobody = [face(0.9, 0.2), face(0.9, 0.1)];
        let quality = analyze(&nobody, &cfg);
        assert!(!quality.is_good);
        assert_eq!(quality.reason, "no one is smiling");
    }

    #[test]
    fn threshold_boundary_counts_as_smiling() {
        let faces = [face(0.5, 0.5)];
        assert!(analyze(&faces, &config()).is_good);
    }

    #[test]
    fn readiness_zero_without_faces() {
        assert_eq!(readiness_score(&[], 10), 0.0);
    }

    #[test]
    fn readiness_caps_at_100() {
        let faces = [face(1.0, 1.0)];
        assert_eq!(readiness_score(&faces, 10), 100.0);
    }

    #[test]
    fn readiness_splits_confidence_smile_stability() {
        // 0.5 confidence -> 20, 0.5 happy -> 20, 2 stable frames -> 8
        let faces = [face(0.5, 0.5)];
        let score = readiness_score(&faces, 2);
        assert!((score - 48.0).abs() < 1e-4);
    }

    #[test]
    fn readiness_averages_over_faces() {
        let faces = [face(1.0, 1.0), face(0.0, 0.0)];
        // 80 and 0, no stability streak.
        assert!((readiness_score(&faces, 0) - 40.0).abs() < 1e-4);
    }
}
