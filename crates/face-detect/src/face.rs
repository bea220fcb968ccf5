//! Detected face types
//!
//! A `DetectedFace` set is a snapshot of one frame. Ids identify a
//! detection instance, not a person: no identity is preserved from frame to
//! frame and downstream logic must not assume otherwise.

use frame_source::FaceRegion;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Face bounding box in source-frame coordinates (not display-scaled).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Convert to an integer pixel region, scaled from detector space into
    /// a buffer space by the given factors.
    pub fn to_region(&self, sx: f32, sy: f32) -> FaceRegion {
        FaceRegion::from_f32(
            self.x * sx,
            self.y * sy,
            self.width * sx,
            self.height * sy,
        )
    }
}

/// One of the 68 facial landmark points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// Per-emotion probabilities, scored independently per label.
///
/// Values are in [0, 1] but need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Expressions {
    pub neutral: f32,
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub fearful: f32,
    pub disgusted: f32,
    pub surprised: f32,
}

impl Expressions {
    /// The highest-probability label, falling back to "neutral" when the
    /// top score is too weak to trust.
    pub fn dominant(&self) -> (&'static str, f32) {
        let labels = [
            ("neutral", self.neutral),
            ("happy", self.happy),
            ("sad", self.sad),
            ("angry", self.angry),
            ("fearful", self.fearful),
            ("disgusted", self.disgusted),
            ("surprised", self.surprised),
        ];
        let (label, score) = labels
            .into_iter()
            .fold(("neutral", 0.0f32), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });
        if score > 0.5 {
            (label, score)
        } else {
            ("neutral", score)
        }
    }
}

/// Estimated age and gender (informational only; never drives capture).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeAndGender {
    pub age: f32,
    pub gender: String,
    pub gender_probability: f32,
}

impl Default for AgeAndGender {
    fn default() -> Self {
        Self {
            age: 0.0,
            gender: String::new(),
            gender_probability: 0.0,
        }
    }
}

/// A single detected face in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Unique per detection instance, not stable across frames.
    pub id: Uuid,
    pub bounding_box: BoundingBox,
    /// 68 landmark points; consumed by overlay rendering, not by the
    /// capture or enhancement logic.
    pub landmarks: Vec<Landmark>,
    pub expressions: Expressions,
    /// Detector confidence that this box is a face, in [0, 1].
    pub confidence: f32,
    pub age_and_gender: AgeAndGender,
}

impl DetectedFace {
    /// Minimal face for pipelines that only need box + confidence + smile.
    pub fn basic(bounding_box: BoundingBox, confidence: f32, happy: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounding_box,
            landmarks: Vec::new(),
            expressions: Expressions {
                happy,
                ..Default::default()
            },
            confidence,
            age_and_gender: AgeAndGender::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_picks_strongest_label() {
        let e = Expressions {
            happy: 0.9,
            sad: 0.2,
            ..Default::default()
        };
        assert_eq!(e.dominant(), ("happy", 0.9));
    }

    #[test]
    fn dominant_falls_back_to_neutral_when_weak() {
        let e = Expressions {
            surprised: 0.4,
            ..Default::default()
        };
        assert_eq!(e.dominant().0, "neutral");
    }

    #[test]
    fn bounding_box_scales_into_buffer_space() {
        let b = BoundingBox {
            x: 100.0,
            y: 50.0,
            width: 200.0,
            height: 100.0,
        };
        let r = b.to_region(0.5, 0.5);
        assert_eq!((r.x, r.y, r.width, r.height), (50, 25, 100, 50));
    }

    #[test]
    fn basic_faces_get_distinct_ids() {
        let a = DetectedFace::basic(BoundingBox::default(), 0.9, 0.8);
        let b = DetectedFace::basic(BoundingBox::default(), 0.9, 0.8);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn face_serializes_roundtrip() {
        let face = DetectedFace::basic(
            BoundingBox {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
            },
            0.95,
            0.7,
        );
        let json = serde_json::to_string(&face).unwrap();
        let back: DetectedFace = serde_json::from_str(&json).unwrap();
        assert_eq!(face, back);
    }
}
