//! Scripted detector for deterministic tests
//!
//! Plays back a fixed sequence of per-frame detection results, repeating
//! the final entry once the script runs out. Stands in for the real
//! (model-backed) detector, which lives outside this pipeline.

use crate::{DetectError, DetectedFace, FaceDetector};
use frame_source::FrameBuffer;

/// What the scripted detector should do for one frame.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Return these faces.
    Faces(Vec<DetectedFace>),
    /// Fail the detection call.
    Fail(String),
}

/// Detector that replays a prerecorded script.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    script: Vec<ScriptStep>,
    cursor: usize,
    /// Number of detect calls issued, for assertions on poll cadence.
    pub calls: usize,
}

impl ScriptedDetector {
    pub fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            cursor: 0,
            calls: 0,
        }
    }

    /// Script that returns the same faces on every frame.
    pub fn always(faces: Vec<DetectedFace>) -> Self {
        Self::new(vec![ScriptStep::Faces(faces)])
    }
}

impl FaceDetector for ScriptedDetector {
    async fn detect(&mut self, _frame: &FrameBuffer) -> Result<Vec<DetectedFace>, DetectError> {
        self.calls += 1;
        let step = match self.script.get(self.cursor) {
            Some(step) => step.clone(),
            None => return Ok(Vec::new()),
        };
        if self.cursor + 1 < self.script.len() {
            self.cursor += 1;
        }
        match step {
            ScriptStep::Faces(faces) => Ok(faces),
            ScriptStep::Fail(msg) => Err(DetectError::Backend(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::BoundingBox;

    fn face() -> DetectedFace {
        DetectedFace::basic(BoundingBox::default(), 0.9, 0.8)
    }

    #[tokio::test]
    async fn replays_script_and_repeats_last_step() {
        let mut det = ScriptedDetector::new(vec![
            ScriptStep::Faces(vec![face()]),
            ScriptStep::Faces(vec![]),
        ]);
        let buf = FrameBuffer::filled(2, 2, [0, 0, 0, 255]);

        assert_eq!(det.detect(&buf).await.unwrap().len(), 1);
        assert_eq!(det.detect(&buf).await.unwrap().len(), 0);
        // Last step repeats.
        assert_eq!(det.detect(&buf).await.unwrap().len(), 0);
        assert_eq!(det.calls, 3);
    }

    #[tokio::test]
    async fn failure_step_surfaces_error() {
        let mut det = ScriptedDetector::new(vec![ScriptStep::Fail("backend down".into())]);
        let buf = FrameBuffer::filled(2, 2, [0, 0, 0, 255]);
        assert!(det.detect(&buf).await.is_err());
    }
}
