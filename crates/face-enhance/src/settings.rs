//! Enhancement settings and quality presets

use serde::{Deserialize, Serialize};

/// Quality preset for the enhancement engine.
///
/// One algorithm, two constant sets: the realtime preset trades sampling
/// density and intensity for per-frame latency, since it runs on every
/// rendered frame rather than once per captured photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnhanceQuality {
    /// Preview-rate pass: coarser sampling, gentler constants.
    Realtime,
    /// Full-quality pass for captured photos.
    #[default]
    Offline,
}

impl EnhanceQuality {
    pub fn settings(self) -> EnhanceSettings {
        match self {
            EnhanceQuality::Realtime => EnhanceSettings {
                stride: 2,
                smoothing_intensity: 0.2,
                padding: 12,
                shadow_lift: 0.2,
                base_brightness: 0.05,
                contrast: 1.1,
                min_face_px: 50,
                weighted_kernel: false,
                edge_guard: false,
            },
            EnhanceQuality::Offline => EnhanceSettings {
                stride: 1,
                smoothing_intensity: 0.4,
                padding: 20,
                shadow_lift: 0.3,
                base_brightness: 0.1,
                contrast: 1.15,
                min_face_px: 0,
                weighted_kernel: true,
                edge_guard: true,
            },
        }
    }
}

/// Tunable constants for one enhancement pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhanceSettings {
    /// Smoothing sample stride in pixels (1 = every pixel).
    pub stride: u32,
    /// Base mix weight for smoothed pixels, before the blend mask.
    pub smoothing_intensity: f32,
    /// Padding around the face box, also the blend falloff band width.
    pub padding: u32,
    /// Shadow-lift strength for pixels darker than the midpoint.
    pub shadow_lift: f32,
    /// Flat brightness boost applied to the whole face region.
    pub base_brightness: f32,
    /// Contrast factor about the 128 midpoint.
    pub contrast: f32,
    /// Faces smaller than this (either dimension) are skipped.
    pub min_face_px: u32,
    /// Weighted 3x3 gaussian-like kernel vs. plain mean.
    pub weighted_kernel: bool,
    /// Skip smoothing on high-contrast pixels (protects eyes and mouth).
    pub edge_guard: bool,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        EnhanceQuality::Offline.settings()
    }
}
