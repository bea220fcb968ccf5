//! Skin smoothing and lighting correction

use crate::blend::{blend_factor, effect_region};
use crate::settings::{EnhanceQuality, EnhanceSettings};
use frame_source::{buffer::luminance_of, FaceRegion, FrameBuffer};
use tracing::debug;

/// Pixel midpoint for contrast and shadow-lift math.
const MIDPOINT: f32 = 128.0;

/// Summed-channel neighbor difference above which a pixel counts as an
/// edge (eyes, mouth, eyebrows) and is left unsmoothed.
const EDGE_THRESHOLD: i32 = 60;

/// Gaussian-like 3x3 smoothing kernel, total weight 16.
const KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// Applies face-targeted pixel transforms to a frame buffer.
///
/// Both transforms only ever touch the face box expanded by the configured
/// padding and clamped to the buffer; a region that clamps to zero area is
/// a no-op. Repeated application converges toward a smoothed/brightened
/// fixed point rather than oscillating.
#[derive(Debug, Clone)]
pub struct FaceEnhancementEngine {
    settings: EnhanceSettings,
}

impl FaceEnhancementEngine {
    pub fn new(settings: EnhanceSettings) -> Self {
        Self { settings }
    }

    pub fn with_quality(quality: EnhanceQuality) -> Self {
        Self::new(quality.settings())
    }

    pub fn settings(&self) -> &EnhanceSettings {
        &self.settings
    }

    /// Full enhancement pass: lighting correction, then skin smoothing.
    pub fn enhance(&self, buf: &mut FrameBuffer, faces: &[FaceRegion]) {
        self.enhance_lighting(buf, faces);
        self.smooth_skin(buf, faces);
    }

    /// Brighten shadows and lift contrast on each face region, blended
    /// smoothly to zero at the region boundary.
    pub fn enhance_lighting(&self, buf: &mut FrameBuffer, faces: &[FaceRegion]) {
        let s = self.settings;
        let (bw, bh) = (buf.width(), buf.height());

        for &face in faces {
            if face.is_empty() {
                continue;
            }
            let region = effect_region(face, s.padding, bw, bh);
            if region.is_empty() {
                continue;
            }

            for y in region.y..region.y + region.height {
                for x in region.x..region.x + region.width {
                    let blend = blend_factor(x as f32, y as f32, face, s.padding as f32);
                    if blend <= 0.0 {
                        continue;
                    }

                    let idx = buf.pixel_index(x, y);
                    let data = buf.data_mut();
                    let (r, g, b) = (data[idx] as f32, data[idx + 1] as f32, data[idx + 2] as f32);

                    let luminance = luminance_of(data[idx], data[idx + 1], data[idx + 2]);
                    // Dark areas get lifted more than bright ones.
                    let lift = if luminance < MIDPOINT {
                        (MIDPOINT - luminance) / MIDPOINT * s.shadow_lift
                    } else {
                        0.0
                    };
                    let brightness = 1.0 + lift + s.base_brightness;

                    for (offset, channel) in [r, g, b].into_iter().enumerate() {
                        let enhanced = ((channel - MIDPOINT) * s.contrast + MIDPOINT * brightness)
                            .clamp(0.0, 255.0);
                        let mixed = channel * (1.0 - blend) + enhanced * blend;
                        data[idx + offset] = mixed.round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }
    }

    /// Smooth skin-toned pixels with a 3x3 kernel, leaving edges (facial
    /// features) and non-skin pixels alone.
    pub fn smooth_skin(&self, buf: &mut FrameBuffer, faces: &[FaceRegion]) {
        let s = self.settings;
        let stride = s.stride.max(1);
        let (bw, bh) = (buf.width(), buf.height());
        if bw < 3 || bh < 3 {
            return;
        }

        for &face in faces {
            if face.is_empty() {
                continue;
            }
            if face.width < s.min_face_px || face.height < s.min_face_px {
                debug!(?face, "face too small, skipping smoothing");
                continue;
            }

            let region = effect_region(face, s.padding, bw, bh);
            if region.is_empty() {
                continue;
            }

            // Reads come from a snapshot so smoothed pixels never feed the
            // kernel within one pass.
            let source = buf.data().to_vec();

            // Keep the 3x3 window inside the buffer.
            let y_start = region.y.max(1);
            let y_end = (region.y + region.height).min(bh - 1);
            let x_start = region.x.max(1);
            let x_end = (region.x + region.width).min(bw - 1);

            let mut y = y_start;
            while y < y_end {
                let mut x = x_start;
                while x < x_end {
                    let idx = buf.pixel_index(x, y);

                    if is_skin_pixel(&source, idx)
                        && !(s.edge_guard && is_edge_pixel(&source, idx, bw))
                    {
                        let (sr, sg, sb) = if s.weighted_kernel {
                            kernel_average(&source, x, y, bw)
                        } else {
                            mean_average(&source, x, y, bw)
                        };

                        let mix =
                            s.smoothing_intensity * blend_factor(x as f32, y as f32, face, s.padding as f32);
                        if mix > 0.0 {
                            let data = buf.data_mut();
                            data[idx] = lerp_u8(data[idx], sr, mix);
                            data[idx + 1] = lerp_u8(data[idx + 1], sg, mix);
                            data[idx + 2] = lerp_u8(data[idx + 2], sb, mix);
                        }
                    }

                    x += stride;
                }
                y += stride;
            }
        }
    }
}

impl Default for FaceEnhancementEngine {
    fn default() -> Self {
        Self::with_quality(EnhanceQuality::Offline)
    }
}

#[inline]
fn lerp_u8(original: u8, target: f32, weight: f32) -> u8 {
    (original as f32 * (1.0 - weight) + target * weight)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Color-range skin heuristic; covers most skin tones without a model.
fn is_skin_pixel(data: &[u8], idx: usize) -> bool {
    let (r, g, b) = (data[idx], data[idx + 1], data[idx + 2]);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    r > 95
        && g > 40
        && b > 20
        && r > g
        && r > b
        && (r as i32 - g as i32).abs() > 15
        && (max - min) > 15
}

/// High contrast against any 4-neighbor marks a feature edge.
fn is_edge_pixel(data: &[u8], idx: usize, width: u32) -> bool {
    let row = width as usize * 4;
    let neighbors = [
        idx.checked_sub(row),
        Some(idx + row),
        idx.checked_sub(4),
        Some(idx + 4),
    ];

    let (r, g, b) = (data[idx] as i32, data[idx + 1] as i32, data[idx + 2] as i32);
    for neighbor in neighbors.into_iter().flatten() {
        if neighbor + 2 >= data.len() {
            continue;
        }
        let diff = (r - data[neighbor] as i32).abs()
            + (g - data[neighbor + 1] as i32).abs()
            + (b - data[neighbor + 2] as i32).abs();
        if diff > EDGE_THRESHOLD {
            return true;
        }
    }
    false
}

/// Weighted 3x3 average around (x, y); caller keeps the window in bounds.
fn kernel_average(data: &[u8], x: u32, y: u32, width: u32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b, mut total) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for ky in 0..3u32 {
        for kx in 0..3u32 {
            let px = x + kx - 1;
            let py = y + ky - 1;
            let idx = (py as usize * width as usize + px as usize) * 4;
            let weight = KERNEL[ky as usize][kx as usize];
            r += data[idx] as f32 * weight;
            g += data[idx + 1] as f32 * weight;
            b += data[idx + 2] as f32 * weight;
            total += weight;
        }
    }
    (r / total, g / total, b / total)
}

/// Plain 3x3 mean, the cheaper realtime variant.
fn mean_average(data: &[u8], x: u32, y: u32, width: u32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
    for ky in 0..3u32 {
        for kx in 0..3u32 {
            let px = x + kx - 1;
            let py = y + ky - 1;
            let idx = (py as usize * width as usize + px as usize) * 4;
            r += data[idx] as f32;
            g += data[idx + 1] as f32;
            b += data[idx + 2] as f32;
        }
    }
    (r / 9.0, g / 9.0, b / 9.0)
}
