//! Whole-frame pixel filters and face-aware background filters

use frame_source::{buffer::luminance_of, FaceRegion, FrameBuffer};
use serde::{Deserialize, Serialize};

/// Padding added around face boxes when masking background filters.
const FACE_MASK_PADDING: u32 = 20;

/// Cosmetic filter applied to every pixel of a captured photo.
///
/// Filters compose in the order the caller lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFilter {
    Grayscale,
    Sepia,
    Vintage,
    Warm,
    Cool,
    Vivid,
}

impl PixelFilter {
    /// Apply this filter in place over the whole buffer.
    pub fn apply(self, buf: &mut FrameBuffer) {
        for pixel in buf.data_mut().chunks_exact_mut(4) {
            let (r, g, b) = (pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
            let (nr, ng, nb) = match self {
                PixelFilter::Grayscale => {
                    let gray = luminance_of(pixel[0], pixel[1], pixel[2]);
                    (gray, gray, gray)
                }
                PixelFilter::Sepia => sepia(r, g, b),
                PixelFilter::Vintage => {
                    let (sr, sg, sb) = sepia(r, g, b);
                    (sr * 1.1, sg * 1.1, sb * 1.1)
                }
                PixelFilter::Warm => (r * 1.2, g * 1.1, b * 0.9),
                PixelFilter::Cool => (r * 0.9, g * 1.05, b * 1.2),
                PixelFilter::Vivid => {
                    let avg = (r + g + b) / 3.0;
                    (
                        avg + (r - avg) * 1.5,
                        avg + (g - avg) * 1.5,
                        avg + (b - avg) * 1.5,
                    )
                }
            };
            pixel[0] = nr.clamp(0.0, 255.0) as u8;
            pixel[1] = ng.clamp(0.0, 255.0) as u8;
            pixel[2] = nb.clamp(0.0, 255.0) as u8;
        }
    }

    /// Apply a filter chain in order.
    pub fn apply_all(filters: &[PixelFilter], buf: &mut FrameBuffer) {
        for filter in filters {
            filter.apply(buf);
        }
    }
}

fn sepia(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        r * 0.393 + g * 0.769 + b * 0.189,
        r * 0.349 + g * 0.686 + b * 0.168,
        r * 0.272 + g * 0.534 + b * 0.131,
    )
}

/// Filter applied only outside the padded face regions, keeping faces
/// untouched while the background recedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundFilter {
    /// 3x3 mean blur
    Blur,
    /// Luminance grayscale
    Desaturate,
    /// 30% darker
    Darken,
}

impl BackgroundFilter {
    /// Apply this filter to every pixel outside all padded face regions.
    pub fn apply(self, buf: &mut FrameBuffer, faces: &[FaceRegion]) {
        let (bw, bh) = (buf.width(), buf.height());
        let masks: Vec<FaceRegion> = faces
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.expanded(FACE_MASK_PADDING).clamped(bw, bh))
            .collect();

        let source = buf.data().to_vec();

        for y in 0..bh {
            for x in 0..bw {
                if masks.iter().any(|m| m.contains(x, y)) {
                    continue;
                }

                let idx = buf.pixel_index(x, y);
                let data = buf.data_mut();
                match self {
                    BackgroundFilter::Blur => {
                        let (r, g, b) = mean_3x3(&source, x, y, bw, bh);
                        data[idx] = r as u8;
                        data[idx + 1] = g as u8;
                        data[idx + 2] = b as u8;
                    }
                    BackgroundFilter::Desaturate => {
                        let gray = luminance_of(data[idx], data[idx + 1], data[idx + 2]) as u8;
                        data[idx] = gray;
                        data[idx + 1] = gray;
                        data[idx + 2] = gray;
                    }
                    BackgroundFilter::Darken => {
                        data[idx] = (data[idx] as f32 * 0.7) as u8;
                        data[idx + 1] = (data[idx + 1] as f32 * 0.7) as u8;
                        data[idx + 2] = (data[idx + 2] as f32 * 0.7) as u8;
                    }
                }
            }
        }
    }
}

/// Bounds-checked 3x3 mean around (x, y).
fn mean_3x3(data: &[u8], x: u32, y: u32, width: u32, height: u32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b, mut count) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let idx = (ny as usize * width as usize + nx as usize) * 4;
            r += data[idx] as f32;
            g += data[idx + 1] as f32;
            b += data[idx + 2] as f32;
            count += 1.0;
        }
    }
    (r / count, g / count, b / count)
}
