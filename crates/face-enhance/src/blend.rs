//! Radial blend mask for face-targeted effects
//!
//! A binary mask leaves a visible seam at the bounding-box edge. Instead,
//! every pixel gets a continuous [0, 1] weight from its distance to the
//! face center: full effect inside the face radius, cubic ease-out across
//! the padding band, zero beyond it.

use frame_source::FaceRegion;

/// Per-pixel effect weight in [0, 1].
///
/// Monotonically non-increasing in the distance from the region center and
/// continuous at both breakpoints: exactly 1 at `face_radius`, exactly 0 at
/// `face_radius + padding_px`.
pub fn blend_factor(pixel_x: f32, pixel_y: f32, region: FaceRegion, padding_px: f32) -> f32 {
    if region.is_empty() {
        return 0.0;
    }

    let (cx, cy) = region.center();
    let dx = pixel_x - cx;
    let dy = pixel_y - cy;
    let d = (dx * dx + dy * dy).sqrt();

    let face_radius = region.width.min(region.height) as f32 / 2.0;

    if d <= face_radius {
        return 1.0;
    }
    if padding_px <= 0.0 || d > face_radius + padding_px {
        return 0.0;
    }

    let t = (d - face_radius) / padding_px;
    1.0 - t * t * t
}

/// The pixel area an effect may touch: the face box expanded by `padding`
/// and clamped to the buffer. May be empty, which callers treat as a no-op.
pub fn effect_region(face: FaceRegion, padding: u32, buf_width: u32, buf_height: u32) -> FaceRegion {
    face.expanded(padding).clamped(buf_width, buf_height)
}
