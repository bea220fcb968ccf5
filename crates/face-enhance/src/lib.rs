//! Face-Aware Image Enhancement
//!
//! Pixel-level cosmetic transforms for captured photobooth frames:
//! - Skin smoothing with a skin-tone heuristic and an edge guard that keeps
//!   eyes, mouth, and eyebrows sharp
//! - Lighting correction (shadow lift + contrast) on face regions
//! - A radial blend mask so effects fade smoothly to zero outside the face
//!   instead of cutting off at the bounding-box edge
//! - Whole-frame pixel filters and face-aware background filters
//!
//! Everything here is synchronous, pure pixel arithmetic. Degenerate
//! regions (zero area, fully outside the buffer) are silent no-ops, never
//! errors.

pub mod blend;
pub mod engine;
pub mod filters;
pub mod settings;

pub use blend::{blend_factor, effect_region};
pub use engine::FaceEnhancementEngine;
pub use filters::{BackgroundFilter, PixelFilter};
pub use settings::{EnhanceQuality, EnhanceSettings};
