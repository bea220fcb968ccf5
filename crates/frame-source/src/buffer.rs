//! RGBA frame buffer type and pixel access

use crate::region::FaceRegion;
use crate::CaptureError;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Decoded RGBA frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    /// RGBA pixel data (width * height * 4)
    data: Vec<u8>,
    /// Frame width
    width: u32,
    /// Frame height
    height: u32,
}

impl FrameBuffer {
    /// Create a new frame buffer from raw RGBA data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(CaptureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a buffer filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte index of pixel (x, y); caller must keep coordinates in bounds.
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Set pixel at (x, y); out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Rec. 601 luminance of pixel (x, y).
    pub fn luminance(&self, x: u32, y: u32) -> Option<f32> {
        self.get_pixel(x, y).map(|p| luminance_of(p[0], p[1], p[2]))
    }

    /// Copy a region into a new buffer. Returns `None` if the region is not
    /// fully inside this buffer or has zero area.
    pub fn crop(&self, region: FaceRegion) -> Option<FrameBuffer> {
        if region.is_empty()
            || region.x + region.width > self.width
            || region.y + region.height > self.height
        {
            return None;
        }

        let row_bytes = region.width as usize * BYTES_PER_PIXEL;
        let mut cropped = Vec::with_capacity(region.height as usize * row_bytes);
        for row in region.y..(region.y + region.height) {
            let start = self.pixel_index(region.x, row);
            cropped.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Some(FrameBuffer {
            data: cropped,
            width: region.width,
            height: region.height,
        })
    }
}

/// Luminance formula: 0.299*R + 0.587*G + 0.114*B
#[inline]
pub fn luminance_of(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Decode a JPEG snapshot to an RGBA frame buffer.
#[cfg(feature = "jpeg-decode")]
pub fn decode_jpeg(jpeg_data: &[u8]) -> Result<FrameBuffer, CaptureError> {
    use image::ImageFormat;

    let img = image::load_from_memory_with_format(jpeg_data, ImageFormat::Jpeg)
        .map_err(|e| CaptureError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer::new(rgba.into_raw(), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        assert!(FrameBuffer::new(vec![0; 10], 2, 2).is_err());
        assert!(FrameBuffer::new(vec![0; 16], 2, 2).is_ok());
    }

    #[test]
    fn pixel_roundtrip() {
        let mut buf = FrameBuffer::filled(4, 4, [0, 0, 0, 255]);
        buf.set_pixel(2, 3, [10, 20, 30, 255]);
        assert_eq!(buf.get_pixel(2, 3), Some([10, 20, 30, 255]));
        assert_eq!(buf.get_pixel(4, 0), None);
    }

    #[test]
    fn out_of_bounds_write_ignored() {
        let mut buf = FrameBuffer::filled(2, 2, [1, 1, 1, 255]);
        let before = buf.data().to_vec();
        buf.set_pixel(5, 5, [9, 9, 9, 9]);
        assert_eq!(buf.data(), &before[..]);
    }

    #[test]
    fn crop_inside_bounds() {
        let mut buf = FrameBuffer::filled(4, 4, [0, 0, 0, 255]);
        buf.set_pixel(1, 1, [7, 7, 7, 255]);
        let crop = buf
            .crop(FaceRegion {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            })
            .unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.get_pixel(0, 0), Some([7, 7, 7, 255]));
    }

    #[test]
    fn crop_rejects_overflow_and_zero_area() {
        let buf = FrameBuffer::filled(4, 4, [0, 0, 0, 255]);
        assert!(buf
            .crop(FaceRegion {
                x: 3,
                y: 3,
                width: 2,
                height: 2
            })
            .is_none());
        assert!(buf
            .crop(FaceRegion {
                x: 0,
                y: 0,
                width: 0,
                height: 2
            })
            .is_none());
    }

    #[test]
    fn luminance_matches_rec601() {
        let buf = FrameBuffer::filled(1, 1, [255, 0, 0, 255]);
        let l = buf.luminance(0, 0).unwrap();
        assert!((l - 0.299 * 255.0).abs() < 1e-3);
    }
}
