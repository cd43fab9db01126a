//! Pixel format conversion
//!
//! The native scanner only reads 8-bit luminance (`Y800`). Everything else is
//! converted here with the ITU-R BT.601 weights in 16-bit fixed point:
//!
//! ```text
//! Y = (19595 R + 38470 G + 7471 B + 32768) >> 16
//! ```
//!
//! Transparent pixels are composited over white first, so dark codes on a
//! transparent background keep their contrast.

use image::{DynamicImage, GenericImageView};

const WEIGHT_R: u32 = 19595;
const WEIGHT_G: u32 = 38470;
const WEIGHT_B: u32 = 7471;

/// Row-major 8-bit grayscale pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GrayBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Luminance of one RGB pixel
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((WEIGHT_R * r as u32 + WEIGHT_G * g as u32 + WEIGHT_B * b as u32 + (1 << 15)) >> 16) as u8
}

/// Blend a channel with white by `alpha`
#[inline]
fn over_white(c: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Convert any decoded image into one luminance byte per pixel
pub fn to_grayscale(image: &DynamicImage) -> GrayBuffer {
    let (width, height) = image.dimensions();
    let data = match image {
        DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
        DynamicImage::ImageLumaA8(gray) => gray
            .pixels()
            .map(|p| over_white(p.0[0], p.0[1]))
            .collect(),
        DynamicImage::ImageRgb8(rgb) => rgb
            .pixels()
            .map(|p| luminance(p.0[0], p.0[1], p.0[2]))
            .collect(),
        other => other
            .to_rgba8()
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                luminance(over_white(r, a), over_white(g, a), over_white(b, a))
            })
            .collect(),
    };

    GrayBuffer {
        width,
        height,
        data,
    }
}
