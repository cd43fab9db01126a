//! Image handles passed to the native scanner

use tracing::debug;

use crate::backend::Backend;
use crate::convert::{self, GrayBuffer};
use crate::symbol::Symbol;
use crate::{Error, Result, ScanErrorCode};

#[cfg(feature = "native")]
use crate::backend::Zbar;

/// Image formats supported by the native scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// 8-bit grayscale, one byte per pixel
    Y800,
}

impl ImageFormat {
    pub fn to_fourcc(self) -> u32 {
        match self {
            ImageFormat::Y800 => fourcc(b'Y', b'8', b'0', b'0'),
        }
    }
}

/// Create a fourcc code from 4 bytes
const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

/// A grayscale image owned by the native library
///
/// The pixel buffer lives in this handle and is lent to the native image
/// until [`release`](Image::release) or drop. Results of a scan are attached
/// to the image and read with [`symbols`](Image::symbols).
pub struct Image<B: Backend> {
    backend: B,
    raw: Option<B::Image>,
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

#[cfg(feature = "native")]
impl Image<Zbar> {
    /// Create an image from grayscale data
    pub fn from_gray(data: &[u8], width: u32, height: u32) -> Result<Self> {
        Self::from_gray_with(Zbar, data.to_vec(), width, height)
    }

    /// Convert a decoded image to grayscale and wrap it
    pub fn from_dynamic(image: &::image::DynamicImage) -> Result<Self> {
        Self::from_dynamic_with(Zbar, image)
    }
}

impl<B: Backend> Image<B> {
    /// Wrap owned grayscale pixels using `backend`
    pub fn from_gray_with(backend: B, data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if (data.len() as u64) != (width as u64) * (height as u64) {
            return Err(Error::InvalidImage {
                width,
                height,
                len: data.len(),
            });
        }

        let format = ImageFormat::Y800;
        // The Vec's heap allocation does not move when the Vec itself does
        let raw = unsafe {
            backend.image_create(format.to_fourcc(), width, height, data.as_ptr(), data.len())
        };
        let Some(raw) = raw else {
            return Err(Error::Scan {
                code: ScanErrorCode::OutOfMemory.into(),
                message: "failed to allocate native image".to_string(),
            });
        };
        debug!(width, height, "created grayscale image");

        Ok(Image {
            backend,
            raw: Some(raw),
            data,
            width,
            height,
            format,
        })
    }

    pub fn from_buffer_with(backend: B, buffer: GrayBuffer) -> Result<Self> {
        Self::from_gray_with(backend, buffer.data, buffer.width, buffer.height)
    }

    pub fn from_dynamic_with(backend: B, image: &::image::DynamicImage) -> Result<Self> {
        Self::from_buffer_with(backend, convert::to_grayscale(image))
    }

    /// Get the image width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Get access to the raw image data (empty once released)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_released(&self) -> bool {
        self.raw.is_none()
    }

    /// Copy the symbols found by the last scan, in native list order.
    ///
    /// Empty if the image has not been scanned or nothing was found.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        let raw = self.raw.as_ref().ok_or(Error::ImageReleased)?;

        let mut symbols = Vec::new();
        let mut cursor = self.backend.first_symbol(raw);
        while let Some(sym) = cursor {
            // `raw` is borrowed for the whole walk, so the list stays valid
            unsafe {
                symbols.push(Symbol::new(
                    self.backend.symbol_type(sym),
                    self.backend.symbol_data(sym),
                ));
                cursor = self.backend.symbol_next(sym);
            }
        }
        Ok(symbols)
    }

    /// Decoded payloads of the last scan as strings
    pub fn decoded_strings(&self) -> Result<Vec<String>> {
        Ok(self.symbols()?.iter().map(Symbol::text).collect())
    }

    /// Free the native image and the pixel buffer. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.backend.image_destroy(raw);
            self.data = Vec::new();
            debug!(width = self.width, height = self.height, "released image");
        }
    }

    pub(crate) fn as_raw_mut(&mut self) -> Option<&mut B::Image> {
        self.raw.as_mut()
    }
}

impl<B: Backend> Drop for Image<B> {
    fn drop(&mut self) {
        self.release();
    }
}
