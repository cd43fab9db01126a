//! Reading symbols out of image files and decoded images

use std::fs;
use std::io::Cursor;
use std::path::Path;

use ::image::{DynamicImage, ImageError, ImageReader};
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::config::ScannerConfig;
use crate::image::Image;
use crate::scanner::Scanner;
use crate::symbol::Symbol;
use crate::{Error, Result};

#[cfg(feature = "native")]
use crate::backend::Zbar;

/// Loads images, converts them to grayscale and scans them
///
/// Every read uses a fresh scanner configured with [`ScannerConfig`], and
/// frees the scanner and the image before returning, whatever the outcome.
#[derive(Debug, Clone)]
pub struct Reader<B: Backend> {
    backend: B,
    config: ScannerConfig,
}

#[cfg(feature = "native")]
impl Reader<Zbar> {
    /// Reader using the system ZBar library with every symbology enabled
    pub fn new() -> Self {
        Self::with_backend(Zbar)
    }
}

#[cfg(feature = "native")]
impl Default for Reader<Zbar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Reader<B> {
    pub fn with_backend(backend: B) -> Self {
        Reader {
            backend,
            config: ScannerConfig::default(),
        }
    }

    /// Replace the scanner configuration
    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode the PNG or JPEG at `path` and return the decoded payloads
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        Ok(to_strings(self.read_file_symbols(path)?))
    }

    /// Scan an already decoded image and return the decoded payloads
    pub fn read_image(&self, image: &DynamicImage) -> Result<Vec<String>> {
        Ok(to_strings(self.read_image_symbols(image)?))
    }

    pub fn read_file_symbols(&self, path: impl AsRef<Path>) -> Result<Vec<Symbol>> {
        let image = open_image(path.as_ref())?;
        self.read_image_symbols(&image)
    }

    pub fn read_image_symbols(&self, image: &DynamicImage) -> Result<Vec<Symbol>> {
        let mut scanner = Scanner::with_backend(self.backend.clone());
        self.config.apply(&mut scanner);

        let mut gray = Image::from_dynamic_with(self.backend.clone(), image)?;
        // Symbols are copied out before the image is released
        let symbols = scanner.scan_symbols(&mut gray);
        gray.release();
        scanner.close();

        let symbols = symbols?;
        debug!(count = symbols.len(), "read symbols");
        Ok(symbols)
    }
}

fn to_strings(symbols: Vec<Symbol>) -> Vec<String> {
    symbols.iter().map(Symbol::text).collect()
}

/// Open and decode a PNG or JPEG file
///
/// Only reading the file can fail with [`Error::Io`]. Anything that goes
/// wrong once the bytes are in memory, a cut-off body included, is
/// [`Error::Decode`].
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let bytes = fs::read(path).map_err(|err| {
        warn!(path = %path.display(), error = %err, "open file error");
        Error::Io(err)
    })?;

    decode_bytes(&bytes).map_err(|err| {
        warn!(path = %path.display(), error = %err, "decode file error");
        Error::Decode(err)
    })
}

fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::config::Config;
    use crate::SymbolType;
    use ::image::{ImageFormat, Rgb, RgbImage};
    use std::io::Write;

    fn solid() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 30, 90])))
    }

    #[test]
    fn solid_image_yields_nothing() {
        let backend = MockBackend::default();
        let reader = Reader::with_backend(backend.clone());
        assert!(reader.read_image(&solid()).unwrap().is_empty());

        let state = backend.state.borrow();
        assert_eq!(state.last_pixels.len(), 64);
        assert_eq!(state.images_destroyed, 1);
        assert_eq!(state.scanners_destroyed, 1);
    }

    #[test]
    fn default_config_enables_all_symbologies() {
        let backend = MockBackend::default();
        Reader::with_backend(backend.clone())
            .read_image(&solid())
            .unwrap();
        assert_eq!(
            backend.state.borrow().config_calls,
            [(SymbolType::None, Config::Enable, 1)]
        );
    }

    #[test]
    fn custom_config_is_applied() {
        let backend = MockBackend::default();
        let config = ScannerConfig::new()
            .disable(SymbolType::None)
            .enable(SymbolType::QrCode);
        Reader::with_backend(backend.clone())
            .config(config.clone())
            .read_image(&solid())
            .unwrap();
        assert_eq!(backend.state.borrow().config_calls, config.settings());
    }

    #[test]
    fn returns_payloads_in_order() {
        let backend = MockBackend::with_symbols(&[
            (SymbolType::QrCode, "https://example.com"),
            (SymbolType::Code128, "ABC-123"),
        ]);
        let reader = Reader::with_backend(backend);
        assert_eq!(
            reader.read_image(&solid()).unwrap(),
            ["https://example.com", "ABC-123"]
        );
    }

    #[test]
    fn scan_failure_releases_everything() {
        let backend = MockBackend::failing(3, "unsupported image format");
        let err = Reader::with_backend(backend.clone())
            .read_image(&solid())
            .unwrap_err();
        assert_eq!(err.code(), Some(3));
        assert_eq!(err.to_string(), "3: unsupported image format");

        let state = backend.state.borrow();
        assert_eq!(state.images_destroyed, 1);
        assert_eq!(state.scanners_destroyed, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MockBackend::default();
        let err = Reader::with_backend(backend.clone())
            .read_file(dir.path().join("missing.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
        assert_eq!(backend.state.borrow().scanners_created, 0);
    }

    #[test]
    fn garbage_is_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"definitely not an image, just some text")
            .unwrap();
        let err = Reader::with_backend(MockBackend::default())
            .read_file(file.path())
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err:?}");
    }

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        }));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn truncated_png_is_decode_error() {
        let bytes = encoded(ImageFormat::Png);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.png");
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let backend = MockBackend::default();
        let err = Reader::with_backend(backend.clone())
            .read_file(&path)
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err:?}");
        assert_eq!(backend.state.borrow().scanners_created, 0);
    }

    #[test]
    fn truncated_jpeg_is_decode_error() {
        let bytes = encoded(ImageFormat::Jpeg);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.jpg");
        std::fs::write(&path, &bytes[..20]).unwrap();

        let err = Reader::with_backend(MockBackend::default())
            .read_file(&path)
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err:?}");
    }

    #[test]
    fn directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Reader::with_backend(MockBackend::default())
            .read_file(dir.path())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }

    #[test]
    fn unsupported_format_is_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();
        let err = Reader::with_backend(MockBackend::default())
            .read_file(file.path())
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err:?}");
    }

    #[test]
    fn png_file_is_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.png");
        solid().save(&path).unwrap();

        let backend = MockBackend::default();
        let result = Reader::with_backend(backend.clone()).read_file(&path).unwrap();
        assert!(result.is_empty());

        let expected = crate::convert::luminance(200, 30, 90);
        let state = backend.state.borrow();
        assert!(state.last_pixels.iter().all(|&p| p == expected));
    }
}
