//! Image scanner for finding barcodes in 2D images

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::config::Config;
use crate::image::Image;
use crate::symbol::{Symbol, SymbolType};
use crate::{Error, Result};

#[cfg(feature = "native")]
use crate::backend::Zbar;

/// Verbosity passed to the native error formatter
const ERROR_VERBOSITY: i32 = 1;

/// Image scanner that can find barcodes in 2D images
///
/// The native scanner is freed by [`close`](Scanner::close) or, failing that,
/// when the value is dropped. A scanner handles one scan at a time.
///
/// # Example
/// ```no_run
/// use zbarqr::config::Config;
/// use zbarqr::{Image, Scanner, SymbolType};
///
/// let mut scanner = Scanner::new();
/// scanner.set_config(SymbolType::QrCode, Config::Enable, 1);
///
/// let data = vec![0u8; 640 * 480];
/// let mut image = Image::from_gray(&data, 640, 480).unwrap();
/// let num_symbols = scanner.scan(&mut image).unwrap();
/// scanner.close();
/// ```
pub struct Scanner<B: Backend> {
    backend: B,
    raw: Option<B::Scanner>,
}

#[cfg(feature = "native")]
impl Scanner<Zbar> {
    /// Create a scanner backed by the system ZBar library
    ///
    /// # Panics
    ///
    /// If the native library cannot allocate a scanner.
    pub fn new() -> Self {
        Self::with_backend(Zbar)
    }
}

#[cfg(feature = "native")]
impl Default for Scanner<Zbar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Scanner<B> {
    /// # Panics
    ///
    /// If `backend` cannot allocate a scanner.
    pub fn with_backend(backend: B) -> Self {
        let Some(raw) = backend.scanner_create() else {
            panic!("native image scanner allocation failed");
        };
        debug!("created image scanner");
        Scanner {
            backend,
            raw: Some(raw),
        }
    }

    /// Set a configuration option for `symbology`
    ///
    /// [`SymbolType::None`] applies the option to every symbology. Returns the
    /// native status: 0 on success, non-zero on failure (including on a closed
    /// scanner).
    pub fn set_config(&mut self, symbology: SymbolType, config: Config, value: i32) -> i32 {
        match self.raw.as_mut() {
            Some(raw) => self
                .backend
                .scanner_set_config(raw, symbology, config, value),
            None => 1,
        }
    }

    /// Scan an image for barcodes
    ///
    /// Returns the number of symbols found; zero is not an error. Results are
    /// attached to `image` and read with [`Image::symbols`].
    pub fn scan(&mut self, image: &mut Image<B>) -> Result<usize> {
        let raw = self.raw.as_mut().ok_or(Error::ScannerClosed)?;
        let img = image.as_raw_mut().ok_or(Error::ImageReleased)?;

        let rc = self.backend.scan_image(raw, img);
        if rc < 0 {
            // Error state is shared and mutable, read it before anything else runs
            let code = self.backend.error_code(raw);
            let message = self.backend.error_string(raw, ERROR_VERBOSITY);
            warn!(rc, code, %message, "scan failed");
            return Err(Error::Scan { code, message });
        }

        debug!(symbols = rc, "scan complete");
        Ok(rc as usize)
    }

    /// Scan `image` and copy out every decoded symbol in native order
    pub fn scan_symbols(&mut self, image: &mut Image<B>) -> Result<Vec<Symbol>> {
        self.scan(image)?;
        image.symbols()
    }

    pub fn is_closed(&self) -> bool {
        self.raw.is_none()
    }

    /// Free the native scanner. Later calls do nothing.
    pub fn close(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.backend.scanner_destroy(raw);
            debug!("closed image scanner");
        }
    }
}

impl<B: Backend> Drop for Scanner<B> {
    fn drop(&mut self) {
        self.close();
    }
}
