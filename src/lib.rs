//! QR code and barcode reading on top of the native ZBar library
//!
//! Images are decoded with the `image` crate, converted to 8-bit grayscale
//! and handed to `libzbar`, which does all of the symbol detection and
//! decoding. The decoded symbols are copied back into Rust-owned values.
//!
//! ```no_run
//! let payloads = zbarqr::from_file("ticket.png")?;
//! for payload in payloads {
//!     println!("{payload}");
//! }
//! # Ok::<(), zbarqr::Error>(())
//! ```
//!
//! Handles ([`Scanner`], [`Image`]) free their native resources in
//! `close`/`release` and, as a fallback, on drop. They hold raw native
//! pointers and are therefore neither `Send` nor `Sync`.

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod image;
pub mod loader;
pub mod scanner;
pub mod symbol;

#[cfg(feature = "native")]
mod ffi;

// Re-export main types
pub use backend::Backend;
pub use config::{Config, ScannerConfig};
pub use convert::{to_grayscale, GrayBuffer};
pub use error::{Error, Result, ScanErrorCode};
pub use crate::image::{Image, ImageFormat};
pub use loader::Reader;
pub use scanner::Scanner;
pub use symbol::{Symbol, SymbolType};

#[cfg(feature = "native")]
pub use backend::Zbar;
#[cfg(feature = "native")]
pub use config::set_verbosity;

/// Read every symbol in the PNG or JPEG file at `path`
///
/// All symbologies are enabled. Fails with [`Error::Io`] if the file cannot
/// be read, [`Error::Decode`] if it is not a supported image and
/// [`Error::Scan`] if the native scanner reports a failure. An image without
/// symbols gives an empty list.
#[cfg(feature = "native")]
pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Vec<String>> {
    Reader::new().read_file(path)
}

/// Read every symbol in an already decoded image
#[cfg(feature = "native")]
pub fn from_image(image: &::image::DynamicImage) -> Result<Vec<String>> {
    Reader::new().read_image(image)
}
