//! Scanner configuration
//!
//! [`Config`] names the native configuration options. [`ScannerConfig`]
//! collects `(symbology, option, value)` settings and applies them to a
//! [`Scanner`] in order.
//!
//! ```no_run
//! use zbarqr::config::{Config, ScannerConfig};
//! use zbarqr::{Scanner, SymbolType};
//!
//! let config = ScannerConfig::new()
//!     .disable(SymbolType::None)
//!     .enable(SymbolType::QrCode)
//!     .set(SymbolType::QrCode, Config::Binary, 1)
//!     .scan_density(2, 2);
//!
//! let mut scanner = Scanner::new();
//! config.apply(&mut scanner);
//! ```

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::scanner::Scanner;
use crate::symbol::SymbolType;

/// Configuration options understood by the native scanner (`zbar_config_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Config {
    /// Enable symbology/feature
    Enable = 0,
    /// Enable check digit when optional
    AddCheck = 1,
    /// Return check digit when present
    EmitCheck = 2,
    /// Enable full ASCII character set
    Ascii = 3,
    /// Don't convert binary data to text
    Binary = 4,
    /// Minimum data length for valid decode
    MinLength = 0x20,
    /// Maximum data length for valid decode
    MaxLength = 0x21,
    /// Required video consistency frames
    Uncertainty = 0x40,
    /// Enable scanner to collect position data
    Position = 0x80,
    /// Test inverted image if no symbols were found
    TestInverted = 0x81,
    /// Image scanner vertical scan density
    XDensity = 0x100,
    /// Image scanner horizontal scan density
    YDensity = 0x101,
}

impl From<Config> for i32 {
    fn from(value: Config) -> Self {
        value as i32
    }
}

/// One `(symbology, option, value)` triple
pub type Setting = (SymbolType, Config, i32);

/// Ordered list of scanner settings
///
/// [`ScannerConfig::default()`] enables every symbology, which is what
/// [`from_file`](crate::from_file) and [`from_image`](crate::from_image) use.
/// [`ScannerConfig::new()`] starts empty and leaves the native defaults alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    settings: Vec<Setting>,
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self {
            settings: Vec::new(),
        }
    }

    /// Enable a symbology. [`SymbolType::None`] addresses all of them.
    pub fn enable(self, symbology: SymbolType) -> Self {
        self.set(symbology, Config::Enable, 1)
    }

    /// Disable a symbology. [`SymbolType::None`] addresses all of them.
    pub fn disable(self, symbology: SymbolType) -> Self {
        self.set(symbology, Config::Enable, 0)
    }

    /// Append a raw setting
    pub fn set(mut self, symbology: SymbolType, config: Config, value: i32) -> Self {
        self.settings.push((symbology, config, value));
        self
    }

    /// Scan every `x`th column and every `y`th row; 0 disables that direction
    pub fn scan_density(self, x: u32, y: u32) -> Self {
        self.set(SymbolType::None, Config::XDensity, density(x))
            .set(SymbolType::None, Config::YDensity, density(y))
    }

    pub fn position_tracking(self, enabled: bool) -> Self {
        self.set(SymbolType::None, Config::Position, enabled as i32)
    }

    pub fn test_inverted(self, enabled: bool) -> Self {
        self.set(SymbolType::None, Config::TestInverted, enabled as i32)
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Forward every setting to `scanner`, in order.
    ///
    /// Returns the number of settings the native library rejected. Rejections
    /// are logged and otherwise ignored.
    pub fn apply<B: Backend>(&self, scanner: &mut Scanner<B>) -> usize {
        let mut rejected = 0;
        for &(symbology, config, value) in &self.settings {
            let status = scanner.set_config(symbology, config, value);
            if status != 0 {
                warn!(%symbology, ?config, value, status, "scanner rejected config");
                rejected += 1;
            }
        }
        debug!(settings = self.settings.len(), rejected, "applied scanner config");
        rejected
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::new().enable(SymbolType::None)
    }
}

fn density(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Set the native library's global debug verbosity (0 is silent)
#[cfg(feature = "native")]
pub fn set_verbosity(level: i32) {
    unsafe { crate::ffi::zbar_set_verbosity(level) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    #[test]
    fn default_enables_everything() {
        assert_eq!(
            ScannerConfig::default().settings(),
            &[(SymbolType::None, Config::Enable, 1)]
        );
        assert!(ScannerConfig::new().settings().is_empty());
    }

    #[test]
    fn builder_keeps_order() {
        let config = ScannerConfig::new()
            .disable(SymbolType::None)
            .enable(SymbolType::QrCode)
            .set(SymbolType::QrCode, Config::Binary, 1)
            .position_tracking(false)
            .test_inverted(true)
            .scan_density(2, 3);

        assert_eq!(
            config.settings(),
            &[
                (SymbolType::None, Config::Enable, 0),
                (SymbolType::QrCode, Config::Enable, 1),
                (SymbolType::QrCode, Config::Binary, 1),
                (SymbolType::None, Config::Position, 0),
                (SymbolType::None, Config::TestInverted, 1),
                (SymbolType::None, Config::XDensity, 2),
                (SymbolType::None, Config::YDensity, 3),
            ]
        );
    }

    #[test]
    fn apply_forwards_settings_and_counts_rejections() {
        let backend = MockBackend::default();
        let mut scanner = Scanner::with_backend(backend.clone());

        let config = ScannerConfig::default()
            .set(SymbolType::None, Config::XDensity, -1)
            .set(SymbolType::Code39, Config::MinLength, 4);
        assert_eq!(config.apply(&mut scanner), 1);

        let state = backend.state.borrow();
        assert_eq!(state.config_calls, config.settings());
    }

    #[test]
    fn native_option_values() {
        assert_eq!(i32::from(Config::Enable), 0);
        assert_eq!(i32::from(Config::MaxLength), 0x21);
        assert_eq!(i32::from(Config::TestInverted), 0x81);
        assert_eq!(i32::from(Config::YDensity), 0x101);
    }
}
