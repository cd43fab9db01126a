//! Decoded symbols
//!
//! Symbols are copied out of the native result list while the scanned image
//! is still alive, so nothing here points into native memory.

#[cfg(feature = "native")]
use std::ffi::CStr;
use std::fmt::Display;

/// Symbologies known to the native scanner (`zbar_symbol_type_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum SymbolType {
    /// Also used as "all symbologies" when configuring a scanner
    #[default]
    None = 0,
    Partial = 1,
    Ean2 = 2,
    Ean5 = 5,
    Ean8 = 8,
    Upce = 9,
    Isbn10 = 10,
    Upca = 12,
    Ean13 = 13,
    Isbn13 = 14,
    Composite = 15,
    I25 = 25,
    Databar = 34,
    DatabarExp = 35,
    Codabar = 38,
    Code39 = 39,
    Pdf417 = 57,
    QrCode = 64,
    SqCode = 80,
    Code93 = 93,
    Code128 = 128,
}

impl SymbolType {
    /// Every symbology that can be individually enabled
    pub const ALL: [Self; 18] = [
        SymbolType::Ean13,
        SymbolType::Ean2,
        SymbolType::Ean5,
        SymbolType::Ean8,
        SymbolType::Upca,
        SymbolType::Upce,
        SymbolType::Isbn10,
        SymbolType::Isbn13,
        SymbolType::I25,
        SymbolType::Databar,
        SymbolType::DatabarExp,
        SymbolType::Codabar,
        SymbolType::Code39,
        SymbolType::Code93,
        SymbolType::Code128,
        SymbolType::Pdf417,
        SymbolType::QrCode,
        SymbolType::SqCode,
    ];
}

impl Display for SymbolType {
    /// The library's own name for the symbology, e.g. `QR-Code`
    #[cfg(feature = "native")]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = unsafe { crate::ffi::zbar_get_symbol_name((*self).into()) };
        if name.is_null() {
            return write!(f, "{self:?}");
        }
        // Static strings owned by libzbar
        f.write_str(&unsafe { CStr::from_ptr(name) }.to_string_lossy())
    }

    #[cfg(not(feature = "native"))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<SymbolType> for i32 {
    fn from(value: SymbolType) -> Self {
        value as i32
    }
}

impl From<i32> for SymbolType {
    /// Unknown values, including add-on flag bits above 0xff, map to the base type
    fn from(value: i32) -> Self {
        match value & 0xff {
            0 => Self::None,
            1 => Self::Partial,
            2 => Self::Ean2,
            5 => Self::Ean5,
            8 => Self::Ean8,
            9 => Self::Upce,
            10 => Self::Isbn10,
            12 => Self::Upca,
            13 => Self::Ean13,
            14 => Self::Isbn13,
            15 => Self::Composite,
            25 => Self::I25,
            34 => Self::Databar,
            35 => Self::DatabarExp,
            38 => Self::Codabar,
            39 => Self::Code39,
            57 => Self::Pdf417,
            64 => Self::QrCode,
            80 => Self::SqCode,
            93 => Self::Code93,
            128 => Self::Code128,
            _ => Self::None,
        }
    }
}

/// A decoded barcode symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    symbol_type: SymbolType,
    data: Vec<u8>,
}

impl Symbol {
    pub(crate) fn new(symbol_type: SymbolType, data: Vec<u8>) -> Self {
        Symbol { symbol_type, data }
    }

    /// Get the symbol type
    pub fn symbol_type(&self) -> SymbolType {
        self.symbol_type
    }

    /// Get the decoded data as bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the decoded data as a string (if valid UTF-8)
    pub fn data_string(&self) -> Option<&str> {
        std::str::from_utf8(self.data()).ok()
    }

    /// Decoded data as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
