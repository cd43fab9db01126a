//! Error types and handling

use std::io;

use thiserror::Error;

/// Error codes reported by the native library (`zbar_error_t`)
///
/// Descriptions come with the code in [`Error::Scan`], as formatted by the
/// library itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorCode {
    Ok,
    OutOfMemory,
    Internal,
    Unsupported,
    Invalid,
    System,
    Locking,
    Busy,
    XDisplay,
    XProto,
    Closed,
    WinApi,
    Unknown(i32),
}

impl From<i32> for ScanErrorCode {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::OutOfMemory,
            2 => Self::Internal,
            3 => Self::Unsupported,
            4 => Self::Invalid,
            5 => Self::System,
            6 => Self::Locking,
            7 => Self::Busy,
            8 => Self::XDisplay,
            9 => Self::XProto,
            10 => Self::Closed,
            11 => Self::WinApi,
            other => Self::Unknown(other),
        }
    }
}

impl From<ScanErrorCode> for i32 {
    fn from(code: ScanErrorCode) -> Self {
        match code {
            ScanErrorCode::Ok => 0,
            ScanErrorCode::OutOfMemory => 1,
            ScanErrorCode::Internal => 2,
            ScanErrorCode::Unsupported => 3,
            ScanErrorCode::Invalid => 4,
            ScanErrorCode::System => 5,
            ScanErrorCode::Locking => 6,
            ScanErrorCode::Busy => 7,
            ScanErrorCode::XDisplay => 8,
            ScanErrorCode::XProto => 9,
            ScanErrorCode::Closed => 10,
            ScanErrorCode::WinApi => 11,
            ScanErrorCode::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The image file could not be opened or read.
    #[error("failed to read image: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not a PNG or JPEG image, or are corrupt.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The native scanner returned a negative status.
    ///
    /// `code` and `message` are read from the native error accessors right
    /// after the failing call.
    #[error("{code}: {message}")]
    Scan { code: i32, message: String },

    /// Grayscale data does not hold exactly `width * height` bytes.
    #[error("grayscale buffer holds {len} bytes, expected {width}x{height}")]
    InvalidImage { width: u32, height: u32, len: usize },

    #[error("scanner is closed")]
    ScannerClosed,

    #[error("image has been released")]
    ImageReleased,
}

impl Error {
    /// Native error code, if this is a scan failure
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Scan { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Native error code decoded into [`ScanErrorCode`]
    pub fn scan_error_code(&self) -> Option<ScanErrorCode> {
        self.code().map(ScanErrorCode::from)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
