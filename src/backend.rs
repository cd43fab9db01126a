//! The native call surface behind [`Scanner`](crate::Scanner) and [`Image`](crate::Image)
//!
//! [`Zbar`] talks to the system `libzbar`. Other implementations exist to
//! stand in for the library, for instance to force scan failures in tests.

use crate::config::Config;
use crate::symbol::SymbolType;

/// Native scanner, image and symbol-list operations
///
/// # Safety
///
/// Implementations must guarantee that a symbol handle returned by
/// [`first_symbol`](Backend::first_symbol) or
/// [`symbol_next`](Backend::symbol_next) stays valid for as long as the image
/// it came from is neither destroyed nor scanned again, and that the data
/// pointer handed to [`image_create`](Backend::image_create) is only read
/// while that image exists.
pub unsafe trait Backend: Clone {
    type Scanner;
    type Image;
    type Symbol: Copy;

    /// Allocate a scanner. `None` means the allocation itself failed.
    fn scanner_create(&self) -> Option<Self::Scanner>;

    fn scanner_destroy(&self, scanner: Self::Scanner);

    /// 0 on success, non-zero on failure
    fn scanner_set_config(
        &self,
        scanner: &mut Self::Scanner,
        symbology: SymbolType,
        config: Config,
        value: i32,
    ) -> i32;

    /// >0 symbols decoded, 0 nothing found, <0 failure
    fn scan_image(&self, scanner: &mut Self::Scanner, image: &mut Self::Image) -> i32;

    /// Last error code recorded on `scanner`
    fn error_code(&self, scanner: &Self::Scanner) -> i32;

    /// Last error message recorded on `scanner`
    fn error_string(&self, scanner: &Self::Scanner, verbosity: i32) -> String;

    /// Wrap `len` bytes at `data` as a `width` x `height` image in `format`.
    ///
    /// # Safety
    ///
    /// `data` must point to `len` readable bytes that outlive the image.
    unsafe fn image_create(
        &self,
        format: u32,
        width: u32,
        height: u32,
        data: *const u8,
        len: usize,
    ) -> Option<Self::Image>;

    fn image_destroy(&self, image: Self::Image);

    /// Head of the result list attached to `image` by the last scan
    fn first_symbol(&self, image: &Self::Image) -> Option<Self::Symbol>;

    /// # Safety
    ///
    /// `symbol` must come from an image that is still alive.
    unsafe fn symbol_next(&self, symbol: Self::Symbol) -> Option<Self::Symbol>;

    /// # Safety
    ///
    /// `symbol` must come from an image that is still alive.
    unsafe fn symbol_type(&self, symbol: Self::Symbol) -> SymbolType;

    /// Copy the payload of `symbol` into host memory.
    ///
    /// # Safety
    ///
    /// `symbol` must come from an image that is still alive.
    unsafe fn symbol_data(&self, symbol: Self::Symbol) -> Vec<u8>;
}

#[cfg(feature = "native")]
pub use native::Zbar;

#[cfg(feature = "native")]
mod native {
    use std::ffi::CStr;
    use std::ptr::{self, NonNull};

    use libc::{c_ulong, c_void};

    use super::Backend;
    use crate::config::Config;
    use crate::ffi;
    use crate::symbol::SymbolType;

    /// The system ZBar library
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Zbar;

    unsafe impl Backend for Zbar {
        type Scanner = NonNull<ffi::zbar_image_scanner_t>;
        type Image = NonNull<ffi::zbar_image_t>;
        type Symbol = NonNull<ffi::zbar_symbol_t>;

        fn scanner_create(&self) -> Option<Self::Scanner> {
            NonNull::new(unsafe { ffi::zbar_image_scanner_create() })
        }

        fn scanner_destroy(&self, scanner: Self::Scanner) {
            unsafe { ffi::zbar_image_scanner_destroy(scanner.as_ptr()) }
        }

        fn scanner_set_config(
            &self,
            scanner: &mut Self::Scanner,
            symbology: SymbolType,
            config: Config,
            value: i32,
        ) -> i32 {
            unsafe {
                ffi::zbar_image_scanner_set_config(
                    scanner.as_ptr(),
                    symbology.into(),
                    config.into(),
                    value,
                )
            }
        }

        fn scan_image(&self, scanner: &mut Self::Scanner, image: &mut Self::Image) -> i32 {
            unsafe { ffi::zbar_scan_image(scanner.as_ptr(), image.as_ptr()) }
        }

        fn error_code(&self, scanner: &Self::Scanner) -> i32 {
            unsafe { ffi::_zbar_get_error_code(scanner.as_ptr() as *const c_void) }
        }

        fn error_string(&self, scanner: &Self::Scanner, verbosity: i32) -> String {
            let object = scanner.as_ptr() as *const c_void;
            let msg = unsafe { ffi::_zbar_error_string(object, verbosity) };
            if msg.is_null() {
                return String::new();
            }
            unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
        }

        unsafe fn image_create(
            &self,
            format: u32,
            width: u32,
            height: u32,
            data: *const u8,
            len: usize,
        ) -> Option<Self::Image> {
            let image = NonNull::new(ffi::zbar_image_create())?;
            ffi::zbar_image_set_format(image.as_ptr(), format as c_ulong);
            ffi::zbar_image_set_size(image.as_ptr(), width, height);
            // No cleanup handler: the buffer stays owned by the caller
            ffi::zbar_image_set_data(image.as_ptr(), data as *const c_void, len as c_ulong, None);
            Some(image)
        }

        fn image_destroy(&self, image: Self::Image) {
            unsafe {
                // Detach the borrowed buffer before the image goes away
                ffi::zbar_image_set_data(image.as_ptr(), ptr::null(), 0, None);
                ffi::zbar_image_destroy(image.as_ptr());
            }
        }

        fn first_symbol(&self, image: &Self::Image) -> Option<Self::Symbol> {
            NonNull::new(unsafe { ffi::zbar_image_first_symbol(image.as_ptr()) } as *mut _)
        }

        unsafe fn symbol_next(&self, symbol: Self::Symbol) -> Option<Self::Symbol> {
            NonNull::new(ffi::zbar_symbol_next(symbol.as_ptr()) as *mut _)
        }

        unsafe fn symbol_type(&self, symbol: Self::Symbol) -> SymbolType {
            SymbolType::from(ffi::zbar_symbol_get_type(symbol.as_ptr()))
        }

        unsafe fn symbol_data(&self, symbol: Self::Symbol) -> Vec<u8> {
            let data = ffi::zbar_symbol_get_data(symbol.as_ptr());
            let len = ffi::zbar_symbol_get_data_length(symbol.as_ptr()) as usize;
            if data.is_null() || len == 0 {
                return Vec::new();
            }
            std::slice::from_raw_parts(data as *const u8, len).to_vec()
        }
    }
}
