//! FFI bindings to the C ZBar library
//!
//! Only the parts of `zbar.h` this crate calls are declared. All structures
//! are opaque; every access goes through the C API.

use libc::{c_char, c_int, c_uint, c_ulong, c_void};

#[repr(C)]
#[allow(non_camel_case_types)]
pub struct zbar_image_scanner_t {
    _private: [u8; 0],
}

#[repr(C)]
#[allow(non_camel_case_types)]
pub struct zbar_image_t {
    _private: [u8; 0],
}

#[repr(C)]
#[allow(non_camel_case_types)]
pub struct zbar_symbol_t {
    _private: [u8; 0],
}

/// Cleanup callback invoked by `zbar_image_destroy` for the image data
#[allow(non_camel_case_types)]
pub type zbar_image_cleanup_handler_t = Option<unsafe extern "C" fn(image: *mut zbar_image_t)>;

extern "C" {
    // Image scanner
    pub fn zbar_image_scanner_create() -> *mut zbar_image_scanner_t;
    pub fn zbar_image_scanner_destroy(scanner: *mut zbar_image_scanner_t);
    pub fn zbar_image_scanner_set_config(
        scanner: *mut zbar_image_scanner_t,
        symbology: c_int,
        config: c_int,
        value: c_int,
    ) -> c_int;
    pub fn zbar_scan_image(scanner: *mut zbar_image_scanner_t, image: *mut zbar_image_t) -> c_int;

    // Image
    pub fn zbar_image_create() -> *mut zbar_image_t;
    pub fn zbar_image_destroy(image: *mut zbar_image_t);
    pub fn zbar_image_set_format(image: *mut zbar_image_t, format: c_ulong);
    pub fn zbar_image_set_size(image: *mut zbar_image_t, width: c_uint, height: c_uint);
    pub fn zbar_image_set_data(
        image: *mut zbar_image_t,
        data: *const c_void,
        data_byte_length: c_ulong,
        cleanup_hndlr: zbar_image_cleanup_handler_t,
    );
    pub fn zbar_image_first_symbol(image: *const zbar_image_t) -> *const zbar_symbol_t;

    // Symbol list
    pub fn zbar_symbol_next(symbol: *const zbar_symbol_t) -> *const zbar_symbol_t;
    pub fn zbar_symbol_get_type(symbol: *const zbar_symbol_t) -> c_int;
    pub fn zbar_symbol_get_data(symbol: *const zbar_symbol_t) -> *const c_char;
    pub fn zbar_symbol_get_data_length(symbol: *const zbar_symbol_t) -> c_uint;

    // Error reporting. The object is any zbar object carrying error info.
    pub fn _zbar_get_error_code(object: *const c_void) -> c_int;
    pub fn _zbar_error_string(object: *const c_void, verbosity: c_int) -> *const c_char;

    pub fn zbar_set_verbosity(verbosity: c_int);
    pub fn zbar_get_symbol_name(sym: c_int) -> *const c_char;
}
