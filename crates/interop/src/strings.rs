//! Text crossing the native boundary.
//!
//! Outbound strings live in a [`NativeString`] for exactly the duration of one
//! call and are freed when it drops, whichever way the call exits. Inbound
//! pointers stay owned by Z3 and are only copied.

use std::ffi::{CStr, CString, c_char};

use crate::error::Z3Error;

/// A NUL-terminated copy of Rust text for passing into Z3.
#[derive(Debug)]
pub struct NativeString {
    buffer: CString,
}

impl NativeString {
    /// Copy `text` into a native buffer.
    ///
    /// Fails with [`Z3Error::InvalidString`] if `text` contains a NUL byte,
    /// which the C side would silently truncate at.
    pub fn new(text: &str) -> Result<Self, Z3Error> {
        let buffer = CString::new(text).map_err(|_| Z3Error::InvalidString)?;
        Ok(Self { buffer })
    }

    /// Pointer valid for as long as `self` is alive.
    pub fn as_ptr(&self) -> *const c_char {
        self.buffer.as_ptr()
    }
}

/// Copy a Z3-owned C string into Rust.
///
/// Returns `None` for a null pointer. Bytes that are not valid UTF-8 are
/// replaced rather than rejected, since Z3 emits text in the C locale.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// until this function returns.
pub unsafe fn from_native(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let text = unsafe { CStr::from_ptr(ptr) };
    Some(text.to_string_lossy().into_owned())
}
