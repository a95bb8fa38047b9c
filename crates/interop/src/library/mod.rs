//! The checked, instance-based Z3 surface.
//!
//! [`Z3Library`] owns one loaded native library. Every method that takes a
//! context reads the context's error state right after the native call and
//! turns a non-OK code into [`Z3Error::Native`] before any result is handed
//! back, so a failed call never produces a usable value.
//!
//! # Safety
//!
//! Methods taking raw handles are `unsafe`. Every handle passed in must be
//! live and must have been produced by this same library instance. Handles
//! other than the context itself must also belong to the context passed
//! alongside them, since Z3 never checks that. The safe owners in
//! [`crate::context`] uphold this contract.

#![allow(clippy::missing_safety_doc)]

use std::ffi::c_uint;
use std::fmt;
use std::path::Path;

use crate::config::{self, LibrarySearch};
use crate::error::{ErrorCode, Z3Error};
use crate::guard;
use crate::handles::{NativeHandle, Z3Ast, Z3Context};
use crate::native::NativeLibrary;
use crate::strings;

mod context;
mod solver;
mod terms;

/// Z3 release triple plus revision, as reported by `Z3_get_version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// A loaded Z3 library with error-checked entry points.
///
/// Cleanup is explicit through [`Z3Library::dispose`] and automatic on drop.
/// Once disposed, every call returns [`Z3Error::Disposed`].
#[derive(Debug)]
pub struct Z3Library {
    native: NativeLibrary,
}

impl Z3Library {
    /// Load the library at an explicit path.
    ///
    /// The path must name an existing file. Loading fails as a whole if any
    /// required entry point is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Z3Error> {
        let path = path.as_ref();
        config::validate_explicit(path)?;
        Ok(Self::from_native(NativeLibrary::open(path)?))
    }

    /// Locate and load the library using the platform search order.
    pub fn load_auto() -> Result<Self, Z3Error> {
        Self::load_with(&LibrarySearch::platform_default())
    }

    /// Locate and load the library using a custom search.
    pub fn load_with(search: &LibrarySearch) -> Result<Self, Z3Error> {
        let searched = search.candidates();
        let mut attempts = Vec::new();

        for candidate in &searched {
            let bare = config::is_bare_name(candidate);
            if !bare && !candidate.is_file() {
                continue;
            }
            tracing::debug!("Trying Z3 library candidate {}", candidate.display());
            match NativeLibrary::open(candidate) {
                Ok(native) => return Ok(Self::from_native(native)),
                // A bare name the OS loader cannot resolve is an ordinary miss.
                Err(Z3Error::LoadFailed { .. }) if bare => {}
                Err(err) => attempts.push((candidate.clone(), err.to_string())),
            }
        }

        Err(Z3Error::AutoDetectFailed { searched, attempts })
    }

    fn from_native(native: NativeLibrary) -> Self {
        guard::prepare();
        Self { native }
    }

    /// Path the library was loaded from.
    pub fn library_path(&self) -> &Path {
        self.native.path()
    }

    /// Returns `true` once [`Self::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.native.is_closed()
    }

    /// Optional entry points this build does not export, sorted by name.
    ///
    /// Calling any of them reports [`Z3Error::FunctionUnavailable`]. Empty
    /// after disposal.
    pub fn unavailable_functions(&self) -> Vec<&'static str> {
        self.native.symbols().missing()
    }

    /// Unload the native library. Repeated calls are no-ops.
    ///
    /// Contexts created through this library must be deleted first.
    pub fn dispose(&mut self) -> Result<(), Z3Error> {
        self.native.close()
    }

    /// Version of the loaded build.
    pub fn version(&self) -> Result<Version, Z3Error> {
        let mut major: c_uint = 0;
        let mut minor: c_uint = 0;
        let mut build: c_uint = 0;
        let mut revision: c_uint = 0;
        // SAFETY: the four out-pointers are valid for the duration of the call.
        unsafe {
            self.native
                .get_version(&mut major, &mut minor, &mut build, &mut revision)?;
        }
        Ok(Version {
            major,
            minor,
            build,
            revision,
        })
    }

    /// Full version string, including any build suffix.
    pub fn full_version(&self) -> Result<String, Z3Error> {
        // SAFETY: no arguments; the returned string is static inside Z3.
        let text = unsafe { strings::from_native(self.native.get_full_version()?) };
        text.ok_or(Z3Error::NullHandle("get_full_version"))
    }

    /// Turn the context's current error state into a `Result`.
    pub unsafe fn check_error(&self, ctx: Z3Context) -> Result<(), Z3Error> {
        let raw = unsafe { self.native.get_error_code(ctx)? };
        let code = ErrorCode::from_raw(raw);
        if code.is_ok() {
            return Ok(());
        }
        let message = unsafe { strings::from_native(self.native.get_error_msg(ctx, raw)?) }
            .unwrap_or_else(|| "Unknown error".to_string());
        tracing::debug!("Z3 call failed on context {:p}: {code}: {message}", ctx.as_ptr());
        Err(Z3Error::Native { code, message })
    }

    /// Current native error code of the context, without translating it.
    pub unsafe fn error_code(&self, ctx: Z3Context) -> Result<ErrorCode, Z3Error> {
        Ok(ErrorCode::from_raw(unsafe { self.native.get_error_code(ctx)? }))
    }

    /// Run `call`, then check the context's error state.
    unsafe fn checked<T>(
        &self,
        ctx: Z3Context,
        call: impl FnOnce(&NativeLibrary) -> Result<T, Z3Error>,
    ) -> Result<T, Z3Error> {
        let value = call(&self.native)?;
        unsafe { self.check_error(ctx)? };
        Ok(value)
    }

    /// Like [`Self::checked`] for calls returning a handle, which must be
    /// non-null once the error check has passed.
    unsafe fn checked_handle<H: NativeHandle>(
        &self,
        ctx: Z3Context,
        function: &'static str,
        call: impl FnOnce(&NativeLibrary) -> Result<H, Z3Error>,
    ) -> Result<H, Z3Error> {
        let handle = unsafe { self.checked(ctx, call)? };
        non_null(handle, function)
    }

    /// Like [`Self::checked`] for calls returning a context-owned string,
    /// which is copied before the next native call can invalidate it.
    unsafe fn checked_string(
        &self,
        ctx: Z3Context,
        function: &'static str,
        call: impl FnOnce(&NativeLibrary) -> Result<*const std::ffi::c_char, Z3Error>,
    ) -> Result<String, Z3Error> {
        let ptr = unsafe { self.checked(ctx, call)? };
        unsafe { strings::from_native(ptr) }.ok_or(Z3Error::NullHandle(function))
    }
}

fn non_null<H: NativeHandle>(handle: H, function: &'static str) -> Result<H, Z3Error> {
    if handle.is_null() {
        Err(Z3Error::NullHandle(function))
    } else {
        Ok(handle)
    }
}

/// Length of an argument array as the native `unsigned` count.
fn arg_count(args: &[Z3Ast]) -> Result<c_uint, Z3Error> {
    c_uint::try_from(args.len()).map_err(|_| Z3Error::TooManyArguments(args.len()))
}
