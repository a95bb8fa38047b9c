//! Dynamic symbol table and typed invocation shims.
//!
//! [`NativeLibrary`] opens the shared library, resolves every entry point this
//! crate binds in one eager pass, and turns cached addresses back into typed
//! `extern "C"` function pointers on each call. Nothing here checks native
//! error codes; that is [`crate::library::Z3Library`]'s job.

use std::collections::HashMap;
use std::ffi::c_void;
use std::mem;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libloading::Library;

use crate::error::Z3Error;

/// Declares one functional group of entry points.
///
/// Produces a [`SymbolGroup`] constant listing the symbols (so resolution and
/// binding can never drift apart) plus one `unsafe` shim method on
/// [`NativeLibrary`] per symbol. Symbols under `required` must resolve for the
/// library to load at all; those under `optional` may be absent, in which case
/// the shim returns [`Z3Error::FunctionUnavailable`].
macro_rules! native_group {
    (@call $(#[$meta:meta])* $method:ident $symbol:literal ($($arg:ident: $ty:ty),*) $(-> $ret:ty)?) => {
        $(#[$meta])*
        pub(crate) unsafe fn $method(&self, $($arg: $ty),*) -> Result<native_group!(@ret $($ret)?), Z3Error> {
            // SAFETY: the pointer type spells out the C prototype of `$symbol`.
            let func = unsafe { self.function::<unsafe extern "C" fn($($ty),*) $(-> $ret)?>($symbol)? };
            // SAFETY: argument validity is the caller's contract.
            Ok(unsafe { func($($arg),*) })
        }
    };
    (@ret) => { () };
    (@ret $ret:ty) => { $ret };
    (
        $(#[$group_meta:meta])*
        $group:ident = $group_name:literal;
        required {
            $( $(#[$req_meta:meta])* fn $req_fn:ident = $req_sym:literal ($($req_arg:ident: $req_ty:ty),* $(,)?) $(-> $req_ret:ty)?; )*
        }
        optional {
            $( $(#[$opt_meta:meta])* fn $opt_fn:ident = $opt_sym:literal ($($opt_arg:ident: $opt_ty:ty),* $(,)?) $(-> $opt_ret:ty)?; )*
        }
    ) => {
        $(#[$group_meta])*
        pub(crate) const $group: $crate::native::SymbolGroup = $crate::native::SymbolGroup {
            name: $group_name,
            required: &[$($req_sym),*],
            optional: &[$($opt_sym),*],
        };

        impl $crate::native::NativeLibrary {
            $( native_group!(@call $(#[$req_meta])* $req_fn $req_sym ($($req_arg: $req_ty),*) $(-> $req_ret)?); )*
            $( native_group!(@call $(#[$opt_meta])* $opt_fn $opt_sym ($($opt_arg: $opt_ty),*) $(-> $opt_ret)?); )*
        }
    };
}

mod context;
mod solver;
mod terms;

pub use context::ErrorHandler;

/// Every group this crate binds, in resolution order.
pub(crate) const ALL_GROUPS: &[SymbolGroup] = &[
    context::CONTEXT,
    context::ERROR_HANDLING,
    context::MISCELLANEOUS,
    terms::SYMBOLS,
    terms::SORTS,
    terms::EXPRESSIONS,
    solver::SOLVER,
    solver::MODEL,
    solver::PARAMETERS,
];

/// A named set of entry points resolved together.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SymbolGroup {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

/// Resolved entry point addresses, keyed by symbol name.
///
/// `None` marks an optional symbol the loaded build does not export. Filled
/// once while loading and never mutated afterwards.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    pointers: HashMap<&'static str, Option<NonNull<c_void>>>,
}

// SAFETY: the table only stores code addresses inside a loaded image and is
// read-only after construction.
unsafe impl Send for SymbolTable {}
unsafe impl Sync for SymbolTable {}

impl SymbolTable {
    /// Resolve every symbol of `groups` against `library`.
    ///
    /// Fails on the first missing required symbol.
    pub(crate) fn resolve(
        library: &Library,
        path: &Path,
        groups: &[SymbolGroup],
    ) -> Result<Self, Z3Error> {
        let mut pointers = HashMap::new();
        for group in groups {
            for &name in group.required {
                let ptr = resolve_symbol(library, name).ok_or_else(|| {
                    Z3Error::IncompatibleLibrary {
                        path: path.to_path_buf(),
                        symbol: name.to_string(),
                    }
                })?;
                pointers.insert(name, Some(ptr));
            }

            let mut missing = Vec::new();
            for &name in group.optional {
                let ptr = resolve_symbol(library, name);
                if ptr.is_none() {
                    missing.push(name);
                }
                pointers.insert(name, ptr);
            }
            if !missing.is_empty() {
                tracing::debug!(
                    "Z3 group {}: optional functions unavailable: {}",
                    group.name,
                    missing.join(", ")
                );
            }
        }
        Ok(Self { pointers })
    }

    /// Address of `name`, or the error explaining why there is none.
    pub(crate) fn lookup(&self, name: &str, path: &Path) -> Result<NonNull<c_void>, Z3Error> {
        match self.pointers.get(name) {
            Some(Some(ptr)) => Ok(*ptr),
            _ => Err(Z3Error::FunctionUnavailable {
                function: name.to_string(),
                path: path.to_path_buf(),
            }),
        }
    }

    /// Number of symbols that resolved.
    pub(crate) fn available(&self) -> usize {
        self.pointers.values().filter(|p| p.is_some()).count()
    }

    /// Optional symbols absent from the loaded build.
    pub(crate) fn missing(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .pointers
            .iter()
            .filter(|(_, ptr)| ptr.is_none())
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }

    fn clear(&mut self) {
        self.pointers.clear();
    }
}

fn resolve_symbol(library: &Library, name: &str) -> Option<NonNull<c_void>> {
    // SAFETY: the export is read as a bare address and only ever called after
    // being cast to its declared prototype.
    let symbol = unsafe { library.get::<*mut c_void>(name.as_bytes()) }.ok()?;
    NonNull::new(*symbol)
}

/// An opened Z3 shared library together with its symbol table.
#[derive(Debug)]
pub(crate) struct NativeLibrary {
    path: PathBuf,
    library: Option<Library>,
    symbols: SymbolTable,
}

impl NativeLibrary {
    /// Open `path` and resolve every group this crate binds.
    pub(crate) fn open(path: &Path) -> Result<Self, Z3Error> {
        Self::open_with(path, ALL_GROUPS)
    }

    /// Open `path` and resolve only `groups`.
    pub(crate) fn open_with(path: &Path, groups: &[SymbolGroup]) -> Result<Self, Z3Error> {
        // SAFETY: loading runs the library's initialisers, which is the
        // accepted cost of dynamic loading.
        let library = unsafe { Library::new(path) }.map_err(|e| Z3Error::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // On failure `library` drops here and the handle is released before
        // the error reaches the caller.
        let symbols = SymbolTable::resolve(&library, path, groups)?;

        tracing::info!(
            "Loaded Z3 library {} ({} functions, {} unavailable)",
            path.display(),
            symbols.available(),
            symbols.missing().len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            library: Some(library),
            symbols,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.library.is_none()
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Unload the library. Only the first call has an effect.
    pub(crate) fn close(&mut self) -> Result<(), Z3Error> {
        let Some(library) = self.library.take() else {
            return Ok(());
        };
        self.symbols.clear();
        tracing::debug!("Unloading Z3 library {}", self.path.display());
        library.close().map_err(|e| Z3Error::LoadFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Reinterpret the cached address of `name` as the function pointer `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the C prototype of
    /// `name` exactly.
    pub(crate) unsafe fn function<F: Copy>(&self, name: &'static str) -> Result<F, Z3Error> {
        if self.library.is_none() {
            return Err(Z3Error::Disposed);
        }
        let ptr = self.symbols.lookup(name, &self.path)?;
        debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());
        // SAFETY: `F` is a function pointer of the symbol's prototype per the
        // caller's contract, and the image stays mapped while `self.library`
        // is `Some`.
        Ok(unsafe { mem::transmute_copy::<*mut c_void, F>(&ptr.as_ptr()) })
    }
}

impl Drop for NativeLibrary {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::ffi::{CString, c_char};

    /// A C runtime that is always present, for exercising the loader.
    fn host_libc() -> Option<PathBuf> {
        [
            "/lib/x86_64-linux-gnu/libc.so.6",
            "/usr/lib/x86_64-linux-gnu/libc.so.6",
            "/lib/aarch64-linux-gnu/libc.so.6",
            "/usr/lib/aarch64-linux-gnu/libc.so.6",
            "/lib64/libc.so.6",
            "/usr/lib64/libc.so.6",
            "/lib/libc.so.6",
            "/usr/lib/libSystem.B.dylib",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
    }

    const LIBC: SymbolGroup = SymbolGroup {
        name: "libc",
        required: &["strlen"],
        optional: &["Z3_definitely_not_exported"],
    };

    #[test]
    fn symbol_names_are_unique_across_groups() {
        let mut seen = HashSet::new();
        for group in ALL_GROUPS {
            for name in group.required.iter().chain(group.optional) {
                assert!(seen.insert(*name), "{name} bound twice");
            }
        }
        assert!(seen.contains("Z3_get_error_code"));
        assert!(seen.contains("Z3_set_error_handler"));
    }

    #[test]
    fn group_names_are_unique() {
        let names: HashSet<_> = ALL_GROUPS.iter().map(|g| g.name).collect();
        assert_eq!(names.len(), ALL_GROUPS.len());
    }

    #[test]
    fn loading_a_non_library_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a shared object").unwrap();
        let err = NativeLibrary::open(file.path()).unwrap_err();
        assert!(matches!(err, Z3Error::LoadFailed { .. }), "{err:?}");
    }

    #[test]
    fn missing_required_symbol_fails_atomically() {
        let Some(libc) = host_libc() else { return };
        let err = NativeLibrary::open(&libc).unwrap_err();
        match &err {
            Z3Error::IncompatibleLibrary { symbol, .. } => assert!(symbol.starts_with("Z3_")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn optional_symbol_absent_is_reported_as_unavailable() {
        let Some(libc) = host_libc() else { return };
        let native = NativeLibrary::open_with(&libc, &[LIBC]).unwrap();
        assert_eq!(native.symbols().missing(), vec!["Z3_definitely_not_exported"]);
        assert_eq!(native.symbols().available(), 1);

        let err = unsafe { native.function::<unsafe extern "C" fn()>("Z3_definitely_not_exported") }
            .unwrap_err();
        assert_eq!(
            err,
            Z3Error::FunctionUnavailable {
                function: "Z3_definitely_not_exported".to_string(),
                path: libc.clone(),
            }
        );
    }

    #[test]
    fn typed_call_through_cached_pointer() {
        let Some(libc) = host_libc() else { return };
        let native = NativeLibrary::open_with(&libc, &[LIBC]).unwrap();
        let strlen = unsafe {
            native
                .function::<unsafe extern "C" fn(*const c_char) -> usize>("strlen")
                .unwrap()
        };
        let text = CString::new("interop").unwrap();
        assert_eq!(unsafe { strlen(text.as_ptr()) }, 7);
    }

    #[test]
    fn close_is_idempotent_and_blocks_calls() {
        let Some(libc) = host_libc() else { return };
        let mut native = NativeLibrary::open_with(&libc, &[LIBC]).unwrap();
        native.close().unwrap();
        native.close().unwrap();
        assert!(native.is_closed());
        let err = unsafe { native.function::<unsafe extern "C" fn()>("strlen") }.unwrap_err();
        assert_eq!(err, Z3Error::Disposed);
    }
}
