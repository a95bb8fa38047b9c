//! Process-wide default library.
//!
//! Registering hands the [`Z3Library`] over by value: from then on the
//! registry owns it and callers only ever see shared `Arc` clones, so nobody
//! can dispose a library that others still use. Replacing or clearing the
//! default releases the registry's reference outside the lock; the previous
//! library unloads once its last clone is dropped.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Z3Error;
use crate::library::Z3Library;

static DEFAULT_LIBRARY: Mutex<Option<Arc<Z3Library>>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<Arc<Z3Library>>> {
    // The slot holds no invariant a panicking holder could break.
    DEFAULT_LIBRARY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register `library` as the default, replacing any previous one.
pub fn set_default_library(library: Z3Library) -> Arc<Z3Library> {
    let library = Arc::new(library);
    let previous = slot().replace(Arc::clone(&library));
    tracing::debug!(
        "Default Z3 library set to {}",
        library.library_path().display()
    );
    drop(previous);
    library
}

/// The registered default library.
pub fn default_library() -> Result<Arc<Z3Library>, Z3Error> {
    slot().clone().ok_or(Z3Error::NoDefaultLibrary)
}

/// Load `path` and register it. On failure the current default is kept.
pub fn load_default_library(path: impl AsRef<Path>) -> Result<Arc<Z3Library>, Z3Error> {
    let library = Z3Library::load(path)?;
    Ok(set_default_library(library))
}

/// Auto-detect, load and register. On failure the current default is kept.
pub fn load_default_library_auto() -> Result<Arc<Z3Library>, Z3Error> {
    let library = Z3Library::load_auto()?;
    Ok(set_default_library(library))
}

/// Unregister the default. Returns `true` if one was registered.
pub fn clear_default_library() -> bool {
    let previous = slot().take();
    let had_default = previous.is_some();
    drop(previous);
    had_default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial(z3_default_library)]
    fn empty_registry_reports_missing_default() {
        clear_default_library();
        assert_eq!(default_library().unwrap_err(), Z3Error::NoDefaultLibrary);
        assert!(!clear_default_library());
    }

    #[test]
    #[serial_test::serial(z3_default_library)]
    fn failed_load_keeps_registry_unchanged() {
        clear_default_library();
        let err = load_default_library("/completely/nonexistent/path/to/library.so").unwrap_err();
        assert!(matches!(err, Z3Error::NotFound(_)));
        assert_eq!(default_library().unwrap_err(), Z3Error::NoDefaultLibrary);

        assert_eq!(load_default_library("  ").unwrap_err(), Z3Error::InvalidPath);
        assert_eq!(default_library().unwrap_err(), Z3Error::NoDefaultLibrary);
    }
}
