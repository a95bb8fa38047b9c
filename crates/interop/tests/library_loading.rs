//! Loading, metadata and disposal of the native library.
//!
//! Tests that need a real Z3 build skip themselves when none can be found.

use std::sync::Arc;

use z3wrap_interop::{Context, LibrarySearch, Z3Error, Z3Library};

// ---- Helper ----

fn try_load() -> Option<Z3Library> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    match Z3Library::load_auto() {
        Ok(library) => Some(library),
        Err(err) => {
            eprintln!("skipping: Z3 not available ({err})");
            None
        }
    }
}

// ============================================================
// Path validation (no Z3 needed)
// ============================================================

#[test]
fn empty_path_is_invalid() {
    assert_eq!(Z3Library::load("").unwrap_err(), Z3Error::InvalidPath);
}

#[test]
fn whitespace_path_is_invalid() {
    assert_eq!(Z3Library::load("   ").unwrap_err(), Z3Error::InvalidPath);
}

#[test]
fn nonexistent_path_is_not_found() {
    let err = Z3Library::load("/completely/nonexistent/path/to/library.so").unwrap_err();
    assert!(matches!(err, Z3Error::NotFound(_)), "{err:?}");
    assert!(err.to_string().contains("/completely/nonexistent/path/to/library.so"));
}

#[test]
fn non_library_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("libz3.so");
    std::fs::write(&path, b"this is not a shared library").unwrap();

    let err = Z3Library::load(&path).unwrap_err();
    assert!(matches!(err, Z3Error::LoadFailed { .. }), "{err:?}");
}

#[test]
fn failed_discovery_lists_searched_paths() {
    let search = LibrarySearch::empty()
        .with_candidate("/nowhere/libz3.so")
        .with_candidate("/also/nowhere/z3.so");
    let err = Z3Library::load_with(&search).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("/nowhere/libz3.so"), "{text}");
    assert!(text.contains("/also/nowhere/z3.so"), "{text}");
}

// ============================================================
// Real library
// ============================================================

#[test]
fn load_auto_reports_version() {
    let Some(library) = try_load() else { return };
    let version = library.version().unwrap();
    assert!(version.major >= 4, "unexpected version {version}");

    match library.full_version() {
        Ok(full) => assert!(full.contains(&version.major.to_string()), "{full}"),
        Err(Z3Error::FunctionUnavailable { .. }) => {}
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[test]
fn unavailable_functions_match_call_results() {
    let Some(mut library) = try_load() else { return };
    let missing = library.unavailable_functions();
    assert!(missing.iter().all(|name| name.starts_with("Z3_")), "{missing:?}");
    assert!(missing.windows(2).all(|pair| pair[0] < pair[1]));

    let full = library.full_version();
    assert_eq!(
        missing.contains(&"Z3_get_full_version"),
        matches!(full, Err(Z3Error::FunctionUnavailable { .. })),
        "{full:?}"
    );

    library.dispose().unwrap();
    assert!(library.unavailable_functions().is_empty());
}

#[test]
fn explicit_load_of_discovered_path() {
    let Some(library) = try_load() else { return };
    let path = library.library_path().to_path_buf();
    if !path.is_file() {
        // Found through the OS loader by bare name.
        return;
    }
    let again = Z3Library::load(&path).unwrap();
    assert_eq!(again.library_path(), path);
    assert_eq!(again.version().unwrap(), library.version().unwrap());
}

#[test]
fn dispose_is_idempotent() {
    let Some(mut library) = try_load() else { return };
    assert!(!library.is_disposed());
    library.dispose().unwrap();
    library.dispose().unwrap();
    assert!(library.is_disposed());
}

#[test]
fn calls_after_dispose_fail() {
    let Some(mut library) = try_load() else { return };
    library.dispose().unwrap();
    assert_eq!(library.version().unwrap_err(), Z3Error::Disposed);
    assert_eq!(library.mk_config().unwrap_err(), Z3Error::Disposed);
}

#[test]
fn library_outlives_dropped_handle_while_shared() {
    let Some(library) = try_load() else { return };
    let library = Arc::new(library);
    let ctx = Context::new(Arc::clone(&library)).unwrap();
    drop(library);
    // The context's clone keeps the image mapped.
    assert_eq!(ctx.bool_val(true).unwrap().to_string(), "true");
}

#[test]
fn two_instances_coexist() {
    let Some(first) = try_load() else { return };
    let Some(second) = try_load() else { return };
    let a = Context::new(Arc::new(first)).unwrap();
    let b = Context::new(Arc::new(second)).unwrap();
    assert_eq!(a.int_val(7).unwrap().to_string(), "7");
    assert_eq!(b.int_val(8).unwrap().to_string(), "8");
}
