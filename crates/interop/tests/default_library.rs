//! The process-wide default library.
//!
//! Every test here shares one global slot, so they all run under the same
//! serial key.

use std::sync::Arc;

use serial_test::serial;
use z3wrap_interop::{
    Context, Z3Error, Z3Library, clear_default_library, default_library, load_default_library,
    load_default_library_auto, set_default_library,
};

// ---- Helper ----

fn try_load() -> Option<Z3Library> {
    match Z3Library::load_auto() {
        Ok(library) => Some(library),
        Err(err) => {
            eprintln!("skipping: Z3 not available ({err})");
            None
        }
    }
}

#[test]
#[serial(z3_default_library)]
fn nothing_registered_initially_after_clear() {
    clear_default_library();
    assert_eq!(default_library().unwrap_err(), Z3Error::NoDefaultLibrary);
    assert!(matches!(
        Context::with_default_library(),
        Err(Z3Error::NoDefaultLibrary)
    ));
}

#[test]
#[serial(z3_default_library)]
fn set_then_get_returns_same_instance() {
    let Some(library) = try_load() else { return };
    let registered = set_default_library(library);
    let fetched = default_library().unwrap();
    assert!(Arc::ptr_eq(&registered, &fetched));

    let ctx = Context::with_default_library().unwrap();
    assert_eq!(ctx.bool_val(true).unwrap().to_string(), "true");
    drop(ctx);

    assert!(clear_default_library());
}

#[test]
#[serial(z3_default_library)]
fn replacing_keeps_previous_alive_for_its_holders() {
    let Some(first) = try_load() else { return };
    let Some(second) = try_load() else { return };

    let old = set_default_library(first);
    let ctx = Context::new(Arc::clone(&old)).unwrap();

    let new = set_default_library(second);
    assert!(!Arc::ptr_eq(&old, &new));
    assert!(Arc::ptr_eq(&default_library().unwrap(), &new));

    // Still loaded: `old` and the context hold references.
    assert!(!old.is_disposed());
    assert!(old.version().is_ok());
    assert_eq!(ctx.int_val(42).unwrap().to_string(), "42");

    clear_default_library();
}

#[test]
#[serial(z3_default_library)]
fn failed_load_leaves_current_default() {
    let Some(library) = try_load() else { return };
    let current = set_default_library(library);

    assert!(matches!(
        load_default_library("/completely/nonexistent/path/to/library.so"),
        Err(Z3Error::NotFound(_))
    ));
    assert!(Arc::ptr_eq(&default_library().unwrap(), &current));

    clear_default_library();
}

#[test]
#[serial(z3_default_library)]
fn auto_load_registers() {
    clear_default_library();
    match load_default_library_auto() {
        Ok(library) => {
            assert!(Arc::ptr_eq(&library, &default_library().unwrap()));
            clear_default_library();
        }
        Err(err) => {
            assert!(matches!(err, Z3Error::AutoDetectFailed { .. }), "{err:?}");
            assert_eq!(default_library().unwrap_err(), Z3Error::NoDefaultLibrary);
        }
    }
}

#[test]
#[serial(z3_default_library)]
fn concurrent_readers_see_a_registered_library() {
    let Some(library) = try_load() else { return };
    let registered = set_default_library(library);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| default_library().map(|l| l.version().is_ok())))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(true));
    }
    drop(registered);
    clear_default_library();
}
