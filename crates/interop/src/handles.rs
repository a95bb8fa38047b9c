//! Opaque native handle types.
//!
//! Each wraps the raw pointer Z3 hands out, with the same ABI as the C
//! typedef, so they can be passed straight through the typed shims. None of
//! them owns anything; see [`crate::context`] for owners that manage the
//! native reference counts.

use std::ffi::c_void;

/// Common surface of every opaque handle.
pub trait NativeHandle: Copy {
    /// The raw pointer.
    fn as_ptr(self) -> *mut c_void;

    /// Returns `true` if the native side produced no object.
    fn is_null(self) -> bool {
        self.as_ptr().is_null()
    }
}

macro_rules! opaque_handle {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(*mut c_void);

        impl $name {
            /// The null handle.
            pub const fn null() -> Self {
                Self(std::ptr::null_mut())
            }

            /// Wrap a raw pointer obtained from Z3.
            pub const fn from_raw(ptr: *mut c_void) -> Self {
                Self(ptr)
            }
        }

        impl NativeHandle for $name {
            fn as_ptr(self) -> *mut c_void {
                self.0
            }
        }
    )*};
}

opaque_handle! {
    /// `Z3_config`
    Z3Config;
    /// `Z3_context`
    Z3Context;
    /// `Z3_symbol`
    Z3Symbol;
    /// `Z3_sort`
    Z3Sort;
    /// `Z3_ast`
    Z3Ast;
    /// `Z3_solver`
    Z3Solver;
    /// `Z3_model`
    Z3Model;
    /// `Z3_params`
    Z3Params;
}

// Sorts are ASTs on the native side and share their reference count.
impl From<Z3Sort> for Z3Ast {
    fn from(sort: Z3Sort) -> Self {
        Z3Ast(sort.0)
    }
}
