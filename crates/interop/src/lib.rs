//! # z3wrap-interop
//!
//! Safe dynamic-loading bindings for the Z3 C API.
//!
//! The native library is located and opened at run time, every entry point
//! the crate binds is resolved once up front, and every call that takes a
//! context is followed by a check of Z3's error state. Native failures come
//! back as [`Z3Error::Native`] values instead of aborting the process.
//!
//! Two layers are exposed:
//!
//! - [`Z3Library`]: the checked C surface over raw handles (`unsafe`).
//! - [`Context`], [`Ast`], [`Solver`], [`Model`], [`Params`]: owners that
//!   manage native reference counts and lifetimes.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use z3wrap_interop::{Context, SolverResult, Z3Library};
//!
//! let library = Arc::new(Z3Library::load_auto().unwrap());
//! let ctx = Context::new(library).unwrap();
//!
//! let x = ctx.int_const("x").unwrap();
//! let zero = ctx.int_val(0).unwrap();
//! let ten = ctx.int_val(10).unwrap();
//!
//! let solver = ctx.solver().unwrap();
//! solver.assert(&x.gt(&zero).unwrap()).unwrap();
//! solver.assert(&x.lt(&ten).unwrap()).unwrap();
//!
//! match solver.check_with_model().unwrap() {
//!     SolverResult::Sat(Some(model)) => println!("x = {:?}", model.eval_numeral(&x)),
//!     SolverResult::Sat(None) => println!("SAT"),
//!     SolverResult::Unsat => println!("UNSAT"),
//!     SolverResult::Unknown(reason) => println!("Unknown: {reason}"),
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod handles;
pub mod library;
pub mod model;
mod native;
pub mod params;
pub mod registry;
pub mod result;
pub mod solver;
pub mod strings;

// Re-export primary types for ergonomic use
pub use config::LibrarySearch;
pub use context::{Ast, Context, Sort};
pub use error::{ErrorCode, Z3Error};
pub use guard::{NativeErrorRecord, drain_native_errors};
pub use library::{Version, Z3Library};
pub use model::Model;
pub use native::ErrorHandler;
pub use params::Params;
pub use registry::{
    clear_default_library, default_library, load_default_library, load_default_library_auto,
    set_default_library,
};
pub use result::{SatStatus, SolverResult};
pub use solver::Solver;
