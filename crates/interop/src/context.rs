//! Owners for contexts and the terms built in them.
//!
//! A [`Context`] keeps its [`Z3Library`] alive through an `Arc`, so the
//! library cannot be disposed while any context exists. Terms, sorts, solvers
//! and models borrow their context, which rules out using them after the
//! context is deleted.

use std::fmt;
use std::sync::Arc;

use crate::error::Z3Error;
use crate::handles::{Z3Ast, Z3Context, Z3Sort, Z3Symbol};
use crate::library::Z3Library;
use crate::params::Params;
use crate::registry;
use crate::solver::Solver;

/// Log a failed reference-count update from `Drop`/`Clone`, which have no
/// way to return it.
pub(crate) fn log_refcount(what: &str, result: Result<(), Z3Error>) {
    if let Err(err) = result {
        tracing::warn!("Z3 {what} reference update failed: {err}");
    }
}

/// A Z3 context with the crash guard installed.
#[derive(Debug)]
pub struct Context {
    library: Arc<Z3Library>,
    handle: Z3Context,
}

impl Context {
    /// Create a context on `library`.
    pub fn new(library: Arc<Z3Library>) -> Result<Self, Z3Error> {
        Self::with_params(library, &[])
    }

    /// Create a context on the registered default library.
    pub fn with_default_library() -> Result<Self, Z3Error> {
        Self::new(registry::default_library()?)
    }

    /// Create a context and apply `params` (e.g. `("model", "true")`) to it.
    pub fn with_params(library: Arc<Z3Library>, params: &[(&str, &str)]) -> Result<Self, Z3Error> {
        let cfg = library.mk_config()?;
        // SAFETY: `cfg` was just created by this library.
        let created = unsafe { library.mk_context_rc(cfg) };
        // The context copies what it needs; the config is done either way.
        log_refcount("config", unsafe { library.del_config(cfg) });

        let context = Self {
            handle: created?,
            library,
        };
        for (id, value) in params {
            context.set_param(id, value)?;
        }
        Ok(context)
    }

    pub fn library(&self) -> &Arc<Z3Library> {
        &self.library
    }

    /// Raw handle, for calling [`Z3Library`] methods directly.
    pub fn handle(&self) -> Z3Context {
        self.handle
    }

    /// Update a parameter on the live context.
    pub fn set_param(&self, id: &str, value: &str) -> Result<(), Z3Error> {
        unsafe { self.library.update_param_value(self.handle, id, value) }
    }

    /// Interrupt whatever this context is running.
    pub fn interrupt(&self) -> Result<(), Z3Error> {
        unsafe { self.library.interrupt(self.handle) }
    }

    /// Report the context's pending native error, if any.
    pub fn check_error(&self) -> Result<(), Z3Error> {
        unsafe { self.library.check_error(self.handle) }
    }

    pub fn symbol(&self, name: &str) -> Result<Z3Symbol, Z3Error> {
        unsafe { self.library.mk_string_symbol(self.handle, name) }
    }

    /// Text of a symbol created in this context.
    pub fn symbol_name(&self, symbol: Z3Symbol) -> Result<String, Z3Error> {
        unsafe { self.library.get_symbol_string(self.handle, symbol) }
    }

    pub fn bool_sort(&self) -> Result<Sort<'_>, Z3Error> {
        let sort = unsafe { self.library.mk_bool_sort(self.handle)? };
        Sort::acquire(self, sort)
    }

    pub fn int_sort(&self) -> Result<Sort<'_>, Z3Error> {
        let sort = unsafe { self.library.mk_int_sort(self.handle)? };
        Sort::acquire(self, sort)
    }

    pub fn real_sort(&self) -> Result<Sort<'_>, Z3Error> {
        let sort = unsafe { self.library.mk_real_sort(self.handle)? };
        Sort::acquire(self, sort)
    }

    pub fn bv_sort(&self, size: u32) -> Result<Sort<'_>, Z3Error> {
        let sort = unsafe { self.library.mk_bv_sort(self.handle, size)? };
        Sort::acquire(self, sort)
    }

    /// Fail with [`Z3Error::ContextMismatch`] unless `owner` is this context.
    ///
    /// Z3 does not check which context a handle came from.
    pub(crate) fn ensure_same(&self, owner: &Context, what: &'static str) -> Result<(), Z3Error> {
        if self.handle == owner.handle {
            Ok(())
        } else {
            Err(Z3Error::ContextMismatch(what))
        }
    }

    fn handles_of(&self, args: &[&Ast<'_>]) -> Result<Vec<Z3Ast>, Z3Error> {
        args.iter()
            .map(|arg| {
                self.ensure_same(arg.ctx, "term")?;
                Ok(arg.handle)
            })
            .collect()
    }

    /// Uninterpreted constant `name` of `sort`.
    pub fn constant(&self, name: &str, sort: &Sort<'_>) -> Result<Ast<'_>, Z3Error> {
        self.ensure_same(sort.ctx, "sort")?;
        let symbol = self.symbol(name)?;
        let ast = unsafe { self.library.mk_const(self.handle, symbol, sort.handle)? };
        Ast::acquire(self, ast)
    }

    pub fn bool_const(&self, name: &str) -> Result<Ast<'_>, Z3Error> {
        self.constant(name, &self.bool_sort()?)
    }

    pub fn int_const(&self, name: &str) -> Result<Ast<'_>, Z3Error> {
        self.constant(name, &self.int_sort()?)
    }

    pub fn bool_val(&self, value: bool) -> Result<Ast<'_>, Z3Error> {
        let ast = if value {
            unsafe { self.library.mk_true(self.handle)? }
        } else {
            unsafe { self.library.mk_false(self.handle)? }
        };
        Ast::acquire(self, ast)
    }

    /// Numeral of `sort` parsed by Z3 from `text`.
    pub fn numeral(&self, text: &str, sort: &Sort<'_>) -> Result<Ast<'_>, Z3Error> {
        self.ensure_same(sort.ctx, "sort")?;
        let ast = unsafe { self.library.mk_numeral(self.handle, text, sort.handle)? };
        Ast::acquire(self, ast)
    }

    pub fn int_val(&self, value: i64) -> Result<Ast<'_>, Z3Error> {
        self.numeral(&value.to_string(), &self.int_sort()?)
    }

    pub fn and(&self, args: &[&Ast<'_>]) -> Result<Ast<'_>, Z3Error> {
        let handles = self.handles_of(args)?;
        let ast = unsafe { self.library.mk_and(self.handle, &handles)? };
        Ast::acquire(self, ast)
    }

    pub fn or(&self, args: &[&Ast<'_>]) -> Result<Ast<'_>, Z3Error> {
        let handles = self.handles_of(args)?;
        let ast = unsafe { self.library.mk_or(self.handle, &handles)? };
        Ast::acquire(self, ast)
    }

    pub fn add(&self, args: &[&Ast<'_>]) -> Result<Ast<'_>, Z3Error> {
        let handles = self.handles_of(args)?;
        let ast = unsafe { self.library.mk_add(self.handle, &handles)? };
        Ast::acquire(self, ast)
    }

    /// A solver with the default tactic pipeline.
    pub fn solver(&self) -> Result<Solver<'_>, Z3Error> {
        let solver = unsafe { self.library.mk_solver(self.handle)? };
        Solver::acquire(self, solver)
    }

    pub fn simple_solver(&self) -> Result<Solver<'_>, Z3Error> {
        let solver = unsafe { self.library.mk_simple_solver(self.handle)? };
        Solver::acquire(self, solver)
    }

    pub fn params(&self) -> Result<Params<'_>, Z3Error> {
        Params::new(self)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        log_refcount("context", unsafe { self.library.del_context(self.handle) });
    }
}

/// A counted reference to a sort.
pub struct Sort<'ctx> {
    ctx: &'ctx Context,
    handle: Z3Sort,
}

impl<'ctx> Sort<'ctx> {
    fn acquire(ctx: &'ctx Context, handle: Z3Sort) -> Result<Self, Z3Error> {
        // Sorts share the AST reference count.
        unsafe { ctx.library.inc_ref(ctx.handle, handle.into())? };
        Ok(Self { ctx, handle })
    }

    pub fn handle(&self) -> Z3Sort {
        self.handle
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }
}

impl Clone for Sort<'_> {
    fn clone(&self) -> Self {
        log_refcount("sort", unsafe {
            self.ctx.library.inc_ref(self.ctx.handle, self.handle.into())
        });
        Self {
            ctx: self.ctx,
            handle: self.handle,
        }
    }
}

impl Drop for Sort<'_> {
    fn drop(&mut self) {
        log_refcount("sort", unsafe {
            self.ctx.library.dec_ref(self.ctx.handle, self.handle.into())
        });
    }
}

impl fmt::Display for Sort<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = unsafe { self.ctx.library.sort_to_string(self.ctx.handle, self.handle) }
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Sort<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sort").field(&self.handle).finish()
    }
}

/// A counted reference to an expression.
///
/// Cloning takes another native reference; each clone releases its own on
/// drop.
pub struct Ast<'ctx> {
    ctx: &'ctx Context,
    handle: Z3Ast,
}

impl<'ctx> Ast<'ctx> {
    /// Take a reference to a handle Z3 just returned.
    pub(crate) fn acquire(ctx: &'ctx Context, handle: Z3Ast) -> Result<Self, Z3Error> {
        unsafe { ctx.library.inc_ref(ctx.handle, handle)? };
        Ok(Self { ctx, handle })
    }

    pub fn handle(&self) -> Z3Ast {
        self.handle
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn sort(&self) -> Result<Sort<'ctx>, Z3Error> {
        let sort = unsafe { self.ctx.library.get_sort(self.ctx.handle, self.handle)? };
        Sort::acquire(self.ctx, sort)
    }

    pub fn equals(&self, other: &Ast<'_>) -> Result<Ast<'ctx>, Z3Error> {
        self.ctx.ensure_same(other.ctx, "term")?;
        let ast = unsafe { self.ctx.library.mk_eq(self.ctx.handle, self.handle, other.handle)? };
        Ast::acquire(self.ctx, ast)
    }

    pub fn not(&self) -> Result<Ast<'ctx>, Z3Error> {
        let ast = unsafe { self.ctx.library.mk_not(self.ctx.handle, self.handle)? };
        Ast::acquire(self.ctx, ast)
    }

    pub fn lt(&self, other: &Ast<'_>) -> Result<Ast<'ctx>, Z3Error> {
        self.ctx.ensure_same(other.ctx, "term")?;
        let ast = unsafe { self.ctx.library.mk_lt(self.ctx.handle, self.handle, other.handle)? };
        Ast::acquire(self.ctx, ast)
    }

    pub fn gt(&self, other: &Ast<'_>) -> Result<Ast<'ctx>, Z3Error> {
        self.ctx.ensure_same(other.ctx, "term")?;
        let ast = unsafe { self.ctx.library.mk_gt(self.ctx.handle, self.handle, other.handle)? };
        Ast::acquire(self.ctx, ast)
    }

    /// `Some` for the boolean literals `true` and `false`.
    pub fn bool_value(&self) -> Result<Option<bool>, Z3Error> {
        unsafe { self.ctx.library.get_bool_value(self.ctx.handle, self.handle) }
    }

    /// Decimal text of a numeral.
    pub fn numeral_string(&self) -> Result<String, Z3Error> {
        unsafe { self.ctx.library.get_numeral_string(self.ctx.handle, self.handle) }
    }
}

impl Clone for Ast<'_> {
    fn clone(&self) -> Self {
        log_refcount("ast", unsafe { self.ctx.library.inc_ref(self.ctx.handle, self.handle) });
        Self {
            ctx: self.ctx,
            handle: self.handle,
        }
    }
}

impl Drop for Ast<'_> {
    fn drop(&mut self) {
        log_refcount("ast", unsafe { self.ctx.library.dec_ref(self.ctx.handle, self.handle) });
    }
}

impl fmt::Display for Ast<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = unsafe { self.ctx.library.ast_to_string(self.ctx.handle, self.handle) }
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Ast<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ast").field(&self.handle).finish()
    }
}
