use std::fmt;

use crate::context::{Ast, Context, log_refcount};
use crate::error::Z3Error;
use crate::handles::Z3Model;

/// A model from a satisfiable check.
///
/// Holds its own native reference, so it stays valid after the solver moves
/// on.
pub struct Model<'ctx> {
    ctx: &'ctx Context,
    handle: Z3Model,
}

impl<'ctx> Model<'ctx> {
    pub(crate) fn acquire(ctx: &'ctx Context, handle: Z3Model) -> Result<Self, Z3Error> {
        unsafe { ctx.library().model_inc_ref(ctx.handle(), handle)? };
        Ok(Self { ctx, handle })
    }

    pub fn handle(&self) -> Z3Model {
        self.handle
    }

    /// Evaluate `term` under this model.
    ///
    /// With `completion`, constants the model leaves open get a default
    /// value instead of staying symbolic.
    pub fn eval(&self, term: &Ast<'_>, completion: bool) -> Result<Option<Ast<'ctx>>, Z3Error> {
        self.ctx.ensure_same(term.context(), "term")?;
        let value = unsafe {
            self.ctx
                .library()
                .model_eval(self.ctx.handle(), self.handle, term.handle(), completion)?
        };
        value.map(|ast| Ast::acquire(self.ctx, ast)).transpose()
    }

    /// Value of an integer term, as decimal text.
    pub fn eval_numeral(&self, term: &Ast<'_>) -> Result<Option<String>, Z3Error> {
        self.eval(term, true)?
            .map(|value| value.numeral_string())
            .transpose()
    }

    /// Value of a boolean term.
    pub fn eval_bool(&self, term: &Ast<'_>) -> Result<Option<bool>, Z3Error> {
        match self.eval(term, true)? {
            Some(value) => value.bool_value(),
            None => Ok(None),
        }
    }
}

impl Clone for Model<'_> {
    fn clone(&self) -> Self {
        log_refcount("model", unsafe {
            self.ctx.library().model_inc_ref(self.ctx.handle(), self.handle)
        });
        Self {
            ctx: self.ctx,
            handle: self.handle,
        }
    }
}

impl Drop for Model<'_> {
    fn drop(&mut self) {
        log_refcount("model", unsafe {
            self.ctx.library().model_dec_ref(self.ctx.handle(), self.handle)
        });
    }
}

impl fmt::Display for Model<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = unsafe { self.ctx.library().model_to_string(self.ctx.handle(), self.handle) }
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&self.handle).finish()
    }
}
