use std::fmt;

use crate::context::{Context, log_refcount};
use crate::error::Z3Error;
use crate::handles::Z3Params;

/// A parameter set for configuring solvers.
///
/// Backed by optional entry points; on builds without them every method
/// reports [`Z3Error::FunctionUnavailable`].
pub struct Params<'ctx> {
    ctx: &'ctx Context,
    handle: Z3Params,
}

impl<'ctx> Params<'ctx> {
    pub(crate) fn new(ctx: &'ctx Context) -> Result<Self, Z3Error> {
        let library = ctx.library();
        let handle = unsafe { library.mk_params(ctx.handle())? };
        unsafe { library.params_inc_ref(ctx.handle(), handle)? };
        Ok(Self { ctx, handle })
    }

    pub fn handle(&self) -> Z3Params {
        self.handle
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), Z3Error> {
        let key = self.ctx.symbol(name)?;
        unsafe {
            self.ctx
                .library()
                .params_set_bool(self.ctx.handle(), self.handle, key, value)
        }
    }

    pub fn set_u32(&self, name: &str, value: u32) -> Result<(), Z3Error> {
        let key = self.ctx.symbol(name)?;
        unsafe {
            self.ctx
                .library()
                .params_set_uint(self.ctx.handle(), self.handle, key, value)
        }
    }

    pub fn set_f64(&self, name: &str, value: f64) -> Result<(), Z3Error> {
        let key = self.ctx.symbol(name)?;
        unsafe {
            self.ctx
                .library()
                .params_set_double(self.ctx.handle(), self.handle, key, value)
        }
    }
}

impl Drop for Params<'_> {
    fn drop(&mut self) {
        log_refcount("params", unsafe {
            self.ctx.library().params_dec_ref(self.ctx.handle(), self.handle)
        });
    }
}

impl fmt::Display for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = unsafe { self.ctx.library().params_to_string(self.ctx.handle(), self.handle) }
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Params").field(&self.handle).finish()
    }
}
