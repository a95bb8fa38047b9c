// Configuration, context lifecycle, reference counts and error injection.

use crate::error::{ErrorCode, Z3Error};
use crate::guard;
use crate::handles::{NativeHandle, Z3Ast, Z3Config, Z3Context};
use crate::native::ErrorHandler;
use crate::strings::NativeString;

use super::{Z3Library, non_null};

impl Z3Library {
    /// A fresh configuration for [`Self::mk_context_rc`].
    pub fn mk_config(&self) -> Result<Z3Config, Z3Error> {
        // SAFETY: no handle arguments.
        let cfg = unsafe { self.native.mk_config()? };
        non_null(cfg, "mk_config")
    }

    /// Delete a configuration. Contexts created from it are unaffected.
    pub unsafe fn del_config(&self, cfg: Z3Config) -> Result<(), Z3Error> {
        unsafe { self.native.del_config(cfg) }
    }

    /// Set a configuration parameter. There is no context yet, so no error
    /// state to check.
    pub unsafe fn set_param_value(
        &self,
        cfg: Z3Config,
        id: &str,
        value: &str,
    ) -> Result<(), Z3Error> {
        let id = NativeString::new(id)?;
        let value = NativeString::new(value)?;
        unsafe { self.native.set_param_value(cfg, id.as_ptr(), value.as_ptr()) }
    }

    /// Create a reference-counted context and install the crash guard on it.
    ///
    /// The guard is in place before the context is returned, so no caller
    /// ever observes a context without it.
    pub unsafe fn mk_context_rc(&self, cfg: Z3Config) -> Result<Z3Context, Z3Error> {
        let ctx = non_null(unsafe { self.native.mk_context_rc(cfg)? }, "mk_context_rc")?;
        let handler: ErrorHandler = guard::on_native_error;
        if let Err(err) = unsafe { self.native.set_error_handler(ctx, Some(handler)) } {
            let _ = unsafe { self.native.del_context(ctx) };
            return Err(err);
        }
        tracing::debug!("Created Z3 context {:p}", ctx.as_ptr());
        Ok(ctx)
    }

    /// Delete a context and everything still allocated in it.
    pub unsafe fn del_context(&self, ctx: Z3Context) -> Result<(), Z3Error> {
        unsafe { self.native.del_context(ctx) }
    }

    /// Update a parameter on a live context.
    pub unsafe fn update_param_value(
        &self,
        ctx: Z3Context,
        id: &str,
        value: &str,
    ) -> Result<(), Z3Error> {
        let id = NativeString::new(id)?;
        let value = NativeString::new(value)?;
        unsafe {
            self.checked(ctx, |n| {
                n.update_param_value(ctx, id.as_ptr(), value.as_ptr())
            })
        }
    }

    /// Ask every running operation on `ctx` to stop. Safe to call from
    /// another thread while the context is busy.
    pub unsafe fn interrupt(&self, ctx: Z3Context) -> Result<(), Z3Error> {
        unsafe { self.native.interrupt(ctx) }
    }

    // Reference counting never sets an error code worth reading.

    /// Take a reference to an expression or sort.
    pub unsafe fn inc_ref(&self, ctx: Z3Context, ast: Z3Ast) -> Result<(), Z3Error> {
        unsafe { self.native.inc_ref(ctx, ast) }
    }

    /// Release a reference taken with [`Self::inc_ref`].
    pub unsafe fn dec_ref(&self, ctx: Z3Context, ast: Z3Ast) -> Result<(), Z3Error> {
        unsafe { self.native.dec_ref(ctx, ast) }
    }

    /// Put `ctx` into the error state `code`, as if a call had failed.
    ///
    /// Z3 also invokes the context's handler, so the crash guard records it.
    /// [`Z3Library::check_error`] reports the error until the next native
    /// call on `ctx` resets the state.
    pub unsafe fn set_error(&self, ctx: Z3Context, code: ErrorCode) -> Result<(), Z3Error> {
        unsafe { self.native.set_error(ctx, code.as_raw()) }
    }
}
