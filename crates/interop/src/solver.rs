use std::cell::Cell;
use std::fmt;

use crate::context::{Ast, Context, log_refcount};
use crate::error::Z3Error;
use crate::handles::Z3Solver;
use crate::model::Model;
use crate::params::Params;
use crate::result::{SatStatus, SolverResult};

/// A solver owned by one context.
///
/// Remembers the outcome of the last check so a model is only requested when
/// one exists. Any change to the assertion stack forgets it.
pub struct Solver<'ctx> {
    ctx: &'ctx Context,
    handle: Z3Solver,
    last_status: Cell<Option<SatStatus>>,
}

impl<'ctx> Solver<'ctx> {
    pub(crate) fn acquire(ctx: &'ctx Context, handle: Z3Solver) -> Result<Self, Z3Error> {
        unsafe { ctx.library().solver_inc_ref(ctx.handle(), handle)? };
        Ok(Self {
            ctx,
            handle,
            last_status: Cell::new(None),
        })
    }

    pub fn handle(&self) -> Z3Solver {
        self.handle
    }

    /// Outcome of the last check, if nothing changed since.
    pub fn last_status(&self) -> Option<SatStatus> {
        self.last_status.get()
    }

    pub fn assert(&self, constraint: &Ast<'_>) -> Result<(), Z3Error> {
        self.ctx.ensure_same(constraint.context(), "term")?;
        self.last_status.set(None);
        unsafe {
            self.ctx
                .library()
                .solver_assert(self.ctx.handle(), self.handle, constraint.handle())
        }
    }

    pub fn check(&self) -> Result<SatStatus, Z3Error> {
        self.last_status.set(None);
        let status = unsafe { self.ctx.library().solver_check(self.ctx.handle(), self.handle)? };
        tracing::debug!("Solver check: {status}");
        self.last_status.set(Some(status));
        Ok(status)
    }

    /// Check, then collect the model or the reason the solver gave up.
    pub fn check_with_model(&self) -> Result<SolverResult<'ctx>, Z3Error> {
        Ok(match self.check()? {
            SatStatus::Sat => SolverResult::Sat(Some(self.model()?)),
            SatStatus::Unsat => SolverResult::Unsat,
            SatStatus::Unknown => SolverResult::Unknown(self.reason_unknown()?),
        })
    }

    /// Model of the last check. Fails with [`Z3Error::ModelUnavailable`]
    /// unless that check was satisfiable and nothing changed since.
    pub fn model(&self) -> Result<Model<'ctx>, Z3Error> {
        if self.last_status.get() != Some(SatStatus::Sat) {
            return Err(Z3Error::ModelUnavailable);
        }
        let model = unsafe {
            self.ctx
                .library()
                .solver_get_model(self.ctx.handle(), self.handle)?
        };
        Model::acquire(self.ctx, model)
    }

    pub fn reason_unknown(&self) -> Result<String, Z3Error> {
        unsafe {
            self.ctx
                .library()
                .solver_get_reason_unknown(self.ctx.handle(), self.handle)
        }
    }

    pub fn push(&self) -> Result<(), Z3Error> {
        self.last_status.set(None);
        unsafe { self.ctx.library().solver_push(self.ctx.handle(), self.handle) }
    }

    pub fn pop(&self, scopes: u32) -> Result<(), Z3Error> {
        self.last_status.set(None);
        unsafe { self.ctx.library().solver_pop(self.ctx.handle(), self.handle, scopes) }
    }

    /// Remove every assertion and scope.
    pub fn reset(&self) -> Result<(), Z3Error> {
        self.last_status.set(None);
        unsafe { self.ctx.library().solver_reset(self.ctx.handle(), self.handle) }
    }

    pub fn set_params(&self, params: &Params<'_>) -> Result<(), Z3Error> {
        self.ctx.ensure_same(params.context(), "parameter set")?;
        unsafe {
            self.ctx
                .library()
                .solver_set_params(self.ctx.handle(), self.handle, params.handle())
        }
    }
}

impl Drop for Solver<'_> {
    fn drop(&mut self) {
        log_refcount("solver", unsafe {
            self.ctx.library().solver_dec_ref(self.ctx.handle(), self.handle)
        });
    }
}

impl fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("handle", &self.handle)
            .field("last_status", &self.last_status.get())
            .finish()
    }
}
