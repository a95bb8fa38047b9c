// Solvers, models and parameter sets.

use crate::error::Z3Error;
use crate::handles::{NativeHandle, Z3Ast, Z3Context, Z3Model, Z3Params, Z3Solver, Z3Symbol};
use crate::result::SatStatus;

use super::Z3Library;

impl Z3Library {
    /// A solver with the default tactic pipeline.
    pub unsafe fn mk_solver(&self, ctx: Z3Context) -> Result<Z3Solver, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_solver", |n| n.mk_solver(ctx)) }
    }

    /// A solver without the default tactic pipeline.
    pub unsafe fn mk_simple_solver(&self, ctx: Z3Context) -> Result<Z3Solver, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_simple_solver", |n| n.mk_simple_solver(ctx)) }
    }

    /// Take a reference to a solver.
    pub unsafe fn solver_inc_ref(&self, ctx: Z3Context, solver: Z3Solver) -> Result<(), Z3Error> {
        unsafe { self.native.solver_inc_ref(ctx, solver) }
    }

    /// Release a solver reference.
    pub unsafe fn solver_dec_ref(&self, ctx: Z3Context, solver: Z3Solver) -> Result<(), Z3Error> {
        unsafe { self.native.solver_dec_ref(ctx, solver) }
    }

    /// Add a boolean constraint to the top scope.
    pub unsafe fn solver_assert(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
        ast: Z3Ast,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.solver_assert(ctx, solver, ast)) }
    }

    /// Check the assertions for satisfiability.
    pub unsafe fn solver_check(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
    ) -> Result<SatStatus, Z3Error> {
        let raw = unsafe { self.checked(ctx, |n| n.solver_check(ctx, solver))? };
        Ok(SatStatus::from_lbool(raw))
    }

    /// Open a backtracking point.
    pub unsafe fn solver_push(&self, ctx: Z3Context, solver: Z3Solver) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.solver_push(ctx, solver)) }
    }

    /// Pop `scopes` backtracking points. Popping more than were pushed is a
    /// native error.
    pub unsafe fn solver_pop(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
        scopes: u32,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.solver_pop(ctx, solver, scopes)) }
    }

    /// Drop every assertion and scope.
    pub unsafe fn solver_reset(&self, ctx: Z3Context, solver: Z3Solver) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.solver_reset(ctx, solver)) }
    }

    /// Why the last check came back unknown.
    pub unsafe fn solver_get_reason_unknown(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
    ) -> Result<String, Z3Error> {
        unsafe {
            self.checked_string(ctx, "solver_get_reason_unknown", |n| {
                n.solver_get_reason_unknown(ctx, solver)
            })
        }
    }

    /// Model of the last satisfiable check. Z3 reports an invalid-usage error
    /// when there is none.
    pub unsafe fn solver_get_model(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
    ) -> Result<Z3Model, Z3Error> {
        unsafe {
            self.checked_handle(ctx, "solver_get_model", |n| {
                n.solver_get_model(ctx, solver)
            })
        }
    }

    /// Apply a parameter set. Unknown keys are a native error.
    pub unsafe fn solver_set_params(
        &self,
        ctx: Z3Context,
        solver: Z3Solver,
        params: Z3Params,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.solver_set_params(ctx, solver, params)) }
    }

    /// Take a reference to a model.
    pub unsafe fn model_inc_ref(&self, ctx: Z3Context, model: Z3Model) -> Result<(), Z3Error> {
        unsafe { self.native.model_inc_ref(ctx, model) }
    }

    /// Release a model reference.
    pub unsafe fn model_dec_ref(&self, ctx: Z3Context, model: Z3Model) -> Result<(), Z3Error> {
        unsafe { self.native.model_dec_ref(ctx, model) }
    }

    /// Text listing every interpretation in the model.
    pub unsafe fn model_to_string(
        &self,
        ctx: Z3Context,
        model: Z3Model,
    ) -> Result<String, Z3Error> {
        unsafe { self.checked_string(ctx, "model_to_string", |n| n.model_to_string(ctx, model)) }
    }

    /// Evaluate `ast` in `model`.
    ///
    /// With `completion`, constants the model leaves open are given a default
    /// interpretation. Returns `None` when Z3 cannot evaluate the term.
    pub unsafe fn model_eval(
        &self,
        ctx: Z3Context,
        model: Z3Model,
        ast: Z3Ast,
        completion: bool,
    ) -> Result<Option<Z3Ast>, Z3Error> {
        let mut out = Z3Ast::null();
        let ok = unsafe {
            self.checked(ctx, |n| n.model_eval(ctx, model, ast, completion, &mut out))?
        };
        Ok(if ok && !out.is_null() {
            Some(out)
        } else {
            None
        })
    }

    /// An empty parameter set.
    pub unsafe fn mk_params(&self, ctx: Z3Context) -> Result<Z3Params, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_params", |n| n.mk_params(ctx)) }
    }

    /// Take a reference to a parameter set.
    pub unsafe fn params_inc_ref(&self, ctx: Z3Context, params: Z3Params) -> Result<(), Z3Error> {
        unsafe { self.native.params_inc_ref(ctx, params) }
    }

    /// Release a parameter set reference.
    pub unsafe fn params_dec_ref(&self, ctx: Z3Context, params: Z3Params) -> Result<(), Z3Error> {
        unsafe { self.native.params_dec_ref(ctx, params) }
    }

    /// Set a boolean parameter.
    pub unsafe fn params_set_bool(
        &self,
        ctx: Z3Context,
        params: Z3Params,
        key: Z3Symbol,
        value: bool,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.params_set_bool(ctx, params, key, value)) }
    }

    /// Set an unsigned integer parameter.
    pub unsafe fn params_set_uint(
        &self,
        ctx: Z3Context,
        params: Z3Params,
        key: Z3Symbol,
        value: u32,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.params_set_uint(ctx, params, key, value)) }
    }

    /// Set a floating-point parameter.
    pub unsafe fn params_set_double(
        &self,
        ctx: Z3Context,
        params: Z3Params,
        key: Z3Symbol,
        value: f64,
    ) -> Result<(), Z3Error> {
        unsafe { self.checked(ctx, |n| n.params_set_double(ctx, params, key, value)) }
    }

    /// Text of the parameter set, as Z3 prints it.
    pub unsafe fn params_to_string(
        &self,
        ctx: Z3Context,
        params: Z3Params,
    ) -> Result<String, Z3Error> {
        unsafe { self.checked_string(ctx, "params_to_string", |n| n.params_to_string(ctx, params)) }
    }
}
