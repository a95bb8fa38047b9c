// Solvers, models and parameter sets.

use std::ffi::{c_char, c_int, c_uint};

use crate::error::Z3Error;
use crate::handles::{Z3Ast, Z3Context, Z3Model, Z3Params, Z3Solver, Z3Symbol};

native_group! {
    SOLVER = "Solver";
    required {
        fn mk_solver = "Z3_mk_solver"(ctx: Z3Context) -> Z3Solver;
        fn mk_simple_solver = "Z3_mk_simple_solver"(ctx: Z3Context) -> Z3Solver;
        fn solver_inc_ref = "Z3_solver_inc_ref"(ctx: Z3Context, solver: Z3Solver);
        fn solver_dec_ref = "Z3_solver_dec_ref"(ctx: Z3Context, solver: Z3Solver);
        fn solver_assert = "Z3_solver_assert"(ctx: Z3Context, solver: Z3Solver, ast: Z3Ast);
        /// `Z3_lbool`: -1 unsat, 0 unknown, 1 sat.
        fn solver_check = "Z3_solver_check"(ctx: Z3Context, solver: Z3Solver) -> c_int;
        fn solver_get_model = "Z3_solver_get_model"(ctx: Z3Context, solver: Z3Solver) -> Z3Model;
    }
    optional {
        fn solver_push = "Z3_solver_push"(ctx: Z3Context, solver: Z3Solver);
        fn solver_pop = "Z3_solver_pop"(ctx: Z3Context, solver: Z3Solver, num_scopes: c_uint);
        fn solver_reset = "Z3_solver_reset"(ctx: Z3Context, solver: Z3Solver);
        fn solver_get_reason_unknown = "Z3_solver_get_reason_unknown"(ctx: Z3Context, solver: Z3Solver) -> *const c_char;
        fn solver_set_params = "Z3_solver_set_params"(ctx: Z3Context, solver: Z3Solver, params: Z3Params);
    }
}

native_group! {
    MODEL = "Model";
    required {
        fn model_inc_ref = "Z3_model_inc_ref"(ctx: Z3Context, model: Z3Model);
        fn model_dec_ref = "Z3_model_dec_ref"(ctx: Z3Context, model: Z3Model);
        fn model_to_string = "Z3_model_to_string"(ctx: Z3Context, model: Z3Model) -> *const c_char;
        fn model_eval = "Z3_model_eval"(
            ctx: Z3Context,
            model: Z3Model,
            ast: Z3Ast,
            completion: bool,
            out: *mut Z3Ast,
        ) -> bool;
    }
    optional {}
}

native_group! {
    PARAMETERS = "Parameters";
    required {}
    optional {
        fn mk_params = "Z3_mk_params"(ctx: Z3Context) -> Z3Params;
        fn params_inc_ref = "Z3_params_inc_ref"(ctx: Z3Context, params: Z3Params);
        fn params_dec_ref = "Z3_params_dec_ref"(ctx: Z3Context, params: Z3Params);
        fn params_set_bool = "Z3_params_set_bool"(ctx: Z3Context, params: Z3Params, key: Z3Symbol, value: bool);
        fn params_set_uint = "Z3_params_set_uint"(ctx: Z3Context, params: Z3Params, key: Z3Symbol, value: c_uint);
        fn params_set_double = "Z3_params_set_double"(ctx: Z3Context, params: Z3Params, key: Z3Symbol, value: f64);
        fn params_to_string = "Z3_params_to_string"(ctx: Z3Context, params: Z3Params) -> *const c_char;
    }
}
