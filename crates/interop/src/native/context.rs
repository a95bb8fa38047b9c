// Configuration, context lifecycle, error state and version entry points.

use std::ffi::{c_char, c_int, c_uint};

use crate::error::Z3Error;
use crate::handles::{Z3Ast, Z3Config, Z3Context};

/// Prototype of a callback accepted by `Z3_set_error_handler`.
pub type ErrorHandler = unsafe extern "C" fn(ctx: Z3Context, code: c_int);

native_group! {
    CONTEXT = "Context";
    required {
        fn mk_config = "Z3_mk_config"() -> Z3Config;
        fn del_config = "Z3_del_config"(cfg: Z3Config);
        fn mk_context_rc = "Z3_mk_context_rc"(cfg: Z3Config) -> Z3Context;
        fn del_context = "Z3_del_context"(ctx: Z3Context);
        fn inc_ref = "Z3_inc_ref"(ctx: Z3Context, ast: Z3Ast);
        fn dec_ref = "Z3_dec_ref"(ctx: Z3Context, ast: Z3Ast);
    }
    optional {
        fn set_param_value = "Z3_set_param_value"(cfg: Z3Config, id: *const c_char, value: *const c_char);
        fn update_param_value = "Z3_update_param_value"(ctx: Z3Context, id: *const c_char, value: *const c_char);
        fn interrupt = "Z3_interrupt"(ctx: Z3Context);
    }
}

native_group! {
    ERROR_HANDLING = "ErrorHandling";
    required {
        fn get_error_code = "Z3_get_error_code"(ctx: Z3Context) -> c_int;
        /// The returned string is owned by the context.
        fn get_error_msg = "Z3_get_error_msg"(ctx: Z3Context, code: c_int) -> *const c_char;
        fn set_error_handler = "Z3_set_error_handler"(ctx: Z3Context, handler: Option<ErrorHandler>);
        fn set_error = "Z3_set_error"(ctx: Z3Context, code: c_int);
    }
    optional {}
}

native_group! {
    MISCELLANEOUS = "Miscellaneous";
    required {
        fn get_version = "Z3_get_version"(
            major: *mut c_uint,
            minor: *mut c_uint,
            build: *mut c_uint,
            revision: *mut c_uint,
        );
    }
    optional {
        fn get_full_version = "Z3_get_full_version"() -> *const c_char;
    }
}
