// Symbols, sorts and expression construction.

use std::ffi::{c_char, c_int, c_uint};

use crate::error::Z3Error;
use crate::handles::{Z3Ast, Z3Context, Z3Sort, Z3Symbol};

native_group! {
    SYMBOLS = "Symbols";
    required {
        fn mk_string_symbol = "Z3_mk_string_symbol"(ctx: Z3Context, name: *const c_char) -> Z3Symbol;
        fn get_symbol_string = "Z3_get_symbol_string"(ctx: Z3Context, symbol: Z3Symbol) -> *const c_char;
    }
    optional {}
}

native_group! {
    SORTS = "Sorts";
    required {
        fn mk_bool_sort = "Z3_mk_bool_sort"(ctx: Z3Context) -> Z3Sort;
        fn mk_int_sort = "Z3_mk_int_sort"(ctx: Z3Context) -> Z3Sort;
        fn mk_real_sort = "Z3_mk_real_sort"(ctx: Z3Context) -> Z3Sort;
        fn mk_bv_sort = "Z3_mk_bv_sort"(ctx: Z3Context, size: c_uint) -> Z3Sort;
        fn get_sort = "Z3_get_sort"(ctx: Z3Context, ast: Z3Ast) -> Z3Sort;
        fn sort_to_string = "Z3_sort_to_string"(ctx: Z3Context, sort: Z3Sort) -> *const c_char;
    }
    optional {}
}

native_group! {
    EXPRESSIONS = "Expressions";
    required {
        fn mk_const = "Z3_mk_const"(ctx: Z3Context, symbol: Z3Symbol, sort: Z3Sort) -> Z3Ast;
        fn mk_true = "Z3_mk_true"(ctx: Z3Context) -> Z3Ast;
        fn mk_false = "Z3_mk_false"(ctx: Z3Context) -> Z3Ast;
        fn mk_numeral = "Z3_mk_numeral"(ctx: Z3Context, numeral: *const c_char, sort: Z3Sort) -> Z3Ast;
        fn mk_eq = "Z3_mk_eq"(ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Z3Ast;
        fn mk_not = "Z3_mk_not"(ctx: Z3Context, arg: Z3Ast) -> Z3Ast;
        fn mk_and = "Z3_mk_and"(ctx: Z3Context, num_args: c_uint, args: *const Z3Ast) -> Z3Ast;
        fn mk_or = "Z3_mk_or"(ctx: Z3Context, num_args: c_uint, args: *const Z3Ast) -> Z3Ast;
        fn mk_add = "Z3_mk_add"(ctx: Z3Context, num_args: c_uint, args: *const Z3Ast) -> Z3Ast;
        fn mk_lt = "Z3_mk_lt"(ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Z3Ast;
        fn mk_gt = "Z3_mk_gt"(ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Z3Ast;
        fn ast_to_string = "Z3_ast_to_string"(ctx: Z3Context, ast: Z3Ast) -> *const c_char;
        fn get_numeral_string = "Z3_get_numeral_string"(ctx: Z3Context, ast: Z3Ast) -> *const c_char;
        /// `Z3_lbool`: -1 false, 0 undefined, 1 true.
        fn get_bool_value = "Z3_get_bool_value"(ctx: Z3Context, ast: Z3Ast) -> c_int;
    }
    optional {}
}
