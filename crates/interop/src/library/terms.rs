// Symbols, sorts and expressions. Every method here is checked.

use crate::error::Z3Error;
use crate::handles::{Z3Ast, Z3Context, Z3Sort, Z3Symbol};
use crate::strings::NativeString;

use super::{Z3Library, arg_count};

impl Z3Library {
    /// Intern `name` as a string symbol.
    pub unsafe fn mk_string_symbol(&self, ctx: Z3Context, name: &str) -> Result<Z3Symbol, Z3Error> {
        let name = NativeString::new(name)?;
        unsafe { self.checked(ctx, |n| n.mk_string_symbol(ctx, name.as_ptr())) }
    }

    /// Text of a string symbol, copied out of the context.
    pub unsafe fn get_symbol_string(
        &self,
        ctx: Z3Context,
        symbol: Z3Symbol,
    ) -> Result<String, Z3Error> {
        unsafe {
            self.checked_string(ctx, "get_symbol_string", |n| {
                n.get_symbol_string(ctx, symbol)
            })
        }
    }

    /// The boolean sort.
    pub unsafe fn mk_bool_sort(&self, ctx: Z3Context) -> Result<Z3Sort, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_bool_sort", |n| n.mk_bool_sort(ctx)) }
    }

    /// The unbounded integer sort.
    pub unsafe fn mk_int_sort(&self, ctx: Z3Context) -> Result<Z3Sort, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_int_sort", |n| n.mk_int_sort(ctx)) }
    }

    /// The real sort.
    pub unsafe fn mk_real_sort(&self, ctx: Z3Context) -> Result<Z3Sort, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_real_sort", |n| n.mk_real_sort(ctx)) }
    }

    /// Bit-vectors of `size` bits. Zero is a native error.
    pub unsafe fn mk_bv_sort(&self, ctx: Z3Context, size: u32) -> Result<Z3Sort, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_bv_sort", |n| n.mk_bv_sort(ctx, size)) }
    }

    /// Sort of `ast`.
    pub unsafe fn get_sort(&self, ctx: Z3Context, ast: Z3Ast) -> Result<Z3Sort, Z3Error> {
        unsafe { self.checked_handle(ctx, "get_sort", |n| n.get_sort(ctx, ast)) }
    }

    /// SMT-LIB text of a sort.
    pub unsafe fn sort_to_string(&self, ctx: Z3Context, sort: Z3Sort) -> Result<String, Z3Error> {
        unsafe { self.checked_string(ctx, "sort_to_string", |n| n.sort_to_string(ctx, sort)) }
    }

    /// Uninterpreted constant named `symbol`.
    pub unsafe fn mk_const(
        &self,
        ctx: Z3Context,
        symbol: Z3Symbol,
        sort: Z3Sort,
    ) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_const", |n| n.mk_const(ctx, symbol, sort)) }
    }

    /// The literal `true`.
    pub unsafe fn mk_true(&self, ctx: Z3Context) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_true", |n| n.mk_true(ctx)) }
    }

    /// The literal `false`.
    pub unsafe fn mk_false(&self, ctx: Z3Context) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_false", |n| n.mk_false(ctx)) }
    }

    /// Numeral of `sort` from its decimal (or `p/q` rational) text.
    pub unsafe fn mk_numeral(
        &self,
        ctx: Z3Context,
        numeral: &str,
        sort: Z3Sort,
    ) -> Result<Z3Ast, Z3Error> {
        let numeral = NativeString::new(numeral)?;
        unsafe {
            self.checked_handle(ctx, "mk_numeral", |n| {
                n.mk_numeral(ctx, numeral.as_ptr(), sort)
            })
        }
    }

    /// `lhs = rhs`. Both sides must share a sort.
    pub unsafe fn mk_eq(&self, ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_eq", |n| n.mk_eq(ctx, lhs, rhs)) }
    }

    /// Boolean negation.
    pub unsafe fn mk_not(&self, ctx: Z3Context, arg: Z3Ast) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_not", |n| n.mk_not(ctx, arg)) }
    }

    /// Conjunction of `args`.
    pub unsafe fn mk_and(&self, ctx: Z3Context, args: &[Z3Ast]) -> Result<Z3Ast, Z3Error> {
        let count = arg_count(args)?;
        unsafe { self.checked_handle(ctx, "mk_and", |n| n.mk_and(ctx, count, args.as_ptr())) }
    }

    /// Disjunction of `args`.
    pub unsafe fn mk_or(&self, ctx: Z3Context, args: &[Z3Ast]) -> Result<Z3Ast, Z3Error> {
        let count = arg_count(args)?;
        unsafe { self.checked_handle(ctx, "mk_or", |n| n.mk_or(ctx, count, args.as_ptr())) }
    }

    /// Arithmetic sum of `args`.
    pub unsafe fn mk_add(&self, ctx: Z3Context, args: &[Z3Ast]) -> Result<Z3Ast, Z3Error> {
        let count = arg_count(args)?;
        unsafe { self.checked_handle(ctx, "mk_add", |n| n.mk_add(ctx, count, args.as_ptr())) }
    }

    /// `lhs < rhs` over integers or reals.
    pub unsafe fn mk_lt(&self, ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_lt", |n| n.mk_lt(ctx, lhs, rhs)) }
    }

    /// `lhs > rhs` over integers or reals.
    pub unsafe fn mk_gt(&self, ctx: Z3Context, lhs: Z3Ast, rhs: Z3Ast) -> Result<Z3Ast, Z3Error> {
        unsafe { self.checked_handle(ctx, "mk_gt", |n| n.mk_gt(ctx, lhs, rhs)) }
    }

    /// SMT-LIB text of an expression.
    pub unsafe fn ast_to_string(&self, ctx: Z3Context, ast: Z3Ast) -> Result<String, Z3Error> {
        unsafe { self.checked_string(ctx, "ast_to_string", |n| n.ast_to_string(ctx, ast)) }
    }

    /// Decimal text of a numeral. Anything else is a native error.
    pub unsafe fn get_numeral_string(
        &self,
        ctx: Z3Context,
        ast: Z3Ast,
    ) -> Result<String, Z3Error> {
        unsafe {
            self.checked_string(ctx, "get_numeral_string", |n| {
                n.get_numeral_string(ctx, ast)
            })
        }
    }

    /// `Some(true)`/`Some(false)` for the boolean literals, `None` otherwise.
    pub unsafe fn get_bool_value(
        &self,
        ctx: Z3Context,
        ast: Z3Ast,
    ) -> Result<Option<bool>, Z3Error> {
        let value = unsafe { self.checked(ctx, |n| n.get_bool_value(ctx, ast))? };
        Ok(match value {
            1 => Some(true),
            -1 => Some(false),
            _ => None,
        })
    }
}
