use z3::{
    ast::{self, Ast},
    Context, Sort,
};

use common::KindId;

use super::{Bitwise, Kind};
use crate::ValueError;

/// Truth values. Only the logical connectives and (in)equality apply.
pub struct BoolKind;

impl Kind for BoolKind {
    type Native = bool;
    type Term<'ctx> = ast::Bool<'ctx>;

    const ID: KindId = KindId::Bool;

    fn sort(ctx: &Context) -> Sort<'_> {
        Sort::bool(ctx)
    }

    fn fresh_const<'ctx>(ctx: &'ctx Context, prefix: &str) -> ast::Bool<'ctx> {
        ast::Bool::fresh_const(ctx, prefix)
    }

    fn literal<'ctx>(ctx: &'ctx Context, value: &bool) -> Result<ast::Bool<'ctx>, ValueError> {
        Ok(ast::Bool::from_bool(ctx, *value))
    }

    fn read_numeral(term: &ast::Bool<'_>) -> Option<bool> {
        term.as_bool()
    }
}

impl Bitwise for BoolKind {
    fn and(a: &bool, b: &bool) -> bool {
        *a && *b
    }

    fn or(a: &bool, b: &bool) -> bool {
        *a || *b
    }

    fn xor(a: &bool, b: &bool) -> bool {
        a != b
    }

    fn not(a: &bool) -> bool {
        !a
    }

    fn sym_and<'ctx>(a: &ast::Bool<'ctx>, b: &ast::Bool<'ctx>) -> ast::Bool<'ctx> {
        ast::Bool::and(a.get_ctx(), &[a, b])
    }

    fn sym_or<'ctx>(a: &ast::Bool<'ctx>, b: &ast::Bool<'ctx>) -> ast::Bool<'ctx> {
        ast::Bool::or(a.get_ctx(), &[a, b])
    }

    fn sym_xor<'ctx>(a: &ast::Bool<'ctx>, b: &ast::Bool<'ctx>) -> ast::Bool<'ctx> {
        a.xor(b)
    }

    fn sym_not<'ctx>(a: &ast::Bool<'ctx>) -> ast::Bool<'ctx> {
        a.not()
    }
}
