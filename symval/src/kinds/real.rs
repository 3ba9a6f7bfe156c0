use num_rational::BigRational;
use num_traits::Zero;
use z3::{
    ast::{self, Ast},
    Context, Sort,
};

use common::KindId;

use super::{Arith, Kind, Order};
use crate::{solvers::z3::NumeralExt, ValueError};

/// Exact rationals, paired with the `Real` sort. There is no remainder.
pub struct RealKind;

impl Kind for RealKind {
    type Native = BigRational;
    type Term<'ctx> = ast::Real<'ctx>;

    const ID: KindId = KindId::Real;

    fn sort(ctx: &Context) -> Sort<'_> {
        Sort::real(ctx)
    }

    fn fresh_const<'ctx>(ctx: &'ctx Context, prefix: &str) -> ast::Real<'ctx> {
        ast::Real::fresh_const(ctx, prefix)
    }

    fn literal<'ctx>(
        ctx: &'ctx Context,
        value: &BigRational,
    ) -> Result<ast::Real<'ctx>, ValueError> {
        ast::Real::from_real_str(ctx, &value.numer().to_string(), &value.denom().to_string())
            .ok_or_else(|| ValueError::InvalidLiteral {
                kind: Self::name(),
                literal: value.to_string(),
            })
    }

    fn read_numeral(term: &ast::Real<'_>) -> Option<BigRational> {
        term.numeral_string()?.parse().ok()
    }
}

impl Arith for RealKind {
    fn add(a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn sub(a: &BigRational, b: &BigRational) -> BigRational {
        a - b
    }

    fn mul(a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn div(a: &BigRational, b: &BigRational) -> Option<BigRational> {
        (!b.is_zero()).then(|| a / b)
    }

    fn neg(a: &BigRational) -> BigRational {
        -a
    }

    fn sym_add<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Real<'ctx> {
        ast::Real::add(a.get_ctx(), &[a, b])
    }

    fn sym_sub<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Real<'ctx> {
        ast::Real::sub(a.get_ctx(), &[a, b])
    }

    fn sym_mul<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Real<'ctx> {
        ast::Real::mul(a.get_ctx(), &[a, b])
    }

    fn sym_div<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Real<'ctx> {
        a.div(b)
    }

    fn sym_neg<'ctx>(a: &ast::Real<'ctx>) -> ast::Real<'ctx> {
        a.unary_minus()
    }
}

impl Order for RealKind {
    fn sym_lt<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Bool<'ctx> {
        a.lt(b)
    }

    fn sym_le<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Bool<'ctx> {
        a.le(b)
    }

    fn sym_gt<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Bool<'ctx> {
        a.gt(b)
    }

    fn sym_ge<'ctx>(a: &ast::Real<'ctx>, b: &ast::Real<'ctx>) -> ast::Bool<'ctx> {
        a.ge(b)
    }
}
