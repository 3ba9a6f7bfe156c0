use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use z3::{
    ast::{self, Ast},
    Context, Sort,
};

use common::KindId;

use super::{Arith, Kind, Order, Remainder};
use crate::{solvers::z3::NumeralExt, ValueError};

/// Arbitrary-precision integers, paired with the `Int` sort.
///
/// Division and remainder follow the integer theory: the remainder is never
/// negative, and the quotient is whatever makes `a = b * q + r` hold.
/// For positive divisors this is floor division.
pub struct IntegerKind;

/// Quotient and remainder with `0 <= r < |b|`.
fn div_rem_euclid(a: &BigInt, b: &BigInt) -> Option<(BigInt, BigInt)> {
    if b.is_zero() {
        return None;
    }

    let (mut q, mut r) = a.div_rem(b);
    if r.is_negative() {
        if b.is_positive() {
            q -= BigInt::one();
            r += b;
        } else {
            q += BigInt::one();
            r -= b;
        }
    }
    Some((q, r))
}

impl Kind for IntegerKind {
    type Native = BigInt;
    type Term<'ctx> = ast::Int<'ctx>;

    const ID: KindId = KindId::Integer;

    fn sort(ctx: &Context) -> Sort<'_> {
        Sort::int(ctx)
    }

    fn fresh_const<'ctx>(ctx: &'ctx Context, prefix: &str) -> ast::Int<'ctx> {
        ast::Int::fresh_const(ctx, prefix)
    }

    fn literal<'ctx>(ctx: &'ctx Context, value: &BigInt) -> Result<ast::Int<'ctx>, ValueError> {
        let literal = value.to_string();
        ast::Int::from_str(ctx, &literal).ok_or_else(|| ValueError::InvalidLiteral {
            kind: Self::name(),
            literal,
        })
    }

    fn read_numeral(term: &ast::Int<'_>) -> Option<BigInt> {
        term.numeral_string()?.parse().ok()
    }
}

impl Arith for IntegerKind {
    fn add(a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    fn sub(a: &BigInt, b: &BigInt) -> BigInt {
        a - b
    }

    fn mul(a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }

    fn div(a: &BigInt, b: &BigInt) -> Option<BigInt> {
        div_rem_euclid(a, b).map(|(q, _)| q)
    }

    fn neg(a: &BigInt) -> BigInt {
        -a
    }

    fn sym_add<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        ast::Int::add(a.get_ctx(), &[a, b])
    }

    fn sym_sub<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        ast::Int::sub(a.get_ctx(), &[a, b])
    }

    fn sym_mul<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        ast::Int::mul(a.get_ctx(), &[a, b])
    }

    fn sym_div<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        a.div(b)
    }

    fn sym_neg<'ctx>(a: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        a.unary_minus()
    }
}

impl Remainder for IntegerKind {
    fn rem(a: &BigInt, b: &BigInt) -> Option<BigInt> {
        div_rem_euclid(a, b).map(|(_, r)| r)
    }

    fn sym_rem<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Int<'ctx> {
        // `mod` is the theory's non-negative remainder. `rem` differs for negative divisors.
        a.modulo(b)
    }
}

impl Order for IntegerKind {
    fn sym_lt<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Bool<'ctx> {
        a.lt(b)
    }

    fn sym_le<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Bool<'ctx> {
        a.le(b)
    }

    fn sym_gt<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Bool<'ctx> {
        a.gt(b)
    }

    fn sym_ge<'ctx>(a: &ast::Int<'ctx>, b: &ast::Int<'ctx>) -> ast::Bool<'ctx> {
        a.ge(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euclid(a: i64, b: i64) -> (i64, i64) {
        let (q, r) = div_rem_euclid(&a.into(), &b.into()).unwrap();
        (q.try_into().unwrap(), r.try_into().unwrap())
    }

    #[test]
    fn remainder_is_never_negative() {
        assert_eq!(euclid(23, 5), (4, 3));
        assert_eq!(euclid(-23, 5), (-5, 2));
        assert_eq!(euclid(23, -5), (-4, 3));
        assert_eq!(euclid(-23, -5), (5, 2));
        assert_eq!(euclid(-20, 5), (-4, 0));
    }

    #[test]
    fn zero_divisor() {
        assert!(div_rem_euclid(&BigInt::from(1), &BigInt::zero()).is_none());
    }
}
