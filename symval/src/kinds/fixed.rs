use std::marker::PhantomData;

use z3::{
    ast::{self, Ast},
    Context, Sort,
};

use common::KindId;

use super::{Arith, Bitwise, Kind, Order, Remainder, Shift};
use crate::{wrap::WrapSemantics, ValueError};

/// Every fixed-width integer kind, parameterized by its native type.
/// The symbolic half is a bit vector of the same width; signedness only
/// selects between the signed and unsigned bit-vector operators.
pub struct Fixed<T>(PhantomData<T>);

impl<T: WrapSemantics> Kind for Fixed<T> {
    type Native = T;
    type Term<'ctx> = ast::BV<'ctx>;

    const ID: KindId = T::KIND;

    fn sort(ctx: &Context) -> Sort<'_> {
        Sort::bitvector(ctx, T::BITS)
    }

    fn fresh_const<'ctx>(ctx: &'ctx Context, prefix: &str) -> ast::BV<'ctx> {
        ast::BV::fresh_const(ctx, prefix, T::BITS)
    }

    fn literal<'ctx>(ctx: &'ctx Context, value: &T) -> Result<ast::BV<'ctx>, ValueError> {
        Ok(ast::BV::from_u64(ctx, value.to_bits(), T::BITS))
    }

    fn read_numeral(term: &ast::BV<'_>) -> Option<T> {
        debug_assert_eq!(term.get_size(), T::BITS);
        term.as_u64().map(T::from_bits)
    }
}

impl<T: WrapSemantics> Arith for Fixed<T> {
    fn add(a: &T, b: &T) -> T {
        a.wrap_add(*b)
    }

    fn sub(a: &T, b: &T) -> T {
        a.wrap_sub(*b)
    }

    fn mul(a: &T, b: &T) -> T {
        a.wrap_mul(*b)
    }

    fn div(a: &T, b: &T) -> Option<T> {
        a.wrap_div(*b)
    }

    fn neg(a: &T) -> T {
        a.wrap_neg()
    }

    fn sym_add<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvadd(b)
    }

    fn sym_sub<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvsub(b)
    }

    fn sym_mul<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvmul(b)
    }

    fn sym_div<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        if T::SIGNED {
            a.bvsdiv(b)
        } else {
            a.bvudiv(b)
        }
    }

    fn sym_neg<'ctx>(a: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvneg()
    }
}

impl<T: WrapSemantics> Remainder for Fixed<T> {
    fn rem(a: &T, b: &T) -> Option<T> {
        a.wrap_rem(*b)
    }

    fn sym_rem<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        // NOTE: `bvsrem` (sign of the dividend), not `bvsmod` (sign of the divisor).
        if T::SIGNED {
            a.bvsrem(b)
        } else {
            a.bvurem(b)
        }
    }
}

impl<T: WrapSemantics> Bitwise for Fixed<T> {
    fn and(a: &T, b: &T) -> T {
        a.bit_and(*b)
    }

    fn or(a: &T, b: &T) -> T {
        a.bit_or(*b)
    }

    fn xor(a: &T, b: &T) -> T {
        a.bit_xor(*b)
    }

    fn not(a: &T) -> T {
        a.bit_not()
    }

    fn sym_and<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvand(b)
    }

    fn sym_or<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvor(b)
    }

    fn sym_xor<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvxor(b)
    }

    fn sym_not<'ctx>(a: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvnot()
    }
}

impl<T: WrapSemantics> Shift for Fixed<T> {
    fn shl(a: &T, amount: &T) -> T {
        a.shift_left(*amount)
    }

    fn shr(a: &T, amount: &T) -> T {
        a.shift_right(*amount)
    }

    fn sym_shl<'ctx>(a: &ast::BV<'ctx>, amount: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        a.bvshl(amount)
    }

    fn sym_shr<'ctx>(a: &ast::BV<'ctx>, amount: &ast::BV<'ctx>) -> ast::BV<'ctx> {
        if T::SIGNED {
            a.bvashr(amount)
        } else {
            a.bvlshr(amount)
        }
    }
}

impl<T: WrapSemantics> Order for Fixed<T> {
    fn sym_lt<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::Bool<'ctx> {
        if T::SIGNED {
            a.bvslt(b)
        } else {
            a.bvult(b)
        }
    }

    fn sym_le<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::Bool<'ctx> {
        if T::SIGNED {
            a.bvsle(b)
        } else {
            a.bvule(b)
        }
    }

    fn sym_gt<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::Bool<'ctx> {
        if T::SIGNED {
            a.bvsgt(b)
        } else {
            a.bvugt(b)
        }
    }

    fn sym_ge<'ctx>(a: &ast::BV<'ctx>, b: &ast::BV<'ctx>) -> ast::Bool<'ctx> {
        if T::SIGNED {
            a.bvsge(b)
        } else {
            a.bvuge(b)
        }
    }
}
