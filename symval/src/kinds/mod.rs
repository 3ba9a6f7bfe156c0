//! The kind side of dual values: what the native and symbolic halves of each
//! kind are, and how every operator is computed on each half.

mod boolean;
mod fixed;
mod integer;
mod real;

use std::fmt;

use z3::{
    ast::{self, Ast},
    Context, Sort,
};

use common::{KindDescriptor, KindId, KindRegistry};

use crate::ValueError;

pub use boolean::BoolKind;
pub use fixed::Fixed;
pub use integer::IntegerKind;
pub use real::RealKind;

/// A value kind: a native representation paired with a solver sort.
pub trait Kind: Sized + 'static {
    type Native: Clone + fmt::Debug + fmt::Display + PartialEq + PartialOrd;
    type Term<'ctx>: Ast<'ctx> + Clone + fmt::Display;

    const ID: KindId;

    fn descriptor() -> &'static KindDescriptor {
        KindRegistry::global().describe(Self::ID)
    }

    #[inline]
    fn name() -> &'static str {
        Self::descriptor().name
    }

    fn sort(ctx: &Context) -> Sort<'_>;

    /// A free constant of the kind's sort, named uniquely after `prefix`.
    fn fresh_const<'ctx>(ctx: &'ctx Context, prefix: &str) -> Self::Term<'ctx>;

    fn literal<'ctx>(
        ctx: &'ctx Context,
        value: &Self::Native,
    ) -> Result<Self::Term<'ctx>, ValueError>;

    /// Reads a numeral term (e.g. a model value) back to the native value.
    /// Returns `None` for terms that are not numerals.
    fn read_numeral(term: &Self::Term<'_>) -> Option<Self::Native>;
}

/// `+ - * /` and prefix `-`.
pub trait Arith: Kind {
    fn add(a: &Self::Native, b: &Self::Native) -> Self::Native;
    fn sub(a: &Self::Native, b: &Self::Native) -> Self::Native;
    fn mul(a: &Self::Native, b: &Self::Native) -> Self::Native;
    /// `None` on a zero divisor.
    fn div(a: &Self::Native, b: &Self::Native) -> Option<Self::Native>;
    fn neg(a: &Self::Native) -> Self::Native;

    fn sym_add<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_sub<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_mul<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_div<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_neg<'ctx>(a: &Self::Term<'ctx>) -> Self::Term<'ctx>;
}

/// `%`
pub trait Remainder: Arith {
    /// `None` on a zero divisor.
    fn rem(a: &Self::Native, b: &Self::Native) -> Option<Self::Native>;

    fn sym_rem<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
}

/// `& | ^` and prefix `!`.
pub trait Bitwise: Kind {
    fn and(a: &Self::Native, b: &Self::Native) -> Self::Native;
    fn or(a: &Self::Native, b: &Self::Native) -> Self::Native;
    fn xor(a: &Self::Native, b: &Self::Native) -> Self::Native;
    fn not(a: &Self::Native) -> Self::Native;

    fn sym_and<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_or<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_xor<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_not<'ctx>(a: &Self::Term<'ctx>) -> Self::Term<'ctx>;
}

/// `<<` and `>>`. The amount is a value of the same kind.
pub trait Shift: Kind {
    fn shl(a: &Self::Native, amount: &Self::Native) -> Self::Native;
    fn shr(a: &Self::Native, amount: &Self::Native) -> Self::Native;

    fn sym_shl<'ctx>(a: &Self::Term<'ctx>, amount: &Self::Term<'ctx>) -> Self::Term<'ctx>;
    fn sym_shr<'ctx>(a: &Self::Term<'ctx>, amount: &Self::Term<'ctx>) -> Self::Term<'ctx>;
}

/// `< <= > >=`. The native side is the kind's `PartialOrd`.
pub trait Order: Kind {
    fn sym_lt<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> ast::Bool<'ctx>;
    fn sym_le<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> ast::Bool<'ctx>;
    fn sym_gt<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> ast::Bool<'ctx>;
    fn sym_ge<'ctx>(a: &Self::Term<'ctx>, b: &Self::Term<'ctx>) -> ast::Bool<'ctx>;
}
