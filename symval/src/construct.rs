//! Per-kind aliases and fixture constructors: `any_<kind>(ctx, name)` for a
//! fresh symbolic value and `<kind>(literal)` for a concrete one.

use num_bigint::BigInt;
use num_rational::BigRational;
use z3::Context;

use crate::{
    kinds::{BoolKind, Fixed, IntegerKind, RealKind},
    value::Value,
};

macro_rules! kind_constructors {
    ($($alias:ident = $kind:ty, $param:ty => $any:ident, $lit:ident;)*) => {
        $(
        pub type $alias<'ctx> = Value<'ctx, $kind>;

        #[inline]
        pub fn $any<'ctx>(ctx: &'ctx Context, name: &str) -> $alias<'ctx> {
            Value::fresh(ctx, name)
        }

        #[inline]
        pub fn $lit<'ctx>(value: $param) -> $alias<'ctx> {
            Value::from_literal(value.into())
        }
        )*
    };
}

kind_constructors! {
    Bool = BoolKind, bool => any_bool, bool;
    Int8 = Fixed<i8>, i8 => any_int8, int8;
    Int16 = Fixed<i16>, i16 => any_int16, int16;
    Int32 = Fixed<i32>, i32 => any_int32, int32;
    Int64 = Fixed<i64>, i64 => any_int64, int64;
    Isize = Fixed<isize>, isize => any_isize, isize;
    Uint8 = Fixed<u8>, u8 => any_uint8, uint8;
    Uint16 = Fixed<u16>, u16 => any_uint16, uint16;
    Uint32 = Fixed<u32>, u32 => any_uint32, uint32;
    Uint64 = Fixed<u64>, u64 => any_uint64, uint64;
    Usize = Fixed<usize>, usize => any_usize, usize;
    Integer = IntegerKind, impl Into<BigInt> => any_integer, integer;
    Real = RealKind, impl Into<BigRational> => any_real, real;
}

/// A rational literal `numer / denom`. Panics on a zero denominator.
pub fn ratio<'ctx>(numer: i64, denom: i64) -> Real<'ctx> {
    Value::from_literal(BigRational::new(numer.into(), denom.into()))
}
