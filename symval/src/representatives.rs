use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::{
    kinds::{BoolKind, Fixed, IntegerKind, Kind, RealKind},
    wrap::WrapSemantics,
};

/// The curated boundary literals the oracle runs for a kind.
pub trait Representatives: Kind {
    fn representatives() -> Vec<Self::Native>;
}

impl<T: WrapSemantics> Representatives for Fixed<T> {
    /// Zero, one, minus one (signed only), the width and its predecessor
    /// (the last valid shift amount), the half-width power of two and both extrema.
    fn representatives() -> Vec<T> {
        let mut values = vec![T::from_i64_wrapping(0), T::from_i64_wrapping(1)];
        if T::SIGNED {
            values.push(T::from_i64_wrapping(-1));
        }
        values.extend([
            T::from_i64_wrapping(T::BITS as i64 - 1),
            T::from_i64_wrapping(T::BITS as i64),
            T::from_bits(1 << (T::BITS / 2)),
            T::MAX,
            T::MIN,
        ]);
        values.into_iter().unique().collect()
    }
}

impl Representatives for BoolKind {
    fn representatives() -> Vec<bool> {
        vec![false, true]
    }
}

impl Representatives for IntegerKind {
    /// Small values around zero, a pair that exposes floor against truncation,
    /// and values past the 64-bit range.
    fn representatives() -> Vec<BigInt> {
        let big = BigInt::one() << 64;
        vec![
            BigInt::zero(),
            BigInt::one(),
            -BigInt::one(),
            BigInt::from(5),
            BigInt::from(-5),
            BigInt::from(23),
            BigInt::from(-23),
            -big.clone(),
            big,
        ]
    }
}

impl Representatives for RealKind {
    fn representatives() -> Vec<BigRational> {
        let ratio = |n: i64, d: i64| BigRational::new(n.into(), d.into());
        vec![
            BigRational::zero(),
            BigRational::one(),
            -BigRational::one(),
            ratio(1, 2),
            ratio(-3, 4),
            ratio(7, 3),
            BigRational::from_integer(BigInt::from(10).pow(20)),
        ]
    }
}
