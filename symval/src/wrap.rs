use std::{fmt, hash::Hash};

use common::KindId;

/// Native arithmetic of a fixed-width integer, written to agree bit for bit
/// with the bit-vector theory.
///
/// - Addition, subtraction, multiplication and negation wrap (two's complement).
/// - Signed division truncates toward zero and the remainder takes the sign of
///   the dividend (`bvsdiv`, `bvsrem`); `MIN / -1` wraps to `MIN`.
/// - The shift amount is read as an unsigned bit pattern; amounts not less than
///   the width shift everything out (sign fill for signed right shifts), as
///   `bvshl`, `bvlshr` and `bvashr` do.
pub trait WrapSemantics:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const KIND: KindId;
    const BITS: u32;
    const SIGNED: bool;
    const MIN: Self;
    const MAX: Self;

    fn wrap_add(self, rhs: Self) -> Self;
    fn wrap_sub(self, rhs: Self) -> Self;
    fn wrap_mul(self, rhs: Self) -> Self;
    /// `None` on a zero divisor.
    fn wrap_div(self, rhs: Self) -> Option<Self>;
    /// `None` on a zero divisor.
    fn wrap_rem(self, rhs: Self) -> Option<Self>;
    fn wrap_neg(self) -> Self;

    fn bit_not(self) -> Self;
    fn bit_and(self, rhs: Self) -> Self;
    fn bit_or(self, rhs: Self) -> Self;
    fn bit_xor(self, rhs: Self) -> Self;
    fn shift_left(self, amount: Self) -> Self;
    fn shift_right(self, amount: Self) -> Self;

    /// The bit pattern, zero-extended to 64 bits.
    fn to_bits(self) -> u64;
    /// Truncates `bits` to the width and reinterprets it.
    fn from_bits(bits: u64) -> Self;
    fn from_i64_wrapping(value: i64) -> Self;

    #[inline]
    fn is_zero(self) -> bool {
        self.to_bits() == 0
    }

    /// Whether the value, read as a shift amount, stays inside the width.
    #[inline]
    fn is_shift_in_range(self) -> bool {
        self.to_bits() < Self::BITS as u64
    }
}

macro_rules! impl_wrap_semantics {
    ($($ty:ty as $uty:ty => $kind:ident, signed: $signed:literal;)*) => {
        $(
        impl WrapSemantics for $ty {
            const KIND: KindId = KindId::$kind;
            const BITS: u32 = <$ty>::BITS;
            const SIGNED: bool = $signed;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn wrap_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn wrap_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn wrap_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn wrap_div(self, rhs: Self) -> Option<Self> {
                (rhs != 0).then(|| self.wrapping_div(rhs))
            }

            #[inline]
            fn wrap_rem(self, rhs: Self) -> Option<Self> {
                (rhs != 0).then(|| self.wrapping_rem(rhs))
            }

            #[inline]
            fn wrap_neg(self) -> Self {
                self.wrapping_neg()
            }

            #[inline]
            fn bit_not(self) -> Self {
                !self
            }

            #[inline]
            fn bit_and(self, rhs: Self) -> Self {
                self & rhs
            }

            #[inline]
            fn bit_or(self, rhs: Self) -> Self {
                self | rhs
            }

            #[inline]
            fn bit_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            fn shift_left(self, amount: Self) -> Self {
                if amount.is_shift_in_range() {
                    self << amount.to_bits() as u32
                } else {
                    0
                }
            }

            fn shift_right(self, amount: Self) -> Self {
                if amount.is_shift_in_range() {
                    self >> amount.to_bits() as u32
                } else if Self::SIGNED {
                    // Arithmetic shift: only the sign survives.
                    self >> (Self::BITS - 1)
                } else {
                    0
                }
            }

            #[inline]
            fn to_bits(self) -> u64 {
                self as $uty as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $uty as $ty
            }

            #[inline]
            fn from_i64_wrapping(value: i64) -> Self {
                value as $ty
            }
        }
        )*
    };
}

impl_wrap_semantics! {
    i8 as u8 => Int8, signed: true;
    i16 as u16 => Int16, signed: true;
    i32 as u32 => Int32, signed: true;
    i64 as u64 => Int64, signed: true;
    isize as usize => Isize, signed: true;
    u8 as u8 => Uint8, signed: false;
    u16 as u16 => Uint16, signed: false;
    u32 as u32 => Uint32, signed: false;
    u64 as u64 => Uint64, signed: false;
    usize as usize => Usize, signed: false;
}
