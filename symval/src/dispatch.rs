//! Runtime selection of a value operator from the operator table's codes.

use common::{BinaryOp, UnaryOp};

use crate::{
    kinds::{BoolKind, Fixed, IntegerKind, Kind, RealKind},
    value::{Outcome, Value},
    wrap::WrapSemantics,
    ValueError,
};

type BinaryResult<'ctx, K> = Option<Result<Outcome<'ctx, K>, ValueError>>;

/// Applies operators by code. Every kind answers every code; the ones the
/// kind does not define yield [`ValueError::UnsupportedOp`].
pub trait Dispatch: Kind {
    fn apply_binary<'ctx>(
        op: BinaryOp,
        a: &Value<'ctx, Self>,
        b: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError>;

    fn apply_unary<'ctx>(
        op: UnaryOp,
        a: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError>;

    /// Inputs on which the native and the symbolic semantics are allowed to
    /// part ways: zero divisors, and shift amounts not less than the width.
    fn is_excluded_input(op: BinaryOp, a: &Self::Native, b: &Self::Native) -> bool;
}

fn unsupported<K: Kind>(op: &'static str) -> ValueError {
    ValueError::UnsupportedOp {
        kind: K::name(),
        op,
    }
}

/// Operator families. Each one answers the codes it owns and passes on the rest.
mod family {
    use super::*;
    use crate::kinds::{Arith, Bitwise, Order, Remainder, Shift};

    pub(super) fn equality<'ctx, K: Kind>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        let result = match op {
            BinaryOp::Eq => a.eq(b),
            BinaryOp::Ne => a.ne(b),
            _ => return None,
        };
        Some(result.map(Outcome::Truth))
    }

    pub(super) fn arith<'ctx, K: Arith>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        let result = match op {
            BinaryOp::Add => a.add(b),
            BinaryOp::Sub => a.sub(b),
            BinaryOp::Mul => a.mul(b),
            BinaryOp::Div => a.div(b),
            _ => return None,
        };
        Some(result.map(Outcome::Value))
    }

    pub(super) fn remainder<'ctx, K: Remainder>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        match op {
            BinaryOp::Rem => Some(a.rem(b).map(Outcome::Value)),
            _ => None,
        }
    }

    pub(super) fn bitwise<'ctx, K: Bitwise>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        let result = match op {
            BinaryOp::BitAnd => a.bitand(b),
            BinaryOp::BitOr => a.bitor(b),
            BinaryOp::BitXor => a.bitxor(b),
            _ => return None,
        };
        Some(result.map(Outcome::Value))
    }

    pub(super) fn shift<'ctx, K: Shift>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        let result = match op {
            BinaryOp::Shl => a.shl(b),
            BinaryOp::Shr => a.shr(b),
            _ => return None,
        };
        Some(result.map(Outcome::Value))
    }

    pub(super) fn order<'ctx, K: Order>(
        op: BinaryOp,
        a: &Value<'ctx, K>,
        b: &Value<'ctx, K>,
    ) -> BinaryResult<'ctx, K> {
        let result = match op {
            BinaryOp::Lt => a.lt(b),
            BinaryOp::Le => a.le(b),
            BinaryOp::Gt => a.gt(b),
            BinaryOp::Ge => a.ge(b),
            _ => return None,
        };
        Some(result.map(Outcome::Truth))
    }

    pub(super) fn arith_unary<'ctx, K: Arith>(
        op: UnaryOp,
        a: &Value<'ctx, K>,
    ) -> Option<Outcome<'ctx, K>> {
        match op {
            UnaryOp::Pos => Some(Outcome::Value(a.pos())),
            UnaryOp::Neg => Some(Outcome::Value(a.neg())),
            _ => None,
        }
    }

    pub(super) fn bitwise_unary<'ctx, K: Bitwise>(
        op: UnaryOp,
        a: &Value<'ctx, K>,
    ) -> Option<Outcome<'ctx, K>> {
        match op {
            UnaryOp::Not => Some(Outcome::Value(a.not())),
            _ => None,
        }
    }
}

/// Chains the families a kind implements, in order, ending with an unsupported error.
macro_rules! dispatch_chain {
    ($kind:ty, $op:expr, $($arg:expr),+; $($family:ident),+) => {{
        let op = $op;
        None
            $(.or_else(|| family::$family::<$kind>(op, $($arg),+)))+
            .unwrap_or_else(|| Err(unsupported::<$kind>(op.symbol())))
    }};
}

macro_rules! dispatch_unary_chain {
    ($kind:ty, $op:expr, $arg:expr; $($family:ident),+) => {{
        let op = $op;
        None
            $(.or_else(|| family::$family::<$kind>(op, $arg)))+
            .ok_or_else(|| unsupported::<$kind>(op.symbol()))
    }};
}

impl<T: WrapSemantics> Dispatch for Fixed<T> {
    fn apply_binary<'ctx>(
        op: BinaryOp,
        a: &Value<'ctx, Self>,
        b: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_chain!(Self, op, a, b; equality, arith, remainder, bitwise, shift, order)
    }

    fn apply_unary<'ctx>(
        op: UnaryOp,
        a: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_unary_chain!(Self, op, a; arith_unary, bitwise_unary)
    }

    fn is_excluded_input(op: BinaryOp, _a: &T, b: &T) -> bool {
        match op {
            BinaryOp::Div | BinaryOp::Rem => b.is_zero(),
            BinaryOp::Shl | BinaryOp::Shr => !b.is_shift_in_range(),
            _ => false,
        }
    }
}

impl Dispatch for BoolKind {
    fn apply_binary<'ctx>(
        op: BinaryOp,
        a: &Value<'ctx, Self>,
        b: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_chain!(Self, op, a, b; equality, bitwise)
    }

    fn apply_unary<'ctx>(
        op: UnaryOp,
        a: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_unary_chain!(Self, op, a; bitwise_unary)
    }

    fn is_excluded_input(_op: BinaryOp, _a: &bool, _b: &bool) -> bool {
        false
    }
}

impl Dispatch for IntegerKind {
    fn apply_binary<'ctx>(
        op: BinaryOp,
        a: &Value<'ctx, Self>,
        b: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_chain!(Self, op, a, b; equality, arith, remainder, order)
    }

    fn apply_unary<'ctx>(
        op: UnaryOp,
        a: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_unary_chain!(Self, op, a; arith_unary)
    }

    fn is_excluded_input(op: BinaryOp, _a: &Self::Native, b: &Self::Native) -> bool {
        use num_traits::Zero;
        matches!(op, BinaryOp::Div | BinaryOp::Rem) && b.is_zero()
    }
}

impl Dispatch for RealKind {
    fn apply_binary<'ctx>(
        op: BinaryOp,
        a: &Value<'ctx, Self>,
        b: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_chain!(Self, op, a, b; equality, arith, order)
    }

    fn apply_unary<'ctx>(
        op: UnaryOp,
        a: &Value<'ctx, Self>,
    ) -> Result<Outcome<'ctx, Self>, ValueError> {
        dispatch_unary_chain!(Self, op, a; arith_unary)
    }

    fn is_excluded_input(op: BinaryOp, _a: &Self::Native, b: &Self::Native) -> bool {
        use num_traits::Zero;
        op == BinaryOp::Div && b.is_zero()
    }
}
