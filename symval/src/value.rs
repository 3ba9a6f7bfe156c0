use std::fmt;

use z3::{
    ast::{self, Ast},
    Context,
};

use crate::{
    config::EvalMode,
    kinds::{Arith, Bitwise, BoolKind, Kind, Order, Remainder, Shift},
    solvers::z3::SessionModel,
    ValueError,
};

/// A value of kind `K` that is either computed natively or stands for a
/// solver term. Which one is fixed at construction.
///
/// Operators produce a symbolic value as soon as one operand is symbolic;
/// the concrete operand is then lifted to a literal of the other's context.
pub enum Value<'ctx, K: Kind> {
    Concrete(K::Native),
    Symbolic(K::Term<'ctx>),
}

impl<'ctx, K: Kind> Clone for Value<'ctx, K> {
    fn clone(&self) -> Self {
        match self {
            Self::Concrete(value) => Self::Concrete(value.clone()),
            Self::Symbolic(term) => Self::Symbolic(term.clone()),
        }
    }
}

impl<'ctx, K: Kind> fmt::Debug for Value<'ctx, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(value) => write!(f, "Concrete<{}>({:?})", K::name(), value),
            Self::Symbolic(term) => write!(f, "Symbolic<{}>({})", K::name(), term),
        }
    }
}

impl<'ctx, K: Kind> fmt::Display for Value<'ctx, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(value) => fmt::Display::fmt(value, f),
            Self::Symbolic(term) => fmt::Display::fmt(term, f),
        }
    }
}

pub(crate) fn ensure_same_context(a: &Context, b: &Context) -> Result<(), ValueError> {
    if std::ptr::eq(a, b) {
        Ok(())
    } else {
        Err(ValueError::ContextMismatch)
    }
}

impl<'ctx, K: Kind> Value<'ctx, K> {
    #[inline]
    pub fn from_literal(value: K::Native) -> Self {
        Self::Concrete(value)
    }

    /// A free constant of the kind's sort in `ctx`.
    pub fn fresh(ctx: &'ctx Context, name: &str) -> Self {
        Self::from_term(K::fresh_const(ctx, name))
    }

    /// Wraps a term of the kind's sort.
    pub fn from_term(term: K::Term<'ctx>) -> Self {
        debug_assert_eq!(term.get_sort(), K::sort(term.get_ctx()));
        Self::Symbolic(term)
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Concrete(..))
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(..))
    }

    pub fn as_concrete(&self) -> Option<&K::Native> {
        match self {
            Self::Concrete(value) => Some(value),
            Self::Symbolic(..) => None,
        }
    }

    pub fn as_symbolic(&self) -> Option<&K::Term<'ctx>> {
        match self {
            Self::Concrete(..) => None,
            Self::Symbolic(term) => Some(term),
        }
    }

    /// The owning context, for symbolic values.
    pub fn context(&self) -> Option<&'ctx Context> {
        self.as_symbolic().map(|term| term.get_ctx())
    }

    /// The value as a term of `ctx`. Concrete values become literals.
    pub fn to_term(&self, ctx: &'ctx Context) -> Result<K::Term<'ctx>, ValueError> {
        match self {
            Self::Concrete(value) => K::literal(ctx, value),
            Self::Symbolic(term) => {
                ensure_same_context(ctx, term.get_ctx())?;
                Ok(term.clone())
            }
        }
    }

    /// The native value under `model`. Identity for concrete values.
    pub fn evaluate(
        &self,
        model: &SessionModel<'ctx>,
        mode: EvalMode,
    ) -> Result<K::Native, ValueError> {
        match self {
            Self::Concrete(value) => Ok(value.clone()),
            Self::Symbolic(term) => model.eval::<K>(term, mode),
        }
    }

    fn lift1<R: Kind>(
        &self,
        native: impl FnOnce(&K::Native) -> R::Native,
        symbolic: impl FnOnce(&K::Term<'ctx>) -> R::Term<'ctx>,
    ) -> Value<'ctx, R> {
        match self {
            Self::Concrete(a) => Value::Concrete(native(a)),
            Self::Symbolic(a) => Value::Symbolic(symbolic(a)),
        }
    }

    fn lift2<R: Kind>(
        &self,
        other: &Self,
        native: impl FnOnce(&K::Native, &K::Native) -> Result<R::Native, ValueError>,
        symbolic: impl FnOnce(&K::Term<'ctx>, &K::Term<'ctx>) -> R::Term<'ctx>,
    ) -> Result<Value<'ctx, R>, ValueError> {
        match (self, other) {
            (Self::Concrete(a), Self::Concrete(b)) => native(a, b).map(Value::Concrete),
            (Self::Symbolic(a), Self::Symbolic(b)) => {
                ensure_same_context(a.get_ctx(), b.get_ctx())?;
                Ok(Value::Symbolic(symbolic(a, b)))
            }
            (Self::Symbolic(a), Self::Concrete(b)) => {
                let b = K::literal(a.get_ctx(), b)?;
                Ok(Value::Symbolic(symbolic(a, &b)))
            }
            (Self::Concrete(a), Self::Symbolic(b)) => {
                let a = K::literal(b.get_ctx(), a)?;
                Ok(Value::Symbolic(symbolic(&a, b)))
            }
        }
    }

    pub fn eq(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a == b), |a, b| a._eq(b))
    }

    pub fn ne(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a != b), |a, b| a._eq(b).not())
    }
}

#[allow(clippy::should_implement_trait)]
impl<'ctx, K: Arith> Value<'ctx, K> {
    pub fn add(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::add(a, b)), K::sym_add)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::sub(a, b)), K::sym_sub)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::mul(a, b)), K::sym_mul)
    }

    pub fn div(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(
            other,
            |a, b| K::div(a, b).ok_or(ValueError::DivisionByZero { kind: K::name() }),
            K::sym_div,
        )
    }

    pub fn neg(&self) -> Self {
        self.lift1(K::neg, K::sym_neg)
    }

    /// Unary plus: the value itself.
    #[inline]
    pub fn pos(&self) -> Self {
        self.clone()
    }
}

#[allow(clippy::should_implement_trait)]
impl<'ctx, K: Remainder> Value<'ctx, K> {
    pub fn rem(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(
            other,
            |a, b| K::rem(a, b).ok_or(ValueError::DivisionByZero { kind: K::name() }),
            K::sym_rem,
        )
    }
}

#[allow(clippy::should_implement_trait)]
impl<'ctx, K: Bitwise> Value<'ctx, K> {
    pub fn bitand(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::and(a, b)), K::sym_and)
    }

    pub fn bitor(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::or(a, b)), K::sym_or)
    }

    pub fn bitxor(&self, other: &Self) -> Result<Self, ValueError> {
        self.lift2(other, |a, b| Ok(K::xor(a, b)), K::sym_xor)
    }

    pub fn not(&self) -> Self {
        self.lift1(K::not, K::sym_not)
    }
}

#[allow(clippy::should_implement_trait)]
impl<'ctx, K: Shift> Value<'ctx, K> {
    pub fn shl(&self, amount: &Self) -> Result<Self, ValueError> {
        self.lift2(amount, |a, b| Ok(K::shl(a, b)), K::sym_shl)
    }

    pub fn shr(&self, amount: &Self) -> Result<Self, ValueError> {
        self.lift2(amount, |a, b| Ok(K::shr(a, b)), K::sym_shr)
    }
}

impl<'ctx, K: Order> Value<'ctx, K> {
    pub fn lt(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a < b), K::sym_lt)
    }

    pub fn le(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a <= b), K::sym_le)
    }

    pub fn gt(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a > b), K::sym_gt)
    }

    pub fn ge(&self, other: &Self) -> Result<Value<'ctx, BoolKind>, ValueError> {
        self.lift2(other, |a, b| Ok(a >= b), K::sym_ge)
    }
}

/// What an operator yields: a value of the operand kind, or a truth value
/// for comparisons.
pub enum Outcome<'ctx, K: Kind> {
    Value(Value<'ctx, K>),
    Truth(Value<'ctx, BoolKind>),
}

/// The native counterpart of [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome<N> {
    Value(N),
    Truth(bool),
}

impl<N: fmt::Display> fmt::Display for NativeOutcome<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, f),
            Self::Truth(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<'ctx, K: Kind> Clone for Outcome<'ctx, K> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Truth(value) => Self::Truth(value.clone()),
        }
    }
}

impl<'ctx, K: Kind> fmt::Debug for Outcome<'ctx, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Truth(value) => f.debug_tuple("Truth").field(value).finish(),
        }
    }
}

impl<'ctx, K: Kind> fmt::Display for Outcome<'ctx, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, f),
            Self::Truth(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<'ctx, K: Kind> Outcome<'ctx, K> {
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Value(value) => value.is_symbolic(),
            Self::Truth(value) => value.is_symbolic(),
        }
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        !self.is_symbolic()
    }

    /// The native result, if the outcome is concrete.
    pub fn to_native(&self) -> Option<NativeOutcome<K::Native>> {
        match self {
            Self::Value(value) => value.as_concrete().cloned().map(NativeOutcome::Value),
            Self::Truth(value) => value.as_concrete().copied().map(NativeOutcome::Truth),
        }
    }

    pub fn evaluate(
        &self,
        model: &SessionModel<'ctx>,
        mode: EvalMode,
    ) -> Result<NativeOutcome<K::Native>, ValueError> {
        match self {
            Self::Value(value) => value.evaluate(model, mode).map(NativeOutcome::Value),
            Self::Truth(value) => value.evaluate(model, mode).map(NativeOutcome::Truth),
        }
    }

    /// The constraint that the outcome equals `expected`, built in `ctx`.
    pub fn equals(
        &self,
        expected: &NativeOutcome<K::Native>,
        ctx: &'ctx Context,
    ) -> Result<ast::Bool<'ctx>, ValueError> {
        match (self, expected) {
            (Self::Value(value), NativeOutcome::Value(expected)) => {
                Ok(value.to_term(ctx)?._eq(&K::literal(ctx, expected)?))
            }
            (Self::Truth(value), NativeOutcome::Truth(expected)) => {
                Ok(value.to_term(ctx)?._eq(&BoolKind::literal(ctx, expected)?))
            }
            _ => Err(ValueError::OutcomeMismatch),
        }
    }
}
