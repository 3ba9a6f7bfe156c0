use delegate::delegate;
use z3::{
    self,
    ast::{self, Ast},
    Config, Context, Model, SatResult, Solver,
};

use std::ffi::CStr;

use common::{log_debug, log_trace};

use crate::{
    config::{EvalMode, SolverConfig},
    kinds::{BoolKind, Kind},
    value::{ensure_same_context, Value},
    ValueError,
};

pub trait NumeralExt {
    /// The decimal spelling of a numeral term (`p/q` for rationals), or
    /// `None` if the term is not a numeral.
    fn numeral_string(&self) -> Option<String>;
}

fn numeral_string<'ctx>(term: &impl Ast<'ctx>) -> Option<String> {
    let ctx = term.get_ctx().get_z3_context();
    unsafe {
        if !z3_sys::Z3_is_numeral_ast(ctx, term.get_z3_ast()) {
            return None;
        }
        Some(z3_sys::Z3_get_numeral_string(ctx, term.get_z3_ast()))
            .filter(|x| !x.is_null())
            .map(|x| CStr::from_ptr(x))
            .and_then(|s| s.to_str().ok())
            .map(ToOwned::to_owned)
    }
}

macro_rules! impl_numeral_ext {
    ($($ty:ident),*) => {
        $(
        impl<'ctx> NumeralExt for ast::$ty<'ctx> {
            #[inline]
            fn numeral_string(&self) -> Option<String> {
                numeral_string(self)
            }
        }
        )*
    };
}

impl_numeral_ext!(Int, Real);

pub fn set_global_params<K: AsRef<str>, V: AsRef<str>>(params: impl Iterator<Item = (K, V)>) {
    for (k, v) in params {
        log_debug!("Setting global param: {} = {}", k.as_ref(), v.as_ref());
        z3::set_global_param(k.as_ref(), v.as_ref());
    }
}

/// Runs `f` against a session over a context of its own. Everything created
/// in the session, symbolic values included, is released when `f` returns.
pub fn with_session<R>(
    config: &SolverConfig,
    f: impl for<'ctx> FnOnce(&Session<'ctx>) -> R,
) -> R {
    let mut z3_config = Config::new();
    if let Some(timeout) = config.timeout_ms {
        z3_config.set_timeout_msec(timeout);
    }
    let context = Context::new(&z3_config);
    let session = Session::new(&context);
    f(&session)
}

pub enum CheckOutcome<'ctx> {
    Sat(SessionModel<'ctx>),
    Unsat,
    /// Carries the solver's reason.
    Unknown(String),
}

impl<'ctx> CheckOutcome<'ctx> {
    #[inline]
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(..))
    }

    #[inline]
    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }
}

/// A solver over a single context. Not meant to be shared between threads.
pub struct Session<'ctx> {
    context: &'ctx Context,
    solver: Solver<'ctx>,
}

impl<'ctx> Session<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            solver: Solver::new(context),
        }
    }

    #[inline]
    pub fn context(&self) -> &'ctx Context {
        self.context
    }

    delegate! {
        to self.solver {
            pub fn push(&self);
        }
    }

    pub fn pop(&self) {
        self.solver.pop(1);
    }

    pub fn fresh<K: Kind>(&self, name: &str) -> Value<'ctx, K> {
        Value::fresh(self.context, name)
    }

    /// A symbolic literal, as opposed to [`Value::from_literal`] which stays concrete.
    pub fn literal<K: Kind>(&self, value: &K::Native) -> Result<Value<'ctx, K>, ValueError> {
        K::literal(self.context, value).map(Value::from_term)
    }

    pub fn assert(&self, constraint: &ast::Bool<'ctx>) -> Result<(), ValueError> {
        ensure_same_context(self.context, constraint.get_ctx())?;
        log_trace!("Asserting: {}", constraint);
        self.solver.assert(constraint);
        Ok(())
    }

    /// Asserts a truth value. A concrete `false` makes the session unsatisfiable.
    pub fn assert_truth(&self, truth: &Value<'ctx, BoolKind>) -> Result<(), ValueError> {
        self.assert(&truth.to_term(self.context)?)
    }

    /// Asserts `value == literal`.
    pub fn bind<K: Kind>(
        &self,
        value: &Value<'ctx, K>,
        literal: &K::Native,
    ) -> Result<(), ValueError> {
        let term = value.to_term(self.context)?;
        self.assert(&term._eq(&K::literal(self.context, literal)?))
    }

    pub fn check(&self) -> CheckOutcome<'ctx> {
        let result = self.solver.check();
        log_debug!("Solver check result: {:?}", result);
        match result {
            SatResult::Sat => match self.solver.get_model() {
                Some(model) => CheckOutcome::Sat(SessionModel {
                    context: self.context,
                    model,
                }),
                None => CheckOutcome::Unknown("no model after a satisfiable check".to_owned()),
            },
            SatResult::Unsat => CheckOutcome::Unsat,
            SatResult::Unknown => CheckOutcome::Unknown(
                self.solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_owned()),
            ),
        }
    }
}

/// A model of a satisfiable session.
pub struct SessionModel<'ctx> {
    context: &'ctx Context,
    model: Model<'ctx>,
}

impl<'ctx> SessionModel<'ctx> {
    pub fn eval<K: Kind>(
        &self,
        term: &K::Term<'ctx>,
        mode: EvalMode,
    ) -> Result<K::Native, ValueError> {
        ensure_same_context(self.context, term.get_ctx())?;
        self.model
            .eval(term, mode.model_completion())
            .and_then(|value| K::read_numeral(&value))
            .ok_or_else(|| ValueError::Unevaluable {
                kind: K::name(),
                term: term.to_string(),
            })
    }
}
