//! Cross-validation of the native and the symbolic path of every operator.
//!
//! For an operator and inputs `a`, `b` the native result `r` is computed on
//! concrete values. Then, in a session of its own, fresh constants bound to
//! `a` and `b` go through the same operator and `result == r` must be
//! satisfiable. A second session asserts `result != r` and must be
//! unsatisfiable, so `r` is the only value the encoding admits.

use serde::Serialize;

use common::{
    debug_scope, log_debug, log_info, log_warn, BinaryOp, KindId, KindRegistry, OperatorTable,
    TableError, UnaryOp,
};

use crate::{
    config::OracleConfig,
    dispatch::Dispatch,
    kinds::{BoolKind, Fixed, IntegerKind, RealKind},
    representatives::Representatives,
    solvers::z3::{set_global_params, with_session, CheckOutcome, Session},
    value::{NativeOutcome, Outcome, Value},
    ValueError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The encoding does not admit the native result.
    #[error("the symbolic result cannot equal the native one")]
    Rejected,
    /// The encoding admits the native result and at least one other value.
    #[error("the symbolic result can also differ from the native one")]
    NotUnique,
    #[error("the solver could not decide: {0}")]
    Indeterminate(String),
    /// A symbolic operand produced a concrete result.
    #[error("the result of symbolic operands is not symbolic")]
    Demoted,
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// A case on which the two paths disagree, with what it takes to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error(
    "{kind} `{op}` on ({}): expected {expected}{}: {reason}",
    .inputs.join(", "),
    .observed.as_ref().map(|o| format!(", observed {o}")).unwrap_or_default()
)]
pub struct EquivalenceFailure {
    pub kind: &'static str,
    pub op: &'static str,
    pub inputs: Vec<String>,
    /// The native result, if the native path produced one.
    pub expected: String,
    /// A value the symbolic encoding admits besides the expected one.
    pub observed: Option<String>,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OracleReport {
    pub kind: &'static str,
    pub checked: usize,
    /// Cases left out as excluded inputs.
    pub skipped: usize,
    pub failures: Vec<EquivalenceFailure>,
}

impl OracleReport {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: OracleReport) {
        debug_assert_eq!(self.kind, other.kind);
        self.checked += other.checked;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

struct Divergence {
    reason: FailureReason,
    observed: Option<String>,
}

impl From<FailureReason> for Divergence {
    fn from(reason: FailureReason) -> Self {
        Self {
            reason,
            observed: None,
        }
    }
}

impl From<ValueError> for Divergence {
    fn from(error: ValueError) -> Self {
        FailureReason::from(error).into()
    }
}

pub struct Oracle {
    config: OracleConfig,
}

impl Oracle {
    /// Fails if the operator table breaks its own invariants, since every
    /// check is driven by it.
    pub fn new(config: OracleConfig) -> Result<Self, TableError> {
        OperatorTable::global().validate()?;
        set_global_params(config.solver.params.iter());
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn check_binary<K: Dispatch>(&self, op: BinaryOp, values: &[K::Native]) -> OracleReport {
        debug_scope!("check_binary", kind = K::name(), op = op.symbol());
        let mut report = OracleReport::new(K::name());
        for a in values {
            for b in values {
                if K::is_excluded_input(op, a, b) {
                    report.skipped += 1;
                    continue;
                }
                report.checked += 1;
                if let Err(failure) = self.check_binary_case::<K>(op, a, b) {
                    log_warn!("{}", failure);
                    report.failures.push(failure);
                }
            }
        }
        report
    }

    pub fn check_unary<K: Dispatch>(&self, op: UnaryOp, values: &[K::Native]) -> OracleReport {
        debug_scope!("check_unary", kind = K::name(), op = op.symbol());
        let mut report = OracleReport::new(K::name());
        for a in values {
            report.checked += 1;
            if let Err(failure) = self.check_unary_case::<K>(op, a) {
                log_warn!("{}", failure);
                report.failures.push(failure);
            }
        }
        report
    }

    /// Every operator the table defines on `K`, over `values`.
    pub fn check_kind<K: Dispatch>(&self, values: &[K::Native]) -> OracleReport {
        let table = OperatorTable::global();
        let kind = K::descriptor();
        let mut report = OracleReport::new(K::name());
        for d in table.binary_ops_for(kind) {
            report.merge(self.check_binary::<K>(d.op, values));
        }
        for d in table.unary_ops_for(kind) {
            report.merge(self.check_unary::<K>(d.op, values));
        }
        log_info!(
            "Checked {}: {} cases, {} skipped, {} failures",
            report.kind,
            report.checked,
            report.skipped,
            report.failures.len()
        );
        report
    }

    /// All operators of a kind chosen at run time, over its representative values.
    pub fn check_kind_by_id(&self, id: KindId) -> OracleReport {
        dispatch_kind(id, CheckKind(self))
    }

    /// A single binary operator on a kind chosen at run time.
    pub fn check_binary_by_id(
        &self,
        id: KindId,
        op: BinaryOp,
    ) -> Result<OracleReport, ValueError> {
        let kind = KindRegistry::global().describe(id);
        if !op.descriptor().applies_to(kind) {
            return Err(ValueError::UnsupportedOp {
                kind: kind.name,
                op: op.symbol(),
            });
        }
        Ok(dispatch_kind(id, CheckBinary(self, op)))
    }

    /// A single unary operator on a kind chosen at run time.
    pub fn check_unary_by_id(
        &self,
        id: KindId,
        op: UnaryOp,
    ) -> Result<OracleReport, ValueError> {
        let kind = KindRegistry::global().describe(id);
        if !op.descriptor().applies_to(kind) {
            return Err(ValueError::UnsupportedOp {
                kind: kind.name,
                op: op.symbol(),
            });
        }
        Ok(dispatch_kind(id, CheckUnary(self, op)))
    }

    pub fn run_matrix(&self, kinds: impl IntoIterator<Item = KindId>) -> Vec<OracleReport> {
        kinds
            .into_iter()
            .map(|id| self.check_kind_by_id(id))
            .collect()
    }

    fn check_binary_case<K: Dispatch>(
        &self,
        op: BinaryOp,
        a: &K::Native,
        b: &K::Native,
    ) -> Result<(), EquivalenceFailure> {
        let failure = |expected: String, divergence: Divergence| EquivalenceFailure {
            kind: K::name(),
            op: op.symbol(),
            inputs: vec![a.to_string(), b.to_string()],
            expected,
            observed: divergence.observed,
            reason: divergence.reason,
        };

        let expected = K::apply_binary(
            op,
            &Value::from_literal(a.clone()),
            &Value::from_literal(b.clone()),
        )
        .map(native_of)
        .map_err(|e| failure(String::from("<none>"), e.into()))?;
        log_debug!("{} {} {} = {}", a, op.symbol(), b, expected);

        self.prove::<K>(&expected, |session| {
            let x = session.fresh::<K>("a");
            let y = session.fresh::<K>("b");
            session.bind(&x, a)?;
            session.bind(&y, b)?;
            K::apply_binary(op, &x, &y)
        })
        .map_err(|d| failure(expected.to_string(), d))
    }

    fn check_unary_case<K: Dispatch>(
        &self,
        op: UnaryOp,
        a: &K::Native,
    ) -> Result<(), EquivalenceFailure> {
        let failure = |expected: String, divergence: Divergence| EquivalenceFailure {
            kind: K::name(),
            op: op.symbol(),
            inputs: vec![a.to_string()],
            expected,
            observed: divergence.observed,
            reason: divergence.reason,
        };

        let expected = K::apply_unary(op, &Value::from_literal(a.clone()))
            .map(native_of)
            .map_err(|e| failure(String::from("<none>"), e.into()))?;
        log_debug!("{}{} = {}", op.symbol(), a, expected);

        self.prove::<K>(&expected, |session| {
            let x = session.fresh::<K>("a");
            session.bind(&x, a)?;
            K::apply_unary(op, &x)
        })
        .map_err(|d| failure(expected.to_string(), d))
    }

    /// Runs both sessions for one case. `build` is called once per session
    /// and must return the symbolic outcome of the operator.
    fn prove<K: Dispatch>(
        &self,
        expected: &NativeOutcome<K::Native>,
        build: impl for<'ctx> Fn(&Session<'ctx>) -> Result<Outcome<'ctx, K>, ValueError>,
    ) -> Result<(), Divergence> {
        with_session(&self.config.solver, |session| {
            let outcome = build(session)?;
            if outcome.is_concrete() {
                return Err(FailureReason::Demoted.into());
            }
            session.assert(&outcome.equals(expected, session.context())?)?;
            match session.check() {
                CheckOutcome::Sat(..) => Ok(()),
                CheckOutcome::Unsat => Err(FailureReason::Rejected.into()),
                CheckOutcome::Unknown(reason) => {
                    Err(FailureReason::Indeterminate(reason).into())
                }
            }
        })?;

        if !self.config.check_uniqueness {
            return Ok(());
        }

        with_session(&self.config.solver, |session| {
            let outcome = build(session)?;
            session.assert(&outcome.equals(expected, session.context())?.not())?;
            match session.check() {
                CheckOutcome::Unsat => Ok(()),
                CheckOutcome::Sat(model) => Err(Divergence {
                    reason: FailureReason::NotUnique,
                    observed: Some(
                        outcome
                            .evaluate(&model, self.config.eval_mode)
                            .map_or_else(|e| e.to_string(), |o| o.to_string()),
                    ),
                }),
                CheckOutcome::Unknown(reason) => {
                    Err(FailureReason::Indeterminate(reason).into())
                }
            }
        })
    }
}

fn native_of<K: Dispatch>(outcome: Outcome<'_, K>) -> NativeOutcome<K::Native> {
    outcome
        .to_native()
        .expect("Operators on concrete values yield concrete outcomes.")
}

/// Something to run on a kind chosen at run time.
trait KindVisit {
    fn visit<K: Dispatch + Representatives>(self) -> OracleReport;
}

struct CheckKind<'a>(&'a Oracle);

impl KindVisit for CheckKind<'_> {
    fn visit<K: Dispatch + Representatives>(self) -> OracleReport {
        self.0.check_kind::<K>(&K::representatives())
    }
}

struct CheckBinary<'a>(&'a Oracle, BinaryOp);

impl KindVisit for CheckBinary<'_> {
    fn visit<K: Dispatch + Representatives>(self) -> OracleReport {
        self.0.check_binary::<K>(self.1, &K::representatives())
    }
}

struct CheckUnary<'a>(&'a Oracle, UnaryOp);

impl KindVisit for CheckUnary<'_> {
    fn visit<K: Dispatch + Representatives>(self) -> OracleReport {
        self.0.check_unary::<K>(self.1, &K::representatives())
    }
}

fn dispatch_kind(id: KindId, visitor: impl KindVisit) -> OracleReport {
    match id {
        KindId::Bool => visitor.visit::<BoolKind>(),
        KindId::Int8 => visitor.visit::<Fixed<i8>>(),
        KindId::Int16 => visitor.visit::<Fixed<i16>>(),
        KindId::Int32 => visitor.visit::<Fixed<i32>>(),
        KindId::Int64 => visitor.visit::<Fixed<i64>>(),
        KindId::Isize => visitor.visit::<Fixed<isize>>(),
        KindId::Uint8 => visitor.visit::<Fixed<u8>>(),
        KindId::Uint16 => visitor.visit::<Fixed<u16>>(),
        KindId::Uint32 => visitor.visit::<Fixed<u32>>(),
        KindId::Uint64 => visitor.visit::<Fixed<u64>>(),
        KindId::Usize => visitor.visit::<Fixed<usize>>(),
        KindId::Integer => visitor.visit::<IntegerKind>(),
        KindId::Real => visitor.visit::<RealKind>(),
    }
}
