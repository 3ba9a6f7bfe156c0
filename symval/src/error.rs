use serde::Serialize;

/// Errors signalling a defect in the caller rather than in the environment.
/// None of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ValueError {
    /// Two symbolic operands (or a value and a session/model) come from
    /// different solver contexts.
    #[error("operands belong to different solver contexts")]
    ContextMismatch,
    #[error("division by zero in concrete {kind} arithmetic")]
    DivisionByZero { kind: &'static str },
    #[error("operator `{op}` is not defined on {kind}")]
    UnsupportedOp { kind: &'static str, op: &'static str },
    #[error("cannot build a {kind} literal from `{literal}`")]
    InvalidLiteral { kind: &'static str, literal: String },
    #[error("{kind} term `{term}` has no value under the model")]
    Unevaluable { kind: &'static str, term: String },
    #[error("cannot relate a value outcome to a truth outcome")]
    OutcomeMismatch,
}
