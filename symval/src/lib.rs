//! Dual-mode values: every value of a kind is either computed natively or a
//! z3 term, with operators that behave the same in both modes, and an oracle
//! that proves they do.

pub mod config;
pub mod construct;
pub mod dispatch;
mod error;
pub mod kinds;
pub mod oracle;
pub mod representatives;
pub mod solvers;
pub mod value;
mod wrap;

pub use common::{BinaryOp, KindDescriptor, KindId, KindRegistry, OperatorTable, UnaryOp};

pub use self::config::{EvalMode, OracleConfig, SolverConfig};
pub use dispatch::Dispatch;
pub use error::ValueError;
pub use kinds::{
    Arith, Bitwise, BoolKind, Fixed, IntegerKind, Kind, Order, RealKind, Remainder, Shift,
};
pub use oracle::{EquivalenceFailure, FailureReason, Oracle, OracleReport};
pub use representatives::Representatives;
pub use solvers::{with_session, CheckOutcome, Session, SessionModel};
pub use value::{NativeOutcome, Outcome, Value};
pub use wrap::WrapSemantics;
