//! Static catalogues shared by the dual value framework: the kinds a value can
//! have, the operators defined on them, and the flag space both are described in.

#[cfg(feature = "config")]
pub mod config;
pub mod flags;
pub mod kinds;
#[cfg(feature = "logging")]
pub mod logging;
pub mod ops;
pub mod utils;

pub use flags::Flags;
pub use kinds::{KindDescriptor, KindId, KindRegistry, NativeRepr, SortId, UnknownKind};
pub use ops::{
    BinaryOp, BinaryOpDescriptor, OperatorTable, TableError, Token, UnaryOp, UnaryOpDescriptor,
};
