pub mod z3;

pub use self::z3::{with_session, CheckOutcome, Session, SessionModel};
