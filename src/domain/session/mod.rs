//! Session domain module

mod session;
mod session_type;
mod status;

pub use session::{InvalidPhaseTransition, Session, SessionPhase};
pub use session_type::{SessionType, ALL_SESSION_TYPES};
pub use status::SessionStatus;
