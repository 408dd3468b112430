//! Game services: the session store and the round engine on top of it.

pub mod round_engine;
pub mod session_store;

pub use round_engine::{EndReason, GameOutcome, RoundEngine};
pub use session_store::{SessionHandle, SessionStore};
