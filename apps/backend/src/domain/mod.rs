//! Game domain: cards, guesses, secret years and sessions.

pub mod card;
pub mod guess;
pub mod session;
pub mod year;

pub use card::{CardFacts, CardView, MaskedCard};
pub use guess::Guess;
pub use session::{EndReason, NoOpenRound, Round, Session, SessionId, SessionView, Verdict};
pub use year::{Clock, SecretYearDrawer, SystemClock, FIRST_CARD_SET_YEAR};
