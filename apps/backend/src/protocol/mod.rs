//! JSON shapes exchanged with the browser client.

pub mod game_response;
pub mod requests;

pub use game_response::GameResponse;
pub use requests::{GuessRequest, SessionRequest};
