//! Card Source boundary.
//!
//! Everything provider-shaped lives here: the [`CardSource`] trait, the raw
//! payload, completeness validation, the bounded retry policy and the
//! Scryfall HTTP client.

pub mod raw;
pub mod retry;
pub mod scryfall;
pub mod source;

pub use raw::{CardSummary, ImageUris, MissingFields, RawCard};
pub use retry::{fetch_complete_card, Attempt, RetryPolicy};
pub use scryfall::ScryfallCardSource;
pub use source::{CardSource, CardSourceError};
