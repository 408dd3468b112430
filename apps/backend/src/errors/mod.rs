//! Error handling for the card-year backend.

pub mod error_code;

pub use error_code::ErrorCode;
