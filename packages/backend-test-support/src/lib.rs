//! Backend test support utilities
//!
//! Shared by unit and integration tests: one-time logging setup and
//! assertions for the HTTP error contract.

pub mod logging;
pub mod problem_details;
