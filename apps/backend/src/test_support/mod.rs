//! Deterministic collaborators for tests: a scripted card source, a fixed
//! clock, and an Actix test-service builder.

pub mod app_builder;
pub mod scripted_source;

pub use app_builder::{create_test_app_builder, TestAppBuilder};
pub use scripted_source::{complete_raw_card, FixedClock, ScriptedCardSource};
