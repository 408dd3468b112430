#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use cardyear::build_state;
use cardyear::cards::RetryPolicy;
use cardyear::protocol::GameResponse;
use cardyear::state::AppState;
use cardyear::test_support::{FixedClock, ScriptedCardSource};

pub mod proptest_prelude;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_YEAR: i32 = 2024;
pub const TEST_SEED: u64 = 0x5eed;

/// State backed by a scripted source, a clock pinned to [`TEST_YEAR`] and a
/// seeded year drawer.
pub fn scripted_state(source: Arc<ScriptedCardSource>) -> AppState {
    build_state()
        .with_card_source(source)
        .with_clock(Arc::new(FixedClock(TEST_YEAR)))
        .with_rng_seed(TEST_SEED)
        .with_retry_policy(RetryPolicy::default())
        .build()
        .expect("test state should build")
}

/// Guess that beats the given round.
pub fn winning_guess(card_year: i32, secret_year: i32) -> cardyear::Guess {
    if card_year >= secret_year {
        cardyear::Guess::After
    } else {
        cardyear::Guess::Before
    }
}

pub fn losing_guess(card_year: i32, secret_year: i32) -> cardyear::Guess {
    match winning_guess(card_year, secret_year) {
        cardyear::Guess::After => cardyear::Guess::Before,
        cardyear::Guess::Before => cardyear::Guess::After,
    }
}

/// Read a game response body.
pub async fn read_game_response(resp: ServiceResponse<BoxBody>) -> GameResponse {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("body should be a GameResponse")
}
