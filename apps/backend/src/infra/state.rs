use std::sync::Arc;

use crate::cards::{CardSource, RetryPolicy, ScryfallCardSource};
use crate::config::app::AppConfig;
use crate::domain::{Clock, SecretYearDrawer, SystemClock, FIRST_CARD_SET_YEAR};
use crate::error::AppError;
use crate::services::round_engine::RoundEngine;
use crate::services::session_store::SessionStore;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    card_source: Option<Arc<dyn CardSource>>,
    clock: Arc<dyn Clock>,
    rng_seed: Option<u64>,
    retry: RetryPolicy,
    first_year: i32,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            card_source: None,
            clock: Arc::new(SystemClock),
            rng_seed: None,
            retry: RetryPolicy::default(),
            first_year: FIRST_CARD_SET_YEAR,
        }
    }

    /// Apply runtime configuration: Scryfall source, retry budget, year floor, seed.
    pub fn with_config(mut self, config: &AppConfig) -> Result<Self, AppError> {
        let source = ScryfallCardSource::new(
            config.card_source.base_url.clone(),
            &config.card_source.user_agent,
            config.card_source.timeout,
        )?;
        self.card_source = Some(Arc::new(source));
        self.retry = RetryPolicy::new(config.card_source.max_attempts);
        self.first_year = config.first_card_set_year;
        self.rng_seed = config.rng_seed;
        Ok(self)
    }

    pub fn with_card_source(mut self, source: Arc<dyn CardSource>) -> Self {
        self.card_source = Some(source);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let source = self
            .card_source
            .ok_or_else(|| AppError::config("No card source configured"))?;

        let engine = RoundEngine::new(
            Arc::new(SessionStore::new()),
            source.clone(),
            self.clock,
            SecretYearDrawer::new(self.first_year, self.rng_seed),
            self.retry,
        );
        Ok(AppState::new(Arc::new(engine), source))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
