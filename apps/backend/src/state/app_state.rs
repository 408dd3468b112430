use std::sync::Arc;

use crate::cards::CardSource;
use crate::services::round_engine::RoundEngine;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Round engine owning the session store
    pub engine: Arc<RoundEngine>,
    /// Card source, also used directly for name lookups
    pub cards: Arc<dyn CardSource>,
}

impl AppState {
    pub fn new(engine: Arc<RoundEngine>, cards: Arc<dyn CardSource>) -> Self {
        Self { engine, cards }
    }

    /// Number of sessions held in memory.
    pub fn live_sessions(&self) -> usize {
        self.engine.store().len()
    }
}
