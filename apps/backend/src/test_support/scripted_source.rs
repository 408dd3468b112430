use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::cards::{CardSource, CardSourceError, ImageUris, RawCard};
use crate::domain::Clock;

/// A raw card carrying every field a round needs.
pub fn complete_raw_card(name: &str, released_at: &str) -> RawCard {
    let slug = name.to_lowercase().replace(' ', "-");
    RawCard {
        name: Some(name.to_string()),
        image_uris: Some(ImageUris {
            normal: Some(format!("https://cards.test/{slug}/normal.jpg")),
            large: Some(format!("https://cards.test/{slug}/large.jpg")),
        }),
        released_at: Some(released_at.to_string()),
        cmc: Some(2.0),
        oracle_text: Some(format!("{name} rules text")),
    }
}

/// Card source that replays a queue of canned random-card results.
///
/// An empty queue answers with a transport failure. Name lookups are served
/// from a fixed catalog.
#[derive(Default)]
pub struct ScriptedCardSource {
    script: Mutex<VecDeque<Result<RawCard, CardSourceError>>>,
    catalog: Mutex<HashMap<String, RawCard>>,
    random_calls: AtomicU32,
}

impl ScriptedCardSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_card(self, card: RawCard) -> Self {
        self.push_card(card);
        self
    }

    pub fn then_error(self, err: CardSourceError) -> Self {
        self.script.lock().push_back(Err(err));
        self
    }

    pub fn with_named(self, card: RawCard) -> Self {
        let key = card.name.clone().unwrap_or_default();
        self.catalog.lock().insert(key, card);
        self
    }

    pub fn push_card(&self, card: RawCard) {
        self.script.lock().push_back(Ok(card));
    }

    /// Number of random-card requests served so far.
    pub fn random_calls(&self) -> u32 {
        self.random_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardSource for ScriptedCardSource {
    async fn fetch_random_card(&self) -> Result<RawCard, CardSourceError> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CardSourceError::Transport("script exhausted".into())))
    }

    async fn fetch_card_by_name(&self, name: &str) -> Result<RawCard, CardSourceError> {
        self.catalog
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| CardSourceError::NotFound(name.to_string()))
    }
}

/// Clock pinned to one year.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}
