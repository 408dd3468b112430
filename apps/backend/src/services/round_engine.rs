//! Round engine: draws rounds and scores guesses.
//!
//! Every operation takes a raw session id and answers with a [`GameOutcome`];
//! unknown ids, closed rounds and card-source failures are outcomes, not errors.
//! A session's lock is held only for the in-memory transition, never across a
//! card-source call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session_store::{SessionHandle, SessionStore};
use crate::cards::{fetch_complete_card, CardSource, RetryPolicy};
pub use crate::domain::EndReason;
use crate::domain::{CardFacts, Clock, Guess, SecretYearDrawer, Session, SessionView, Verdict};

/// Result of one engine operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GameOutcome {
    /// A new round is open; the card is masked.
    RoundStarted(SessionView),
    /// The guess was right; call `start_round` for the next card.
    Scored(SessionView),
    /// The session is terminal; the card, if any, is revealed.
    GameOver { view: SessionView, reason: EndReason },
    /// Read-only snapshot.
    State(SessionView),
    /// Guess arrived with no open round.
    NoActiveRound(SessionView),
    /// No usable card could be drawn; the session is unchanged.
    SourceUnavailable(SessionView),
    /// Unknown session id.
    InvalidSession,
}

impl GameOutcome {
    pub fn view(&self) -> Option<&SessionView> {
        match self {
            GameOutcome::RoundStarted(view)
            | GameOutcome::Scored(view)
            | GameOutcome::GameOver { view, .. }
            | GameOutcome::State(view)
            | GameOutcome::NoActiveRound(view)
            | GameOutcome::SourceUnavailable(view) => Some(view),
            GameOutcome::InvalidSession => None,
        }
    }

    /// Short snake_case name, logged with each game request.
    pub fn label(&self) -> &'static str {
        match self {
            GameOutcome::RoundStarted(_) => "round_started",
            GameOutcome::Scored(_) => "scored",
            GameOutcome::GameOver {
                reason: EndReason::WrongGuess,
                ..
            } => "game_over_wrong_guess",
            GameOutcome::GameOver {
                reason: EndReason::Ended,
                ..
            } => "game_over_ended",
            GameOutcome::State(_) => "state",
            GameOutcome::NoActiveRound(_) => "no_active_round",
            GameOutcome::SourceUnavailable(_) => "source_unavailable",
            GameOutcome::InvalidSession => "invalid_session",
        }
    }

    /// Terminal outcome for a session that has ended, `None` while active.
    fn game_over(session: &Session) -> Option<Self> {
        session.end_reason().map(|reason| GameOutcome::GameOver {
            view: session.view(),
            reason,
        })
    }
}

pub struct RoundEngine {
    store: Arc<SessionStore>,
    source: Arc<dyn CardSource>,
    clock: Arc<dyn Clock>,
    years: SecretYearDrawer,
    retry: RetryPolicy,
}

impl RoundEngine {
    pub fn new(
        store: Arc<SessionStore>,
        source: Arc<dyn CardSource>,
        clock: Arc<dyn Clock>,
        years: SecretYearDrawer,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            source,
            clock,
            years,
            retry,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create a session and immediately try to open its first round.
    ///
    /// If no card can be drawn the session still exists and the outcome is
    /// `SourceUnavailable`, so the caller can retry with `start_round`.
    pub async fn create_session(&self) -> GameOutcome {
        let (id, _) = self.store.create();
        info!(session_id = %id, "Game session started");
        self.start_round(id.as_str()).await
    }

    /// Open (or advance to) the next round.
    pub async fn start_round(&self, session_id: &str) -> GameOutcome {
        let Some(handle) = self.store.get(session_id) else {
            return GameOutcome::InvalidSession;
        };

        if let Some(over) = Self::terminal_outcome(&handle).await {
            return over;
        }

        // Card source call happens with the session unlocked.
        let drawn = self.draw_round().await;

        let mut session = handle.lock().await;
        let Some((card, secret_year)) = drawn else {
            return GameOutcome::SourceUnavailable(session.view());
        };

        debug!(
            session_id = %session_id,
            card = %card.name,
            secret_year,
            "Opening round"
        );
        if !session.open_round(card, secret_year) {
            // Ended while the card was in flight.
            return GameOutcome::game_over(&session)
                .unwrap_or_else(|| GameOutcome::SourceUnavailable(session.view()));
        }
        GameOutcome::RoundStarted(session.view())
    }

    /// Score a guess against the open round.
    pub async fn process_guess(&self, session_id: &str, guess: Guess) -> GameOutcome {
        let Some(handle) = self.store.get(session_id) else {
            return GameOutcome::InvalidSession;
        };

        let mut session = handle.lock().await;
        match session.score_guess(guess) {
            Err(_) => GameOutcome::NoActiveRound(session.view()),
            Ok(Verdict::Correct) => {
                debug!(session_id = %session_id, ?guess, score = session.score(), "Correct guess");
                GameOutcome::Scored(session.view())
            }
            Ok(Verdict::Wrong) => {
                info!(session_id = %session_id, ?guess, score = session.score(), "Game over on wrong guess");
                GameOutcome::GameOver {
                    view: session.view(),
                    reason: EndReason::WrongGuess,
                }
            }
        }
    }

    /// Force the session into its terminal state. Repeat calls re-report it.
    pub async fn end_game(&self, session_id: &str) -> GameOutcome {
        let Some(handle) = self.store.get(session_id) else {
            return GameOutcome::InvalidSession;
        };

        let mut session = handle.lock().await;
        if session.is_active() {
            info!(session_id = %session_id, score = session.score(), "Game ended by player");
        }
        let reason = session.terminate();
        GameOutcome::GameOver {
            view: session.view(),
            reason,
        }
    }

    /// Current projection of the session; never mutates it.
    pub async fn get_state(&self, session_id: &str) -> GameOutcome {
        let Some(handle) = self.store.get(session_id) else {
            return GameOutcome::InvalidSession;
        };
        let session = handle.lock().await;
        GameOutcome::State(session.view())
    }

    async fn terminal_outcome(handle: &SessionHandle) -> Option<GameOutcome> {
        GameOutcome::game_over(&*handle.lock().await)
    }

    async fn draw_round(&self) -> Option<(CardFacts, i32)> {
        let card = match fetch_complete_card(self.source.as_ref(), self.retry).await {
            Ok(card) => card,
            Err(e) => {
                warn!(error = %e, "Card source unavailable");
                return None;
            }
        };

        let current_year = self.clock.current_year();
        match self.years.draw(card.year_released, current_year) {
            Some(secret_year) => Some((card, secret_year)),
            None => {
                warn!(
                    card = %card.name,
                    year_released = card.year_released,
                    current_year,
                    "No secret year distinct from the card's release year"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::cards::{CardSourceError, RawCard};
    use crate::domain::CardView;
    use crate::test_support::{complete_raw_card, FixedClock, ScriptedCardSource};

    fn engine_with(source: Arc<dyn CardSource>) -> RoundEngine {
        RoundEngine::new(
            Arc::new(SessionStore::new()),
            source,
            Arc::new(FixedClock(2024)),
            SecretYearDrawer::new(1993, Some(99)),
            RetryPolicy::default(),
        )
    }

    fn secret_year(outcome: &GameOutcome) -> i32 {
        outcome
            .view()
            .and_then(|view| view.random_year)
            .expect("round should carry a secret year")
    }

    fn winning_guess(card_year: i32, secret: i32) -> Guess {
        if card_year >= secret {
            Guess::After
        } else {
            Guess::Before
        }
    }

    fn session_id(outcome: &GameOutcome) -> String {
        outcome.view().unwrap().session_id.to_string()
    }

    #[tokio::test]
    async fn create_session_opens_masked_round() {
        let source = Arc::new(
            ScriptedCardSource::new().then_card(complete_raw_card("Counterspell", "1993-08-05")),
        );
        let engine = engine_with(source);

        let outcome = engine.create_session().await;
        let GameOutcome::RoundStarted(view) = &outcome else {
            panic!("expected RoundStarted, got {outcome:?}");
        };
        assert_eq!(view.score, 0);
        assert!(view.active);
        assert!(matches!(view.card, Some(CardView::Masked(_))));
        assert_ne!(view.random_year, Some(1993));
        assert_eq!(engine.store().len(), 1);
    }

    #[tokio::test]
    async fn second_guess_on_same_round_is_rejected() {
        let source = Arc::new(
            ScriptedCardSource::new().then_card(complete_raw_card("Shock", "2000-06-05")),
        );
        let engine = engine_with(source);
        let started = engine.create_session().await;
        let id = session_id(&started);
        let guess = winning_guess(2000, secret_year(&started));

        assert!(matches!(
            engine.process_guess(&id, guess).await,
            GameOutcome::Scored(ref v) if v.score == 1
        ));
        assert!(matches!(
            engine.process_guess(&id, guess).await,
            GameOutcome::NoActiveRound(ref v) if v.score == 1 && v.active
        ));
    }

    #[tokio::test]
    async fn start_round_on_ended_game_changes_nothing() {
        let source = Arc::new(
            ScriptedCardSource::new()
                .then_card(complete_raw_card("Shock", "2000-06-05"))
                .then_card(complete_raw_card("Opt", "2017-09-29")),
        );
        let engine = engine_with(source.clone());
        let id = session_id(&engine.create_session().await);

        let ended = engine.end_game(&id).await;
        let again = engine.start_round(&id).await;
        assert_eq!(again, ended);
        // No card was requested for the terminated session.
        assert_eq!(source.random_calls(), 1);
    }

    #[tokio::test]
    async fn unavailable_source_keeps_session_usable() {
        let source = Arc::new(
            ScriptedCardSource::new()
                .then_error(CardSourceError::Transport("down".into()))
                .then_card(complete_raw_card("Opt", "2017-09-29")),
        );
        let engine = engine_with(source);

        let first = engine.create_session().await;
        let GameOutcome::SourceUnavailable(view) = &first else {
            panic!("expected SourceUnavailable, got {first:?}");
        };
        assert!(view.active);
        assert_eq!(view.card, None);

        let retry = engine.start_round(&session_id(&first)).await;
        assert!(matches!(retry, GameOutcome::RoundStarted(_)));
    }

    #[tokio::test]
    async fn degenerate_year_range_is_unavailable() {
        let source = Arc::new(
            ScriptedCardSource::new().then_card(complete_raw_card("Alpha Card", "1993-08-05")),
        );
        let engine = RoundEngine::new(
            Arc::new(SessionStore::new()),
            source,
            Arc::new(FixedClock(1993)),
            SecretYearDrawer::new(1993, Some(1)),
            RetryPolicy::default(),
        );
        assert!(matches!(
            engine.create_session().await,
            GameOutcome::SourceUnavailable(_)
        ));
    }

    /// Source that parks every random-card request until released.
    struct GatedSource {
        gate: Notify,
        entered: Notify,
    }

    #[async_trait]
    impl CardSource for GatedSource {
        async fn fetch_random_card(&self) -> Result<RawCard, CardSourceError> {
            self.entered.notify_one();
            self.gate.notified().await;
            Ok(complete_raw_card("Slow Card", "2011-02-04"))
        }

        async fn fetch_card_by_name(&self, name: &str) -> Result<RawCard, CardSourceError> {
            Err(CardSourceError::NotFound(name.to_string()))
        }
    }

    #[tokio::test]
    async fn session_is_not_locked_while_card_is_fetched() {
        let source = Arc::new(GatedSource {
            gate: Notify::new(),
            entered: Notify::new(),
        });
        let engine = Arc::new(engine_with(source.clone()));
        let (id, _) = engine.store().create();
        let id = id.to_string();

        let pending = {
            let engine = engine.clone();
            let id = id.clone();
            tokio::spawn(async move { engine.start_round(&id).await })
        };
        source.entered.notified().await;

        // Reading the same session must not wait on the in-flight draw.
        let state = tokio::time::timeout(Duration::from_secs(1), engine.get_state(&id))
            .await
            .expect("get_state blocked behind card fetch");
        assert!(matches!(state, GameOutcome::State(_)));

        // Ending the game mid-draw wins; the late card is discarded.
        engine.end_game(&id).await;
        source.gate.notify_one();
        let late = pending.await.unwrap();
        assert!(matches!(
            late,
            GameOutcome::GameOver { reason: EndReason::Ended, ref view } if view.card.is_none()
        ));
    }
}
