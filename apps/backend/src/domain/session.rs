//! Per-session game state and its transitions.
//!
//! A session moves `Created -> RoundOpen -> (scored, awaiting next round) ->
//! RoundOpen ...` until a wrong guess or an explicit end makes it
//! terminal. Every mutating method here is a no-op once an end reason is set.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::{CardFacts, CardView};
use super::guess::Guess;

/// Opaque session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets the store look sessions up by the raw id a caller sent.
impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One card/secret-year pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub card: CardFacts,
    pub secret_year: i32,
    /// False once a guess has been scored against this round.
    pub open: bool,
}

/// Result of scoring a guess against the open round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The player guessed wrong.
    WrongGuess,
    /// The game was ended explicitly.
    Ended,
}

/// No open round to score against (none drawn yet, already scored, or terminated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoOpenRound;

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    score: u32,
    round: Option<Round>,
    /// `None` while the session is active. Set once, never cleared.
    ended: Option<EndReason>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            score: 0,
            round: None,
            ended: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_active(&self) -> bool {
        self.ended.is_none()
    }

    /// How the session ended, if it has.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Install a fresh round. Refused (returns false) on a terminated session
    /// or when the secret year equals the card's release year.
    pub fn open_round(&mut self, card: CardFacts, secret_year: i32) -> bool {
        if !self.is_active() || card.year_released == secret_year {
            return false;
        }
        self.round = Some(Round {
            card,
            secret_year,
            open: true,
        });
        true
    }

    /// Score `guess` against the open round and close it.
    ///
    /// A correct guess bumps the score by one; a wrong guess terminates the session.
    pub fn score_guess(&mut self, guess: Guess) -> Result<Verdict, NoOpenRound> {
        if !self.is_active() {
            return Err(NoOpenRound);
        }
        let round = match self.round.as_mut() {
            Some(round) if round.open => round,
            _ => return Err(NoOpenRound),
        };

        round.open = false;
        if guess.is_correct(round.card.year_released, round.secret_year) {
            self.score += 1;
            Ok(Verdict::Correct)
        } else {
            self.ended = Some(EndReason::WrongGuess);
            Ok(Verdict::Wrong)
        }
    }

    /// Force the terminal state and report why the session is over.
    /// Idempotent; an earlier end reason is kept.
    pub fn terminate(&mut self) -> EndReason {
        let reason = *self.ended.get_or_insert(EndReason::Ended);
        if let Some(round) = self.round.as_mut() {
            round.open = false;
        }
        reason
    }

    /// Caller-facing projection: card masked while active, revealed once terminal.
    pub fn view(&self) -> SessionView {
        let card = self.round.as_ref().map(|round| {
            if self.is_active() {
                CardView::Masked(round.card.masked())
            } else {
                CardView::Full(round.card.clone())
            }
        });
        SessionView {
            session_id: self.id.clone(),
            score: self.score,
            active: self.is_active(),
            card,
            random_year: self.round.as_ref().map(|round| round.secret_year),
        }
    }
}

/// Read-only snapshot of a session handed back to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session_id: SessionId,
    pub score: u32,
    pub active: bool,
    pub card: Option<CardView>,
    pub random_year: Option<i32>,
}

impl SessionView {
    pub fn game_over(&self) -> bool {
        !self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(year: i32) -> CardFacts {
        CardFacts {
            name: "Llanowar Elves".to_string(),
            image: Some("https://img.example/elves.jpg".to_string()),
            year_released: year,
            cmc: Some(1.0),
        }
    }

    fn session_with_round(card_year: i32, secret_year: i32) -> Session {
        let mut session = Session::new(SessionId::generate());
        assert!(session.open_round(card(card_year), secret_year));
        session
    }

    #[test]
    fn new_session_is_active_and_empty() {
        let session = Session::new(SessionId::generate());
        assert!(session.is_active());
        assert_eq!(session.score(), 0);
        assert!(session.round().is_none());
        assert_eq!(session.view().card, None);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn correct_guess_scores_and_closes_round() {
        let mut session = session_with_round(2010, 2000);
        assert_eq!(session.score_guess(Guess::After), Ok(Verdict::Correct));
        assert_eq!(session.score(), 1);
        assert!(session.is_active());

        // Same round cannot be scored twice.
        assert_eq!(session.score_guess(Guess::After), Err(NoOpenRound));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn wrong_guess_terminates_and_reveals() {
        let mut session = session_with_round(2010, 2000);
        assert_eq!(session.score_guess(Guess::Before), Ok(Verdict::Wrong));
        assert!(!session.is_active());
        assert_eq!(session.score(), 0);

        let view = session.view();
        assert!(view.game_over());
        assert_eq!(
            view.card.as_ref().and_then(CardView::year_released),
            Some(2010)
        );
    }

    #[test]
    fn active_view_masks_card() {
        let session = session_with_round(1999, 2004);
        let view = session.view();
        assert!(matches!(view.card, Some(CardView::Masked(_))));
        assert_eq!(view.random_year, Some(2004));
    }

    #[test]
    fn terminated_session_refuses_new_rounds() {
        let mut session = session_with_round(1999, 2004);
        session.terminate();
        assert!(!session.open_round(card(2015), 2001));
        assert_eq!(session.round().map(|r| r.secret_year), Some(2004));
        assert_eq!(session.score_guess(Guess::Before), Err(NoOpenRound));
    }

    #[test]
    fn open_round_rejects_tied_secret_year() {
        let mut session = Session::new(SessionId::generate());
        assert!(!session.open_round(card(2003), 2003));
        assert!(session.round().is_none());
    }

    #[test]
    fn terminate_is_idempotent() {
        let mut session = session_with_round(1999, 2004);
        session.terminate();
        let first = session.view();
        session.terminate();
        assert_eq!(session.view(), first);
    }

    #[test]
    fn end_reason_survives_later_terminate() {
        let mut session = session_with_round(2010, 2000);
        assert_eq!(session.end_reason(), None);
        session.score_guess(Guess::Before).unwrap();
        assert_eq!(session.end_reason(), Some(EndReason::WrongGuess));

        assert_eq!(session.terminate(), EndReason::WrongGuess);
        assert_eq!(session.end_reason(), Some(EndReason::WrongGuess));
    }

    #[test]
    fn explicit_end_is_recorded() {
        let mut session = session_with_round(1999, 2004);
        assert_eq!(session.terminate(), EndReason::Ended);
        assert_eq!(session.end_reason(), Some(EndReason::Ended));
    }
}
