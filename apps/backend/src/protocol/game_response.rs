//! Response body shared by every game operation.

use serde::{Deserialize, Serialize};

use crate::domain::{CardView, SessionView};
use crate::services::round_engine::{EndReason, GameOutcome};

pub const MSG_CORRECT: &str = "Correct guess!";
pub const MSG_ENDED: &str = "Game ended";
pub const MSG_NO_ROUND: &str = "No active game round";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch card";
pub const MSG_INVALID_SESSION: &str = "Invalid session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub session_id: String,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_year: Option<i32>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GameResponse {
    pub fn invalid_session() -> Self {
        Self {
            session_id: String::new(),
            score: 0,
            card: None,
            random_year: None,
            active: false,
            game_over: None,
            message: Some(MSG_INVALID_SESSION.to_string()),
        }
    }

    fn from_view(view: &SessionView, message: Option<String>) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            score: view.score,
            card: view.card.clone(),
            random_year: view.random_year,
            active: view.active,
            game_over: Some(view.game_over()),
            message,
        }
    }
}

fn game_over_message(view: &SessionView) -> String {
    match view.card.as_ref().and_then(|card| {
        card.year_released()
            .map(|year| (card.name().to_string(), year))
    }) {
        Some((name, year)) => format!("Game over! The card \"{name}\" was released in {year}."),
        None => "Game over!".to_string(),
    }
}

impl From<&GameOutcome> for GameResponse {
    fn from(outcome: &GameOutcome) -> Self {
        match outcome {
            GameOutcome::RoundStarted(view) | GameOutcome::State(view) => {
                Self::from_view(view, None)
            }
            GameOutcome::Scored(view) => Self::from_view(view, Some(MSG_CORRECT.to_string())),
            GameOutcome::GameOver {
                view,
                reason: EndReason::WrongGuess,
            } => Self::from_view(view, Some(game_over_message(view))),
            GameOutcome::GameOver {
                view,
                reason: EndReason::Ended,
            } => Self::from_view(view, Some(MSG_ENDED.to_string())),
            GameOutcome::NoActiveRound(view) => {
                Self::from_view(view, Some(MSG_NO_ROUND.to_string()))
            }
            GameOutcome::SourceUnavailable(view) => {
                Self::from_view(view, Some(MSG_FETCH_FAILED.to_string()))
            }
            GameOutcome::InvalidSession => Self::invalid_session(),
        }
    }
}
