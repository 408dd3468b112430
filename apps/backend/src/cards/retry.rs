//! Bounded retry around card-source calls.
//!
//! The policy only knows about attempts: each try either accepts a value,
//! rejects the candidate (consuming one attempt) or fails outright. Outright
//! failures stop the loop immediately.

use std::future::Future;

use tracing::{debug, warn};

use super::source::{CardSource, CardSourceError};
use crate::domain::CardFacts;

/// Outcome of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    Accept(T),
    Reject(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `attempt` (given the 1-based attempt number) until it accepts,
    /// fails, or the budget runs out.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, CardSourceError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Attempt<T>, CardSourceError>>,
    {
        for n in 1..=self.max_attempts {
            debug!(attempt = n, max_attempts = self.max_attempts, "Card source attempt");
            match attempt(n).await? {
                Attempt::Accept(value) => return Ok(value),
                Attempt::Reject(reason) => {
                    warn!(attempt = n, reason = %reason, "Card candidate rejected");
                }
            }
        }

        warn!(
            max_attempts = self.max_attempts,
            "No complete card within attempt budget"
        );
        Err(CardSourceError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Draw random cards until one carries every field a round needs.
pub async fn fetch_complete_card(
    source: &dyn CardSource,
    policy: RetryPolicy,
) -> Result<CardFacts, CardSourceError> {
    policy
        .run(move |_| async move {
            let raw = source.fetch_random_card().await?;
            Ok(match CardFacts::try_from(&raw) {
                Ok(card) => Attempt::Accept(card),
                Err(missing) => Attempt::Reject(format!(
                    "{}: {missing}",
                    raw.name.as_deref().unwrap_or("<unnamed>")
                )),
            })
        })
        .await
}
