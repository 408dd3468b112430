use async_trait::async_trait;
use thiserror::Error;

use super::raw::RawCard;

/// Failures reported by a card source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardSourceError {
    #[error("card not found: {0}")]
    NotFound(String),
    #[error("card source transport failure: {0}")]
    Transport(String),
    #[error("card source returned an unreadable payload: {0}")]
    Decode(String),
    #[error("no complete card after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// External provider of card metadata.
///
/// Sources return whatever the provider gave them; completeness is checked by
/// the caller.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn fetch_random_card(&self) -> Result<RawCard, CardSourceError>;

    async fn fetch_card_by_name(&self, name: &str) -> Result<RawCard, CardSourceError>;
}
