//! Scryfall-backed card source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::raw::RawCard;
use super::source::{CardSource, CardSourceError};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// Card source talking to the Scryfall REST API.
#[derive(Clone)]
pub struct ScryfallCardSource {
    client: Client,
    base_url: String,
}

impl ScryfallCardSource {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Unable to build card source client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_card(
        &self,
        path: &str,
        query: &[(&str, &str)],
        lookup: Option<&str>,
    ) -> Result<RawCard, CardSourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Requesting card");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CardSourceError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(name) = lookup {
                return Err(CardSourceError::NotFound(name.to_string()));
            }
        }
        if !status.is_success() {
            return Err(CardSourceError::Transport(format!(
                "{url} answered HTTP {status}"
            )));
        }

        resp.json::<RawCard>()
            .await
            .map_err(|e| CardSourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CardSource for ScryfallCardSource {
    async fn fetch_random_card(&self) -> Result<RawCard, CardSourceError> {
        self.get_card("/cards/random", &[], None).await
    }

    async fn fetch_card_by_name(&self, name: &str) -> Result<RawCard, CardSourceError> {
        self.get_card("/cards/named", &[("exact", name)], Some(name))
            .await
    }
}
