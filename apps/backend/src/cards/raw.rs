//! Provider payloads and their translation into [`CardFacts`].

use std::fmt;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use crate::domain::CardFacts;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Card record as delivered by the provider. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCard {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// ISO date, e.g. `1993-08-05`.
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub oracle_text: Option<String>,
}

impl RawCard {
    /// Preferred image: `normal`, then `large`.
    pub fn image_url(&self) -> Option<&str> {
        let uris = self.image_uris.as_ref()?;
        uris.normal
            .as_deref()
            .or(uris.large.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn release_year(&self) -> Option<i32> {
        let raw = self.released_at.as_deref()?;
        Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.year())
    }

    fn valid_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    fn valid_cmc(&self) -> Option<f64> {
        self.cmc.filter(|cmc| cmc.is_finite() && *cmc >= 0.0)
    }

    /// Lookup projection used by the by-name route.
    pub fn summary(&self) -> CardSummary {
        CardSummary {
            name: self.name.clone().unwrap_or_default(),
            text: self.oracle_text.clone(),
            image: self.image_url().map(str::to_string),
        }
    }
}

/// Which required fields a candidate lacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFields {
    pub name: bool,
    pub image: bool,
    pub release_date: bool,
    pub cmc: bool,
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = [
            (self.name, "name"),
            (self.image, "image"),
            (self.release_date, "release date"),
            (self.cmc, "cmc"),
        ]
        .into_iter()
        .filter_map(|(absent, label)| absent.then_some(label))
        .collect();
        write!(f, "missing {}", missing.join(", "))
    }
}

impl TryFrom<&RawCard> for CardFacts {
    type Error = MissingFields;

    fn try_from(raw: &RawCard) -> Result<Self, Self::Error> {
        match (
            raw.valid_name(),
            raw.image_url(),
            raw.release_year(),
            raw.valid_cmc(),
        ) {
            (Some(name), Some(image), Some(year), Some(cmc)) => Ok(CardFacts {
                name: name.to_string(),
                image: Some(image.to_string()),
                year_released: year,
                cmc: Some(cmc),
            }),
            (name, image, year, cmc) => Err(MissingFields {
                name: name.is_none(),
                image: image.is_none(),
                release_date: year.is_none(),
                cmc: cmc.is_none(),
            }),
        }
    }
}

/// Name lookup response: rules text and preferred image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub name: String,
    pub text: Option<String>,
    pub image: Option<String>,
}
