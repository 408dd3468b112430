//! Card facts as the game sees them.
//!
//! `CardFacts` is the only card representation the round engine handles.
//! Provider payloads are translated into it in [`crate::cards`] and never
//! reach this module.

use serde::{Deserialize, Serialize};

/// Complete facts about one card in play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFacts {
    pub name: String,
    pub image: Option<String>,
    pub year_released: i32,
    /// Converted mana cost.
    pub cmc: Option<f64>,
}

/// Card view with the release year withheld, shown while a round is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskedCard {
    pub name: String,
    pub image: Option<String>,
    pub cmc: Option<f64>,
}

impl CardFacts {
    pub fn masked(&self) -> MaskedCard {
        MaskedCard {
            name: self.name.clone(),
            image: self.image.clone(),
            cmc: self.cmc,
        }
    }
}

/// What a caller is allowed to see of the current card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardView {
    // Full must come first: an untagged masked card would also match a full payload.
    Full(CardFacts),
    Masked(MaskedCard),
}

impl CardView {
    pub fn name(&self) -> &str {
        match self {
            CardView::Full(card) => &card.name,
            CardView::Masked(card) => &card.name,
        }
    }

    pub fn year_released(&self) -> Option<i32> {
        match self {
            CardView::Full(card) => Some(card.year_released),
            CardView::Masked(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lotus() -> CardFacts {
        CardFacts {
            name: "Black Lotus".to_string(),
            image: Some("https://img.example/lotus.jpg".to_string()),
            year_released: 1993,
            cmc: Some(0.0),
        }
    }

    #[test]
    fn masked_view_drops_release_year() {
        let json = serde_json::to_value(CardView::Masked(lotus().masked())).unwrap();
        assert_eq!(json["name"], "Black Lotus");
        assert_eq!(json["cmc"], 0.0);
        assert!(json.get("yearReleased").is_none());
    }

    #[test]
    fn full_view_serializes_camel_case_year() {
        let json = serde_json::to_value(CardView::Full(lotus())).unwrap();
        assert_eq!(json["yearReleased"], 1993);
    }

    #[test]
    fn untagged_round_trip_keeps_variant() {
        let full: CardView =
            serde_json::from_value(serde_json::to_value(CardView::Full(lotus())).unwrap())
                .unwrap();
        assert_eq!(full.year_released(), Some(1993));

        let masked: CardView = serde_json::from_value(
            serde_json::to_value(CardView::Masked(lotus().masked())).unwrap(),
        )
        .unwrap();
        assert_eq!(masked.year_released(), None);
        assert_eq!(masked.name(), "Black Lotus");
    }
}
