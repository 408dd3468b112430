use serde::{Deserialize, Serialize};

/// A player's call on whether the card came out before or after the secret year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Before,
    After,
}

impl Guess {
    /// Judge the guess. A card released in the secret year itself counts as `After`.
    pub fn is_correct(self, card_year: i32, secret_year: i32) -> bool {
        match self {
            Guess::After => card_year >= secret_year,
            Guess::Before => card_year < secret_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_wins_when_card_is_newer() {
        assert!(Guess::After.is_correct(2005, 1999));
        assert!(!Guess::Before.is_correct(2005, 1999));
    }

    #[test]
    fn before_wins_when_card_is_older() {
        assert!(Guess::Before.is_correct(1994, 2010));
        assert!(!Guess::After.is_correct(1994, 2010));
    }

    #[test]
    fn tie_goes_to_after() {
        assert!(Guess::After.is_correct(2001, 2001));
        assert!(!Guess::Before.is_correct(2001, 2001));
    }

    #[test]
    fn parses_lowercase_only() {
        assert_eq!(
            serde_json::from_str::<Guess>("\"before\"").unwrap(),
            Guess::Before
        );
        assert_eq!(
            serde_json::from_str::<Guess>("\"after\"").unwrap(),
            Guess::After
        );
        assert!(serde_json::from_str::<Guess>("\"higher\"").is_err());
        assert!(serde_json::from_str::<Guess>("\"AFTER\"").is_err());
    }
}
