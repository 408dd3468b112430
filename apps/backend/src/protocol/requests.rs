use serde::Deserialize;

use crate::domain::Guess;

/// Body for operations that only name a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessRequest {
    pub session_id: String,
    pub guess: Guess,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_request_parses_camel_case() {
        let req: GuessRequest =
            serde_json::from_str(r#"{"sessionId":"abc","guess":"before"}"#).unwrap();
        assert_eq!(req.session_id, "abc");
        assert_eq!(req.guess, Guess::Before);
    }

    #[test]
    fn guess_request_requires_both_fields() {
        assert!(serde_json::from_str::<GuessRequest>(r#"{"sessionId":"abc"}"#).is_err());
        assert!(serde_json::from_str::<GuessRequest>(r#"{"guess":"after"}"#).is_err());
        assert!(
            serde_json::from_str::<GuessRequest>(r#"{"sessionId":"abc","guess":"sideways"}"#)
                .is_err()
        );
    }
}
