use serde::{Deserialize, Serialize};
use std::fmt;

/// Display state of a single token on the board.
///
/// `Correct` is terminal: once a token has been matched it never goes back to
/// `Normal`. `Wrong` is a transient flag set by an incorrect pick and does not
/// block further guesses. `Inactive` is never set by guess processing; the
/// presentation layer applies it to tokens of sentences the learner has not
/// reached yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    Normal,
    Correct,
    Wrong,
    Inactive,
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenState::Normal => write!(f, "normal"),
            TokenState::Correct => write!(f, "correct"),
            TokenState::Wrong => write!(f, "wrong"),
            TokenState::Inactive => write!(f, "inactive"),
        }
    }
}

/// A guessable word or short merged phrase within a sentence.
///
/// Identity is positional: two tokens with the same text are distinct entries
/// in their sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub state: TokenState,
}

impl Token {
    /// Creates a new token in the `Normal` state.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            state: TokenState::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_state_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenState::Normal).unwrap(),
            "\"normal\""
        );
        assert_eq!(
            serde_json::to_string(&TokenState::Correct).unwrap(),
            "\"correct\""
        );

        let wrong: TokenState = serde_json::from_str("\"wrong\"").unwrap();
        assert_eq!(wrong, TokenState::Wrong);
    }

    #[test]
    fn test_invalid_token_state_deserialization() {
        let result: Result<TokenState, _> = serde_json::from_str("\"blocked\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_state_display() {
        assert_eq!(format!("{}", TokenState::Inactive), "inactive");
    }

    #[test]
    fn test_new_token_starts_normal() {
        let token = Token::new("batatas");
        assert_eq!(token.word, "batatas");
        assert_eq!(token.state, TokenState::Normal);
    }
}
