//! API Models
//!
//! Request payloads and the session views returned to the client. Views are
//! rendered from the shuffled board; tokens in sentences the learner has not
//! reached yet are shown as `inactive`.

use crate::state::GameSession;
use parlance_core::conversation::{Proficiency, TurnRole};
use parlance_core::game::WordGame;
use parlance_core::token::TokenState;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateSessionPayload {
    #[schema(example = "Ordering food at a restaurant")]
    pub topic: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GuessPayload {
    /// Index of the sentence the pick was made in.
    pub sentence_index: usize,
    /// Position of the picked token in that sentence's shuffled view.
    pub token_index: usize,
}

/// Display state of one board token.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenDisplayState {
    Normal,
    Correct,
    Wrong,
    Inactive,
}

impl From<TokenState> for TokenDisplayState {
    fn from(state: TokenState) -> Self {
        match state {
            TokenState::Normal => TokenDisplayState::Normal,
            TokenState::Correct => TokenDisplayState::Correct,
            TokenState::Wrong => TokenDisplayState::Wrong,
            TokenState::Inactive => TokenDisplayState::Inactive,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct TokenView {
    pub word: String,
    pub state: TokenDisplayState,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct SentenceView {
    pub tokens: Vec<TokenView>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct SessionView {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub topic: String,
    pub language: String,
    #[schema(value_type = String, example = "intermediate")]
    pub proficiency: Proficiency,
    /// Index of the active turn; absent before any turn is loaded.
    pub turn_index: Option<usize>,
    pub turn_count: usize,
    #[schema(value_type = Option<String>, example = "tutor")]
    pub role: Option<TurnRole>,
    /// Display-language translation of the active turn.
    pub translation: Option<String>,
    /// The correctly guessed words of the active turn, in order.
    pub guessed_text: String,
    pub finished: bool,
    /// The shuffled board of the active turn, one row per sentence.
    pub board: Vec<SentenceView>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct GuessResponse {
    pub correct: bool,
    pub session: SessionView,
}

#[derive(Serialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl SessionView {
    /// Renders the current state of a session for the client.
    pub fn from_session(session: &GameSession) -> Self {
        let flow = &session.flow;
        let role = flow.current_turn().map(|i| flow.turns()[i].role);
        Self {
            id: session.id,
            topic: session.topic.clone(),
            language: session.language.clone(),
            proficiency: session.proficiency,
            turn_index: flow.current_turn(),
            turn_count: flow.turns().len(),
            role,
            translation: flow.current_translation().map(str::to_string),
            guessed_text: flow
                .game()
                .map(|game| game.guessed_text().to_string())
                .unwrap_or_default(),
            finished: flow.is_finished(),
            board: flow.game().map(board_view).unwrap_or_default(),
        }
    }
}

/// Builds the shuffled board, dimming sentences beyond the current one.
fn board_view(game: &WordGame) -> Vec<SentenceView> {
    game.shuffled()
        .iter()
        .enumerate()
        .map(|(sentence_index, order)| SentenceView {
            tokens: order
                .iter()
                .map(|&canonical| {
                    let token = &game.sentences()[sentence_index][canonical];
                    let state = if sentence_index > game.current_sentence() {
                        TokenDisplayState::Inactive
                    } else {
                        token.state.into()
                    };
                    TokenView {
                        word: token.word.clone(),
                        state,
                    }
                })
                .collect(),
        })
        .collect()
}
