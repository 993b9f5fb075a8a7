//! Conversation Progression
//!
//! `ConversationFlow` walks an ordered sequence of conversation turns. For
//! each turn it fetches a display translation, segments the turn text into
//! clauses, and hands them to a fresh [`WordGame`]; completing a turn's board
//! advances the conversation until every turn has been played.

use crate::game::{GameError, WordGame};
use crate::segment::ParagraphSegmenter;
use crate::splitter::WordSplitter;
use crate::translate::Translator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Speaker of a conversation turn.
///
/// Alternation is a convention of whoever authored the turns; the flow only
/// consumes their order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Learner,
    Tutor,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::Learner => write!(f, "learner"),
            TurnRole::Tutor => write!(f, "tutor"),
        }
    }
}

/// One message of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

/// How much of the target language the learner already understands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proficiency::Beginner => write!(f, "beginner"),
            Proficiency::Intermediate => write!(f, "intermediate"),
            Proficiency::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown proficiency level: {0:?}")]
pub struct ParseProficiencyError(String);

impl FromStr for Proficiency {
    type Err = ParseProficiencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Proficiency::Beginner),
            "intermediate" => Ok(Proficiency::Intermediate),
            "advanced" => Ok(Proficiency::Advanced),
            _ => Err(ParseProficiencyError(s.to_string())),
        }
    }
}

/// Errors from driving the conversation.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("no conversation turn is active")]
    NoActiveTurn,
    #[error("the conversation is already finished")]
    Finished,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

/// Drives the ordered turn sequence of one conversation.
pub struct ConversationFlow {
    segmenter: Arc<dyn ParagraphSegmenter>,
    translator: Arc<dyn Translator>,
    splitter: WordSplitter,
    source_language: String,
    display_language: String,
    turns: Vec<ConversationTurn>,
    current_turn: Option<usize>,
    current_translation: Option<String>,
    game: Option<WordGame>,
    finished: bool,
}

impl ConversationFlow {
    pub fn new(
        segmenter: Arc<dyn ParagraphSegmenter>,
        translator: Arc<dyn Translator>,
        splitter: WordSplitter,
        source_language: impl Into<String>,
        display_language: impl Into<String>,
    ) -> Self {
        Self {
            segmenter,
            translator,
            splitter,
            source_language: source_language.into(),
            display_language: display_language.into(),
            turns: Vec::new(),
            current_turn: None,
            current_translation: None,
            game: None,
            finished: false,
        }
    }

    /// Replaces the turn list.
    ///
    /// An empty list leaves the flow idle; otherwise the first turn is
    /// prepared for play. Initialization is all-or-nothing: a collaborator
    /// fault surfaces before any guess can be taken.
    pub async fn load_turns(&mut self, turns: Vec<ConversationTurn>) -> Result<(), FlowError> {
        self.turns = turns;
        self.current_turn = None;
        self.current_translation = None;
        self.game = None;
        self.finished = false;
        if self.turns.is_empty() {
            return Ok(());
        }
        self.start_turn(0).await
    }

    /// Prepares the turn at `index` for play, skipping turns with nothing to
    /// guess.
    async fn start_turn(&mut self, index: usize) -> Result<(), FlowError> {
        let mut index = index;
        loop {
            let content = self.turns[index].content.clone();
            let portions = self.segmenter.segment(&content).await?;
            let game = WordGame::new(&portions, &self.splitter);
            if game.is_done() {
                debug!(turn = index, "turn has nothing to guess, skipping");
                if index + 1 == self.turns.len() {
                    self.current_turn = Some(index);
                    self.current_translation = None;
                    self.game = Some(game);
                    self.finished = true;
                    info!("conversation finished");
                    return Ok(());
                }
                index += 1;
                continue;
            }
            let translation = self
                .translator
                .translate(&content, &self.source_language, &self.display_language)
                .await?;
            info!(turn = index, sentences = game.sentence_count(), "conversation turn ready");
            self.current_turn = Some(index);
            self.current_translation = Some(translation);
            self.game = Some(game);
            return Ok(());
        }
    }

    /// Moves to the next turn.
    ///
    /// On the last turn this only marks the conversation finished; calling it
    /// again afterwards is a no-op.
    pub async fn advance_turn(&mut self) -> Result<(), FlowError> {
        if self.finished {
            return Ok(());
        }
        let current = self.current_turn.ok_or(FlowError::NoActiveTurn)?;
        if current + 1 == self.turns.len() {
            self.finished = true;
            info!("conversation finished");
            return Ok(());
        }
        self.start_turn(current + 1).await
    }

    /// Forwards one pick to the active turn's engine.
    ///
    /// Completing the turn's board advances the conversation, so finishing
    /// the last turn leaves the flow finished with no separate action.
    pub async fn receive_guess(
        &mut self,
        sentence_index: usize,
        token_index: usize,
    ) -> Result<bool, FlowError> {
        if self.finished {
            return Err(FlowError::Finished);
        }
        let game = self.game.as_mut().ok_or(FlowError::NoActiveTurn)?;
        let correct = game.submit_guess(sentence_index, token_index)?;
        if game.is_done() {
            self.advance_turn().await?;
        }
        Ok(correct)
    }

    /// Redraws the shuffled board for the active turn.
    pub fn reshuffle(&mut self) -> Result<(), FlowError> {
        if self.finished {
            return Err(FlowError::Finished);
        }
        let game = self.game.as_mut().ok_or(FlowError::NoActiveTurn)?;
        game.shuffle();
        Ok(())
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Index of the active turn, if any turn has been loaded.
    pub fn current_turn(&self) -> Option<usize> {
        self.current_turn
    }

    /// Display translation of the active turn's content.
    pub fn current_translation(&self) -> Option<&str> {
        self.current_translation.as_deref()
    }

    /// The active turn's engine.
    pub fn game(&self) -> Option<&WordGame> {
        self.game.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
