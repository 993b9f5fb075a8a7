//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the collaborator
//! services and the single in-memory game session. The game is
//! single-session: creating a new session replaces the previous one.

use crate::config::Config;
use parlance_core::{
    conversation::{ConversationFlow, Proficiency},
    segment::ParagraphSegmenter,
    source::ConversationSource,
    translate::Translator,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One learner's game in progress.
pub struct GameSession {
    pub id: Uuid,
    pub topic: String,
    pub language: String,
    pub proficiency: Proficiency,
    pub flow: ConversationFlow,
}

/// The shared application state, created once at startup and passed to all
/// handlers. All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Option<GameSession>>>,
    pub source: Arc<dyn ConversationSource>,
    pub segmenter: Arc<dyn ParagraphSegmenter>,
    pub translator: Arc<dyn Translator>,
    pub topics: Vec<String>,
    pub config: Arc<Config>,
}
