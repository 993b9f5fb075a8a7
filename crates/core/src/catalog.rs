//! Conversation Catalog
//!
//! Pre-authored conversation sets and their on-disk loading. Each set bundles
//! one themed conversation with the phrase translations needed to play it.

use crate::conversation::{ConversationTurn, Proficiency};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A source-language phrase and its display-language translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhrasePair {
    pub source: String,
    pub target: String,
}

/// One themed, pre-authored conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSet {
    pub topic: String,
    pub language: String,
    pub proficiency: Proficiency,
    pub turns: Vec<ConversationTurn>,
    #[serde(default)]
    pub phrases: Vec<PhrasePair>,
}

/// All conversation sets known to the process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub sets: Vec<ConversationSet>,
}

impl Catalog {
    pub fn new(sets: Vec<ConversationSet>) -> Self {
        Self { sets }
    }

    /// Loads every `*.json` file in `path` as one conversation set.
    ///
    /// A file that does not parse is reported with its path and stops the
    /// load; sets are sorted by topic so the result does not depend on
    /// directory iteration order.
    pub fn load_dir(path: &Path) -> Result<Self> {
        let entries = fs::read_dir(path)
            .with_context(|| format!("reading catalog directory {}", path.display()))?;
        let mut sets = Vec::new();
        for entry in entries {
            let file = entry?.path();
            if file.is_file() && file.extension().and_then(|s| s.to_str()) == Some("json") {
                let raw = fs::read_to_string(&file)?;
                let set: ConversationSet = serde_json::from_str(&raw)
                    .with_context(|| format!("malformed conversation set {}", file.display()))?;
                sets.push(set);
            }
        }
        sets.sort_by(|a, b| a.topic.cmp(&b.topic));
        Ok(Self { sets })
    }

    /// Distinct topics across all sets, in catalog order.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = Vec::new();
        for set in &self.sets {
            if !topics.contains(&set.topic) {
                topics.push(set.topic.clone());
            }
        }
        topics
    }

    /// Distinct topics that have a set for the given language and level.
    pub fn topics_matching(&self, language: &str, proficiency: Proficiency) -> Vec<String> {
        let mut topics: Vec<String> = Vec::new();
        for set in &self.sets {
            if set.language.eq_ignore_ascii_case(language)
                && set.proficiency == proficiency
                && !topics.contains(&set.topic)
            {
                topics.push(set.topic.clone());
            }
        }
        topics
    }

    /// Every phrase pair across all sets.
    pub fn phrase_pairs(&self) -> impl Iterator<Item = &PhrasePair> {
        self.sets.iter().flat_map(|set| set.phrases.iter())
    }
}
