//! Conversation Sourcing
//!
//! Where conversations come from: a trait for anything that can produce an
//! ordered, role-alternating conversation for a topic, and the catalog-backed
//! implementation used in production.

use crate::catalog::Catalog;
use crate::conversation::{ConversationTurn, Proficiency};
use anyhow::{Result, bail};
use async_trait::async_trait;
use rand::seq::IndexedRandom;

/// Everything a source needs to produce one themed conversation.
#[derive(Debug, Clone)]
pub struct ConversationParams {
    pub topic: String,
    pub language: String,
    pub turn_count: usize,
    pub sentences_per_turn: usize,
    pub proficiency: Proficiency,
}

/// Produces an ordered conversation about a topic.
#[async_trait]
pub trait ConversationSource: Send + Sync {
    async fn conversation(&self, params: &ConversationParams) -> Result<Vec<ConversationTurn>>;
}

/// Serves conversations from the pre-authored catalog.
///
/// Filters the catalog by topic, language and proficiency, picks uniformly
/// among the matching sets, and truncates the result to the requested turn
/// count. `sentences_per_turn` is advisory here: pre-authored turns keep the
/// length they were written with.
pub struct CatalogConversationSource {
    catalog: Catalog,
}

impl CatalogConversationSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ConversationSource for CatalogConversationSource {
    async fn conversation(&self, params: &ConversationParams) -> Result<Vec<ConversationTurn>> {
        let matches: Vec<&crate::catalog::ConversationSet> = self
            .catalog
            .sets
            .iter()
            .filter(|set| {
                set.topic.eq_ignore_ascii_case(&params.topic)
                    && set.language.eq_ignore_ascii_case(&params.language)
                    && set.proficiency == params.proficiency
            })
            .collect();
        let Some(set) = matches.choose(&mut rand::rng()) else {
            bail!(
                "no conversation set for topic {:?} in {} at the {} level",
                params.topic,
                params.language,
                params.proficiency
            );
        };
        Ok(set.turns.iter().take(params.turn_count).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConversationSet;
    use crate::conversation::TurnRole;

    fn set_with_turns(topic: &str, count: usize) -> ConversationSet {
        let turns = (0..count)
            .map(|i| ConversationTurn {
                role: if i % 2 == 0 {
                    TurnRole::Tutor
                } else {
                    TurnRole::Learner
                },
                content: format!("Turn {i}"),
            })
            .collect();
        ConversationSet {
            topic: topic.to_string(),
            language: "Brazilian Portuguese".to_string(),
            proficiency: Proficiency::Intermediate,
            turns,
            phrases: Vec::new(),
        }
    }

    fn params(topic: &str, turn_count: usize) -> ConversationParams {
        ConversationParams {
            topic: topic.to_string(),
            language: "Brazilian Portuguese".to_string(),
            turn_count,
            sentences_per_turn: 3,
            proficiency: Proficiency::Intermediate,
        }
    }

    #[tokio::test]
    async fn test_matching_set_is_served_in_order() {
        let source =
            CatalogConversationSource::new(Catalog::new(vec![set_with_turns("Weather", 4)]));
        let turns = source.conversation(&params("Weather", 10)).await.unwrap();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].content, "Turn 0");
        assert_eq!(turns[3].content, "Turn 3");
    }

    #[tokio::test]
    async fn test_turns_are_truncated_to_the_requested_count() {
        let source =
            CatalogConversationSource::new(Catalog::new(vec![set_with_turns("Weather", 6)]));
        let turns = source.conversation(&params("Weather", 2)).await.unwrap();
        assert_eq!(turns.len(), 2);
    }

    #[tokio::test]
    async fn test_topic_match_is_case_insensitive() {
        let source =
            CatalogConversationSource::new(Catalog::new(vec![set_with_turns("Weather", 2)]));
        let turns = source.conversation(&params("wEaThEr", 2)).await.unwrap();
        assert_eq!(turns.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_topic_is_an_error() {
        let source =
            CatalogConversationSource::new(Catalog::new(vec![set_with_turns("Weather", 2)]));
        let err = source.conversation(&params("Cooking", 2)).await.unwrap_err();
        assert!(err.to_string().contains("Cooking"));
    }
}
