//! Translation Seam
//!
//! The display translation shown next to each turn comes through this trait.

use crate::catalog::PhrasePair;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Translates text between two named languages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;
}

/// Exact-lookup translator backed by the catalog's phrase pairs.
///
/// A text without an entry is a collaborator fault and surfaces as an error;
/// the caller decides whether that ends the session.
pub struct PhraseTableTranslator {
    entries: HashMap<String, String>,
}

impl PhraseTableTranslator {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = PhrasePair>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|pair| (pair.source.trim().to_string(), pair.target))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Translator for PhraseTableTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        self.entries.get(text.trim()).cloned().with_context(|| {
            format!("no {source_language} -> {target_language} entry for {text:?}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: &str, target: &str) -> PhrasePair {
        PhrasePair {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[tokio::test]
    async fn test_known_phrase_is_translated() {
        let translator = PhraseTableTranslator::new([pair("Gosto sim!", "I do!")]);
        let translated = translator
            .translate("Gosto sim!", "Brazilian Portuguese", "English")
            .await
            .unwrap();
        assert_eq!(translated, "I do!");
    }

    #[tokio::test]
    async fn test_lookup_ignores_surrounding_whitespace() {
        let translator = PhraseTableTranslator::new([pair(" Gosto sim! ", "I do!")]);
        let translated = translator
            .translate("Gosto sim!\n", "Brazilian Portuguese", "English")
            .await
            .unwrap();
        assert_eq!(translated, "I do!");
    }

    #[tokio::test]
    async fn test_missing_phrase_is_an_error() {
        let translator = PhraseTableTranslator::new([]);
        let err = translator
            .translate("Tudo bem?", "Brazilian Portuguese", "English")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Tudo bem?"));
    }
}
