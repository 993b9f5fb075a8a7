//! Paragraph Segmentation
//!
//! Turns one conversation turn's text into the ordered clause list the game
//! board is built from.

use anyhow::Result;
use async_trait::async_trait;

/// Splits a paragraph into ordered clause-like portions.
///
/// Implementations must return portions whose concatenation reproduces the
/// input text exactly. Boundaries should fall on meaningful clauses rather
/// than single words, and short inputs should come back whole instead of
/// being chopped at every comma.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParagraphSegmenter: Send + Sync {
    async fn segment(&self, text: &str) -> Result<Vec<String>>;
}

/// Deterministic, in-process segmenter.
///
/// Splits after runs of sentence-final punctuation, keeping the punctuation
/// and any following whitespace attached to the left portion. Portions longer
/// than `long_portion_chars` are additionally split at comma or semicolon
/// boundaries, but only where both halves stay at least `min_clause_chars`
/// long.
#[derive(Debug, Clone, Copy)]
pub struct ClauseSegmenter {
    long_portion_chars: usize,
    min_clause_chars: usize,
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self {
            long_portion_chars: 48,
            min_clause_chars: 16,
        }
    }
}

fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

impl ClauseSegmenter {
    fn split_sentences(text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut portions = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            if is_sentence_terminal(chars[i].1) {
                let mut j = i + 1;
                while j < chars.len() && is_sentence_terminal(chars[j].1) {
                    j += 1;
                }
                while j < chars.len() && chars[j].1.is_whitespace() {
                    j += 1;
                }
                let end = if j < chars.len() { chars[j].0 } else { text.len() };
                portions.push(text[start..end].to_string());
                start = end;
                i = j;
            } else {
                i += 1;
            }
        }
        if start < text.len() {
            portions.push(text[start..].to_string());
        }
        portions
    }

    fn split_clauses(&self, portion: &str) -> Vec<String> {
        if portion.chars().count() <= self.long_portion_chars {
            return vec![portion.to_string()];
        }
        let chars: Vec<(usize, char)> = portion.char_indices().collect();
        let mut clauses = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            if matches!(chars[i].1, ',' | ';') {
                let mut j = i + 1;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    j += 1;
                }
                let end = if j < chars.len() {
                    chars[j].0
                } else {
                    portion.len()
                };
                let left = portion[start..end].chars().count();
                let right = portion[end..].chars().count();
                if left >= self.min_clause_chars && right >= self.min_clause_chars {
                    clauses.push(portion[start..end].to_string());
                    start = end;
                }
                i = j;
            } else {
                i += 1;
            }
        }
        if start < portion.len() {
            clauses.push(portion[start..].to_string());
        }
        clauses
    }
}

#[async_trait]
impl ParagraphSegmenter for ClauseSegmenter {
    async fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(Self::split_sentences(text)
            .iter()
            .flat_map(|portion| self.split_clauses(portion))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn portions(text: &str) -> Vec<String> {
        ClauseSegmenter::default().segment(text).await.unwrap()
    }

    #[tokio::test]
    async fn test_concatenation_reproduces_the_input() {
        let samples = [
            "Oi! Você já decidiu o que vai pedir no restaurante?",
            "Sim, eu já experimentei! O hambúrguer é muito saboroso e vem com batatas fritas.",
            "Eu estou em dúvida entre o hambúrguer e a salada, mas acho que vou acabar pedindo a salada com molho da casa.",
            "No spacing   oddities?Are kept.",
        ];
        for sample in samples {
            let portions = portions(sample).await;
            assert_eq!(portions.concat(), sample, "sample: {sample:?}");
        }
    }

    #[tokio::test]
    async fn test_splits_on_sentence_boundaries() {
        let portions = portions("Oi! Tudo bem? Eu vou ao mercado.").await;
        assert_eq!(portions, vec!["Oi! ", "Tudo bem? ", "Eu vou ao mercado."]);
    }

    #[tokio::test]
    async fn test_punctuation_runs_stay_together() {
        let portions = portions("Sério?! Não acredito.").await;
        assert_eq!(portions, vec!["Sério?! ", "Não acredito."]);
    }

    #[tokio::test]
    async fn test_short_input_is_not_comma_split() {
        let portions = portions("Gosto sim, e você?").await;
        assert_eq!(portions, vec!["Gosto sim, e você?"]);
    }

    #[tokio::test]
    async fn test_long_clause_is_comma_split() {
        let text = "Eu estou em dúvida entre o hambúrguer e a salada, mas acho que vou acabar pedindo a salada com molho da casa.";
        let portions = portions(text).await;
        assert_eq!(
            portions,
            vec![
                "Eu estou em dúvida entre o hambúrguer e a salada, ",
                "mas acho que vou acabar pedindo a salada com molho da casa.",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input_yields_no_portions() {
        assert!(portions("").await.is_empty());
    }
}
