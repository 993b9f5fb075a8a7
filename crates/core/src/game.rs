//! Word-Ordering Engine
//!
//! One `WordGame` covers a single conversation turn: its sentences are split
//! into tokens, each sentence gets an independent shuffled presentation
//! order, and the learner's picks are validated against a cursor that walks
//! the canonical order.

use crate::splitter::WordSplitter;
use crate::token::{Token, TokenState};
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Errors for picks that violate the engine's calling contract.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("guess targets sentence {got} but the current sentence is {expected}")]
    SentenceMismatch { expected: usize, got: usize },
    #[error("token index {index} is out of range for sentence {sentence}")]
    TokenOutOfRange { sentence: usize, index: usize },
    #[error("all sentences are already complete")]
    AlreadyComplete,
}

/// The word-ordering engine for one conversation turn.
///
/// Tokens live in `sentences` in canonical order. `shuffled` holds one index
/// permutation per sentence into that arena, so the canonical and shuffled
/// views share token identity and a state change is visible through either.
#[derive(Debug, Clone)]
pub struct WordGame {
    sentences: Vec<Vec<Token>>,
    shuffled: Vec<Vec<usize>>,
    current_sentence: usize,
    current_token: usize,
    done: bool,
    guessed_text: String,
}

impl WordGame {
    /// Builds a game from segmented portions and shuffles it.
    ///
    /// Portions that split to nothing are dropped; a game left with no
    /// sentences starts complete.
    pub fn new(portions: &[String], splitter: &WordSplitter) -> Self {
        let sentences: Vec<Vec<Token>> = portions
            .iter()
            .map(|portion| {
                splitter
                    .split(portion)
                    .into_iter()
                    .map(Token::new)
                    .collect::<Vec<Token>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        let done = sentences.is_empty();
        let mut game = Self {
            shuffled: Vec::new(),
            current_sentence: 0,
            current_token: 0,
            done,
            guessed_text: String::new(),
            sentences,
        };
        game.shuffle();
        game
    }

    /// Redraws an independent uniform permutation for every sentence.
    ///
    /// Token states are untouched, so reshuffling mid-turn keeps the
    /// learner's progress.
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffled = self
            .sentences
            .iter()
            .map(|tokens| {
                let mut order: Vec<usize> = (0..tokens.len()).collect();
                order.shuffle(&mut rng);
                order
            })
            .collect();
    }

    /// Evaluates one pick from the shuffled view.
    ///
    /// Matching is by word text, not token identity, so duplicate words are
    /// interchangeable. A wrong pick flags only the picked token and leaves
    /// the cursor alone; a correct pick marks the expected token and advances
    /// the cursor, completing the game after the last token of the last
    /// sentence.
    pub fn submit_guess(
        &mut self,
        sentence_index: usize,
        token_index: usize,
    ) -> Result<bool, GameError> {
        if self.done {
            return Err(GameError::AlreadyComplete);
        }
        if sentence_index != self.current_sentence {
            return Err(GameError::SentenceMismatch {
                expected: self.current_sentence,
                got: sentence_index,
            });
        }
        let canonical_index = *self.shuffled[sentence_index].get(token_index).ok_or(
            GameError::TokenOutOfRange {
                sentence: sentence_index,
                index: token_index,
            },
        )?;

        let expected_word = self.sentences[self.current_sentence][self.current_token]
            .word
            .clone();
        let guessed = &mut self.sentences[sentence_index][canonical_index];
        if guessed.word != expected_word {
            guessed.state = TokenState::Wrong;
            debug!(guessed = %guessed.word, expected = %expected_word, "wrong guess");
            return Ok(false);
        }

        self.sentences[self.current_sentence][self.current_token].state = TokenState::Correct;
        debug!(word = %expected_word, "right guess");
        self.guessed_text.push_str(&expected_word);
        self.guessed_text.push(' ');
        self.current_token += 1;
        if self.current_token == self.sentences[self.current_sentence].len() {
            self.current_sentence += 1;
            self.current_token = 0;
        }
        if self.current_sentence == self.sentences.len() {
            self.done = true;
            info!("all words guessed");
        }
        Ok(true)
    }

    /// Sentences in canonical order.
    pub fn sentences(&self) -> &[Vec<Token>] {
        &self.sentences
    }

    /// Per-sentence presentation orders, as indices into [`Self::sentences`].
    pub fn shuffled(&self) -> &[Vec<usize>] {
        &self.shuffled
    }

    /// Resolves a position in the shuffled view to its token.
    pub fn shuffled_token(&self, sentence_index: usize, token_index: usize) -> Option<&Token> {
        let canonical = *self.shuffled.get(sentence_index)?.get(token_index)?;
        self.sentences[sentence_index].get(canonical)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Index of the sentence the cursor is in; equals the sentence count once
    /// the game is done.
    pub fn current_sentence(&self) -> usize {
        self.current_sentence
    }

    /// Index of the next expected token within the current sentence.
    pub fn current_token(&self) -> usize {
        self.current_token
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The correctly guessed words so far, space separated.
    pub fn guessed_text(&self) -> &str {
        &self.guessed_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_for(sentences: &[&str]) -> WordGame {
        let portions: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
        WordGame::new(&portions, &WordSplitter::default())
    }

    /// Position of the first token matching `word` in a sentence's shuffled view.
    fn shuffled_position(game: &WordGame, sentence: usize, word: &str) -> usize {
        game.shuffled()[sentence]
            .iter()
            .position(|&ci| game.sentences()[sentence][ci].word == word)
            .unwrap()
    }

    #[test]
    fn test_shuffle_conserves_tokens() {
        let mut game = game_for(&["This is a sentence.", "Another one follows here."]);
        for _ in 0..5 {
            game.shuffle();
            for (sentence, order) in game.sentences().iter().zip(game.shuffled()) {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                let identity: Vec<usize> = (0..sentence.len()).collect();
                assert_eq!(sorted, identity);
            }
        }
    }

    #[test]
    fn test_correct_guess_advances_cursor() {
        let mut game = game_for(&["This is a sentence."]);
        assert_eq!(game.sentences()[0].len(), 3);

        let position = shuffled_position(&game, 0, "This");
        assert_eq!(game.submit_guess(0, position).unwrap(), true);
        assert_eq!(game.current_sentence(), 0);
        assert_eq!(game.current_token(), 1);
        assert_eq!(game.sentences()[0][0].state, TokenState::Correct);
        assert_eq!(game.guessed_text(), "This ");
    }

    #[test]
    fn test_wrong_guess_flags_only_the_picked_token() {
        let mut game = game_for(&["This is a sentence."]);

        let position = shuffled_position(&game, 0, "sentence.");
        assert_eq!(game.submit_guess(0, position).unwrap(), false);
        assert_eq!(game.current_sentence(), 0);
        assert_eq!(game.current_token(), 0);
        assert_eq!(game.sentences()[0][2].state, TokenState::Wrong);
        assert_eq!(game.sentences()[0][0].state, TokenState::Normal);
        assert_eq!(game.sentences()[0][1].state, TokenState::Normal);
    }

    #[test]
    fn test_duplicate_words_are_interchangeable() {
        // Two physical "aqui" tokens: picking either counts for the cursor.
        let mut game = game_for(&["aqui perto aqui"]);
        let words: Vec<&str> = game.sentences()[0].iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["aqui", "perto", "aqui"]);

        // Pick the physically *last* "aqui" while the first one is expected.
        let position = game.shuffled()[0].iter().position(|&ci| ci == 2).unwrap();
        assert_eq!(game.submit_guess(0, position).unwrap(), true);
        // The expected token (position 0) is the one marked correct.
        assert_eq!(game.sentences()[0][0].state, TokenState::Correct);
        assert_eq!(game.current_token(), 1);
    }

    #[test]
    fn test_cursor_wraps_to_next_sentence_and_completes() {
        let mut game = game_for(&["One two.", "Three four."]);
        for sentence in 0..2 {
            let expected: Vec<String> = game.sentences()[sentence]
                .iter()
                .map(|t| t.word.clone())
                .collect();
            for word in expected {
                let position = shuffled_position(&game, sentence, &word);
                assert!(game.submit_guess(sentence, position).unwrap());
            }
        }
        assert!(game.is_done());
        assert_eq!(game.current_sentence(), game.sentence_count());
        assert_eq!(game.current_token(), 0);
    }

    #[test]
    fn test_cursor_never_moves_backwards_on_wrong_guesses() {
        let mut game = game_for(&["One two three."]);
        let first = shuffled_position(&game, 0, "One");
        assert!(game.submit_guess(0, first).unwrap());

        let wrong = shuffled_position(&game, 0, "three.");
        for _ in 0..3 {
            assert!(!game.submit_guess(0, wrong).unwrap());
            assert_eq!(game.current_sentence(), 0);
            assert_eq!(game.current_token(), 1);
        }
    }

    #[test]
    fn test_guess_against_other_sentence_is_rejected() {
        let mut game = game_for(&["One two.", "Three four."]);
        let err = game.submit_guess(1, 0).unwrap_err();
        assert!(matches!(
            err,
            GameError::SentenceMismatch {
                expected: 0,
                got: 1
            }
        ));
        assert_eq!(game.current_token(), 0);
    }

    #[test]
    fn test_out_of_range_token_is_rejected() {
        let mut game = game_for(&["One two."]);
        let err = game.submit_guess(0, 99).unwrap_err();
        assert!(matches!(
            err,
            GameError::TokenOutOfRange {
                sentence: 0,
                index: 99
            }
        ));
    }

    #[test]
    fn test_completed_game_rejects_further_guesses() {
        let mut game = game_for(&["Apenas"]);
        assert_eq!(game.sentences()[0].len(), 1);
        assert!(game.submit_guess(0, 0).unwrap());
        assert!(game.is_done());
        assert!(matches!(
            game.submit_guess(0, 0),
            Err(GameError::AlreadyComplete)
        ));
    }

    #[test]
    fn test_empty_portions_start_done() {
        let game = game_for(&[]);
        assert!(game.is_done());
        assert_eq!(game.sentence_count(), 0);

        let game = game_for(&["   "]);
        assert!(game.is_done());
    }

    #[test]
    fn test_reshuffle_keeps_progress() {
        let mut game = game_for(&["One two three."]);
        let first = shuffled_position(&game, 0, "One");
        assert!(game.submit_guess(0, first).unwrap());

        game.shuffle();
        assert_eq!(game.sentences()[0][0].state, TokenState::Correct);
        assert_eq!(game.current_token(), 1);
    }
}
