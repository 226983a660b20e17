use rand::Rng;

use super::Advance;
use crate::catalog::{Unit, Word};
use crate::error::SessionError;
use crate::shuffle::shuffle_with;

/// Flip-card practice: show the Polish prompt, reveal the English answer, move on.
#[derive(Debug, Clone)]
pub struct QuizSession {
    title: String,
    words: Vec<Word>,
    index: usize,
    flipped: bool,
    revealed: bool,
    completed: bool,
}

impl QuizSession {
    /// Starts on `words` when given, otherwise on the whole unit. The list is
    /// shuffled once here.
    pub fn new<R: Rng + ?Sized>(
        unit: &Unit,
        words: Option<&[Word]>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let source = words.unwrap_or(&unit.words);
        if source.is_empty() {
            return Err(SessionError::EmptyWordList);
        }

        Ok(Self {
            title: unit.title.clone(),
            words: shuffle_with(source, rng),
            index: 0,
            flipped: false,
            revealed: false,
            completed: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    /// 1-based position and total, e.g. (2, 3) reads "2 / 3".
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.words.len())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.words.len()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn flip(&mut self) {
        if self.completed {
            return;
        }
        self.flipped = !self.flipped;
        self.revealed = true;
    }

    /// Moving on is only offered once the answer has been seen.
    pub fn can_advance(&self) -> bool {
        !self.completed && self.revealed
    }

    pub fn advance(&mut self) -> Advance {
        if self.completed {
            return Advance::Ignored;
        }

        if self.is_last() {
            self.completed = true;
            log::info!("flip cards finished: {} ({} words)", self.title, self.total());
            Advance::Completed
        } else {
            self.index += 1;
            self.flipped = false;
            self.revealed = false;
            Advance::Next
        }
    }
}
