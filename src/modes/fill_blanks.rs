use rand::Rng;

use super::Advance;
use crate::blanks::{generate_blanks_with, CharSlot};
use crate::catalog::{Unit, Word};
use crate::difficulty::DifficultyLevel;
use crate::error::SessionError;
use crate::shuffle::shuffle_with;

/// Outcome of one word, recorded when the player moves past it.
#[derive(Debug, Clone, PartialEq)]
pub struct WordResult {
    pub word: Word,
    /// One entry per character: the shown character for revealed slots, the
    /// typed character (if any) for blanks.
    pub user_answer: Vec<Option<char>>,
    pub correct: bool,
}

fn same_letter(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

impl WordResult {
    pub fn answer_text(&self) -> String {
        self.user_answer.iter().flatten().collect()
    }

    /// Each character of the target word paired with whether the player got
    /// that position right, ignoring case.
    pub fn char_marks(&self) -> Vec<(char, bool)> {
        self.word
            .en
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let typed = self.user_answer.get(i).copied().flatten();
                (ch, typed.is_some_and(|t| same_letter(t, ch)))
            })
            .collect()
    }
}

/// The word currently on screen and everything typed into it.
#[derive(Debug, Clone)]
pub struct Playing {
    level: DifficultyLevel,
    index: usize,
    slots: Vec<CharSlot>,
    input: Vec<Option<char>>,
    cursor: Option<usize>,
    results: Vec<WordResult>,
}

impl Playing {
    fn new<R: Rng + ?Sized>(level: DifficultyLevel, first: &Word, rng: &mut R) -> Self {
        let mut playing = Self {
            level,
            index: 0,
            slots: Vec::new(),
            input: Vec::new(),
            cursor: None,
            results: Vec::new(),
        };
        playing.show(first, rng);
        playing
    }

    /// Lays out a fresh word. Its slots stay fixed until the player moves on.
    fn show<R: Rng + ?Sized>(&mut self, word: &Word, rng: &mut R) {
        self.slots = generate_blanks_with(&word.en, self.level.blank_percentage, rng);
        self.input = vec![None; self.slots.len()];
        let first = self.blank_positions().next();
        self.cursor = first;
    }

    fn blank_positions(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.slots.iter().filter(|s| s.is_blank).map(|s| s.index)
    }

    fn blank_after(&self, pos: usize) -> Option<usize> {
        self.blank_positions().find(|&i| i > pos)
    }

    fn blank_before(&self, pos: usize) -> Option<usize> {
        self.blank_positions().rev().find(|&i| i < pos)
    }

    fn score(&self, word: &Word) -> WordResult {
        let user_answer: Vec<Option<char>> = self
            .slots
            .iter()
            .map(|s| if s.is_blank { self.input[s.index] } else { Some(s.ch) })
            .collect();
        let attempt: String = user_answer.iter().flatten().collect();
        let correct = attempt.to_lowercase() == word.en.to_lowercase();

        WordResult {
            word: word.clone(),
            user_answer,
            correct,
        }
    }

    pub fn level(&self) -> &DifficultyLevel {
        &self.level
    }

    pub fn slots(&self) -> &[CharSlot] {
        &self.slots
    }

    /// What the player has typed into each slot position.
    pub fn input(&self) -> &[Option<char>] {
        &self.input
    }

    /// Slot index of the focused blank.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn results(&self) -> &[WordResult] {
        &self.results
    }

    pub fn input_char(&mut self, c: char) {
        let Some(cur) = self.cursor else {
            return;
        };
        self.input[cur] = Some(c);
        if let Some(next) = self.blank_after(cur) {
            self.cursor = Some(next);
        }
    }

    /// Clears the focused blank, or the previous one when it is already empty.
    pub fn backspace(&mut self) {
        let Some(cur) = self.cursor else {
            return;
        };
        if self.input[cur].is_some() {
            self.input[cur] = None;
        } else if let Some(prev) = self.blank_before(cur) {
            self.input[prev] = None;
            self.cursor = Some(prev);
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(next) = self.cursor.and_then(|cur| self.blank_after(cur)) {
            self.cursor = Some(next);
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(prev) = self.cursor.and_then(|cur| self.blank_before(cur)) {
            self.cursor = Some(prev);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.blank_positions().all(|i| self.input[i].is_some())
    }
}

/// Final tally of a finished run.
#[derive(Debug, Clone)]
pub struct Results {
    level: DifficultyLevel,
    results: Vec<WordResult>,
}

impl Results {
    pub fn level(&self) -> &DifficultyLevel {
        &self.level
    }

    pub fn all(&self) -> &[WordResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    pub fn is_perfect(&self) -> bool {
        self.correct_count() == self.total()
    }

    pub fn mistakes(&self) -> impl Iterator<Item = &WordResult> {
        self.results.iter().filter(|r| !r.correct)
    }
}

#[derive(Debug, Clone)]
pub enum Phase {
    Difficulty,
    Playing(Playing),
    Results(Results),
}

/// Fill-in-the-blanks practice: pick a difficulty, complete each word, review the score.
#[derive(Debug, Clone)]
pub struct FillInBlanksSession {
    title: String,
    words: Vec<Word>,
    levels: Vec<DifficultyLevel>,
    phase: Phase,
}

impl FillInBlanksSession {
    /// `levels` must already be validated. The word list is shuffled once here.
    pub fn new<R: Rng + ?Sized>(
        unit: &Unit,
        words: Option<&[Word]>,
        levels: &[DifficultyLevel],
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let source = words.unwrap_or(&unit.words);
        if source.is_empty() {
            return Err(SessionError::EmptyWordList);
        }

        Ok(Self {
            title: unit.title.clone(),
            words: shuffle_with(source, rng),
            levels: levels.to_vec(),
            phase: Phase::Difficulty,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn levels(&self) -> &[DifficultyLevel] {
        &self.levels
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn playing(&self) -> Option<&Playing> {
        match &self.phase {
            Phase::Playing(p) => Some(p),
            _ => None,
        }
    }

    pub fn playing_mut(&mut self) -> Option<&mut Playing> {
        match &mut self.phase {
            Phase::Playing(p) => Some(p),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&Results> {
        match &self.phase {
            Phase::Results(r) => Some(r),
            _ => None,
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.playing().and_then(|p| self.words.get(p.index))
    }

    /// 1-based position and total while playing.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.playing().map(|p| (p.index + 1, self.words.len()))
    }

    pub fn is_last(&self) -> bool {
        self.playing()
            .is_some_and(|p| p.index + 1 >= self.words.len())
    }

    /// Fixes the blank ratio for the rest of the session and shows the first word.
    pub fn select_difficulty<R: Rng + ?Sized>(
        &mut self,
        id: &str,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Difficulty) {
            return Err(SessionError::DifficultyAlreadyChosen);
        }
        let level = self
            .levels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownDifficulty(id.to_string()))?;

        log::info!("fill in blanks started: {} on {}", self.title, level.id);
        self.phase = Phase::Playing(Playing::new(level, &self.words[0], rng));
        Ok(())
    }

    /// Scores the current word and moves on. Unfilled blanks count as empty.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Advance {
        let Phase::Playing(playing) = &mut self.phase else {
            return Advance::Ignored;
        };

        let result = playing.score(&self.words[playing.index]);
        log::debug!("{} -> correct: {}", result.word.en, result.correct);
        playing.results.push(result);

        if playing.index + 1 < self.words.len() {
            playing.index += 1;
            playing.show(&self.words[playing.index], rng);
            return Advance::Next;
        }

        let results = Results {
            level: playing.level.clone(),
            results: std::mem::take(&mut playing.results),
        };
        log::info!(
            "fill in blanks finished: {} ({}/{} correct)",
            self.title,
            results.correct_count(),
            results.total()
        );
        self.phase = Phase::Results(results);
        Advance::Completed
    }
}
