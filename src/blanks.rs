use std::collections::HashSet;

use itertools::Itertools;
use rand::Rng;

use crate::shuffle::shuffle_with;

/// One character position of a target word in the fill-in-the-blanks challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSlot {
    pub ch: char,
    pub index: usize,
    pub is_blank: bool,
}

impl CharSlot {
    pub fn is_letter(&self) -> bool {
        is_blankable(self.ch)
    }
}

/// Only ASCII letters take part in blanking; spaces, apostrophes and
/// punctuation are always shown.
pub fn is_blankable(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Number of letters to hide for a word with `letter_count` letters.
///
/// A lone letter is always hidden. Otherwise the rounded share is clamped so
/// at least one letter is hidden and at least one is shown.
pub fn blank_count(letter_count: usize, blank_percentage: f64) -> usize {
    match letter_count {
        0 => 0,
        1 => 1,
        n => {
            let wanted = (n as f64 * blank_percentage).round() as usize;
            wanted.clamp(1, n - 1)
        }
    }
}

pub fn generate_blanks(word: &str, blank_percentage: f64) -> Vec<CharSlot> {
    generate_blanks_with(word, blank_percentage, &mut rand::thread_rng())
}

/// Lays out `word` as character slots with a random subset of its letters
/// blanked. `blank_percentage` is expected to be validated already.
pub fn generate_blanks_with<R: Rng + ?Sized>(
    word: &str,
    blank_percentage: f64,
    rng: &mut R,
) -> Vec<CharSlot> {
    let letter_indices: Vec<usize> = word.chars().positions(is_blankable).collect();
    let count = blank_count(letter_indices.len(), blank_percentage);

    let blanked: HashSet<usize> = shuffle_with(&letter_indices, rng)
        .into_iter()
        .take(count)
        .collect();

    word.chars()
        .enumerate()
        .map(|(index, ch)| CharSlot {
            ch,
            index,
            is_blank: blanked.contains(&index),
        })
        .collect()
}
