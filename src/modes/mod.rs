//! Practice modes available for a unit.

use clap::ValueEnum;
use rand::Rng;

use crate::catalog::{Unit, Word};
use crate::difficulty::DifficultyLevel;
use crate::error::SessionError;

pub mod fill_blanks;
pub mod quiz;

pub use fill_blanks::FillInBlanksSession;
pub use quiz::QuizSession;

/// What a session did with a request to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next word.
    Next,
    /// The last word was handled. Reported once per session.
    Completed,
    /// Nothing to do in the current state.
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GameMode {
    FlipCards,
    FillInBlanks,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::FlipCards, GameMode::FillInBlanks];

    /// Stable identifier used in config files and on the command line.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::FlipCards => "Flip Cards",
            GameMode::FillInBlanks => "Fill in the Blanks",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::FlipCards => "Show Polish, reveal English",
            GameMode::FillInBlanks => "Complete English words with missing letters",
        }
    }

    /// Builds a fresh session of this mode over `words`, or over the whole unit.
    pub fn start<R: Rng + ?Sized>(
        &self,
        unit: &Unit,
        words: Option<&[Word]>,
        levels: &[DifficultyLevel],
        rng: &mut R,
    ) -> Result<ModeSession, SessionError> {
        log::debug!("starting {} on {}", self, unit.id);
        Ok(match self {
            GameMode::FlipCards => ModeSession::FlipCards(QuizSession::new(unit, words, rng)?),
            GameMode::FillInBlanks => {
                ModeSession::FillInBlanks(FillInBlanksSession::new(unit, words, levels, rng)?)
            }
        })
    }
}

#[derive(Debug, Clone)]
pub enum ModeSession {
    FlipCards(QuizSession),
    FillInBlanks(FillInBlanksSession),
}

impl ModeSession {
    pub fn mode(&self) -> GameMode {
        match self {
            ModeSession::FlipCards(_) => GameMode::FlipCards,
            ModeSession::FillInBlanks(_) => GameMode::FillInBlanks,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ModeSession::FlipCards(s) => s.title(),
            ModeSession::FillInBlanks(s) => s.title(),
        }
    }
}
