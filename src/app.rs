use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use rand::rngs::StdRng;

use crate::catalog::{Unit, Word};
use crate::difficulty::DifficultyLevel;
use crate::modes::fill_blanks::FillInBlanksSession;
use crate::modes::quiz::QuizSession;
use crate::modes::{Advance, GameMode, ModeSession};
use crate::progress::ProgressTracker;

#[derive(Debug)]
pub enum Screen {
    Units,
    Groups {
        unit: usize,
        cursor: usize,
        selected: Vec<bool>,
    },
    Modes {
        unit: usize,
        /// Group subset picked on the previous screen, `None` for the whole unit.
        words: Option<Vec<Word>>,
        cursor: usize,
    },
    Playing {
        unit: usize,
        session: ModeSession,
        level_cursor: usize,
    },
}

#[derive(Debug, PartialEq)]
enum PlayOutcome {
    Stay,
    Completed,
    Exit,
}

#[derive(Debug)]
pub struct App {
    units: Vec<Unit>,
    levels: Vec<DifficultyLevel>,
    progress: ProgressTracker,
    rng: StdRng,
    preselected: Option<GameMode>,
    unit_cursor: usize,
    screen: Screen,
    status: Option<String>,
}

impl App {
    pub fn new(
        units: Vec<Unit>,
        levels: Vec<DifficultyLevel>,
        progress: ProgressTracker,
        rng: StdRng,
        preselected: Option<GameMode>,
    ) -> Self {
        Self {
            units,
            levels,
            progress,
            rng,
            preselected,
            unit_cursor: 0,
            screen: Screen::Units,
            status: None,
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn levels(&self) -> &[DifficultyLevel] {
        &self.levels
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn unit_cursor(&self) -> usize {
        self.unit_cursor
    }

    /// Last refused action, shown until the next key press.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Handles one key press. Returns true when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        self.status = None;

        match self.screen {
            Screen::Units => return self.on_units_key(key),
            Screen::Groups { .. } => self.on_groups_key(key),
            Screen::Modes { .. } => self.on_modes_key(key),
            Screen::Playing { .. } => self.on_playing_key(key),
        }
        false
    }

    fn on_units_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.unit_cursor = self.unit_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.unit_cursor + 1 < self.units.len() {
                    self.unit_cursor += 1;
                }
            }
            KeyCode::Enter => self.select_unit(self.unit_cursor),
            _ => {}
        }
        false
    }

    fn select_unit(&mut self, unit: usize) {
        let Some(u) = self.units.get(unit) else {
            return;
        };
        log::debug!("selected {}", u.id);

        if u.groups.len() > 1 {
            self.screen = Screen::Groups {
                unit,
                cursor: 0,
                selected: vec![false; u.groups.len()],
            };
        } else {
            self.choose_mode(unit, None);
        }
    }

    fn on_groups_key(&mut self, key: KeyEvent) {
        let Screen::Groups {
            unit,
            cursor,
            selected,
        } = &mut self.screen
        else {
            return;
        };
        let unit = *unit;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < selected.len() {
                    *cursor += 1;
                }
            }
            KeyCode::Char(' ') => selected[*cursor] = !selected[*cursor],
            KeyCode::Char('a') => {
                let all = selected.iter().all(|s| *s);
                selected.iter_mut().for_each(|s| *s = !all);
            }
            KeyCode::Enter => {
                let picked = selected.iter().positions(|s| *s).collect_vec();
                if picked.is_empty() {
                    self.status = Some("Select at least one group".to_string());
                    return;
                }
                let words = self.units[unit].words_for_groups(&picked);
                self.choose_mode(unit, Some(words));
            }
            KeyCode::Esc => self.back_to_units(),
            _ => {}
        }
    }

    fn choose_mode(&mut self, unit: usize, words: Option<Vec<Word>>) {
        let only = (GameMode::ALL.len() == 1).then_some(GameMode::ALL[0]);
        match self.preselected.or(only) {
            Some(mode) => self.start(unit, words, mode),
            None => {
                self.screen = Screen::Modes {
                    unit,
                    words,
                    cursor: 0,
                }
            }
        }
    }

    fn on_modes_key(&mut self, key: KeyEvent) {
        let Screen::Modes {
            unit,
            words,
            cursor,
        } = &mut self.screen
        else {
            return;
        };
        let unit = *unit;

        let picked = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *cursor = cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *cursor = (*cursor + 1).min(GameMode::ALL.len() - 1);
                None
            }
            KeyCode::Enter => Some(*cursor),
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .filter(|i| *i < GameMode::ALL.len()),
            KeyCode::Esc => {
                self.back_to_units();
                return;
            }
            _ => None,
        };

        if let Some(i) = picked {
            let words = words.take();
            self.start(unit, words, GameMode::ALL[i]);
        }
    }

    fn start(&mut self, unit: usize, words: Option<Vec<Word>>, mode: GameMode) {
        match mode.start(&self.units[unit], words.as_deref(), &self.levels, &mut self.rng) {
            Ok(session) => {
                self.screen = Screen::Playing {
                    unit,
                    session,
                    level_cursor: 0,
                }
            }
            Err(e) => {
                log::warn!("could not start {mode} on {}: {e}", self.units[unit].id);
                self.status = Some(e.to_string());
                self.screen = Screen::Units;
            }
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let Screen::Playing {
            unit,
            session,
            level_cursor,
        } = &mut self.screen
        else {
            return;
        };
        let unit = *unit;

        let outcome = match session {
            ModeSession::FlipCards(quiz) => flip_cards_key(quiz, key),
            ModeSession::FillInBlanks(fib) => fill_in_blanks_key(fib, level_cursor, key, &mut self.rng),
        };

        match outcome {
            PlayOutcome::Stay => {}
            PlayOutcome::Completed => self.progress.mark_completed(&self.units[unit].id),
            PlayOutcome::Exit => self.back_to_units(),
        }
    }

    fn back_to_units(&mut self) {
        self.screen = Screen::Units;
    }
}

fn flip_cards_key(quiz: &mut QuizSession, key: KeyEvent) -> PlayOutcome {
    if quiz.is_completed() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => PlayOutcome::Exit,
            _ => PlayOutcome::Stay,
        };
    }

    match key.code {
        KeyCode::Esc => PlayOutcome::Exit,
        KeyCode::Char(' ') | KeyCode::Enter => {
            quiz.flip();
            PlayOutcome::Stay
        }
        KeyCode::Char('n') | KeyCode::Right if quiz.can_advance() => match quiz.advance() {
            Advance::Completed => PlayOutcome::Completed,
            Advance::Next | Advance::Ignored => PlayOutcome::Stay,
        },
        _ => PlayOutcome::Stay,
    }
}

fn fill_in_blanks_key(
    fib: &mut FillInBlanksSession,
    level_cursor: &mut usize,
    key: KeyEvent,
    rng: &mut StdRng,
) -> PlayOutcome {
    if key.code == KeyCode::Esc {
        return PlayOutcome::Exit;
    }

    if fib.results().is_some() {
        return match key.code {
            KeyCode::Enter => PlayOutcome::Exit,
            _ => PlayOutcome::Stay,
        };
    }

    if fib.playing().is_none() {
        let picked = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *level_cursor = level_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *level_cursor = (*level_cursor + 1).min(fib.levels().len().saturating_sub(1));
                None
            }
            KeyCode::Enter => Some(*level_cursor),
            KeyCode::Char(c) => c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)),
            _ => None,
        };
        if let Some(level) = picked.and_then(|i| fib.levels().get(i)) {
            let id = level.id.clone();
            if let Err(e) = fib.select_difficulty(&id, rng) {
                log::warn!("difficulty {id} rejected: {e}");
            }
        }
        return PlayOutcome::Stay;
    }

    if key.code == KeyCode::Enter {
        return match fib.next(rng) {
            Advance::Completed => PlayOutcome::Completed,
            Advance::Next | Advance::Ignored => PlayOutcome::Stay,
        };
    }

    if let Some(playing) = fib.playing_mut() {
        match key.code {
            KeyCode::Backspace => playing.backspace(),
            KeyCode::Left | KeyCode::BackTab => playing.focus_prev(),
            KeyCode::Right | KeyCode::Tab => playing.focus_next(),
            KeyCode::Char(c) if c.is_alphabetic() => playing.input_char(c),
            _ => {}
        }
    }
    PlayOutcome::Stay
}
