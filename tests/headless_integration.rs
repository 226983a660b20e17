use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;

use slowka::app::{App, Screen};
use slowka::modes::fill_blanks::FillInBlanksSession;
use slowka::modes::{GameMode, ModeSession};
use slowka::progress::{FileProgressStore, ProgressTracker};
use slowka::runtime::{AppEvent, FixedTicker, Runner, ChannelEventSource};

// Headless integration using the internal runtime + App without a TTY.
// Keys are queued on a channel and pumped through Runner until it idles.
struct Harness {
    app: App,
    tx: Sender<AppEvent>,
    runner: Runner<ChannelEventSource, FixedTicker>,
    quit: bool,
}

impl Harness {
    fn new(app: App) -> Self {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(
            ChannelEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        Self {
            app,
            tx,
            runner,
            quit: false,
        }
    }

    fn keys(&mut self, codes: &[KeyCode]) {
        for code in codes {
            self.tx
                .send(AppEvent::Key(KeyEvent::new(*code, KeyModifiers::NONE)))
                .unwrap();
        }
        self.pump();
    }

    /// Handles queued events until the runner reports an idle tick.
    fn pump(&mut self) {
        for _ in 0..1000u32 {
            match self.runner.step() {
                AppEvent::Tick => return,
                AppEvent::Resize(..) => {}
                AppEvent::Key(key) => {
                    if self.app.on_key(key) {
                        self.quit = true;
                        return;
                    }
                }
            }
        }
    }

    fn fill_session(&self) -> &FillInBlanksSession {
        match self.app.screen() {
            Screen::Playing {
                session: ModeSession::FillInBlanks(fib),
                ..
            } => fib,
            other => panic!("expected fill in blanks, got {other:?}"),
        }
    }

    /// Keys that fill the current word's blanks correctly.
    fn answer_keys(&self) -> Vec<KeyCode> {
        let fib = self.fill_session();
        let word: Vec<char> = fib.current_word().unwrap().en.chars().collect();
        fib.playing()
            .unwrap()
            .slots()
            .iter()
            .filter(|s| s.is_blank)
            .map(|s| KeyCode::Char(word[s.index]))
            .collect()
    }
}

fn builtin_app(progress: ProgressTracker, mode: Option<GameMode>) -> App {
    App::new(
        slowka::catalog::load_builtin().unwrap(),
        slowka::difficulty::load_builtin().unwrap(),
        progress,
        StdRng::seed_from_u64(2024),
        mode,
    )
}

#[test]
fn headless_flip_cards_over_selected_groups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
    let mut h = Harness::new(builtin_app(tracker, None));

    // Unit1 has three groups: pick "Pets" and "Wild animals"
    h.keys(&[KeyCode::Enter, KeyCode::Char(' '), KeyCode::Down, KeyCode::Down]);
    h.keys(&[KeyCode::Char(' '), KeyCode::Enter, KeyCode::Enter]);

    let total = match h.app.screen() {
        Screen::Playing {
            session: ModeSession::FlipCards(quiz),
            ..
        } => quiz.total(),
        other => panic!("expected flip cards, got {other:?}"),
    };
    assert_eq!(total, 9);

    for _ in 0..total {
        h.keys(&[KeyCode::Char(' '), KeyCode::Char('n')]);
    }
    assert!(h.app.progress().is_completed("Unit1"));
    h.keys(&[KeyCode::Enter]);
    assert!(matches!(h.app.screen(), Screen::Units));

    // a fresh tracker on the same file sees the completion
    let reloaded = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
    assert_eq!(reloaded.completed_units(), ["Unit1".to_string()]);

    h.keys(&[KeyCode::Char('q')]);
    assert!(h.quit);
}

#[test]
fn headless_fill_in_blanks_phrases() {
    let dir = tempdir().unwrap();
    let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(
        dir.path().join("progress.json"),
    )));
    let mut h = Harness::new(builtin_app(tracker, Some(GameMode::FillInBlanks)));

    // Unit3 is a single group, so no group screen; mode is preselected
    h.keys(&[KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Char('2')]);
    assert_eq!(h.fill_session().total(), 6);

    for _ in 0..6 {
        let (pos, _) = h.fill_session().progress().unwrap();
        let mut keys = h.answer_keys();
        // punctuation and spaces are never blanks
        assert!(keys.iter().all(|k| matches!(k, KeyCode::Char(c) if c.is_ascii_alphabetic())));
        keys.push(KeyCode::Enter);
        h.keys(&keys);
        if let Some((next, _)) = h.fill_session().progress() {
            assert_eq!(next, pos + 1);
        }
    }

    let results = h.fill_session().results().unwrap();
    assert!(results.is_perfect());
    assert_eq!(results.total(), 6);
    assert!(h.app.progress().is_completed("Unit3"));

    h.keys(&[KeyCode::Esc]);
    assert!(matches!(h.app.screen(), Screen::Units));
}

#[test]
fn headless_abandoned_session_records_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
    let mut h = Harness::new(builtin_app(tracker, Some(GameMode::FillInBlanks)));

    h.keys(&[KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Char('1')]);
    let keys = h.answer_keys();
    h.keys(&keys);
    h.keys(&[KeyCode::Enter, KeyCode::Esc]);

    assert!(matches!(h.app.screen(), Screen::Units));
    assert!(h.app.progress().completed_units().is_empty());
    assert!(!path.exists());
}

#[test]
fn headless_ctrl_c_quits_mid_session() {
    let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(
        tempdir().unwrap().path().join("progress.json"),
    )));
    let mut h = Harness::new(builtin_app(tracker, Some(GameMode::FlipCards)));
    h.keys(&[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    assert!(!h.quit);

    h.tx
        .send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
    h.pump();
    assert!(h.quit);
}
