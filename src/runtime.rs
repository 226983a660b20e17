use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the practice loop reacts to: a key press, a terminal resize, or an
/// idle tick when nothing arrived within the tick interval.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Maps a raw terminal event to the ones the app handles.
///
/// Key releases are dropped so a letter typed into a blank is entered once
/// on terminals that report both edges. Mouse, focus and paste events are
/// ignored.
pub fn translate(event: CtEvent) -> Option<AppEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        CtEvent::Key(key) => Some(AppEvent::Key(key)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads the real terminal on a background thread.
pub struct TerminalEventSource {
    rx: Receiver<AppEvent>,
}

impl TerminalEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let raw = match event::read() {
                Ok(raw) => raw,
                Err(e) => {
                    log::error!("terminal event read failed: {e}");
                    break;
                }
            };
            let Some(ev) = translate(raw) else {
                continue;
            };
            // receiver gone means the app has quit
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for TerminalEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Events queued on a channel, for driving sessions without a terminal.
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls one event at a time for the practice loop.
///
/// A burst of resizes (dragging a window edge) is collapsed into the last
/// size so the screen is redrawn once per burst. An event found behind the
/// burst is held back for the next `step`.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    held: Cell<Option<AppEvent>>,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            held: Cell::new(None),
        }
    }

    /// Next event, or `Tick` once the tick interval passes quietly.
    /// A disconnected source also ticks.
    pub fn step(&self) -> AppEvent {
        let ev = match self.held.take() {
            Some(ev) => ev,
            None => match self.event_source.recv_timeout(self.ticker.interval()) {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return AppEvent::Tick
                }
            },
        };

        let AppEvent::Resize(mut w, mut h) = ev else {
            return ev;
        };
        while let Ok(next) = self.event_source.recv_timeout(Duration::ZERO) {
            match next {
                AppEvent::Resize(nw, nh) => (w, h) = (nw, nh),
                other => {
                    self.held.set(Some(other));
                    break;
                }
            }
        }
        AppEvent::Resize(w, h)
    }
}
