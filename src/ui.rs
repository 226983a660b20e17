pub mod fill_blanks;
pub mod flashcard;
pub mod selectors;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::{App, Screen};
use crate::modes::fill_blanks::Phase;
use crate::modes::ModeSession;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn highlight_style() -> Style {
    bold_style().fg(Color::Cyan)
}

pub(crate) fn correct_style() -> Style {
    bold_style().fg(Color::Green)
}

pub(crate) fn wrong_style() -> Style {
    bold_style().fg(Color::Red)
}

/// "1 word" / "3 words"
pub(crate) fn word_count(n: usize) -> String {
    if n == 1 {
        "1 word".to_string()
    } else {
        format!("{n} words")
    }
}

fn key_hints(app: &App) -> &'static str {
    match app.screen() {
        Screen::Units => "↑/↓ move · enter select · q quit",
        Screen::Groups { .. } => "↑/↓ move · space toggle · a all · enter start · esc back",
        Screen::Modes { .. } => "↑/↓ move · enter select · esc back",
        Screen::Playing { session, .. } => match session {
            ModeSession::FlipCards(quiz) if quiz.is_completed() => "enter back to units",
            ModeSession::FlipCards(_) => "space flip · n next · esc back",
            ModeSession::FillInBlanks(fib) => match fib.phase() {
                Phase::Difficulty => "↑/↓ move · enter select · esc back",
                Phase::Playing(_) => "type letters · ←/→ move · enter submit · esc back",
                Phase::Results(_) => "enter back to units",
            },
        },
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1), // status
                Constraint::Length(1), // hints
            ])
            .split(area);

        match self.screen() {
            Screen::Units => selectors::render_units(self, chunks[0], buf),
            Screen::Groups {
                unit,
                cursor,
                selected,
            } => selectors::render_groups(&self.units()[*unit], *cursor, selected, chunks[0], buf),
            Screen::Modes { cursor, .. } => selectors::render_modes(*cursor, chunks[0], buf),
            Screen::Playing {
                session,
                level_cursor,
                ..
            } => match session {
                ModeSession::FlipCards(quiz) => flashcard::render(quiz, chunks[0], buf),
                ModeSession::FillInBlanks(fib) => {
                    fill_blanks::render(fib, *level_cursor, chunks[0], buf)
                }
            },
        }

        if let Some(status) = self.status() {
            Paragraph::new(Span::styled(status, bold_style().fg(Color::Yellow)))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
        }

        Paragraph::new(Span::styled(key_hints(self), dim_style()))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
