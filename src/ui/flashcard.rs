use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::{bold_style, correct_style, dim_style, highlight_style, word_count};
use crate::modes::quiz::QuizSession;

const CARD_HEIGHT: u16 = 7;

fn render_completed(quiz: &QuizSession, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("Well done!", correct_style())),
        Line::default(),
        Line::from(format!("You've completed {}", quiz.title())),
        Line::from(format!("You practiced {}", word_count(quiz.total()))),
    ];
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(0)])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

pub fn render(quiz: &QuizSession, area: Rect, buf: &mut Buffer) {
    if quiz.is_completed() {
        render_completed(quiz, area, buf);
        return;
    }
    let Some(word) = quiz.current_word() else {
        return;
    };

    let spare = area.height.saturating_sub(2 + CARD_HEIGHT + 2) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(spare),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let (pos, total) = quiz.progress();
    let header = Line::from(vec![
        Span::styled(quiz.title().to_string(), bold_style()),
        Span::raw("  "),
        Span::styled(format!("{pos} / {total}"), dim_style()),
    ]);
    Paragraph::new(header)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let (text, hint, border) = if quiz.is_flipped() {
        (word.en.as_str(), "", Color::Green)
    } else {
        (word.pl.as_str(), "press space to reveal", Color::Cyan)
    };
    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(bold_style().fg(border));
    let inner = card.inner(chunks[2]);
    card.render(chunks[2], buf);

    let mut lines = vec![Line::default(); (inner.height.saturating_sub(2) / 2) as usize];
    lines.push(Line::from(Span::styled(text.to_string(), bold_style())));
    lines.push(Line::from(Span::styled(hint, dim_style())));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);

    if quiz.can_advance() {
        let label = if quiz.is_last() { "n finish" } else { "n next" };
        Paragraph::new(Span::styled(label, highlight_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
