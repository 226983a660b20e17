use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{bold_style, correct_style, dim_style, highlight_style, word_count, wrong_style};
use crate::modes::fill_blanks::{FillInBlanksSession, Phase, Playing, Results, WordResult};

const BLANK: char = '_';

pub fn render(fib: &FillInBlanksSession, level_cursor: usize, area: Rect, buf: &mut Buffer) {
    match fib.phase() {
        Phase::Difficulty => render_difficulty(fib, level_cursor, area, buf),
        Phase::Playing(playing) => render_challenge(fib, playing, area, buf),
        Phase::Results(results) => render_results(fib.title(), results, area, buf),
    }
}

fn render_difficulty(fib: &FillInBlanksSession, cursor: usize, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled(fib.title().to_string(), bold_style())),
        Line::default(),
        Line::from("Choose difficulty"),
        Line::default(),
    ];
    for (i, level) in fib.levels().iter().enumerate() {
        let (marker, style) = if i == cursor {
            ("> ", highlight_style())
        } else {
            ("  ", bold_style())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}. {}", i + 1, level.name), style),
            Span::raw("  "),
            Span::styled(level.description.clone(), dim_style()),
        ]));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

/// The target word with revealed letters in place and blanks showing typed input.
fn word_line(playing: &Playing) -> Line<'static> {
    let spans: Vec<Span> = playing
        .slots()
        .iter()
        .map(|slot| {
            if !slot.is_blank {
                return Span::styled(slot.ch.to_string(), bold_style());
            }
            let shown = playing.input()[slot.index].unwrap_or(BLANK);
            let style = if playing.cursor() == Some(slot.index) {
                highlight_style().add_modifier(Modifier::UNDERLINED)
            } else {
                bold_style().fg(Color::Yellow)
            };
            Span::styled(shown.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

fn render_challenge(fib: &FillInBlanksSession, playing: &Playing, area: Rect, buf: &mut Buffer) {
    let Some(word) = fib.current_word() else {
        return;
    };
    let (pos, total) = fib.progress().unwrap_or((0, 0));

    let spare = area.height.saturating_sub(2 + 5) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(spare),
            Constraint::Length(2), // prompt
            Constraint::Length(2), // word
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(fib.title().to_string(), bold_style()),
        Span::raw("  "),
        Span::styled(format!("{pos} / {total}"), dim_style()),
        Span::raw("  "),
        Span::styled(playing.level().name.clone(), dim_style()),
    ]);
    Paragraph::new(header)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(word.pl.clone(), bold_style()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(word_line(playing))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    if playing.is_complete() {
        let label = if fib.is_last() { "enter finish" } else { "enter next" };
        Paragraph::new(Span::styled(label, highlight_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

fn mistake_line(result: &WordResult) -> Line<'static> {
    let mut spans = vec![
        Span::styled(result.word.pl.clone(), dim_style()),
        Span::raw("  "),
    ];
    spans.extend(result.char_marks().into_iter().map(|(ch, ok)| {
        Span::styled(ch.to_string(), if ok { correct_style() } else { wrong_style() })
    }));
    Line::from(spans)
}

fn render_results(title: &str, results: &Results, area: Rect, buf: &mut Buffer) {
    let total = results.total();
    let mut lines = if results.is_perfect() {
        vec![
            Line::from(Span::styled("Well done!", correct_style())),
            Line::default(),
            Line::from(format!("You completed {title}")),
            Line::from(format!("All {} correct", word_count(total))),
        ]
    } else {
        vec![
            Line::from(Span::styled("Results", bold_style())),
            Line::default(),
            Line::from(format!("{} / {total} correct", results.correct_count())),
            Line::default(),
        ]
    };
    lines.extend(results.mistakes().map(mistake_line));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
