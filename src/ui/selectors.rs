use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{bold_style, dim_style, highlight_style, word_count};
use crate::app::App;
use crate::catalog::Unit;
use crate::modes::GameMode;

const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";

fn heading_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// A list row with `right` pushed to the right edge of `width`.
fn row(selected: bool, left: Vec<Span<'static>>, right: String, width: u16) -> Line<'static> {
    let marker = if selected { CURSOR } else { NO_CURSOR };
    let used: usize = marker.width() + left.iter().map(|s| s.content.width()).sum::<usize>();
    let pad = (width as usize).saturating_sub(used + right.width()).max(2);

    let style = if selected {
        highlight_style()
    } else {
        bold_style()
    };

    let mut spans = vec![Span::styled(marker, style)];
    spans.extend(left.into_iter().map(|s| s.patch_style(style)));
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(right, dim_style()));
    Line::from(spans)
}

pub fn render_units(app: &App, area: Rect, buf: &mut Buffer) {
    let (title, subtitle, list) = heading_layout(area);

    Paragraph::new(Span::styled("Word Learner", bold_style())).render(title, buf);

    if app.units().is_empty() {
        Paragraph::new(Span::styled("No units found.", dim_style())).render(subtitle, buf);
        return;
    }
    Paragraph::new("Select a unit to practice:").render(subtitle, buf);

    let lines: Vec<Line> = app
        .units()
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let mut left = Vec::new();
            if app.progress().is_completed(&unit.id) {
                left.push(Span::raw("✓ "));
            }
            left.push(Span::raw(unit.title.clone()));
            row(
                i == app.unit_cursor(),
                left,
                word_count(unit.words.len()),
                list.width,
            )
        })
        .collect();

    // keep the cursor in view on short terminals
    let scroll = app.unit_cursor().saturating_sub(list.height.saturating_sub(1) as usize);
    Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .render(list, buf);
}

pub fn render_groups(unit: &Unit, cursor: usize, selected: &[bool], area: Rect, buf: &mut Buffer) {
    let (title, subtitle, list) = heading_layout(area);

    Paragraph::new(Span::styled(unit.title.clone(), bold_style())).render(title, buf);
    Paragraph::new("Select groups to practice:").render(subtitle, buf);

    let lines: Vec<Line> = unit
        .groups
        .iter()
        .zip(selected)
        .enumerate()
        .map(|(i, (group, on))| {
            let check = if *on { "[x] " } else { "[ ] " };
            row(
                i == cursor,
                vec![Span::raw(check), Span::raw(group.name.clone())],
                word_count(group.words.len()),
                list.width,
            )
        })
        .collect();

    Paragraph::new(lines).render(list, buf);
}

pub fn render_modes(cursor: usize, area: Rect, buf: &mut Buffer) {
    let (title, _, list) = heading_layout(area);

    Paragraph::new(Span::styled("Choose a mode", bold_style())).render(title, buf);

    let lines: Vec<Line> = GameMode::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, mode)| {
            let name = row(
                i == cursor,
                vec![Span::raw(format!("{}. {}", i + 1, mode.name()))],
                String::new(),
                list.width,
            );
            let description = Line::from(Span::styled(
                format!("{NO_CURSOR}   {}", mode.description()),
                dim_style(),
            ));
            [name, description, Line::default()]
        })
        .collect();

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(list, buf);
}
