//! Pure rendering: map Session state to lines of styled text.
//!
//! Most screens share one layout (title, optional blocks, one option per
//! line). The filter menu prepends the current filter values and the
//! country picker lays its options out two per line. The only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::Position;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::state::{Prompt, Screen, Session, StatusMessage};
use super::terminal::InputMode;
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the active screen to the terminal frame.
pub fn render(session: &Session, mode: InputMode, frame: &mut Frame) {
    let paragraph = Paragraph::new(lines(session, mode)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

/// Render the active screen plus a prompt, leaving the cursor after it so
/// echoed input lands in the right place.
pub fn render_prompt(session: &Session, mode: InputMode, prompt: &Prompt, frame: &mut Frame) {
    let mut text = lines(session, mode);
    text.push(Line::from(""));
    let question = prompt.text();
    let width = question.chars().count() as u16 + 1;
    text.push(Line::from(Span::styled(question, theme::STYLE_PROMPT)));
    let row = text.len() as u16 - 1;

    let area = frame.area();
    frame.render_widget(Paragraph::new(text), area);
    frame.set_cursor_position(Position::new(
        width.min(area.width.saturating_sub(1)),
        row.min(area.height.saturating_sub(1)),
    ));
}

/// All lines for the active screen, top to bottom.
pub fn lines(session: &Session, mode: InputMode) -> Vec<Line<'static>> {
    let mut out = match session.screen {
        Screen::FilterMenu => filter_menu_lines(session, mode),
        Screen::CountrySelectionMenu { .. } => country_lines(session, mode),
        _ => default_lines(session, mode),
    };

    if let Some(message) = &session.message {
        out.push(Line::from(""));
        out.push(status_line(message));
    }
    out
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title, optional blocks, then the options one per line.
fn default_lines(session: &Session, mode: InputMode) -> Vec<Line<'static>> {
    let mut out = vec![title_line(session.screen.title())];
    push_blocks(session, mode, &mut out);
    out.extend(option_lines(&session.screen.options(), session.highlighted));
    out
}

fn push_blocks(session: &Session, mode: InputMode, out: &mut Vec<Line<'static>>) {
    if session.options.show_controls && mode == InputMode::Control {
        out.extend(controls_help());
    }
    if session.options.show_filters {
        out.extend(filters_block(session));
    }
    if session.graph_overlay {
        let graph = session.data.graph;
        out.push(Line::from(Span::styled(
            format!("Graph overlay: on ({} x {})", graph.width, graph.height),
            theme::STYLE_DIM,
        )));
    }
}

fn title_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(format!("==== {} ====", title), theme::STYLE_TITLE))
}

fn option_label(index: usize, label: &str) -> String {
    format!("{}. {}", index + 1, label)
}

/// One option per line; the highlighted one is bracketed.
fn option_lines(options: &[&str], highlighted: usize) -> Vec<Line<'static>> {
    options
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let label = option_label(i, label);
            if i == highlighted {
                Line::from(Span::styled(format!(" > {} < ", label), theme::STYLE_SELECTED))
            } else {
                Line::from(format!("   {}   ", label))
            }
        })
        .collect()
}

fn controls_help() -> Vec<Line<'static>> {
    let hint = |before: &'static str, key: &'static str, after: &'static str| {
        Line::from(vec![
            Span::raw(before),
            Span::styled(key, theme::STYLE_KEY),
            Span::raw(after),
        ])
    };

    vec![
        Line::from("Controls:"),
        hint("  - Type ", "\"Shift + i\"", " to hide this help."),
        hint("  - Type ", "\"Shift + g\"", " to toggle the graph overlay."),
        hint("  - Type ", "\"Shift + f\"", " to toggle the filters."),
        hint("  - Use the arrow keys or ", "j, k", " to navigate the menu."),
        hint("  - Press ", "'Space'", " to select an option."),
        hint("  - Press ", "'q'", " to quit the application."),
    ]
}

fn filters_block(session: &Session) -> Vec<Line<'static>> {
    let mut out = vec![Line::from(Span::styled("---- Filters ----", theme::STYLE_DIM))];
    out.extend(
        session
            .data
            .filters
            .iter()
            .map(|filter| Line::from(format!("  {}", filter))),
    );
    out
}

fn status_line(message: &StatusMessage) -> Line<'static> {
    let style = match message {
        StatusMessage::Info(_) => theme::STYLE_INFO,
        StatusMessage::Error(_) => theme::STYLE_ERROR,
    };
    Line::from(Span::styled(message.text().to_string(), style))
}

// ============================================================================
// SCREEN: FILTER MENU
// ============================================================================

/// Current filter values first, then the editable entries.
fn filter_menu_lines(session: &Session, mode: InputMode) -> Vec<Line<'static>> {
    let mut out = vec![title_line(session.screen.title())];
    out.extend(
        session
            .data
            .filters
            .iter()
            .enumerate()
            .map(|(i, filter)| Line::from(format!("{}. {}", i + 1, filter))),
    );
    out.push(title_line("Select Filter to Edit it."));

    if session.options.show_controls && mode == InputMode::Control {
        out.extend(controls_help());
    }
    if session.graph_overlay {
        let graph = session.data.graph;
        out.push(Line::from(Span::styled(
            format!("Graph overlay: on ({} x {})", graph.width, graph.height),
            theme::STYLE_DIM,
        )));
    }
    out.extend(option_lines(&session.screen.options(), session.highlighted));
    out
}

// ============================================================================
// SCREEN: COUNTRY SELECTION
// ============================================================================

/// Countries two per line, `left | right`. The list is long enough that a
/// single column would scroll off most terminals.
fn country_lines(session: &Session, mode: InputMode) -> Vec<Line<'static>> {
    let mut out = vec![title_line(session.screen.title())];
    push_blocks(session, mode, &mut out);

    let options = session.screen.options();
    if options.is_empty() {
        out.push(Line::from(Span::styled("No countries available", theme::STYLE_ERROR)));
        return out;
    }

    for (pair_index, pair) in options.chunks(2).enumerate() {
        let first = pair_index * 2;
        let mut spans = vec![country_cell(first, pair[0], session.highlighted)];
        if let Some(second) = pair.get(1) {
            spans.push(Span::raw(" | "));
            spans.push(country_cell(first + 1, second, session.highlighted));
        }
        out.push(Line::from(spans));
    }
    out
}

fn country_cell(index: usize, name: &str, highlighted: usize) -> Span<'static> {
    let label = option_label(index, name);
    if index == highlighted {
        Span::styled(format!(" > {} < ", label), theme::STYLE_SELECTED)
    } else {
        Span::raw(label)
    }
}

// ============================================================================
// TESTS
// ============================================================================
