//! Menu color semantics and style constants.
//!
//! Color semantics:
//! - Cyan: interactive elements (key names, the highlighted option)
//! - Green: confirmation and informational status lines
//! - Red: rejected choices and values
//! - Dim: section rules and secondary text
//! - Bold: titles

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Informational status line: green.
pub const STYLE_INFO: Style = Style::new().fg(Color::Green);

/// Rejected choice or value: red.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// Key name in the controls help: bold cyan.
pub const STYLE_KEY: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// De-emphasized text: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Screen title line.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Highlighted option.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Prompt question while in input mode.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_INFO.fg, Some(Color::Green));
        assert_eq!(STYLE_ERROR.fg, Some(Color::Red));
        assert_eq!(STYLE_KEY.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
    }

    #[test]
    fn title_and_keys_are_bold() {
        assert!(STYLE_TITLE.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_KEY.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn selected_option_stands_out() {
        assert_eq!(STYLE_SELECTED.bg, Some(Color::Cyan));
    }
}
