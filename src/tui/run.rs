//! Menu effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module that touches the real terminal. It wires the
//! pure layers (state, update, view) to stdin and stdout.
//! Decisions are made in the pure layers; this module only carries them out.

use std::io;

use crossterm::cursor::Show;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::logger::Logger;

use super::input::{KeyReader, StdinSource};
use super::state::{Action, Effect, Session, Transition};
use super::terminal::{restore_original_attrs, InputMode, ModeManager, StdinTty};
use super::update::{apply_input, update};
use super::view::{render, render_prompt};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits; control mode delivers it as a key, not SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::Select),

        // Display toggles (shifted on purpose)
        KeyCode::Char('I') => Some(Action::ToggleControls),
        KeyCode::Char('G') => Some(Action::ToggleGraph),
        KeyCode::Char('F') => Some(Action::ToggleFilters),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

/// Apply one key to the session. Unmapped keys change nothing.
pub fn dispatch(session: &mut Session, key: KeyEvent) -> Transition {
    match map_key(key) {
        Some(action) => update(session, &action),
        None => Transition::Continue,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Switch to the alternate screen and wrap stdout for drawing.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Leave the alternate screen and show the cursor again.
fn restore_terminal() -> io::Result<()> {
    io::stdout().execute(LeaveAlternateScreen)?;
    io::stdout().execute(Show)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        restore_original_attrs();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the menu until the user quits.
///
/// The terminal is in control mode for the whole loop except while a
/// prompt is reading a line. On return, both the alternate screen and the
/// original terminal attributes are restored, whether the loop ended by
/// quitting or by an I/O error.
pub fn run(session: &mut Session, logger: &Logger) -> io::Result<()> {
    install_panic_hook();
    let mut modes = ModeManager::new(StdinTty);
    modes.enter_control()?;
    let mut terminal = setup_terminal()?;
    let mut keys = KeyReader::new(StdinSource);

    logger.log("menu started");
    let result = event_loop(session, logger, &mut terminal, &mut modes, &mut keys);

    let restored = restore_terminal();
    drop(modes);
    loop_error_first(result, restored)
}

/// The loop's own error outranks a failed restore.
fn loop_error_first(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    result.and(restored)
}

fn event_loop(
    session: &mut Session,
    logger: &Logger,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    modes: &mut ModeManager<StdinTty>,
    keys: &mut KeyReader<StdinSource>,
) -> io::Result<()> {
    loop {
        // Render
        let mode = modes.mode();
        terminal.draw(|frame| render(session, mode, frame))?;

        // Block on the next key
        let key = keys.read_key()?;
        tracing::debug!(code = ?key.code, "key pressed");

        let before = session.screen;
        match dispatch(session, key) {
            Transition::Continue => {}
            Transition::Quit => {
                logger.log("quit requested");
                return Ok(());
            }
            Transition::Effect(Effect::Prompt(prompt)) => {
                let line = {
                    let _input = modes.input_scope()?;
                    terminal.draw(|frame| render_prompt(session, InputMode::Input, &prompt, frame))?;
                    keys.discard_pending();
                    keys.read_line()?
                };
                // Echoed text is not in ratatui's buffer; force a full redraw.
                terminal.clear()?;
                apply_input(session, prompt, &line);
                logger.log_collection(&session.data.filters);
            }
        }

        if session.screen != before {
            tracing::debug!(from = ?before, to = ?session.screen, "screen changed");
            logger.log(&format!("screen: {}", session.screen.title()));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
