//! Terminal input modes.
//!
//! Control mode turns off canonical line processing, echo and signal
//! keys so every keystroke, Ctrl+C included, reaches the menu immediately. Input mode is whatever the
//! terminal was doing before: line-buffered and echoed, used for prompts.
//!
//! The mode is owned by a [`ModeManager`]. Prompts borrow input mode
//! through an [`InputScope`], which switches back to control mode when
//! dropped, on every exit path.

use std::io;
use std::sync::OnceLock;

/// Attributes seen the first time the real terminal was queried.
static ORIGINAL_ATTRS: OnceLock<libc::termios> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Unbuffered, unechoed single keystrokes.
    Control,
    /// Line-buffered, echoed text.
    Input,
}

// ============================================================================
// TTY ACCESS
// ============================================================================

/// Read and write terminal attributes.
pub trait Tty {
    fn get_attrs(&mut self) -> io::Result<libc::termios>;

    /// `when` is `TCSANOW` or `TCSADRAIN`.
    fn set_attrs(&mut self, attrs: &libc::termios, when: libc::c_int) -> io::Result<()>;
}

/// The terminal behind standard input.
#[derive(Debug, Default)]
pub struct StdinTty;

impl Tty for StdinTty {
    fn get_attrs(&mut self) -> io::Result<libc::termios> {
        // SAFETY: termios is plain data; tcgetattr fills it completely on success.
        let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
        // SAFETY: `attrs` is a valid, writable termios.
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &mut attrs) } != 0 {
            return Err(io::Error::last_os_error());
        }
        ORIGINAL_ATTRS.get_or_init(|| attrs);
        Ok(attrs)
    }

    fn set_attrs(&mut self, attrs: &libc::termios, when: libc::c_int) -> io::Result<()> {
        // SAFETY: `attrs` points to a valid termios.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, when, attrs) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

/// Put stdin back the way it was before the menu touched it.
///
/// Used from the panic hook, where the owning [`ModeManager`] is out of
/// reach. Does nothing if the terminal was never queried.
pub fn restore_original_attrs() {
    if let Some(attrs) = ORIGINAL_ATTRS.get() {
        let _ = StdinTty.set_attrs(attrs, libc::TCSADRAIN);
    }
}

// ============================================================================
// MODE MANAGER
// ============================================================================

/// Owns the terminal mode. Starts in input mode.
///
/// Dropping the manager restores the captured attributes.
pub struct ModeManager<T: Tty> {
    tty: T,
    mode: InputMode,
    saved: Option<libc::termios>,
}

impl<T: Tty> ModeManager<T> {
    pub fn new(tty: T) -> Self {
        ModeManager {
            tty,
            mode: InputMode::Input,
            saved: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Capture the current attributes and switch off canonical mode, echo
    /// and signal generation. No-op when already in control mode.
    pub fn enter_control(&mut self) -> io::Result<()> {
        if self.mode == InputMode::Control {
            return Ok(());
        }

        let saved = self.tty.get_attrs()?;
        let mut control = saved;
        control.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ISIG);
        self.tty.set_attrs(&control, libc::TCSANOW)?;

        self.saved = Some(saved);
        self.mode = InputMode::Control;
        tracing::debug!("entered control mode");
        Ok(())
    }

    /// Restore the captured attributes once pending output drains.
    /// No-op when already in input mode.
    pub fn enter_input(&mut self) -> io::Result<()> {
        if self.mode == InputMode::Input {
            return Ok(());
        }

        if let Some(saved) = self.saved {
            self.tty.set_attrs(&saved, libc::TCSADRAIN)?;
        }
        self.mode = InputMode::Input;
        tracing::debug!("entered input mode");
        Ok(())
    }

    /// Hold input mode until the returned guard is dropped.
    pub fn input_scope(&mut self) -> io::Result<InputScope<'_, T>> {
        let resume_control = self.mode == InputMode::Control;
        self.enter_input()?;
        Ok(InputScope {
            manager: self,
            resume_control,
        })
    }
}

impl<T: Tty> Drop for ModeManager<T> {
    fn drop(&mut self) {
        if let Err(e) = self.enter_input() {
            tracing::warn!(error = %e, "could not restore terminal attributes");
        }
    }
}

/// Input mode for the lifetime of the guard.
pub struct InputScope<'a, T: Tty> {
    manager: &'a mut ModeManager<T>,
    resume_control: bool,
}

impl<T: Tty> InputScope<'_, T> {
    pub fn mode(&self) -> InputMode {
        self.manager.mode()
    }
}

impl<T: Tty> Drop for InputScope<'_, T> {
    fn drop(&mut self) {
        if !self.resume_control {
            return;
        }
        if let Err(e) = self.manager.enter_control() {
            tracing::warn!(error = %e, "could not return to control mode");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
