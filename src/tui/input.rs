//! Raw keyboard input: byte accumulation and escape-sequence decoding.
//!
//! A terminal driver may hand over an arrow key's three bytes in one read
//! or in several. Bytes are buffered until they decode to a key; a
//! sequence left incomplete for [`ESCAPE_TIMEOUT`] is dropped rather than
//! read as literal keys.

use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const ESC: u8 = 0x1b;
pub const CSI: u8 = b'[';

/// How long a started escape sequence may wait for its remaining bytes.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

/// Bytes requested per read: the length of an arrow-key sequence.
pub const READ_CHUNK: usize = 3;

const LINE_CHUNK: usize = 256;

// ============================================================================
// DECODING
// ============================================================================

/// Outcome of decoding the front of the byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A key, and how many bytes it used.
    Key(KeyEvent, usize),
    /// Bytes that mean nothing to the menu.
    Ignored(usize),
    /// Need more bytes (or nothing buffered yet).
    Incomplete,
}

/// ETX, sent by Ctrl+C once the terminal stops turning it into SIGINT.
pub const CTRL_C: u8 = 0x03;

/// Decode the first key in `buf`.
pub fn decode(buf: &[u8]) -> Decoded {
    match buf {
        [] => Decoded::Incomplete,
        [ESC] => Decoded::Incomplete,
        [ESC, CSI, rest @ ..] => decode_csi(rest),
        // Alt+key and other two-byte escapes
        [ESC, _, ..] => Decoded::Ignored(2),
        [CTRL_C, ..] => Decoded::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 1),
        [b, ..] if b.is_ascii() => Decoded::Key(key(KeyCode::Char(*b as char)), 1),
        [_, ..] => Decoded::Ignored(1),
    }
}

/// Decode the part of a control sequence after `ESC [`.
///
/// Parameter and intermediate bytes (0x20..=0x3F) run until a final byte
/// (0x40..=0x7E). Only parameterless `A` and `B` are keys; every other
/// sequence is dropped whole.
fn decode_csi(rest: &[u8]) -> Decoded {
    let Some(pos) = rest.iter().position(|b| !(0x20..=0x3f).contains(b)) else {
        return Decoded::Incomplete;
    };

    let used = 2 + pos + 1;
    match (pos, rest[pos]) {
        (0, b'A') => Decoded::Key(key(KeyCode::Up), used),
        (0, b'B') => Decoded::Key(key(KeyCode::Down), used),
        (_, 0x40..=0x7e) => Decoded::Ignored(used),
        // Malformed: drop what was scanned, keep the offending byte
        _ => Decoded::Ignored(2 + pos),
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// ============================================================================
// BYTE SOURCES
// ============================================================================

/// Somewhere raw bytes come from.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, waiting at most `timeout` (forever
    /// when `None`). `Ok(0)` means the timeout expired; end of input is
    /// reported as `UnexpectedEof`.
    fn read_bytes(&mut self, buf: &mut [u8], timeout: Option<Duration>) -> io::Result<usize>;
}

/// Standard input via `poll(2)` and `read(2)`.
#[derive(Debug, Default)]
pub struct StdinSource;

impl ByteSource for StdinSource {
    fn read_bytes(&mut self, buf: &mut [u8], timeout: Option<Duration>) -> io::Result<usize> {
        let mut fds = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let timeout_ms = match timeout {
            Some(t) => t.as_millis().min(i32::MAX as u128) as libc::c_int,
            None => -1,
        };

        // SAFETY: `fds` is a valid pollfd for the duration of the call.
        let ready = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
        if ready < 0 {
            return Err(io::Error::last_os_error());
        }
        if ready == 0 {
            return Ok(0);
        }

        // SAFETY: `buf` is valid for writes of `buf.len()` bytes.
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        match n {
            n if n < 0 => Err(io::Error::last_os_error()),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            n => Ok(n as usize),
        }
    }
}

// ============================================================================
// KEY READER
// ============================================================================

/// Buffers bytes from a [`ByteSource`] and hands out whole keys.
#[derive(Debug)]
pub struct KeyReader<S> {
    source: S,
    pending: Vec<u8>,
}

impl<S: ByteSource> KeyReader<S> {
    pub fn new(source: S) -> Self {
        KeyReader {
            source,
            pending: Vec::new(),
        }
    }

    /// Block until one complete key is available.
    pub fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            match decode(&self.pending) {
                Decoded::Key(key, used) => {
                    self.pending.drain(..used);
                    return Ok(key);
                }
                Decoded::Ignored(used) => {
                    self.pending.drain(..used);
                }
                Decoded::Incomplete => {
                    let timeout = if self.pending.is_empty() {
                        None
                    } else {
                        Some(ESCAPE_TIMEOUT)
                    };
                    let mut chunk = [0u8; READ_CHUNK];
                    match self.source.read_bytes(&mut chunk, timeout) {
                        Ok(0) => {
                            tracing::debug!(dropped = ?self.pending, "partial escape sequence timed out");
                            self.pending.clear();
                        }
                        Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => return Err(e),
                    }
                }
            }
        }
    }

    /// Block until a full line is available. Used while in input mode.
    ///
    /// The newline is not included. Bytes after it stay buffered.
    pub fn read_line(&mut self) -> io::Result<String> {
        loop {
            if let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                let text = String::from_utf8_lossy(&line[..pos]);
                return Ok(text.trim_end_matches('\r').to_string());
            }

            let mut chunk = [0u8; LINE_CHUNK];
            match self.source.read_bytes(&mut chunk, None) {
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Drop anything buffered. Called when switching terminal modes.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
