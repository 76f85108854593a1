//! Terminal input/output collaborators.
//!
//! [`KeyReader`] yields one logical key at a time; [`Console`] adds line input,
//! screen clearing and output. [`TerminalConsole`] implements both on top of
//! crossterm and owns every platform key-encoding detail.

use super::UIError;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue, terminal,
};
use std::io::{self, Stdout, Write, stdin, stdout};

/// Logical key produced by a [`KeyReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
    Left,
    Right,
    Digit(u8),
    Char(char),
}

pub trait KeyReader {
    /// Block until the next logical key is available.
    fn read_key(&mut self) -> Result<Key, UIError>;
}

pub trait Console: KeyReader + Write {
    /// Read one line of text without its trailing newline.
    fn read_line(&mut self) -> Result<String, UIError>;

    fn clear_screen(&mut self) -> Result<(), UIError>;
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, UIError> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Console bound to the process terminal.
pub struct TerminalConsole {
    stdout: Stdout,
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }
}

/// Map a crossterm key event to a logical key. Unmapped keys yield `None`.
pub(crate) fn decode_key_event(event: &KeyEvent) -> Result<Option<Key>, UIError> {
    if event.kind != KeyEventKind::Press {
        return Ok(None);
    }

    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => return Err(UIError::Interrupted),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(digit) => Key::Digit(digit as u8),
            None => Key::Char(c),
        },
        _ => return Ok(None),
    };
    Ok(Some(key))
}

impl KeyReader for TerminalConsole {
    fn read_key(&mut self) -> Result<Key, UIError> {
        self.stdout.flush()?;
        let _guard = RawModeGuard::enable()?;

        loop {
            if let Event::Key(key_event) = event::read()?
                && let Some(key) = decode_key_event(&key_event)?
            {
                return Ok(key);
            }
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self) -> Result<String, UIError> {
        self.stdout.flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Err(UIError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn clear_screen(&mut self) -> Result<(), UIError> {
        queue!(self.stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Write for TerminalConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
#[path = "../test/ui/console.rs"]
mod tests;
