//! Arrow-key / digit menu.
//!
//! [`Menu::select`] renders a title and a list of options, then blocks on one
//! key at a time until the operator confirms an option, jumps to one by digit,
//! or cancels.

use super::{ACCENT_STYLE, Console, Key, RESET, UIError};
use crate::registry::ColorTag;
use unicode_width::UnicodeWidthStr;

const MUTED_STYLE: &str = "\x1b[2m";
const BOLD_STYLE: &str = "\x1b[1m";

/// One line of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Optional detail shown in a right-aligned column (e.g. an address).
    pub detail: Option<String>,
    pub color: Option<ColorTag>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            color: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }
}

/// What [`Menu::select`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Cancel,
}

/// Effect of one key on a menu with `count` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Move(usize),
    Confirm(usize),
    Cancel,
    Ignore,
}

/// Pure key handling: UP/DOWN wrap, ENTER/RIGHT confirm, ESC/LEFT cancel and an
/// in-range digit selects directly.
pub fn apply_key(cursor: usize, count: usize, key: Key) -> MenuStep {
    match key {
        Key::Up if count > 0 => MenuStep::Move((cursor + count - 1) % count),
        Key::Down if count > 0 => MenuStep::Move((cursor + 1) % count),
        Key::Enter | Key::Right if cursor < count => MenuStep::Confirm(cursor),
        Key::Esc | Key::Left => MenuStep::Cancel,
        Key::Digit(digit) if usize::from(digit) < count => MenuStep::Confirm(usize::from(digit)),
        _ => MenuStep::Ignore,
    }
}

pub struct Menu {
    /// ANSI escape code applied to the highlighted option when it has no color of its own.
    select_color: String,
    /// ANSI escape code applied to the other options when they have no color of their own.
    unselect_color: String,
    /// Marker drawn in front of the highlighted option.
    marker: char,
    help_msg: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            select_color: String::from("\x1b[1;96m"),
            unselect_color: String::from("\x1b[37m"),
            marker: '▶',
            help_msg: true,
        }
    }
}

impl Menu {
    /// Let the operator pick one of `items`.
    pub fn select<C: Console + ?Sized>(&self, console: &mut C, title: &str, items: &[MenuItem]) -> Result<Selection, UIError> {
        self.select_with_notice(console, title, items, None)
    }

    /// Like [`Menu::select`], with status lines drawn under the title. The
    /// notice is written as given, so the caller owns its styling.
    pub fn select_with_notice<C: Console + ?Sized>(&self, console: &mut C, title: &str, items: &[MenuItem], notice: Option<&str>) -> Result<Selection, UIError> {
        let mut cursor = 0;
        let mut dirty = true;

        loop {
            if dirty {
                self.render(console, title, items, cursor, notice)?;
                dirty = false;
            }

            match apply_key(cursor, items.len(), console.read_key()?) {
                MenuStep::Move(next) => {
                    dirty = next != cursor;
                    cursor = next;
                }
                MenuStep::Confirm(index) => return Ok(Selection::Index(index)),
                MenuStep::Cancel => return Ok(Selection::Cancel),
                MenuStep::Ignore => {}
            }
        }
    }

    fn render<C: Console + ?Sized>(&self, console: &mut C, title: &str, items: &[MenuItem], cursor: usize, notice: Option<&str>) -> Result<(), UIError> {
        console.clear_screen()?;
        writeln!(console, "{}=== {} ==={}", ACCENT_STYLE, title, RESET)?;
        if let Some(notice) = notice {
            writeln!(console, "{}{}", notice, RESET)?;
        }
        writeln!(console)?;

        let label_width = items.iter().map(|item| item.label.width()).max().unwrap_or(0);
        for (index, item) in items.iter().enumerate() {
            let selected = index == cursor;
            let style = match (item.color, selected) {
                (Some(color), true) => format!("{}{}", BOLD_STYLE, color.ansi()),
                (Some(color), false) => format!("{}{}", MUTED_STYLE, color.ansi()),
                (None, true) => self.select_color.clone(),
                (None, false) => format!("{}{}", MUTED_STYLE, self.unselect_color),
            };
            let marker = if selected { self.marker } else { ' ' };
            let number = if index < 10 { format!("{}.", index) } else { "  ".to_string() };

            let mut line = format!("{} {} {}", marker, number, item.label);
            if let Some(detail) = &item.detail {
                let padding = label_width.saturating_sub(item.label.width());
                line.push_str(&format!("{}  ({})", " ".repeat(padding), detail));
            }
            writeln!(console, "{}{}{}", style, line, RESET)?;
        }

        if self.help_msg {
            writeln!(console)?;
            writeln!(console, "{}↑/↓ move  |  Enter/→ select  |  0-9 jump  |  Esc/← back{}", MUTED_STYLE, RESET)?;
        }
        console.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../test/ui/menu.rs"]
mod tests;
