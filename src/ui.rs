mod console;
mod errors;
mod menu;
mod prompt;

pub use console::{Console, Key, KeyReader, TerminalConsole};
pub use errors::UIError;
pub use menu::{Menu, MenuItem, MenuStep, Selection, apply_key};
pub use prompt::{Answer, Prompt};

/// Resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";
/// Style for inline error and warning lines.
pub const ERROR_STYLE: &str = "\x1b[91m";
/// Style for success confirmations.
pub const SUCCESS_STYLE: &str = "\x1b[92m";
/// Style for titles and prompt questions.
pub const ACCENT_STYLE: &str = "\x1b[96m";
