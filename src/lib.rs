// Imports ssh-menu specific modules
pub mod args;
pub mod launcher;
pub mod log;
pub mod nav;
pub mod registry;
pub mod ui;

#[cfg(test)]
#[path = "test/support.rs"]
pub(crate) mod test_support;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a session.
#[derive(Debug)]
pub enum Error {
    UI(ui::UIError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UI(err) => write!(f, "UI error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<ui::UIError> for Error {
    fn from(err: ui::UIError) -> Self {
        Error::UI(err)
    }
}
