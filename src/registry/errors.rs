use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum RegistryError {
    IoError(io::Error),
    ParseError(serde_json::Error),
    InvalidShape(String),
    /// The existing store was kept because replacing it would lose its contents.
    Protected(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::IoError(e) => write!(f, "I/O error: {}", e),
            RegistryError::ParseError(e) => write!(f, "Malformed JSON: {}", e),
            RegistryError::InvalidShape(msg) => write!(f, "Unexpected store layout: {}", msg),
            RegistryError::Protected(msg) => write!(f, "Refusing to replace store: {}", msg),
        }
    }
}

impl Error for RegistryError {}

impl From<io::Error> for RegistryError {
    fn from(error: io::Error) -> Self {
        RegistryError::IoError(error)
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(error: serde_json::Error) -> Self {
        RegistryError::ParseError(error)
    }
}
