use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum UIError {
    IoError(io::Error),
    /// The operator pressed Ctrl-C.
    Interrupted,
    /// Standard input reached end of file.
    InputClosed,
}

impl fmt::Display for UIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UIError::IoError(e) => write!(f, "I/O error: {}", e),
            UIError::Interrupted => write!(f, "Interrupted"),
            UIError::InputClosed => write!(f, "Input stream closed"),
        }
    }
}

impl Error for UIError {}

impl From<io::Error> for UIError {
    fn from(error: io::Error) -> Self {
        UIError::IoError(error)
    }
}
