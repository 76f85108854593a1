//! Field validation for host names, user names and addresses.

use super::Registry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;

/// Minimum length, in characters, of host and user names.
pub const MIN_NAME_LEN: usize = 2;

/// Typed replies that abort an in-progress prompt flow.
const CANCEL_KEYWORDS: [&str; 3] = ["cancel", "exit", "quit"];

/// Characters rejected in user names: whitespace and `@ # $ % ^ & *`.
static FORBIDDEN_USER_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s@#$%^&*]").expect("static user-name pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooShort { field: &'static str, min: usize },
    Duplicate { field: &'static str, value: String },
    InvalidCharacter { field: &'static str, found: char },
    InvalidAddress(String),
    UnknownHost(String),
    UnknownUser(String),
    UnknownColor(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty { field } => write!(f, "{} cannot be empty", field),
            ValidationError::TooShort { field, min } => write!(f, "{} must be at least {} characters long", field, min),
            ValidationError::Duplicate { field, value } => write!(f, "{} '{}' already exists", field, value),
            ValidationError::InvalidCharacter { field, found } => {
                if found.is_whitespace() {
                    write!(f, "{} cannot contain spaces", field)
                } else {
                    write!(f, "{} cannot contain '{}'", field, found)
                }
            }
            ValidationError::InvalidAddress(value) => {
                write!(f, "Invalid IP address '{}': expected four numbers from 0 to 255 separated by dots", value)
            }
            ValidationError::UnknownHost(name) => write!(f, "Host '{}' does not exist", name),
            ValidationError::UnknownUser(name) => write!(f, "User '{}' does not exist", name),
            ValidationError::UnknownColor(name) => write!(f, "Unknown color '{}'", name),
        }
    }
}

impl std::error::Error for ValidationError {}

/// True when the reply is one of the cancel keywords, ignoring case and surrounding spaces.
pub fn is_cancel_keyword(input: &str) -> bool {
    let input = input.trim();
    CANCEL_KEYWORDS.iter().any(|keyword| input.eq_ignore_ascii_case(keyword))
}

/// Parses a dotted-quad address: exactly four decimal parts, each 0 to 255.
pub fn parse_address(input: &str) -> Result<Ipv4Addr, ValidationError> {
    let invalid = || ValidationError::InvalidAddress(input.to_string());

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 4 {
        return Err(invalid());
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = part.parse().map_err(|_| invalid())?;
        *octet = u8::try_from(value).map_err(|_| invalid())?;
    }

    Ok(Ipv4Addr::from(octets))
}

pub fn validate_address(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty { field: "IP address" });
    }
    parse_address(input).map(|_| ())
}

/// Checks a new host name against the registry.
pub fn validate_host_name(name: &str, registry: &Registry) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "Host name" });
    }
    if registry.contains(name) {
        return Err(ValidationError::Duplicate {
            field: "Host",
            value: name.to_string(),
        });
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "Host name",
            min: MIN_NAME_LEN,
        });
    }
    Ok(())
}

/// Checks a new user name against the users already registered on a host.
/// Duplicates are compared case-sensitively.
pub fn validate_user_name(user: &str, existing: &[String]) -> Result<(), ValidationError> {
    if user.is_empty() {
        return Err(ValidationError::Empty { field: "Username" });
    }
    if existing.iter().any(|known| known == user) {
        return Err(ValidationError::Duplicate {
            field: "User",
            value: user.to_string(),
        });
    }
    if user.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "Username",
            min: MIN_NAME_LEN,
        });
    }
    if let Some(found) = FORBIDDEN_USER_CHARS.find(user).and_then(|m| m.as_str().chars().next()) {
        return Err(ValidationError::InvalidCharacter { field: "Username", found });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../test/registry/validate.rs"]
mod tests;
