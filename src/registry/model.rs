//! Registry domain models.

use super::validate::{self, ValidationError};
use std::fmt;

/// Display color attached to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorTag {
    Red,
    Green,
    #[default]
    Cyan,
    Yellow,
    Blue,
    Magenta,
    White,
    Orange,
    Purple,
}

impl ColorTag {
    /// Every color in pick-list order.
    pub const ALL: [ColorTag; 9] = [
        ColorTag::Red,
        ColorTag::Green,
        ColorTag::Cyan,
        ColorTag::Yellow,
        ColorTag::Blue,
        ColorTag::Magenta,
        ColorTag::White,
        ColorTag::Orange,
        ColorTag::Purple,
    ];

    /// Name used in the store and in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Red => "RED",
            ColorTag::Green => "GREEN",
            ColorTag::Cyan => "CYAN",
            ColorTag::Yellow => "YELLOW",
            ColorTag::Blue => "BLUE",
            ColorTag::Magenta => "MAGENTA",
            ColorTag::White => "WHITE",
            ColorTag::Orange => "ORANGE",
            ColorTag::Purple => "PURPLE",
        }
    }

    /// ANSI escape sequence that switches the foreground to this color.
    pub fn ansi(&self) -> &'static str {
        match self {
            ColorTag::Red => "\x1b[91m",
            ColorTag::Green => "\x1b[92m",
            ColorTag::Cyan => "\x1b[96m",
            ColorTag::Yellow => "\x1b[93m",
            ColorTag::Blue => "\x1b[94m",
            ColorTag::Magenta => "\x1b[95m",
            ColorTag::White => "\x1b[97m",
            ColorTag::Orange => "\x1b[38;5;208m",
            ColorTag::Purple => "\x1b[38;5;129m",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|color| color.as_str().eq_ignore_ascii_case(name))
    }

    /// Decodes a stored color, falling back to the default for absent or unknown names.
    pub fn decode(name: Option<&str>) -> Self {
        name.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single host record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Unique display name, also the registry key.
    pub name: String,
    /// IPv4 address handed to the ssh client.
    pub address: String,
    /// Login users in insertion order.
    pub users: Vec<String>,
    pub color: ColorTag,
}

impl HostEntry {
    /// Create a host with no users.
    pub fn new(name: impl Into<String>, address: impl Into<String>, color: ColorTag) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            users: Vec::new(),
            color,
        }
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_user(&self, user: &str) -> bool {
        self.users.iter().any(|known| known == user)
    }
}

/// Ordered collection of hosts keyed by name. Order is the menu display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    hosts: Vec<HostEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in registry used when no store exists or the store cannot be read.
    /// Seed addresses are illustrative and are not validated.
    pub fn defaults() -> Self {
        Self {
            hosts: vec![
                HostEntry::new("Debian VM", "192.168.100.55", ColorTag::Red).with_users(["root", "admin"]),
                HostEntry::new("Rocky VM", "192.168.100.54", ColorTag::Green).with_users(["root", "admin"]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostEntry> {
        self.hosts.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hosts.iter().any(|host| host.name == name)
    }

    pub fn host(&self, name: &str) -> Option<&HostEntry> {
        self.hosts.iter().find(|host| host.name == name)
    }

    fn host_mut(&mut self, name: &str) -> Result<&mut HostEntry, ValidationError> {
        self.hosts
            .iter_mut()
            .find(|host| host.name == name)
            .ok_or_else(|| ValidationError::UnknownHost(name.to_string()))
    }

    /// Append a host after validating its name. Addresses are validated by the caller
    /// so that seeded or migrated entries can still be inserted.
    pub fn add_host(&mut self, entry: HostEntry) -> Result<(), ValidationError> {
        validate::validate_host_name(&entry.name, self)?;
        self.hosts.push(entry);
        Ok(())
    }

    /// Insert an entry decoded from the store. Later duplicates are ignored.
    pub(crate) fn insert_loaded(&mut self, entry: HostEntry) -> bool {
        if self.contains(&entry.name) {
            return false;
        }
        self.hosts.push(entry);
        true
    }

    pub fn remove_host(&mut self, name: &str) -> Option<HostEntry> {
        let index = self.hosts.iter().position(|host| host.name == name)?;
        Some(self.hosts.remove(index))
    }

    pub fn set_address(&mut self, name: &str, address: &str) -> Result<(), ValidationError> {
        validate::validate_address(address)?;
        self.host_mut(name)?.address = address.to_string();
        Ok(())
    }

    pub fn set_color(&mut self, name: &str, color: ColorTag) -> Result<(), ValidationError> {
        self.host_mut(name)?.color = color;
        Ok(())
    }

    pub fn add_user(&mut self, name: &str, user: &str) -> Result<(), ValidationError> {
        let host = self.host_mut(name)?;
        validate::validate_user_name(user, &host.users)?;
        host.users.push(user.to_string());
        Ok(())
    }

    pub fn remove_user(&mut self, name: &str, user: &str) -> Result<(), ValidationError> {
        let host = self.host_mut(name)?;
        let index = host
            .users
            .iter()
            .position(|known| known == user)
            .ok_or_else(|| ValidationError::UnknownUser(user.to_string()))?;
        host.users.remove(index);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a HostEntry;
    type IntoIter = std::slice::Iter<'a, HostEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}

#[cfg(test)]
#[path = "../test/registry/model.rs"]
mod tests;
