//! JSON store for the registry.
//!
//! Handles:
//! - Locating the store file (flag, environment, standard locations)
//! - Decoding both the `{"vms": {...}}` envelope and the legacy bare mapping
//! - Backfilling missing fields and migrating the legacy `usuarios` field
//! - Backing up unreadable stores and falling back to the built-in registry
//! - Atomic saves through a temporary sibling file

use super::{ColorTag, HostEntry, Registry, RegistryError};
use crate::{log_debug, log_error, log_info, log_warn};
use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;
use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};

pub const STORE_FILE_NAME: &str = "vms.json";
pub const CONFIG_ENV_VAR: &str = "SSH_MENU_CONFIG";

const STORE_DIR_NAME: &str = ".ssh-menu";
const ENVELOPE_KEY: &str = "vms";
const LEGACY_USERS_KEY: &str = "usuarios";
const LOOPBACK_PLACEHOLDER: &str = "127.0.0.1";

/// Why the built-in registry replaced the store contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryReason {
    /// The file is not valid JSON.
    Malformed(String),
    /// The file is JSON but not a host mapping.
    InvalidShape(String),
    /// The file exists but could not be read (e.g. permission denied).
    Unreadable(String),
}

impl fmt::Display for RecoveryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryReason::Malformed(msg) => write!(f, "configuration file is corrupted ({})", msg),
            RecoveryReason::InvalidShape(msg) => write!(f, "configuration file has an invalid structure ({})", msg),
            RecoveryReason::Unreadable(msg) => write!(f, "configuration file cannot be read ({})", msg),
        }
    }
}

/// Result of [`RegistryStore::load`]. Loading never fails; this records how the
/// registry was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was read. `warnings` lists per-entry repairs and skips.
    Loaded { registry: Registry, warnings: Vec<String> },
    /// No store exists yet; the built-in registry is in use.
    Seeded(Registry),
    /// The store could not be used; the built-in registry is in use.
    Recovered {
        registry: Registry,
        reason: RecoveryReason,
        backup: Option<PathBuf>,
    },
}

impl LoadOutcome {
    pub fn registry(&self) -> &Registry {
        match self {
            LoadOutcome::Loaded { registry, .. } | LoadOutcome::Seeded(registry) | LoadOutcome::Recovered { registry, .. } => registry,
        }
    }

    pub fn into_registry(self) -> Registry {
        match self {
            LoadOutcome::Loaded { registry, .. } | LoadOutcome::Seeded(registry) | LoadOutcome::Recovered { registry, .. } => registry,
        }
    }

    /// True when saves are expected to fail until the file is fixed.
    pub fn persistence_blocked(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Recovered {
                reason: RecoveryReason::Unreadable(_),
                ..
            }
        )
    }

    /// Operator-facing summary, if the load deserves one.
    pub fn notice(&self) -> Option<String> {
        match self {
            LoadOutcome::Loaded { warnings, .. } if warnings.is_empty() => None,
            LoadOutcome::Loaded { warnings, .. } => Some(format!("Configuration loaded with {} warning(s): {}", warnings.len(), warnings.join("; "))),
            LoadOutcome::Seeded(_) => Some("No configuration file found, using default hosts".to_string()),
            LoadOutcome::Recovered { reason, backup, .. } => {
                let mut notice = format!("The {}. Using default hosts.", reason);
                if let Some(backup) = backup {
                    notice.push_str(&format!(" Backup saved to {}", backup.display()));
                }
                if self.persistence_blocked() {
                    notice.push_str(" Changes will not be saved until the file permissions are fixed.");
                } else if backup.is_none() {
                    notice.push_str(" The file could not be backed up and will not be replaced until a backup can be made.");
                }
                Some(notice)
            }
        }
    }
}

/// The store file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the store path: explicit path, then `SSH_MENU_CONFIG`, then the
    /// standard locations.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            log_debug!("Using store path from command line: {:?}", path);
            return Self::new(path);
        }

        if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            log_debug!("Using store path from {}: {:?}", CONFIG_ENV_VAR, path);
            return Self::new(path);
        }

        Self::new(find_store_path(dirs::home_dir(), env::current_dir().ok()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that receives a copy of an unreadable store.
    pub fn backup_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, ".backup")
    }

    fn temp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, ".tmp")
    }

    /// Load the registry. Never fails: problems are recorded in the outcome and
    /// the built-in registry is substituted.
    pub fn load(&self) -> LoadOutcome {
        log_info!("Loading registry from: {:?}", self.path);

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log_info!("No store at {:?}, using built-in hosts", self.path);
                return LoadOutcome::Seeded(Registry::defaults());
            }
            Err(err) => {
                log_error!("Failed to read store {:?}: {}", self.path, err);
                return LoadOutcome::Recovered {
                    registry: Registry::defaults(),
                    reason: RecoveryReason::Unreadable(err.to_string()),
                    backup: None,
                };
            }
        };

        match decode_registry(&bytes) {
            Ok((registry, warnings)) => {
                for warning in &warnings {
                    log_warn!("{}", warning);
                }
                log_info!("Loaded {} host(s)", registry.len());
                LoadOutcome::Loaded { registry, warnings }
            }
            Err(err) => {
                log_warn!("Store {:?} is unusable: {}", self.path, err);
                let reason = match err {
                    RegistryError::InvalidShape(msg) => RecoveryReason::InvalidShape(msg),
                    other => RecoveryReason::Malformed(other.to_string()),
                };
                let backup = self.backup_unusable();
                LoadOutcome::Recovered {
                    registry: Registry::defaults(),
                    reason,
                    backup,
                }
            }
        }
    }

    /// Copy the current store aside. Failure is logged and otherwise ignored.
    fn backup_unusable(&self) -> Option<PathBuf> {
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => {
                log_info!("Backed up unusable store to {:?}", backup);
                Some(backup)
            }
            Err(err) => {
                log_warn!("Could not back up {:?}: {}", self.path, err);
                None
            }
        }
    }

    /// Write the registry, reporting success. Failures are logged, never propagated,
    /// and leave the in-memory registry untouched.
    pub fn save(&self, registry: &Registry) -> bool {
        match self.try_save(registry) {
            Ok(()) => {
                log_debug!("Saved {} host(s) to {:?}", registry.len(), self.path);
                true
            }
            Err(err) => {
                log_error!("Failed to save registry to {:?}: {}", self.path, err);
                false
            }
        }
    }

    /// Write the registry through a temporary sibling file and rename it into place.
    pub fn try_save(&self, registry: &Registry) -> Result<(), RegistryError> {
        let content = encode_registry(registry)?;
        self.ensure_replaceable()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        if let Err(err) = fs::write(&temp_path, content.as_bytes()).and_then(|_| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    /// The rename in [`RegistryStore::try_save`] only needs directory permissions,
    /// so the current file is checked first. A file that cannot be read is never
    /// replaced, and one that no longer decodes is replaced only once a backup
    /// copy of it exists.
    fn ensure_replaceable(&self) -> Result<(), RegistryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(RegistryError::Protected(format!("{} cannot be read ({})", self.path.display(), err))),
        };

        if decode_registry(&bytes).is_ok() {
            return Ok(());
        }
        if fs::read(self.backup_path()).is_ok_and(|backup| backup == bytes) {
            return Ok(());
        }
        match self.backup_unusable() {
            Some(_) => Ok(()),
            None => Err(RegistryError::Protected(format!("{} is unusable and could not be backed up", self.path.display()))),
        }
    }
}

/// First existing store in the standard locations, or the preferred location
/// when none exists yet.
pub(crate) fn find_store_path(home_dir: Option<PathBuf>, current_dir: Option<PathBuf>) -> PathBuf {
    let home_store = home_dir.map(|home| home.join(STORE_DIR_NAME).join(STORE_FILE_NAME));
    let legacy_store = current_dir.unwrap_or_default().join(STORE_FILE_NAME);

    for candidate in home_store.iter().chain(std::iter::once(&legacy_store)) {
        log_debug!("Checking: {:?}", candidate);
        if candidate.exists() {
            log_info!("Found store at: {:?}", candidate);
            return candidate.clone();
        }
    }

    home_store.unwrap_or(legacy_store)
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_else(|| STORE_FILE_NAME.into());
    name.push(suffix);
    path.with_file_name(name)
}

/// Decode store bytes into a registry plus per-entry warnings.
pub(crate) fn decode_registry(bytes: &[u8]) -> Result<(Registry, Vec<String>), RegistryError> {
    let document: Value = serde_json::from_slice(bytes)?;

    let mut top_level = match document {
        Value::Object(top_level) => top_level,
        other => return Err(RegistryError::InvalidShape(format!("expected an object at the top level, found {}", value_kind(&other)))),
    };

    let hosts = match top_level.remove(ENVELOPE_KEY) {
        Some(Value::Object(hosts)) => hosts,
        Some(other) => {
            return Err(RegistryError::InvalidShape(format!("expected \"{}\" to be an object, found {}", ENVELOPE_KEY, value_kind(&other))));
        }
        None => top_level,
    };

    let mut registry = Registry::new();
    let mut warnings = Vec::new();
    for (name, value) in hosts {
        match decode_entry(&name, value, &mut warnings) {
            Some(entry) => {
                registry.insert_loaded(entry);
            }
            None => warnings.push(format!("Skipped host '{}': entry is not an object", name)),
        }
    }

    Ok((registry, warnings))
}

fn decode_entry(name: &str, value: Value, warnings: &mut Vec<String>) -> Option<HostEntry> {
    let Value::Object(mut fields) = value else {
        return None;
    };

    let address = match fields.remove("ip") {
        Some(Value::String(address)) => address,
        _ => {
            warnings.push(format!("Host '{}' has no IP address, using {}", name, LOOPBACK_PLACEHOLDER));
            LOOPBACK_PLACEHOLDER.to_string()
        }
    };

    let legacy_users = fields.remove(LEGACY_USERS_KEY);
    let users = match (fields.remove("users"), legacy_users) {
        (Some(users), _) => decode_users(name, users, warnings),
        (None, Some(legacy)) => {
            log_info!("Migrating legacy '{}' field for host '{}'", LEGACY_USERS_KEY, name);
            decode_users(name, legacy, warnings)
        }
        (None, None) => Vec::new(),
    };

    let color = match fields.remove("color") {
        Some(Value::String(color)) => ColorTag::parse(&color).unwrap_or_else(|| {
            warnings.push(format!("Host '{}' has unknown color '{}', using {}", name, color, ColorTag::default()));
            ColorTag::default()
        }),
        _ => ColorTag::default(),
    };

    Some(HostEntry {
        name: name.to_string(),
        address,
        users,
        color,
    })
}

fn decode_users(host: &str, value: Value, warnings: &mut Vec<String>) -> Vec<String> {
    let Value::Array(values) = value else {
        warnings.push(format!("Host '{}' has a users field that is not a list, ignoring it", host));
        return Vec::new();
    };

    let mut users: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::String(user) if !user.is_empty() && !users.contains(&user) => users.push(user),
            Value::String(user) if user.is_empty() => warnings.push(format!("Host '{}' has an empty user name, skipping it", host)),
            Value::String(user) => warnings.push(format!("Host '{}' lists user '{}' twice, keeping the first", host, user)),
            other => warnings.push(format!("Host '{}' has a non-text user entry ({}), skipping it", host, value_kind(&other))),
        }
    }
    users
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Serialize)]
struct StoredHost<'a> {
    ip: &'a str,
    users: &'a [String],
    color: &'static str,
}

struct StoredHosts<'a>(&'a Registry);

impl Serialize for StoredHosts<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for host in self.0 {
            map.serialize_entry(
                &host.name,
                &StoredHost {
                    ip: &host.address,
                    users: &host.users,
                    color: host.color.as_str(),
                },
            )?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct StoredDocument<'a> {
    vms: StoredHosts<'a>,
}

/// Encode the registry in the enveloped form.
pub(crate) fn encode_registry(registry: &Registry) -> Result<String, RegistryError> {
    let mut content = serde_json::to_string_pretty(&StoredDocument { vms: StoredHosts(registry) })?;
    content.push('\n');
    Ok(content)
}

#[cfg(test)]
#[path = "../test/registry/store.rs"]
mod tests;
