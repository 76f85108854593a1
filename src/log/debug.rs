//! Debug log file writer
//!
//! Entries are appended synchronously to `~/.ssh-menu/logs/ssh-menu.log`.
//! The file is opened lazily on the first entry so a run without `--debug`
//! never touches the filesystem.

use super::{LogError, LogLevel, formatter::LogFormatter};
use std::{
    fs::{self, File, OpenOptions},
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

#[cfg(unix)]
const PRIVATE_LOG_DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const PRIVATE_LOG_FILE_MODE: u32 = 0o600;

const LOG_DIR_NAME: &str = ".ssh-menu";
const LOG_FILE_NAME: &str = "ssh-menu.log";

pub(super) struct DebugLogger {
    formatter: LogFormatter,
    writer: Mutex<Option<LineWriter<File>>>,
}

impl DebugLogger {
    pub(super) fn new() -> Self {
        let mut formatter = LogFormatter::default();
        formatter.set_include_timestamp(true);
        formatter.set_include_level(true);

        Self {
            formatter,
            writer: Mutex::new(None),
        }
    }

    pub(super) fn log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        let mut guard = self.writer.lock().map_err(|_| LogError::WriterPoisoned)?;
        if guard.is_none() {
            let path = Self::default_log_path()?;
            *guard = Some(LineWriter::new(open_private_append_file(&path)?));
        }

        let formatted = self.formatter.format(Some(level), message);
        if let Some(writer) = guard.as_mut() {
            writer.write_all(formatted.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    pub(super) fn default_log_path() -> Result<PathBuf, LogError> {
        let home_dir = dirs::home_dir().ok_or_else(|| LogError::DirectoryCreationError("Home directory not found".to_string()))?;
        let log_dir = home_dir.join(LOG_DIR_NAME).join("logs");

        create_private_directory(&log_dir)?;

        Ok(log_dir.join(LOG_FILE_NAME))
    }
}

fn create_private_directory(path: &Path) -> Result<(), LogError> {
    fs::create_dir_all(path).map_err(|err| LogError::DirectoryCreationError(format!("{}: {}", path.display(), err)))?;
    set_private_directory_permissions(path)
}

fn open_private_append_file(path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        options.mode(PRIVATE_LOG_FILE_MODE);
    }
    let file = options.open(path)?;
    set_private_file_permissions(path)?;
    Ok(file)
}

#[cfg(unix)]
fn set_private_directory_permissions(path: &Path) -> Result<(), LogError> {
    fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_LOG_DIR_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_private_directory_permissions(_path: &Path) -> Result<(), LogError> {
    Ok(())
}

#[cfg(unix)]
fn set_private_file_permissions(path: &Path) -> Result<(), LogError> {
    fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_LOG_FILE_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_private_file_permissions(_path: &Path) -> Result<(), LogError> {
    Ok(())
}

#[cfg(test)]
#[path = "../test/log/debug.rs"]
mod tests;
