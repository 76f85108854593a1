//! Scripted collaborators shared by unit tests.

use crate::launcher::{LaunchMode, Launcher};
use crate::nav::NavigationController;
use crate::registry::{Registry, RegistryStore};
use crate::ui::{Console, Key, KeyReader, UIError};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Console fed from queued keys and lines. Running out of input reports
/// [`UIError::InputClosed`] so a test never blocks.
#[derive(Default)]
pub(crate) struct ScriptedConsole {
    keys: VecDeque<Key>,
    lines: VecDeque<String>,
    output: Vec<u8>,
    pub(crate) clears: usize,
}

impl ScriptedConsole {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut console = Self::new();
        console.push_keys(keys);
        console
    }

    pub(crate) fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    pub(crate) fn push_lines<S: Into<String>>(&mut self, lines: impl IntoIterator<Item = S>) {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub(crate) fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn remaining_lines(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl KeyReader for ScriptedConsole {
    fn read_key(&mut self) -> Result<Key, UIError> {
        self.keys.pop_front().ok_or(UIError::InputClosed)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String, UIError> {
        self.lines.pop_front().ok_or(UIError::InputClosed)
    }

    fn clear_screen(&mut self) -> Result<(), UIError> {
        self.clears += 1;
        Ok(())
    }
}

impl Write for ScriptedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Launcher that records every request instead of spawning ssh.
#[derive(Default)]
pub(crate) struct RecordingLauncher {
    pub(crate) launches: Vec<(String, String)>,
    pub(crate) fail_with: Option<io::ErrorKind>,
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, address: &str, user: &str) -> io::Result<LaunchMode> {
        if let Some(kind) = self.fail_with {
            return Err(io::Error::new(kind, "ssh not found in PATH"));
        }
        self.launches.push((address.to_string(), user.to_string()));
        Ok(LaunchMode::NewWindow)
    }
}

/// Unique scratch directory under the system temp dir.
pub(crate) fn temp_dir(prefix: &str) -> PathBuf {
    let unique = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock should be after epoch").as_nanos();
    let dir = std::env::temp_dir().join(format!("ssh-menu-{prefix}-{unique}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Controller over `registry` with a store in a fresh temp directory.
pub(crate) fn navigation(registry: Registry, console: ScriptedConsole) -> NavigationController<ScriptedConsole, RecordingLauncher> {
    let store = RegistryStore::new(temp_dir("nav").join("vms.json"));
    NavigationController::new(registry, store, console, RecordingLauncher::default())
}
