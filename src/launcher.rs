//! Hands a host/user pair to the system `ssh` client.
//!
//! The command is built as data first ([`PreparedLaunch`]) so the platform
//! decisions can be checked without spawning anything. On Windows the session
//! opens in a new console window; elsewhere a terminal emulator is used when a
//! graphical session is available, otherwise `ssh` runs in the current terminal.

use crate::{log_debug, log_info, log_warn};
use std::{
    env, io,
    path::PathBuf,
    process::{Command, Stdio},
};

/// Terminal emulators tried in order when `$TERMINAL` is unset.
const TERMINAL_CANDIDATES: [&str; 4] = ["x-terminal-emulator", "gnome-terminal", "konsole", "xterm"];

/// How a session was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Running in a separate window; the caller continues immediately.
    NewWindow,
    /// Ran in this terminal and has already exited.
    Inline,
}

pub trait Launcher {
    /// Open an interactive remote session to `address` as `user`.
    fn launch(&mut self, address: &str, user: &str) -> io::Result<LaunchMode>;
}

/// Where the session window comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    WindowsConsole,
    TerminalEmulator(PathBuf),
    CurrentTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedLaunch {
    pub(crate) program: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) mode: LaunchMode,
}

pub(crate) fn ssh_destination(address: &str, user: &str) -> String {
    format!("{}@{}", user, address)
}

pub(crate) fn build_launch_command(ssh: &str, destination: &str, target: &LaunchTarget) -> PreparedLaunch {
    match target {
        LaunchTarget::WindowsConsole => PreparedLaunch {
            program: PathBuf::from("cmd"),
            // `start` treats its first quoted argument as the window title.
            args: ["/C", "start", "", "cmd", "/K", ssh, destination].iter().map(|arg| arg.to_string()).collect(),
            mode: LaunchMode::NewWindow,
        },
        LaunchTarget::TerminalEmulator(emulator) => {
            let separator = match emulator.file_stem().and_then(|stem| stem.to_str()) {
                Some("gnome-terminal") => "--",
                _ => "-e",
            };
            PreparedLaunch {
                program: emulator.clone(),
                args: vec![separator.to_string(), ssh.to_string(), destination.to_string()],
                mode: LaunchMode::NewWindow,
            }
        }
        LaunchTarget::CurrentTerminal => PreparedLaunch {
            program: PathBuf::from(ssh),
            args: vec![destination.to_string()],
            mode: LaunchMode::Inline,
        },
    }
}

/// Launcher backed by the `ssh` binary found on `PATH`.
#[derive(Debug, Default)]
pub struct SshLauncher {
    target: Option<LaunchTarget>,
}

impl SshLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a launch target instead of detecting one.
    pub fn with_target(target: LaunchTarget) -> Self {
        Self { target: Some(target) }
    }

    fn target(&mut self) -> LaunchTarget {
        self.target.get_or_insert_with(detect_target).clone()
    }
}

fn has_graphical_session() -> bool {
    env::var_os("DISPLAY").is_some() || env::var_os("WAYLAND_DISPLAY").is_some()
}

fn detect_target() -> LaunchTarget {
    if cfg!(windows) {
        return LaunchTarget::WindowsConsole;
    }

    if let Some(terminal) = env::var_os("TERMINAL").filter(|value| !value.is_empty())
        && let Ok(path) = which::which(&terminal)
    {
        log_debug!("Using terminal from $TERMINAL: {:?}", path);
        return LaunchTarget::TerminalEmulator(path);
    }

    if has_graphical_session() {
        for candidate in TERMINAL_CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                log_debug!("Using terminal emulator: {:?}", path);
                return LaunchTarget::TerminalEmulator(path);
            }
        }
    }

    log_debug!("No terminal emulator available, ssh will run in the current terminal");
    LaunchTarget::CurrentTerminal
}

fn resolve_ssh() -> io::Result<PathBuf> {
    which::which("ssh").map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("ssh not found in PATH: {err}")))
}

impl Launcher for SshLauncher {
    fn launch(&mut self, address: &str, user: &str) -> io::Result<LaunchMode> {
        let ssh = resolve_ssh()?;
        let destination = ssh_destination(address, user);
        let target = self.target();
        let prepared = build_launch_command(&ssh.to_string_lossy(), &destination, &target);
        log_info!("Launching {:?} {:?}", prepared.program, prepared.args);

        let mut command = Command::new(&prepared.program);
        command.args(&prepared.args);

        match prepared.mode {
            LaunchMode::NewWindow => {
                command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
                let child = command.spawn()?;
                log_debug!("Session window spawned (PID: {})", child.id());
            }
            LaunchMode::Inline => {
                let status = command.status()?;
                if !status.success() {
                    log_warn!("ssh exited with {}", status);
                }
            }
        }
        Ok(prepared.mode)
    }
}

#[cfg(test)]
#[path = "test/launcher.rs"]
mod tests;
