use crate::launcher::{LaunchMode, Launcher};
use crate::registry::{Registry, RegistryStore};
use crate::ui::{ACCENT_STYLE, Console, ERROR_STYLE, Menu, MenuItem, Prompt, RESET, SUCCESS_STYLE, Selection, UIError};
use crate::{log_debug, log_info, log_warn};

/// One state of the menu state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Connect,
    Users(String),
    /// One-key launch screen for a host with a single user.
    QuickConnect(String),
    Admin,
    EditHost(String),
    AddHost,
    DeleteHost,
    Exit,
}

pub struct NavigationController<C: Console, L: Launcher> {
    pub(super) registry: Registry,
    store: RegistryStore,
    pub(super) console: C,
    launcher: L,
    pub(super) menu: Menu,
    pub(super) prompt: Prompt,
    /// Status lines shown under the title of the next menu drawn.
    notices: Vec<String>,
}

impl<C: Console, L: Launcher> NavigationController<C, L> {
    pub fn new(registry: Registry, store: RegistryStore, console: C, launcher: L) -> Self {
        Self {
            registry,
            store,
            console,
            launcher,
            menu: Menu::default(),
            prompt: Prompt::default(),
            notices: Vec::new(),
        }
    }

    /// Show `notice` as a warning on the first menu drawn, e.g. a load recovery message.
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        if let Some(notice) = notice {
            self.warn(notice);
        }
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Drive the state machine from the connect menu until the operator exits.
    pub fn run(&mut self) -> Result<(), UIError> {
        let mut screen = Screen::Connect;
        while screen != Screen::Exit {
            log_debug!("Entering screen {:?}", screen);
            screen = self.step(screen)?;
        }
        self.exit()
    }

    /// Run a single screen and return the one that follows it.
    pub fn step(&mut self, screen: Screen) -> Result<Screen, UIError> {
        match screen {
            Screen::Connect => self.connect_menu(),
            Screen::Users(host) => self.user_menu(&host),
            Screen::QuickConnect(host) => self.quick_connect(&host),
            Screen::Admin => self.admin_menu(),
            Screen::EditHost(host) => self.edit_host(&host),
            Screen::AddHost => self.add_host_wizard(),
            Screen::DeleteHost => self.delete_host_flow(),
            Screen::Exit => Ok(Screen::Exit),
        }
    }

    /// Write the registry to the store. On failure a warning is queued for the
    /// next menu and the in-memory state is kept.
    pub fn persist(&mut self) -> bool {
        if self.store.save(&self.registry) {
            return true;
        }
        let message = format!("Could not save changes to {}. They are kept for this session only.", self.store.path().display());
        self.warn(message);
        false
    }

    fn exit(&mut self) -> Result<(), UIError> {
        log_info!("Exiting, saving {} host(s)", self.registry.len());
        if !self.store.save(&self.registry) {
            writeln!(self.console, "{}⚠ Could not save configuration to {}{}", ERROR_STYLE, self.store.path().display(), RESET)?;
        }
        writeln!(self.console, "{}Exiting SSH menu. Goodbye!{}", ACCENT_STYLE, RESET)?;
        self.console.flush()?;
        Ok(())
    }

    pub(super) fn warn(&mut self, message: impl AsRef<str>) {
        self.notices.push(format!("{}⚠ {}", ERROR_STYLE, message.as_ref()));
    }

    pub(super) fn inform(&mut self, message: impl AsRef<str>) {
        self.notices.push(format!("{}✓ {}", SUCCESS_STYLE, message.as_ref()));
    }

    /// Show a menu of tagged actions and return the chosen one, or `None` on cancel.
    /// Pending notices are drawn once and then dropped.
    pub(super) fn choose<A>(&mut self, title: &str, entries: Vec<(MenuItem, A)>) -> Result<Option<A>, UIError> {
        let (items, mut actions): (Vec<MenuItem>, Vec<A>) = entries.into_iter().unzip();
        let separator = format!("{}\n", RESET);
        let notice = (!self.notices.is_empty()).then(|| self.notices.join(separator.as_str()));
        self.notices.clear();

        match self.menu.select_with_notice(&mut self.console, title, &items, notice.as_deref())? {
            Selection::Index(index) if index < actions.len() => Ok(Some(actions.swap_remove(index))),
            _ => Ok(None),
        }
    }

    /// Hand `user` on `host` to the launcher and wait for a key before the
    /// menu comes back. Launch failures are shown and never end the session.
    pub(super) fn launch(&mut self, host: &str, user: &str) -> Result<(), UIError> {
        let Some(entry) = self.registry.host(host) else {
            self.warn(format!("Host '{}' does not exist", host));
            return Ok(());
        };
        let address = entry.address.clone();
        let color = entry.color;

        self.console.clear_screen()?;
        writeln!(self.console, "{}Opening SSH to {} ({}) as {}...{}", color.ansi(), host, address, user, RESET)?;

        match self.launcher.launch(&address, user) {
            Ok(LaunchMode::NewWindow) => {
                log_info!("Opened session to {}@{} in a new window", user, address);
                self.prompt.pause(&mut self.console, "Session opened in a new window.")?;
            }
            Ok(LaunchMode::Inline) => {
                log_info!("Session to {}@{} ended", user, address);
                self.prompt.pause(&mut self.console, "SSH session ended.")?;
            }
            Err(err) => {
                log_warn!("Failed to launch ssh to {}@{}: {}", user, address, err);
                self.prompt.error(&mut self.console, &format!("Failed to launch ssh: {}", err))?;
                self.prompt.pause(&mut self.console, "")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../test/nav/controller.rs"]
mod tests;
