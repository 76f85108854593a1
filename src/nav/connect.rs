//! Connect flow: host list, per-host user menu, quick-connect and user edits.

use super::{NavigationController, Screen};
use crate::launcher::Launcher;
use crate::registry::validate_user_name;
use crate::ui::{ACCENT_STYLE, Answer, Console, Key, MenuItem, RESET, UIError};

const MAIN_TITLE: &str = "SSH Menu";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConnectAction {
    Exit,
    Host(String),
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UserAction {
    Back,
    Connect(String),
    Add,
    Remove,
}

impl<C: Console, L: Launcher> NavigationController<C, L> {
    pub(super) fn connect_menu(&mut self) -> Result<Screen, UIError> {
        let mut entries = vec![(MenuItem::new("Exit"), ConnectAction::Exit)];
        entries.extend(self.registry.iter().map(|host| {
            let item = MenuItem::new(&host.name).with_detail(&host.address).with_color(host.color);
            (item, ConnectAction::Host(host.name.clone()))
        }));
        entries.push((MenuItem::new("Admin"), ConnectAction::Admin));

        let next = match self.choose(MAIN_TITLE, entries)? {
            None => Screen::Connect,
            Some(ConnectAction::Exit) => Screen::Exit,
            Some(ConnectAction::Admin) => Screen::Admin,
            Some(ConnectAction::Host(name)) => match self.registry.host(&name) {
                Some(host) if host.users.len() == 1 => Screen::QuickConnect(name),
                _ => Screen::Users(name),
            },
        };
        Ok(next)
    }

    /// Single-user shortcut: ENTER or RIGHT launches, any other key opens the full user menu.
    pub(super) fn quick_connect(&mut self, host: &str) -> Result<Screen, UIError> {
        let Some(entry) = self.registry.host(host) else {
            return Ok(Screen::Connect);
        };
        let [user] = entry.users.as_slice() else {
            return Ok(Screen::Users(host.to_string()));
        };
        let user = user.clone();
        let address = entry.address.clone();
        let color = entry.color;

        self.console.clear_screen()?;
        writeln!(self.console, "{}=== {} ==={}", color.ansi(), host, RESET)?;
        writeln!(self.console)?;
        writeln!(self.console, "Connect as {}@{}?", user, address)?;
        writeln!(self.console)?;
        writeln!(self.console, "{}Enter/→ connect  |  any other key for more options{}", ACCENT_STYLE, RESET)?;
        self.console.flush()?;

        match self.console.read_key()? {
            Key::Enter | Key::Right => {
                self.launch(host, &user)?;
                Ok(Screen::Connect)
            }
            _ => Ok(Screen::Users(host.to_string())),
        }
    }

    pub(super) fn user_menu(&mut self, host: &str) -> Result<Screen, UIError> {
        let Some(entry) = self.registry.host(host) else {
            self.warn(format!("Host '{}' does not exist", host));
            return Ok(Screen::Connect);
        };

        let mut entries = vec![(MenuItem::new("Back"), UserAction::Back)];
        entries.extend(
            entry
                .users
                .iter()
                .map(|user| (MenuItem::new(format!("Connect as {}", user)).with_color(entry.color), UserAction::Connect(user.clone()))),
        );
        entries.push((MenuItem::new("Add user"), UserAction::Add));
        entries.push((MenuItem::new("Remove user"), UserAction::Remove));

        let title = format!("Users for {} ({})", host, entry.address);
        match self.choose(&title, entries)? {
            None | Some(UserAction::Back) => return Ok(Screen::Connect),
            Some(UserAction::Connect(user)) => self.launch(host, &user)?,
            Some(UserAction::Add) => self.add_user_flow(host)?,
            Some(UserAction::Remove) => self.remove_user_flow(host)?,
        }
        Ok(Screen::Users(host.to_string()))
    }

    fn add_user_flow(&mut self, host: &str) -> Result<(), UIError> {
        let Some(existing) = self.registry.host(host).map(|entry| entry.users.clone()) else {
            return Ok(());
        };

        writeln!(self.console)?;
        let question = format!("New username for {} ('cancel' to abort)", host);
        let answer = self
            .prompt
            .validated_input(&mut self.console, &question, |reply| validate_user_name(reply, &existing).map(|()| reply.to_string()))?;

        let Answer::Value(user) = answer else {
            return Ok(());
        };
        match self.registry.add_user(host, &user) {
            Ok(()) => {
                self.inform(format!("User '{}' added to {}", user, host));
                self.persist();
            }
            Err(err) => self.warn(err.to_string()),
        }
        Ok(())
    }

    fn remove_user_flow(&mut self, host: &str) -> Result<(), UIError> {
        let Some(users) = self.registry.host(host).map(|entry| entry.users.clone()) else {
            return Ok(());
        };
        if users.is_empty() {
            self.warn(format!("{} has no users to remove", host));
            return Ok(());
        }

        let mut entries = vec![(MenuItem::new("Cancel"), None)];
        entries.extend(users.into_iter().map(|user| (MenuItem::new(&user), Some(user))));
        let Some(Some(user)) = self.choose(&format!("Remove user from {}", host), entries)? else {
            return Ok(());
        };

        writeln!(self.console)?;
        let question = format!("Remove user '{}' from {}?", user, host);
        if !self.prompt.typed_confirmation(&mut self.console, &question, false)? {
            self.inform("Removal cancelled");
            return Ok(());
        }

        match self.registry.remove_user(host, &user) {
            Ok(()) => {
                self.inform(format!("User '{}' removed from {}", user, host));
                self.persist();
            }
            Err(err) => self.warn(err.to_string()),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../test/nav/connect.rs"]
mod tests;
