//! Admin flow: edit, add and delete hosts.

use super::{NavigationController, Screen};
use crate::launcher::Launcher;
use crate::registry::{ColorTag, HostEntry, ValidationError, parse_address, validate_address, validate_host_name};
use crate::ui::{ACCENT_STYLE, Answer, Console, MenuItem, RESET, UIError};
use crate::log_info;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AdminAction {
    Back,
    Edit(String),
    Add,
    Delete,
}

/// Reads the wizard's color reply: a 1-based number from the list, a color
/// name, or blank for the default.
fn parse_color_choice(reply: &str) -> Result<ColorTag, ValidationError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Ok(ColorTag::default());
    }
    let color = match reply.parse::<usize>() {
        Ok(number) => number.checked_sub(1).and_then(|index| ColorTag::ALL.get(index)).copied(),
        Err(_) => ColorTag::parse(reply),
    };
    color.ok_or_else(|| ValidationError::UnknownColor(reply.to_string()))
}

impl<C: Console, L: Launcher> NavigationController<C, L> {
    pub(super) fn admin_menu(&mut self) -> Result<Screen, UIError> {
        let mut entries = vec![(MenuItem::new("Back"), AdminAction::Back)];
        entries.extend(self.registry.iter().map(|host| {
            let item = MenuItem::new(format!("Edit {}", host.name)).with_detail(&host.address).with_color(host.color);
            (item, AdminAction::Edit(host.name.clone()))
        }));
        entries.push((MenuItem::new("Add new host"), AdminAction::Add));
        entries.push((MenuItem::new("Delete host"), AdminAction::Delete));

        let next = match self.choose("Admin", entries)? {
            None | Some(AdminAction::Back) => Screen::Connect,
            Some(AdminAction::Edit(name)) => Screen::EditHost(name),
            Some(AdminAction::Add) => Screen::AddHost,
            Some(AdminAction::Delete) => Screen::DeleteHost,
        };
        Ok(next)
    }

    /// Address prompt (blank keeps the current one) followed by a color menu.
    pub(super) fn edit_host(&mut self, host: &str) -> Result<Screen, UIError> {
        let Some(entry) = self.registry.host(host) else {
            self.warn(format!("Host '{}' does not exist", host));
            return Ok(Screen::Admin);
        };
        let current_address = entry.address.clone();
        let current_color = entry.color;

        self.console.clear_screen()?;
        writeln!(self.console, "{}=== Edit {} ==={}", ACCENT_STYLE, host, RESET)?;
        writeln!(self.console, "Current IP address: {}", current_address)?;
        writeln!(self.console)?;

        let answer = self.prompt.validated_input(&mut self.console, "New IP address (blank to keep, 'cancel' to abort)", |reply| {
            if reply.is_empty() {
                Ok(None)
            } else {
                parse_address(reply).map(|address| Some(address.to_string()))
            }
        })?;
        let new_address = match answer {
            Answer::Cancelled => return Ok(Screen::Admin),
            Answer::Value(address) => address,
        };

        if let Some(address) = new_address.filter(|address| *address != current_address) {
            match self.registry.set_address(host, &address) {
                Ok(()) => {
                    log_info!("Changed address of {} from {} to {}", host, current_address, address);
                    self.inform(format!("IP address of {} changed to {}", host, address));
                    self.persist();
                }
                Err(err) => self.warn(err.to_string()),
            }
        }

        let mut entries = vec![(MenuItem::new(format!("Keep current ({})", current_color)).with_color(current_color), None)];
        entries.extend(ColorTag::ALL.iter().map(|color| (MenuItem::new(color.as_str()).with_color(*color), Some(*color))));

        if let Some(Some(color)) = self.choose(&format!("Color for {}", host), entries)?
            && color != current_color
        {
            match self.registry.set_color(host, color) {
                Ok(()) => {
                    self.inform(format!("Color of {} changed to {}", host, color));
                    self.persist();
                }
                Err(err) => self.warn(err.to_string()),
            }
        }
        Ok(Screen::Admin)
    }

    /// Name, address, color and a final y/n. A cancel keyword at any step or a
    /// "no" leaves the registry untouched.
    pub(super) fn add_host_wizard(&mut self) -> Result<Screen, UIError> {
        self.console.clear_screen()?;
        writeln!(self.console, "{}=== Add new host ==={}", ACCENT_STYLE, RESET)?;
        writeln!(self.console, "Type 'cancel', 'exit' or 'quit' at any step to abort.")?;
        writeln!(self.console)?;

        let registry = &self.registry;
        let Answer::Value(name) = self
            .prompt
            .validated_input(&mut self.console, "Host name", |reply| validate_host_name(reply, registry).map(|()| reply.to_string()))?
        else {
            return Ok(self.wizard_cancelled());
        };

        let Answer::Value(address) = self
            .prompt
            .validated_input(&mut self.console, "IP address", |reply| validate_address(reply).map(|()| reply.to_string()))?
        else {
            return Ok(self.wizard_cancelled());
        };

        writeln!(self.console)?;
        for (index, color) in ColorTag::ALL.iter().enumerate() {
            writeln!(self.console, "  {}{}. {}{}", color.ansi(), index + 1, color, RESET)?;
        }
        let Answer::Value(color) = self
            .prompt
            .validated_input(&mut self.console, "Color (number or name, blank for CYAN)", parse_color_choice)?
        else {
            return Ok(self.wizard_cancelled());
        };

        writeln!(self.console)?;
        writeln!(self.console, "  Name:  {}{}{}", color.ansi(), name, RESET)?;
        writeln!(self.console, "  IP:    {}", address)?;
        writeln!(self.console, "  Color: {}", color)?;
        let Answer::Value(true) = self.prompt.yes_no(&mut self.console, "Create this host?")? else {
            return Ok(self.wizard_cancelled());
        };

        match self.registry.add_host(HostEntry::new(name.as_str(), address, color)) {
            Ok(()) => {
                log_info!("Added host {}", name);
                self.inform(format!("Host '{}' created", name));
                self.persist();
            }
            Err(err) => self.warn(err.to_string()),
        }
        Ok(Screen::Admin)
    }

    fn wizard_cancelled(&mut self) -> Screen {
        self.inform("Host creation cancelled");
        Screen::Admin
    }

    pub(super) fn delete_host_flow(&mut self) -> Result<Screen, UIError> {
        let mut entries = vec![(MenuItem::new("Cancel"), None)];
        entries.extend(self.registry.iter().map(|host| {
            let item = MenuItem::new(&host.name).with_detail(&host.address).with_color(host.color);
            (item, Some(host.name.clone()))
        }));

        let Some(Some(name)) = self.choose("Delete host", entries)? else {
            return Ok(Screen::Admin);
        };

        writeln!(self.console)?;
        let question = format!("Delete host '{}' and all its users?", name);
        if !self.prompt.typed_confirmation(&mut self.console, &question, true)? {
            self.inform("Deletion cancelled");
            return Ok(Screen::Admin);
        }

        if self.registry.remove_host(&name).is_some() {
            log_info!("Deleted host {}", name);
            self.inform(format!("Host '{}' deleted", name));
            self.persist();
        }
        Ok(Screen::Admin)
    }
}

#[cfg(test)]
#[path = "../test/nav/admin.rs"]
mod tests;
