use super::{Answer, Prompt};
use crate::registry::{ValidationError, parse_address};
use crate::test_support::ScriptedConsole;
use crate::ui::Key;
use std::net::Ipv4Addr;

fn console_with_lines(lines: &[&str]) -> ScriptedConsole {
    let mut console = ScriptedConsole::new();
    console.push_lines(lines.iter().copied());
    console
}

#[test]
fn input_trims_the_reply() {
    let mut console = console_with_lines(&["  web-01  "]);
    assert_eq!(Prompt::default().input(&mut console, "Name").expect("input"), "web-01");
    assert!(console.output().contains("Name:"));
}

#[test]
fn validated_input_reprompts_until_valid() {
    let mut console = console_with_lines(&["999.1.1.1", "10.0.0.1"]);
    let answer = Prompt::default()
        .validated_input(&mut console, "IP address", parse_address)
        .expect("prompt");

    assert_eq!(answer, Answer::Value(Ipv4Addr::new(10, 0, 0, 1)));
    assert!(console.output().contains("Invalid IP address '999.1.1.1'"));
}

#[test]
fn validated_input_stops_on_cancel_keyword() {
    let mut console = console_with_lines(&["QUIT", "10.0.0.1"]);
    let answer = Prompt::default()
        .validated_input(&mut console, "IP address", |reply| -> Result<String, ValidationError> { Ok(reply.to_string()) })
        .expect("prompt");

    assert_eq!(answer, Answer::Cancelled);
    assert_eq!(console.remaining_lines(), 1);
}

#[test]
fn yes_no_accepts_short_and_long_forms() {
    let prompt = Prompt::default();
    let mut console = console_with_lines(&["maybe", "YES", "n", "cancel"]);

    assert_eq!(prompt.yes_no(&mut console, "Create host?").expect("yes"), Answer::Value(true));
    assert!(console.output().contains("Please answer 'y' or 'n'"));
    assert_eq!(prompt.yes_no(&mut console, "Create host?").expect("no"), Answer::Value(false));
    assert_eq!(prompt.yes_no(&mut console, "Create host?").expect("cancel"), Answer::Cancelled);
}

#[test]
fn typed_confirmation_requires_yes() {
    let prompt = Prompt::default();
    let mut console = console_with_lines(&["YES", "YES", "y", " yes "]);

    assert!(prompt.typed_confirmation(&mut console, "Delete?", true).expect("ignore case"));
    assert!(!prompt.typed_confirmation(&mut console, "Remove?", false).expect("exact"));
    assert!(!prompt.typed_confirmation(&mut console, "Remove?", false).expect("short form"));
    assert!(prompt.typed_confirmation(&mut console, "Remove?", false).expect("trimmed"));
}

#[test]
fn pause_waits_for_one_key() {
    let mut console = ScriptedConsole::with_keys([Key::Char('z'), Key::Enter]);
    let key = Prompt::default().pause(&mut console, "Opening SSH...").expect("pause");

    assert_eq!(key, Key::Char('z'));
    assert_eq!(console.remaining_keys(), 1);
    assert!(console.output().contains("Press any key"));
}
