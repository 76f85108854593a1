use super::parse_color_choice;
use crate::nav::Screen;
use crate::registry::{ColorTag, Registry, ValidationError};
use crate::test_support::{ScriptedConsole, navigation};
use crate::ui::Key;

const DEBIAN: &str = "Debian VM";
const ROCKY: &str = "Rocky VM";

fn console(keys: impl IntoIterator<Item = Key>, lines: &[&str]) -> ScriptedConsole {
    let mut console = ScriptedConsole::with_keys(keys);
    console.push_lines(lines.iter().copied());
    console
}

fn lines_only(lines: &[&str]) -> ScriptedConsole {
    let mut console = ScriptedConsole::new();
    console.push_lines(lines.iter().copied());
    console
}

#[test]
fn admin_menu_routes_each_option() {
    let keys = [Key::Digit(2), Key::Digit(3), Key::Digit(4), Key::Enter, Key::Esc];
    let mut controller = navigation(Registry::defaults(), console(keys, &[]));

    assert_eq!(controller.step(Screen::Admin).expect("edit"), Screen::EditHost(ROCKY.to_string()));
    assert_eq!(controller.step(Screen::Admin).expect("add"), Screen::AddHost);
    assert_eq!(controller.step(Screen::Admin).expect("delete"), Screen::DeleteHost);
    assert_eq!(controller.step(Screen::Admin).expect("back"), Screen::Connect);
    assert_eq!(controller.step(Screen::Admin).expect("cancel"), Screen::Connect);
}

#[test]
fn wizard_rejects_bad_input_then_creates_host() {
    let lines = ["Debian VM", "x", "web-01", "", "999.1.1.1", "10.0.0.9", "teal", "purple", "y"];
    let mut controller = navigation(Registry::defaults(), lines_only(&lines));
    assert!(controller.registry().host("web-01").is_none());

    assert_eq!(controller.step(Screen::AddHost).expect("step"), Screen::Admin);

    let host = controller.registry().host("web-01").expect("created host");
    assert_eq!(host.address, "10.0.0.9");
    assert_eq!(host.color, ColorTag::Purple);
    assert!(host.users.is_empty());
    assert_eq!(controller.registry().len(), 3);

    let output = controller.console().output();
    assert!(output.contains("Host 'Debian VM' already exists"));
    assert!(output.contains("Host name must be at least 2 characters long"));
    assert!(output.contains("IP address cannot be empty"));
    assert!(output.contains("Invalid IP address '999.1.1.1'"));
    assert!(output.contains("Unknown color 'teal'"));

    let saved = controller.store().load().into_registry();
    assert_eq!(saved.host("web-01"), controller.registry().host("web-01"));
}

#[test]
fn wizard_cancel_keyword_aborts_without_changes() {
    let mut controller = navigation(Registry::defaults(), lines_only(&["web-01", "quit", "10.0.0.9"]));

    assert_eq!(controller.step(Screen::AddHost).expect("step"), Screen::Admin);

    assert_eq!(controller.registry(), &Registry::defaults());
    assert_eq!(controller.console().remaining_lines(), 1);
    assert!(!controller.store().path().exists());
}

#[test]
fn wizard_declined_confirmation_aborts() {
    let mut controller = navigation(Registry::defaults(), lines_only(&["web-01", "10.0.0.9", "", "no"]));

    controller.step(Screen::AddHost).expect("step");

    assert!(controller.registry().host("web-01").is_none());
}

#[test]
fn wizard_color_defaults_to_cyan_and_accepts_numbers() {
    let lines = ["web-01", "10.0.0.9", "", "y", "web-02", "10.0.0.10", "2", "yes"];
    let mut controller = navigation(Registry::new(), lines_only(&lines));

    controller.step(Screen::AddHost).expect("first");
    controller.step(Screen::AddHost).expect("second");

    assert_eq!(controller.registry().host("web-01").expect("web-01").color, ColorTag::Cyan);
    assert_eq!(controller.registry().host("web-02").expect("web-02").color, ColorTag::Green);
}

#[test]
fn color_choice_parsing() {
    assert_eq!(parse_color_choice(""), Ok(ColorTag::Cyan));
    assert_eq!(parse_color_choice("1"), Ok(ColorTag::Red));
    assert_eq!(parse_color_choice("9"), Ok(ColorTag::Purple));
    assert_eq!(parse_color_choice(" Orange "), Ok(ColorTag::Orange));
    assert_eq!(parse_color_choice("0"), Err(ValidationError::UnknownColor("0".to_string())));
    assert_eq!(parse_color_choice("10"), Err(ValidationError::UnknownColor("10".to_string())));
}

#[test]
fn edit_rejects_out_of_range_octet() {
    let mut controller = navigation(Registry::defaults(), console([Key::Enter], &["999.1.1.1", ""]));

    assert_eq!(controller.step(Screen::EditHost(DEBIAN.to_string())).expect("step"), Screen::Admin);

    let host = controller.registry().host(DEBIAN).expect("host");
    assert_eq!(host.address, "192.168.100.55");
    assert_eq!(host.color, ColorTag::Red);
    assert!(controller.console().output().contains("Invalid IP address '999.1.1.1'"));
}

#[test]
fn edit_changes_address_and_color() {
    // Keep current, RED, GREEN, CYAN, YELLOW, BLUE, ...
    let mut controller = navigation(Registry::defaults(), console([Key::Digit(5)], &["10.1.1.1"]));

    controller.step(Screen::EditHost(DEBIAN.to_string())).expect("step");

    let host = controller.registry().host(DEBIAN).expect("host");
    assert_eq!(host.address, "10.1.1.1");
    assert_eq!(host.color, ColorTag::Blue);

    let saved = controller.store().load().into_registry();
    assert_eq!(saved.host(DEBIAN), Some(host));
}

#[test]
fn edit_cancel_keyword_skips_color_menu() {
    let mut controller = navigation(Registry::defaults(), lines_only(&["exit"]));

    assert_eq!(controller.step(Screen::EditHost(DEBIAN.to_string())).expect("step"), Screen::Admin);
    assert_eq!(controller.registry(), &Registry::defaults());
}

#[test]
fn delete_requires_yes_in_any_case() {
    let keys = [Key::Digit(2), Key::Digit(2)];
    let mut controller = navigation(Registry::defaults(), console(keys, &["nope", "YeS"]));

    controller.step(Screen::DeleteHost).expect("declined");
    assert!(controller.registry().contains(ROCKY));

    controller.step(Screen::DeleteHost).expect("confirmed");
    assert!(!controller.registry().contains(ROCKY));
    assert!(!controller.store().load().into_registry().contains(ROCKY));
}

#[test]
fn delete_cancel_returns_to_admin() {
    let mut controller = navigation(Registry::defaults(), console([Key::Enter, Key::Esc], &[]));

    assert_eq!(controller.step(Screen::DeleteHost).expect("cancel item"), Screen::Admin);
    assert_eq!(controller.step(Screen::DeleteHost).expect("escape"), Screen::Admin);
    assert_eq!(controller.registry().len(), 2);
}
