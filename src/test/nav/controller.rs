use super::{NavigationController, Screen};
use crate::registry::{LoadOutcome, Registry, RegistryStore};
use crate::test_support::{RecordingLauncher, ScriptedConsole, navigation, temp_dir};
use crate::ui::{Key, UIError};

fn unwritable(registry: Registry, console: ScriptedConsole) -> NavigationController<ScriptedConsole, RecordingLauncher> {
    // A directory cannot be replaced by the renamed temp file.
    let store = RegistryStore::new(temp_dir("blocked"));
    NavigationController::new(registry, store, console, RecordingLauncher::default())
}

#[test]
fn exit_saves_the_registry() {
    let mut controller = navigation(Registry::defaults(), ScriptedConsole::with_keys([Key::Enter]));

    controller.run().expect("run");

    match controller.store().load() {
        LoadOutcome::Loaded { registry, warnings } => {
            assert_eq!(registry, Registry::defaults());
            assert!(warnings.is_empty());
        }
        other => panic!("expected a clean load, got {other:?}"),
    }
    assert!(controller.console().output().contains("Goodbye"));
}

#[test]
fn exit_still_succeeds_when_the_store_is_unwritable() {
    let mut controller = unwritable(Registry::defaults(), ScriptedConsole::with_keys([Key::Enter]));

    controller.run().expect("exit should not fail on a save error");

    assert!(controller.console().output().contains("Could not save configuration"));
}

#[test]
fn startup_notice_is_shown_on_the_first_menu_only() {
    let console = ScriptedConsole::with_keys([Key::Esc, Key::Enter]);
    let mut controller = navigation(Registry::defaults(), console).with_notice(Some("The configuration file is corrupted".to_string()));

    controller.run().expect("run");

    let output = controller.console().output();
    assert_eq!(output.matches("configuration file is corrupted").count(), 1);
    assert_eq!(controller.console().clears, 2);
}

#[test]
fn failed_save_warns_on_the_next_menu() {
    let mut controller = unwritable(Registry::defaults(), ScriptedConsole::with_keys([Key::Esc, Key::Esc]));

    assert!(!controller.persist());
    assert_eq!(controller.step(Screen::Connect).expect("first menu"), Screen::Connect);
    assert_eq!(controller.step(Screen::Connect).expect("second menu"), Screen::Connect);

    assert_eq!(controller.console().output().matches("Could not save changes").count(), 1);
}

#[test]
fn admin_round_trip_returns_to_connect() {
    let console = ScriptedConsole::with_keys([Key::Digit(3), Key::Esc, Key::Enter]);
    let mut controller = navigation(Registry::defaults(), console);

    controller.run().expect("run");

    assert_eq!(controller.console().remaining_keys(), 0);
    assert_eq!(controller.registry(), &Registry::defaults());
}

#[test]
fn exit_screen_is_terminal() {
    let mut controller = navigation(Registry::defaults(), ScriptedConsole::new());
    assert_eq!(controller.step(Screen::Exit).expect("step"), Screen::Exit);
}

#[test]
fn closed_input_ends_the_run_with_an_error() {
    let mut controller = navigation(Registry::defaults(), ScriptedConsole::new());
    assert!(matches!(controller.run(), Err(UIError::InputClosed)));
}

#[test]
fn exit_keeps_a_corrupt_store_that_could_not_be_backed_up() {
    let dir = temp_dir("corrupt-exit");
    let path = dir.join("vms.json");
    std::fs::write(&path, "{not json").expect("write store");
    let store = RegistryStore::new(&path);
    std::fs::create_dir_all(store.backup_path().join("occupied")).expect("block backup path");

    let outcome = store.load();
    let notice = outcome.notice();
    let mut controller = NavigationController::new(outcome.into_registry(), store, ScriptedConsole::with_keys([Key::Enter]), RecordingLauncher::default())
        .with_notice(notice);

    controller.run().expect("run");

    assert_eq!(std::fs::read_to_string(&path).expect("read store"), "{not json");
    assert!(controller.console().output().contains("Could not save configuration"));
}
