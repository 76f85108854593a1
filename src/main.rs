use sshmenu::args::{self, MainArgs};
use sshmenu::launcher::{LaunchTarget, SshLauncher};
use sshmenu::nav::NavigationController;
use sshmenu::registry::RegistryStore;
use sshmenu::ui::{TerminalConsole, UIError};
use sshmenu::{Result, log, log_debug, log_error, log_info};

use std::process::ExitCode;

/// Conventional status for a process ended by SIGINT.
const INTERRUPTED_EXIT: u8 = 130;

fn main() -> ExitCode {
    let args = args::main_args();

    if args.debug {
        log::LOGGER.enable_debug();
        match log::LOGGER.log_path() {
            Ok(path) => eprintln!("Debug log: {}", path.display()),
            Err(err) => eprintln!("❌ Failed to resolve debug log path: {}", err),
        }
        log_debug!("Debug mode enabled");
    }

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            log_error!("{}", err);
            eprintln!("\n❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: MainArgs) -> Result<ExitCode> {
    let store = RegistryStore::locate(args.config);
    log_info!("Using store {:?}", store.path());
    let outcome = store.load();
    if outcome.persistence_blocked() {
        log_error!("Store {:?} is unreadable, saves will likely fail", store.path());
    }
    let notice = outcome.notice();

    let launcher = if args.inline { SshLauncher::with_target(LaunchTarget::CurrentTerminal) } else { SshLauncher::new() };
    let mut controller = NavigationController::new(outcome.into_registry(), store, TerminalConsole::new(), launcher).with_notice(notice);

    match controller.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(UIError::Interrupted) => {
            log_info!("Interrupted, saving before exit");
            if !controller.persist() {
                eprintln!("\n⚠ Could not save configuration to {}", controller.store().path().display());
            }
            println!();
            Ok(ExitCode::from(INTERRUPTED_EXIT))
        }
        Err(err) => {
            controller.persist();
            Err(err.into())
        }
    }
}
