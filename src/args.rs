use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainArgs {
    pub debug: bool,
    /// Store path given with `--config`.
    pub config: Option<PathBuf>,
    /// Run ssh in the current terminal instead of a new window.
    pub inline: bool,
}

pub fn build_cli_command() -> Command {
    Command::new("ssh-menu")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keyboard-driven launcher for saved SSH hosts and users.")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the host store (default: ~/.ssh-menu/vms.json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("inline")
                .short('i')
                .long("inline")
                .help("Run ssh in this terminal instead of opening a new window")
                .action(ArgAction::SetTrue),
        )
}

fn main_args_from_matches(matches: &ArgMatches) -> MainArgs {
    MainArgs {
        debug: matches.get_flag("debug"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        inline: matches.get_flag("inline"),
    }
}

/// Parse `args` (including the program name) against `cmd`.
pub fn parse_main_args_from<I, T>(cmd: &Command, args: I) -> Result<MainArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cmd.clone().try_get_matches_from(args)?;
    Ok(main_args_from_matches(&matches))
}

/// Parses the process arguments, exiting with usage on error or `--help`.
pub fn main_args() -> MainArgs {
    let matches = build_cli_command().get_matches();
    main_args_from_matches(&matches)
}

#[cfg(test)]
#[path = "test/args.rs"]
mod tests;
