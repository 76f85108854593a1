//! Host registry management
//!
//! Provides:
//! - The [`Registry`] of [`HostEntry`] records in menu display order
//! - Field validation shared by the registry and the interactive prompts
//! - Loading from and saving to the JSON store with corrupt-file recovery
//!
//! The registry is loaded once at startup, owned by the navigation controller,
//! and written back after every mutation and on exit.

mod errors;
mod model;
mod store;
mod validate;

pub use errors::RegistryError;
pub use model::{ColorTag, HostEntry, Registry};
pub use store::{CONFIG_ENV_VAR, LoadOutcome, RecoveryReason, RegistryStore, STORE_FILE_NAME};
pub use validate::{ValidationError, is_cancel_keyword, parse_address, validate_address, validate_host_name, validate_user_name};
