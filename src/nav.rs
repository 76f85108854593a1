//! Menu state machine.
//!
//! [`NavigationController`] owns the registry for the whole session and moves
//! between [`Screen`]s: the connect flow (hosts, users, quick-connect) and the
//! admin flow (edit, add and delete hosts). Every mutation is saved as soon as
//! it is made.

mod admin;
mod connect;
mod controller;

pub use controller::{NavigationController, Screen};
