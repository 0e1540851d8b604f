//! Sandbox filesystem conventions.
//!
//! Zellij mounts the host filesystem for plugins under `/host`; everything the
//! plugin persists lives below that mount.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde, resolve_data_dir};
