//! Library components for the `pkhelper` CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod severity;
pub mod types;
