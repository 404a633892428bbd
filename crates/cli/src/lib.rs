//! `stockbook` command-line surface over the inventory store.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::Config;
