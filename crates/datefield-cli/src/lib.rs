mod args;
mod commands;
pub mod config;
pub mod error;
mod handlers;
pub mod logging;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
