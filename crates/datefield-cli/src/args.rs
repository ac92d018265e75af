use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use datefield_core::Locale;

#[derive(Parser)]
#[command(name = "datefield")]
#[command(about = "Format and parse local date-times with locale-aware patterns", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $DATEFIELD_CONFIG or the XDG config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Date-time pattern, e.g. "dd.MM.yyyy HH:mm" (overrides the config file)
    #[arg(long, global = true)]
    pub pattern: Option<String>,

    /// Locale tag, e.g. "de-DE" (overrides the config file)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an ISO-8601 local date-time (2024-01-05T10:30:00 or 2024-01-05) with the pattern
    Format { value: String },

    /// Read text written in the pattern and print it as an ISO-8601 local date-time
    Parse { text: String },

    /// Validate the pattern and show a sample rendering
    Check,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
