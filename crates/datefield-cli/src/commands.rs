use super::args::{Cli, Commands, ConfigCommand};
use super::handlers::{self, HandlerContext};
use crate::config::{Config, resolve_config_path};
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?.with_overrides(cli.pattern, cli.locale);
    tracing::debug!(path = %config_path.display(), ?config, "loaded configuration");

    let ctx = HandlerContext::new(cli.format);

    match cli.command {
        Commands::Format { value } => handlers::convert::format(&ctx, &config, &value),
        Commands::Parse { text } => handlers::convert::parse(&ctx, &config, &text),
        Commands::Check => handlers::check::handle(&ctx, &config),
        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx, &config, &config_path),
            ConfigCommand::Init { force } => {
                handlers::config::init(&ctx, &config, &config_path, force)
            }
        },
    }
}
