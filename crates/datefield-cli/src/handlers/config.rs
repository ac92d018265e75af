use crate::config::Config;
use crate::handlers::HandlerContext;
use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub path: String,
    pub exists: bool,
    pub pattern: String,
    /// Configured locale, or the resolved process default
    pub locale: String,
    pub locale_is_default: bool,
}

impl ConfigView {
    fn new(config: &Config, path: &Path) -> Self {
        let locale = config.locale.unwrap_or_default();
        Self {
            path: path.display().to_string(),
            exists: path.exists(),
            pattern: config.pattern.clone(),
            locale: locale.to_string(),
            locale_is_default: config.locale.is_none(),
        }
    }
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing = if self.exists { "" } else { " (not created)" };
        let default = if self.locale_is_default {
            " (system default)"
        } else {
            ""
        };
        writeln!(f, "Config:  {}{}", self.path, missing)?;
        writeln!(f, "Pattern: {}", self.pattern)?;
        write!(f, "Locale:  {}{}", self.locale, default)
    }
}

pub fn show(ctx: &HandlerContext, config: &Config, path: &Path) -> Result<()> {
    ctx.render(&ConfigView::new(config, path))
}

pub fn init(ctx: &HandlerContext, config: &Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    config.validate()?;
    config.save_to(path)?;
    tracing::info!(path = %path.display(), "wrote config file");

    ctx.render(&ConfigView::new(config, path))
}
