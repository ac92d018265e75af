use crate::types::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;

/// Context for handler execution with consistent presentation utilities
pub struct HandlerContext {
    pub format: OutputFormat,
}

impl HandlerContext {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a view as plain text or pretty JSON
    pub fn render<T>(&self, view: &T) -> Result<()>
    where
        T: Serialize + Display,
    {
        match self.format {
            OutputFormat::Plain => println!("{}", view),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
        }
        Ok(())
    }
}
