use crate::config::Config;
use crate::handlers::HandlerContext;
use crate::handlers::convert::iso;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use datefield_core::LocalDateTimeConverter;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct CheckView {
    pub pattern: String,
    pub locale: String,
    pub sample: String,
    /// ISO-8601 value read back from `sample`
    pub parsed: Option<String>,
    /// Why `sample` could not be read back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl fmt::Display for CheckView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern: {}", self.pattern)?;
        writeln!(f, "Locale:  {}", self.locale)?;
        writeln!(f, "Sample:  {}", self.sample)?;
        match (&self.parsed, &self.parse_error) {
            (Some(parsed), _) => write!(f, "Parsed:  {}", parsed),
            (None, Some(err)) => write!(f, "Warning: sample does not parse back: {}", err),
            (None, None) => write!(f, "Warning: sample does not parse back"),
        }
    }
}

/// 2024-01-05T10:30:15.123, chosen so every field has a distinct value
fn reference_instant() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 5)?.and_hms_milli_opt(10, 30, 15, 123)
}

pub fn handle(ctx: &HandlerContext, config: &Config) -> Result<()> {
    let converter = LocalDateTimeConverter::try_new(config.pattern.as_str())?;
    let formatter = converter.formatter(config.locale.as_ref())?;

    let instant = reference_instant()
        .ok_or_else(|| anyhow::anyhow!("reference instant is not a valid date"))?;
    let sample = formatter.format(&instant)?;

    let (parsed, parse_error) = match converter.parse(&sample, Some(&formatter.locale())) {
        Ok(value) => (Some(iso(&value)), None),
        Err(err) => {
            tracing::warn!(pattern = %config.pattern, error = %err, "sample does not parse back");
            (None, Some(err.to_string()))
        }
    };

    ctx.render(&CheckView {
        pattern: config.pattern.clone(),
        locale: formatter.locale().to_string(),
        sample,
        parsed,
        parse_error,
    })
}
