use crate::config::Config;
use crate::handlers::HandlerContext;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use datefield_core::{Converter, LocalDateTimeConverter};
use serde::Serialize;
use std::fmt;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Serialize)]
pub struct ConversionView {
    pub pattern: String,
    pub locale: String,
    /// ISO-8601 model value
    pub value: String,
    /// Presentation text
    pub text: String,
    #[serde(skip)]
    direction: Direction,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    ToText,
    ToValue,
}

impl fmt::Display for ConversionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::ToText => write!(f, "{}", self.text),
            Direction::ToValue => write!(f, "{}", self.value),
        }
    }
}

pub fn format(ctx: &HandlerContext, config: &Config, value: &str) -> Result<()> {
    let value = parse_iso(value)?;
    let converter = LocalDateTimeConverter::new(config.pattern.as_str());
    let locale = converter.formatter(config.locale.as_ref())?.locale();

    let text = converter
        .to_presentation(Some(value), Some(&locale))?
        .unwrap_or_default();

    ctx.render(&ConversionView {
        pattern: config.pattern.clone(),
        locale: locale.to_string(),
        value: iso(&value),
        text,
        direction: Direction::ToText,
    })
}

pub fn parse(ctx: &HandlerContext, config: &Config, text: &str) -> Result<()> {
    let converter = LocalDateTimeConverter::new(config.pattern.as_str());
    let locale = converter.formatter(config.locale.as_ref())?.locale();

    let Some(value) = converter.to_model(Some(text.to_string()), Some(&locale))? else {
        anyhow::bail!("no value parsed from {:?}", text);
    };

    ctx.render(&ConversionView {
        pattern: config.pattern.clone(),
        locale: locale.to_string(),
        value: iso(&value),
        text: text.trim().to_string(),
        direction: Direction::ToValue,
    })
}

pub(crate) fn iso(value: &NaiveDateTime) -> String {
    value.format(ISO_FORMAT).to_string()
}

/// Accept a full ISO-8601 local date-time or a bare date (midnight)
fn parse_iso(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if let Ok(value) = input.parse::<NaiveDateTime>() {
        return Ok(value);
    }
    input
        .parse::<NaiveDate>()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .with_context(|| {
            format!(
                "invalid ISO-8601 date-time {:?} (expected e.g. 2024-01-05T10:30:00)",
                input
            )
        })
}
