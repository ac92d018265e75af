use crate::formatter::DateTimeFormatter;
use crate::locale::Locale;
use crate::pattern::Pattern;
use crate::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Bidirectional conversion between a model value and its presentation.
///
/// This is the contract a form-binding layer consumes: present model values
/// as field contents and read user input back into model values. Absent
/// input on either side converts to absent output and is never an error.
pub trait Converter: Send + Sync {
    type Model;
    type Presentation;

    fn to_presentation(
        &self,
        value: Option<Self::Model>,
        locale: Option<&Locale>,
    ) -> Result<Option<Self::Presentation>>;

    fn to_model(
        &self,
        value: Option<Self::Presentation>,
        locale: Option<&Locale>,
    ) -> Result<Option<Self::Model>>;

    /// Type descriptor of the model side
    fn model_type(&self) -> &'static str {
        std::any::type_name::<Self::Model>()
    }

    /// Type descriptor of the presentation side
    fn presentation_type(&self) -> &'static str {
        std::any::type_name::<Self::Presentation>()
    }
}

/// Converts [`NaiveDateTime`] values to text and back using a fixed pattern.
///
/// The pattern is checked when a formatter is first needed, so an invalid
/// pattern surfaces as [`Error::Format`](crate::Error::Format) from the first
/// conversion. Use [`LocalDateTimeConverter::try_new`] to check it up front.
///
/// Formatters are cached per locale.
#[derive(Debug)]
pub struct LocalDateTimeConverter {
    pattern: String,
    formatters: RwLock<HashMap<Locale, Arc<DateTimeFormatter>>>,
}

impl LocalDateTimeConverter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            formatters: RwLock::new(HashMap::new()),
        }
    }

    pub fn try_new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        Pattern::compile(&pattern)?;
        Ok(Self::new(pattern))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The formatter for `locale`, or for the process default locale when absent
    pub fn formatter(&self, locale: Option<&Locale>) -> Result<Arc<DateTimeFormatter>> {
        let locale = locale.copied().unwrap_or_else(Locale::system_default);

        // The cache is best-effort; a poisoned lock is treated as a miss
        if let Some(formatter) = self
            .formatters
            .read()
            .ok()
            .and_then(|cache| cache.get(&locale).cloned())
        {
            return Ok(formatter);
        }

        let formatter = Arc::new(DateTimeFormatter::new(&self.pattern, locale)?);
        tracing::debug!(pattern = %self.pattern, %locale, "built date-time formatter");

        // A poisoned cache only costs a rebuild on the next call
        if let Ok(mut cache) = self.formatters.write() {
            return Ok(cache.entry(locale).or_insert(formatter).clone());
        }
        Ok(formatter)
    }

    pub fn format(&self, value: &NaiveDateTime, locale: Option<&Locale>) -> Result<String> {
        Ok(self.formatter(locale)?.format(value)?)
    }

    /// Parse `text` after trimming surrounding whitespace
    pub fn parse(&self, text: &str, locale: Option<&Locale>) -> Result<NaiveDateTime> {
        let formatter = self.formatter(locale)?;
        tracing::trace!(input = text, pattern = %self.pattern, "parsing date-time text");
        Ok(formatter.parse(text.trim())?)
    }
}

impl Clone for LocalDateTimeConverter {
    fn clone(&self) -> Self {
        Self::new(self.pattern.clone())
    }
}

impl Converter for LocalDateTimeConverter {
    type Model = NaiveDateTime;
    type Presentation = String;

    fn to_presentation(
        &self,
        value: Option<NaiveDateTime>,
        locale: Option<&Locale>,
    ) -> Result<Option<String>> {
        // Pattern errors surface even for absent values
        let formatter = self.formatter(locale)?;
        value
            .map(|value| formatter.format(&value))
            .transpose()
            .map_err(Into::into)
    }

    fn to_model(
        &self,
        value: Option<String>,
        locale: Option<&Locale>,
    ) -> Result<Option<NaiveDateTime>> {
        value.map(|text| self.parse(&text, locale)).transpose()
    }
}
