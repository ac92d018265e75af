//! Locale-aware conversion between local date-times and form field text.
//!
//! A [`LocalDateTimeConverter`] is built from a pattern such as
//! `"yyyy-MM-dd HH:mm"` and converts in both directions for any [`Locale`]:
//!
//! ```
//! use chrono::NaiveDate;
//! use datefield_core::{Converter, Locale, LocalDateTimeConverter};
//!
//! let converter = LocalDateTimeConverter::new("EEE d MMM yyyy, HH:mm");
//! let locale: Locale = "en-US".parse()?;
//! let value = NaiveDate::from_ymd_opt(2024, 1, 5)
//!     .and_then(|date| date.and_hms_opt(10, 30, 0))
//!     .expect("valid date");
//!
//! let text = converter.to_presentation(Some(value), Some(&locale))?;
//! assert_eq!(text.as_deref(), Some("Fri 5 Jan 2024, 10:30"));
//!
//! // Surrounding whitespace from the field is ignored
//! let back = converter.to_model(Some("  Fri 5 Jan 2024, 10:30 ".to_string()), Some(&locale))?;
//! assert_eq!(back, Some(value));
//! # Ok::<(), datefield_core::Error>(())
//! ```
//!
//! Passing `None` as the locale uses [`Locale::system_default`].
//!
//! The crate logs through `tracing` and never installs a subscriber; without
//! one the events cost nothing.

pub mod converter;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod pattern;

pub use converter::{Converter, LocalDateTimeConverter};
pub use error::{Error, FormatError, FormatErrorKind, ParseError, ParseErrorKind, Result};
pub use formatter::DateTimeFormatter;
pub use locale::Locale;
pub use pattern::Pattern;
