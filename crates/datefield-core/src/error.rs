use std::fmt;

/// Result type for datefield-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting date-time values
#[derive(Debug)]
pub enum Error {
    /// The pattern cannot be compiled or applied
    Format(FormatError),

    /// The text does not conform to the pattern
    Parse(ParseError),

    /// The locale tag does not name a known locale
    UnknownLocale(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(err) => write!(f, "Format error: {}", err),
            Error::Parse(err) => write!(f, "Parse error: {}", err),
            Error::UnknownLocale(tag) => write!(f, "Unknown locale: {}", tag),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::UnknownLocale(_) => None,
        }
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

/// A pattern that cannot be compiled or rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pattern: String,
    offset: usize,
    kind: FormatErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// ASCII letter with no meaning as a pattern field
    UnknownLetter(char),

    /// Pattern field this converter cannot express (eras, zones, week fields, ...)
    UnsupportedLetter(char),

    /// Known pattern field repeated an invalid number of times
    InvalidCount { letter: char, count: usize },

    /// Character reserved for future pattern syntax
    Reserved(char),

    /// Optional section markers `[` and `]`
    OptionalSection(char),

    /// Quoted literal without a closing quote
    UnterminatedQuote,

    /// A field could not be rendered for the value
    Render,
}

impl FormatError {
    pub fn new(pattern: &str, offset: usize, kind: FormatErrorKind) -> Self {
        Self {
            pattern: pattern.to_string(),
            offset,
            kind,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Character offset in the pattern for compile errors, token index for render errors
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::UnknownLetter(c) => write!(f, "unknown pattern letter '{}'", c),
            FormatErrorKind::UnsupportedLetter(c) => {
                write!(f, "unsupported pattern letter '{}'", c)
            }
            FormatErrorKind::InvalidCount { letter, count } => write!(
                f,
                "pattern letter '{}' cannot be repeated {} times",
                letter, count
            ),
            FormatErrorKind::Reserved(c) => write!(f, "reserved character '{}'", c),
            FormatErrorKind::OptionalSection(c) => {
                write!(f, "optional sections are not supported ('{}')", c)
            }
            FormatErrorKind::UnterminatedQuote => write!(f, "unterminated quoted literal"),
            FormatErrorKind::Render => write!(f, "field could not be rendered"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pattern \"{}\" at offset {}: {}",
            self.pattern, self.offset, self.kind
        )
    }
}

impl std::error::Error for FormatError {}

/// Text that does not match the pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    position: usize,
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected characters for the pattern at this position
    Invalid,

    /// Input ended before the pattern was complete
    TooShort,

    /// Input continues after the pattern was complete
    TooLong,

    /// A field value is outside its permitted range
    OutOfRange,

    /// Fields contradict each other (e.g. weekday vs. date)
    Impossible,

    /// Fields are not enough to determine a date and time
    NotEnough,
}

impl ParseErrorKind {
    pub(crate) fn from_chrono(kind: chrono::format::ParseErrorKind) -> Self {
        use chrono::format::ParseErrorKind as Chrono;

        match kind {
            Chrono::OutOfRange => ParseErrorKind::OutOfRange,
            Chrono::Impossible => ParseErrorKind::Impossible,
            Chrono::NotEnough => ParseErrorKind::NotEnough,
            Chrono::TooShort => ParseErrorKind::TooShort,
            Chrono::TooLong => ParseErrorKind::TooLong,
            _ => ParseErrorKind::Invalid,
        }
    }
}

impl ParseError {
    pub fn new(input: &str, position: usize, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            position,
            kind,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset in the input where parsing failed
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::Invalid => "unexpected text",
            ParseErrorKind::TooShort => "input ended too early",
            ParseErrorKind::TooLong => "unexpected trailing text",
            ParseErrorKind::OutOfRange => "field value out of range",
            ParseErrorKind::Impossible => "fields are inconsistent",
            ParseErrorKind::NotEnough => "not enough fields for a date and time",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot parse \"{}\" at position {}: {}",
            self.input, self.position, self.kind
        )
    }
}

impl std::error::Error for ParseError {}
