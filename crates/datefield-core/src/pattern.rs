//! Compiles date-time patterns (`yyyy-MM-dd HH:mm`) into tokens.
//!
//! Pattern letters follow the CLDR convention used by most form frameworks:
//! a run of the same ASCII letter selects a field, the run length selects its
//! width or text style. Text inside single quotes is literal and `''` is an
//! escaped quote. Other non-letter characters are literal.

use crate::error::{FormatError, FormatErrorKind};
use std::fmt;
use std::str::FromStr;

/// Letters with a defined meaning that cannot be expressed for a local date-time
const UNSUPPORTED_LETTERS: &str = "GzZXxOVvQqwWYecFkKnNAgB";

/// Numeric date-time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    /// Two-digit year, parsed into 2000..=2099
    TwoDigitYear,
    Month,
    Day,
    DayOfYear,
    /// Hour of day, 0-23
    Hour,
    /// Clock hour of am/pm, 1-12
    Hour12,
    Minute,
    Second,
}

impl Field {
    pub fn is_time(self) -> bool {
        matches!(
            self,
            Field::Hour | Field::Hour12 | Field::Minute | Field::Second
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Short,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    /// Numeric field; `width` is the letter count from the pattern
    Number { field: Field, width: usize },
    /// Fraction of second with a fixed number of digits
    Fraction(usize),
    MonthName(TextStyle),
    WeekdayName(TextStyle),
    AmPm,
}

impl Token {
    /// Minimum and maximum digits accepted when parsing a numeric token
    pub fn digit_range(&self) -> Option<(usize, usize)> {
        match *self {
            Token::Number { field, width } => Some(match field {
                Field::Year if width >= 4 => (width, width.max(9)),
                Field::Year => (1, 9),
                Field::TwoDigitYear => (2, 2),
                Field::DayOfYear => (width, 3),
                _ if width >= 2 => (2, 2),
                _ => (1, 2),
            }),
            Token::Fraction(digits) => Some((digits, digits)),
            _ => None,
        }
    }

    /// True for numeric tokens that always consume the same number of digits
    pub fn is_fixed_width(&self) -> bool {
        self.digit_range().is_some_and(|(min, max)| min == max)
    }
}

/// A compiled date-time pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, FormatError> {
        let chars: Vec<char> = source.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                let start = i;
                i += 1;
                let mut text = String::new();
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(FormatError::new(
                                source,
                                start,
                                FormatErrorKind::UnterminatedQuote,
                            ));
                        }
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            text.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&other) => {
                            text.push(other);
                            i += 1;
                        }
                    }
                }
                // A lone '' outside quotes is an escaped apostrophe
                if text.is_empty() && i == start + 2 {
                    text.push('\'');
                }
                push_literal(&mut tokens, &text);
            } else if c.is_ascii_alphabetic() {
                let start = i;
                while chars.get(i) == Some(&c) {
                    i += 1;
                }
                let token = letter_token(c, i - start)
                    .map_err(|kind| FormatError::new(source, start, kind))?;
                tokens.push(token);
            } else if matches!(c, '#' | '{' | '}') {
                return Err(FormatError::new(source, i, FormatErrorKind::Reserved(c)));
            } else if matches!(c, '[' | ']') {
                return Err(FormatError::new(
                    source,
                    i,
                    FormatErrorKind::OptionalSection(c),
                ));
            } else {
                let mut buf = [0u8; 4];
                push_literal(&mut tokens, c.encode_utf8(&mut buf));
                i += 1;
            }
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True if any token carries time-of-day information
    pub fn has_time_fields(&self) -> bool {
        self.tokens.iter().any(|token| match token {
            Token::Number { field, .. } => field.is_time(),
            Token::Fraction(_) | Token::AmPm => true,
            _ => false,
        })
    }

    pub fn has_field(&self, wanted: Field) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Number { field, .. } if *field == wanted))
    }
}

impl FromStr for Pattern {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Literal(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn letter_token(letter: char, count: usize) -> Result<Token, FormatErrorKind> {
    let number = |field: Field| -> Result<Token, FormatErrorKind> {
        Ok(Token::Number {
            field,
            width: count,
        })
    };

    match (letter, count) {
        ('y' | 'u', 2) => number(Field::TwoDigitYear),
        ('y' | 'u', _) => number(Field::Year),
        ('M' | 'L', 1 | 2) => number(Field::Month),
        ('M' | 'L', 3) => Ok(Token::MonthName(TextStyle::Short)),
        ('M' | 'L', 4) => Ok(Token::MonthName(TextStyle::Full)),
        ('d', 1 | 2) => number(Field::Day),
        ('D', 1 | 3) => number(Field::DayOfYear),
        ('E', 1..=3) => Ok(Token::WeekdayName(TextStyle::Short)),
        ('E', 4) => Ok(Token::WeekdayName(TextStyle::Full)),
        ('a', 1) => Ok(Token::AmPm),
        ('H', 1 | 2) => number(Field::Hour),
        ('h', 1 | 2) => number(Field::Hour12),
        ('m', 1 | 2) => number(Field::Minute),
        ('s', 1 | 2) => number(Field::Second),
        ('S', 1..=9) => Ok(Token::Fraction(count)),
        ('M' | 'L' | 'd' | 'D' | 'E' | 'a' | 'H' | 'h' | 'm' | 's' | 'S', _) => {
            Err(FormatErrorKind::InvalidCount { letter, count })
        }
        _ if UNSUPPORTED_LETTERS.contains(letter) => {
            Err(FormatErrorKind::UnsupportedLetter(letter))
        }
        _ => Err(FormatErrorKind::UnknownLetter(letter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::Literal(s.to_string())
    }

    fn num(field: Field, width: usize) -> Token {
        Token::Number { field, width }
    }

    #[test]
    fn test_compile_default_pattern() {
        let pattern = Pattern::compile("yyyy-MM-dd HH:mm").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                num(Field::Year, 4),
                lit("-"),
                num(Field::Month, 2),
                lit("-"),
                num(Field::Day, 2),
                lit(" "),
                num(Field::Hour, 2),
                lit(":"),
                num(Field::Minute, 2),
            ]
        );
        assert!(pattern.has_time_fields());
        assert_eq!(pattern.to_string(), "yyyy-MM-dd HH:mm");
    }

    #[test]
    fn test_compile_names_and_fraction() {
        let pattern = Pattern::compile("EEEE, d MMMM yyyy h:mm:ss.SSS a").unwrap();
        assert_eq!(pattern.tokens()[0], Token::WeekdayName(TextStyle::Full));
        assert_eq!(pattern.tokens()[4], Token::MonthName(TextStyle::Full));
        assert!(pattern.tokens().contains(&Token::Fraction(3)));
        assert_eq!(pattern.tokens().last(), Some(&Token::AmPm));
    }

    #[test]
    fn test_quoted_literals() {
        let pattern = Pattern::compile("yyyy'T'HH 'o''clock'").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                num(Field::Year, 4),
                lit("T"),
                num(Field::Hour, 2),
                lit(" o'clock"),
            ]
        );
    }

    #[test]
    fn test_escaped_apostrophe_outside_quotes() {
        let pattern = Pattern::compile("HH''mm").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[num(Field::Hour, 2), lit("'"), num(Field::Minute, 2)]
        );
    }

    #[test]
    fn test_adjacent_literals_merge() {
        let pattern = Pattern::compile("d. 'de' MMM").unwrap();
        assert_eq!(pattern.tokens()[1], lit(". de "));
    }

    #[test]
    fn test_date_only_pattern() {
        let pattern = Pattern::compile("dd.MM.yyyy").unwrap();
        assert!(!pattern.has_time_fields());
        assert!(pattern.has_field(Field::Year));
        assert!(!pattern.has_field(Field::Hour));
    }

    #[test]
    fn test_empty_pattern_is_valid() {
        assert!(Pattern::compile("").unwrap().tokens().is_empty());
    }

    #[test]
    fn test_rejects_unknown_letter() {
        let err = Pattern::compile("yyyy-qq").unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnsupportedLetter('q'));
        assert_eq!(err.offset(), 5);

        let err = Pattern::compile("yyyy-jj").unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnknownLetter('j'));
    }

    #[test]
    fn test_rejects_zone_letters() {
        let err = Pattern::compile("HH:mm z").unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnsupportedLetter('z'));
    }

    #[test]
    fn test_rejects_bad_counts() {
        let err = Pattern::compile("MMMMM").unwrap_err();
        assert_eq!(
            err.kind(),
            &FormatErrorKind::InvalidCount {
                letter: 'M',
                count: 5
            }
        );
        assert!(Pattern::compile("ddd").is_err());
        assert!(Pattern::compile("SSSSSSSSSS").is_err());
        assert!(Pattern::compile("aa").is_err());

        assert_eq!(
            Pattern::compile("yyyyyy").unwrap().tokens(),
            &[num(Field::Year, 6)]
        );
    }

    #[test]
    fn test_rejects_reserved_and_sections() {
        assert_eq!(
            Pattern::compile("yyyy#").unwrap_err().kind(),
            &FormatErrorKind::Reserved('#')
        );
        assert_eq!(
            Pattern::compile("HH[:mm]").unwrap_err().kind(),
            &FormatErrorKind::OptionalSection('[')
        );
    }

    #[test]
    fn test_rejects_unterminated_quote() {
        let err = Pattern::compile("yyyy 'at HH").unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnterminatedQuote);
        assert_eq!(err.offset(), 5);
    }

    #[test]
    fn test_digit_ranges() {
        assert_eq!(num(Field::Year, 4).digit_range(), Some((4, 9)));
        assert_eq!(num(Field::Year, 1).digit_range(), Some((1, 9)));
        assert_eq!(num(Field::Year, 6).digit_range(), Some((6, 9)));
        assert_eq!(num(Field::Month, 1).digit_range(), Some((1, 2)));
        assert_eq!(num(Field::DayOfYear, 3).digit_range(), Some((3, 3)));
        assert!(Token::Fraction(6).is_fixed_width());
        assert!(!num(Field::Day, 1).is_fixed_width());
        assert_eq!(Token::AmPm.digit_range(), None);
    }
}
