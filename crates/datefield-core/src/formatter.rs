use crate::error::{FormatError, FormatErrorKind, ParseError, ParseErrorKind};
use crate::locale::Locale;
use crate::pattern::{Field, Pattern, TextStyle, Token};
use chrono::format::{DelayedFormat, Fixed, Item, Numeric, Pad, Parsed};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::fmt::Write;

const DEFAULT_AM_PM: [&str; 2] = ["AM", "PM"];

/// Month names, weekday names and day-period markers for one locale
#[derive(Debug, Clone)]
struct LocaleNames {
    short_months: Vec<String>,
    long_months: Vec<String>,
    short_weekdays: Vec<(Weekday, String)>,
    long_weekdays: Vec<(Weekday, String)>,
    am_pm: [String; 2],
}

impl LocaleNames {
    fn new(locale: chrono::Locale) -> Self {
        let months: Vec<NaiveDate> = (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(2001, month, 1))
            .collect();
        // 2001-01-01 is a Monday
        let week: Vec<NaiveDate> = NaiveDate::from_ymd_opt(2001, 1, 1)
            .into_iter()
            .flat_map(|monday| monday.iter_days().take(7))
            .collect();

        let date_names = |dates: &[NaiveDate], fixed: Fixed| -> Vec<String> {
            dates
                .iter()
                .map(|date| render(Some(*date), None, Item::Fixed(fixed.clone()), locale))
                .collect()
        };
        let weekday_names = |fixed: Fixed| -> Vec<(Weekday, String)> {
            week.iter()
                .map(|date| {
                    (
                        date.weekday(),
                        render(Some(*date), None, Item::Fixed(fixed.clone()), locale),
                    )
                })
                .collect()
        };

        let am = render(None, Some(NaiveTime::MIN), Item::Fixed(Fixed::UpperAmPm), locale);
        let pm = NaiveTime::from_hms_opt(12, 0, 0)
            .map(|noon| render(None, Some(noon), Item::Fixed(Fixed::UpperAmPm), locale))
            .unwrap_or_default();
        // Many locales leave the markers empty; they would not survive a round trip
        let am_pm = if am.is_empty() || pm.is_empty() || am == pm {
            DEFAULT_AM_PM.map(String::from)
        } else {
            [am, pm]
        };

        Self {
            short_months: date_names(&months, Fixed::ShortMonthName),
            long_months: date_names(&months, Fixed::LongMonthName),
            short_weekdays: weekday_names(Fixed::ShortWeekdayName),
            long_weekdays: weekday_names(Fixed::LongWeekdayName),
            am_pm,
        }
    }

    fn months(&self, style: TextStyle) -> &[String] {
        match style {
            TextStyle::Short => &self.short_months,
            TextStyle::Full => &self.long_months,
        }
    }

    fn weekdays(&self, style: TextStyle) -> &[(Weekday, String)] {
        match style {
            TextStyle::Short => &self.short_weekdays,
            TextStyle::Full => &self.long_weekdays,
        }
    }
}

fn render(
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    item: Item<'static>,
    locale: chrono::Locale,
) -> String {
    let mut out = String::new();
    match write!(
        out,
        "{}",
        DelayedFormat::new_with_locale(date, time, std::iter::once(item), locale)
    ) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

/// Formats and parses local date-times for one (pattern, locale) pair.
///
/// Immutable once built, so a single instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    pattern: Pattern,
    locale: Locale,
    names: LocaleNames,
}

impl DateTimeFormatter {
    pub fn new(pattern: &str, locale: Locale) -> Result<Self, FormatError> {
        Ok(Self::from_pattern(Pattern::compile(pattern)?, locale))
    }

    pub fn from_pattern(pattern: Pattern, locale: Locale) -> Self {
        Self {
            names: LocaleNames::new(locale.as_chrono()),
            pattern,
            locale,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, value: &NaiveDateTime) -> Result<String, FormatError> {
        let mut out = String::new();

        for (index, token) in self.pattern.tokens().iter().enumerate() {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Fraction(digits) => {
                    let nanos = value.nanosecond() % 1_000_000_000;
                    let scaled = nanos / 10u32.pow(9 - *digits as u32);
                    out.push_str(&format!("{:0width$}", scaled, width = *digits));
                }
                Token::AmPm => {
                    out.push_str(&self.names.am_pm[usize::from(value.hour() >= 12)]);
                }
                Token::Number {
                    field: Field::Year,
                    width,
                } if *width > 4 => out.push_str(&padded_year(value.year(), *width)),
                Token::Number { .. } | Token::MonthName(_) | Token::WeekdayName(_) => {
                    let item = chrono_item(token).ok_or_else(|| self.render_error(index))?;
                    let rendered = DelayedFormat::new_with_locale(
                        Some(value.date()),
                        Some(value.time()),
                        std::iter::once(item),
                        self.locale.as_chrono(),
                    );
                    write!(out, "{}", rendered).map_err(|_| self.render_error(index))?;
                }
            }
        }

        Ok(out)
    }

    /// Parse text that must match the whole pattern. Whitespace is significant here.
    pub fn parse(&self, input: &str) -> Result<NaiveDateTime, ParseError> {
        let fail = |position: usize, kind: ParseErrorKind| ParseError::new(input, position, kind);
        let chrono_fail = |position: usize, err: chrono::ParseError| {
            fail(position, ParseErrorKind::from_chrono(err.kind()))
        };

        let tokens = self.pattern.tokens();
        let mut parsed = Parsed::new();
        let mut pos = 0;

        for (index, token) in tokens.iter().enumerate() {
            let rest = &input[pos..];

            match token {
                Token::Literal(text) => {
                    if rest.starts_with(text.as_str()) {
                        pos += text.len();
                    } else if rest.len() < text.len() && text.starts_with(rest) {
                        return Err(fail(input.len(), ParseErrorKind::TooShort));
                    } else {
                        return Err(fail(pos, ParseErrorKind::Invalid));
                    }
                }
                Token::MonthName(style) => {
                    let months = self.names.months(*style).iter();
                    let (month, len) =
                        match_name(rest, months.enumerate().map(|(i, n)| (i, n.as_str())))
                            .ok_or_else(|| fail(pos, missing_kind(rest)))?;
                    parsed
                        .set_month(month as i64 + 1)
                        .map_err(|e| chrono_fail(pos, e))?;
                    pos += len;
                }
                Token::WeekdayName(style) => {
                    let weekdays = self.names.weekdays(*style);
                    let (weekday, len) =
                        match_name(rest, weekdays.iter().map(|(day, n)| (*day, n.as_str())))
                            .ok_or_else(|| fail(pos, missing_kind(rest)))?;
                    parsed
                        .set_weekday(weekday)
                        .map_err(|e| chrono_fail(pos, e))?;
                    pos += len;
                }
                Token::AmPm => {
                    let markers = self.names.am_pm.iter().enumerate().map(|(i, n)| (i, n.as_str()));
                    let (period, len) =
                        match_name(rest, markers).ok_or_else(|| fail(pos, missing_kind(rest)))?;
                    parsed
                        .set_ampm(period == 1)
                        .map_err(|e| chrono_fail(pos, e))?;
                    pos += len;
                }
                Token::Number { .. } | Token::Fraction(_) => {
                    let (min, max) = token.digit_range().unwrap_or((1, 9));

                    let mut start = pos;
                    let mut negative = false;
                    if matches!(token, Token::Number { field: Field::Year, .. })
                        && let Some(sign) = rest.chars().next().filter(|c| *c == '+' || *c == '-')
                    {
                        negative = sign == '-';
                        start += 1;
                    }

                    let digits = input[start..]
                        .bytes()
                        .take_while(u8::is_ascii_digit)
                        .count();
                    if digits < min {
                        let kind = if start + digits == input.len() {
                            ParseErrorKind::TooShort
                        } else {
                            ParseErrorKind::Invalid
                        };
                        return Err(fail(start + digits, kind));
                    }

                    let reserve = reserved_digits(&tokens[index + 1..]);
                    let take = digits.saturating_sub(reserve).clamp(min, max).min(digits);
                    let value: i64 = input[start..start + take]
                        .parse()
                        .map_err(|_| fail(start, ParseErrorKind::Invalid))?;
                    let value = if negative { -value } else { value };

                    set_number(&mut parsed, token, value).map_err(|e| chrono_fail(pos, e))?;
                    pos = start + take;
                }
            }
        }

        if pos < input.len() {
            return Err(fail(pos, ParseErrorKind::TooLong));
        }

        let date = parsed
            .to_naive_date()
            .map_err(|e| chrono_fail(input.len(), e))?;

        let time = if self.pattern.has_time_fields() {
            let has_hour =
                self.pattern.has_field(Field::Hour) || self.pattern.has_field(Field::Hour12);
            if has_hour && !self.pattern.has_field(Field::Minute) {
                parsed
                    .set_minute(0)
                    .map_err(|e| chrono_fail(input.len(), e))?;
            }
            parsed
                .to_naive_time()
                .map_err(|e| chrono_fail(input.len(), e))?
        } else {
            NaiveTime::MIN
        };

        Ok(date.and_time(time))
    }

    fn render_error(&self, token_index: usize) -> FormatError {
        FormatError::new(self.pattern.as_str(), token_index, FormatErrorKind::Render)
    }
}

fn chrono_item(token: &Token) -> Option<Item<'static>> {
    let pad = |width: usize| if width >= 2 { Pad::Zero } else { Pad::None };

    let item = match *token {
        Token::Number { field, width } => {
            let (numeric, pad) = match field {
                Field::Year => (Numeric::Year, if width >= 4 { Pad::Zero } else { Pad::None }),
                Field::TwoDigitYear => (Numeric::YearMod100, Pad::Zero),
                Field::Month => (Numeric::Month, pad(width)),
                Field::Day => (Numeric::Day, pad(width)),
                Field::DayOfYear => (Numeric::Ordinal, pad(width)),
                Field::Hour => (Numeric::Hour, pad(width)),
                Field::Hour12 => (Numeric::Hour12, pad(width)),
                Field::Minute => (Numeric::Minute, pad(width)),
                Field::Second => (Numeric::Second, pad(width)),
            };
            Item::Numeric(numeric, pad)
        }
        Token::MonthName(TextStyle::Short) => Item::Fixed(Fixed::ShortMonthName),
        Token::MonthName(TextStyle::Full) => Item::Fixed(Fixed::LongMonthName),
        Token::WeekdayName(TextStyle::Short) => Item::Fixed(Fixed::ShortWeekdayName),
        Token::WeekdayName(TextStyle::Full) => Item::Fixed(Fixed::LongWeekdayName),
        Token::Literal(_) | Token::Fraction(_) | Token::AmPm => return None,
    };
    Some(item)
}

/// Year zero-padded to `width` digits, signed outside 0..=9999 like chrono's `%Y`
fn padded_year(year: i32, width: usize) -> String {
    if (0..=9999).contains(&year) {
        format!("{:0width$}", year, width = width)
    } else {
        format!("{:+0width$}", year, width = width + 1)
    }
}

fn set_number(parsed: &mut Parsed, token: &Token, value: i64) -> chrono::format::ParseResult<()> {
    match *token {
        Token::Number { field, .. } => match field {
            Field::Year => parsed.set_year(value),
            Field::TwoDigitYear => parsed.set_year(2000 + value),
            Field::Month => parsed.set_month(value),
            Field::Day => parsed.set_day(value),
            Field::DayOfYear => parsed.set_ordinal(value),
            Field::Hour => parsed.set_hour(value),
            Field::Hour12 => parsed.set_hour12(value),
            Field::Minute => parsed.set_minute(value),
            Field::Second => parsed.set_second(value),
        },
        Token::Fraction(digits) => parsed.set_nanosecond(value * 10i64.pow(9 - digits as u32)),
        _ => Ok(()),
    }
}

/// Digits that must be left for the fixed-width numeric tokens directly after a variable one,
/// so that `yyyyMMdd` splits the way the pattern reads.
fn reserved_digits(following: &[Token]) -> usize {
    let mut reserve = 0;
    for token in following {
        match token.digit_range() {
            Some((min, _)) if token.is_fixed_width() => reserve += min,
            Some((min, _)) => return reserve + min,
            None => break,
        }
    }
    reserve
}

/// Case-insensitive longest match of `candidates` at the start of `input`.
/// Returns the matched key and the number of input bytes consumed.
fn match_name<'a, K>(
    input: &str,
    candidates: impl Iterator<Item = (K, &'a str)>,
) -> Option<(K, usize)> {
    candidates
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(key, name)| prefix_len_ignore_case(input, name).map(|len| (key, len)))
        .max_by_key(|(_, len)| *len)
}

fn prefix_len_ignore_case(input: &str, name: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut input_chars = input.chars();

    for expected in name.chars() {
        let actual = input_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

fn missing_kind(rest: &str) -> ParseErrorKind {
    if rest.is_empty() {
        ParseErrorKind::TooShort
    } else {
        ParseErrorKind::Invalid
    }
}
