//! Custom date-time patterns.
//!
//! A pattern is a sequence of field letters and literals:
//!
//! | Letters        | Field                                      |
//! |----------------|--------------------------------------------|
//! | `yyyy`, `uuuu` | year, 4 digits, or `±` and 6 digits beyond |
//! |                | 0..=9999                                   |
//! | `MM`           | month of year, 2 digits                    |
//! | `dd`           | day of month, 2 digits                     |
//! | `HH`           | hour of day, 2 digits                      |
//! | `mm`           | minute of hour, 2 digits                   |
//! | `ss`           | second of minute, 2 digits                 |
//!
//! Text between single quotes is a literal, and `''` is a single quote.
//! Any other non-letter is a literal as well.
//!
//! ```rust
//! use tempora::DateTimeFormatter;
//!
//! let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd HH:mm:ss").unwrap();
//! let date_time = formatter.parse_date_time("2014-04-15 09:20:30").unwrap();
//! assert_eq!(date_time.to_string(), "2014-04-15T09:20:30");
//! assert_eq!(
//!     formatter.format_date_time(&date_time).unwrap(),
//!     "2014-04-15 09:20:30"
//! );
//! ```

use alloc::{format, string::String, vec::Vec};
use core::{fmt, ops::RangeInclusive};

use writeable::Writeable;

use super::{write_padded_u8, write_year};
use crate::{
    builtins::core::{LocalDate, LocalDateTime, LocalTime},
    calendar::{self, MAX_YEAR, MIN_YEAR},
    TemporalError, TemporalResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

const FIELDS: [Field; Field::COUNT] = [
    Field::Year,
    Field::Month,
    Field::Day,
    Field::Hour,
    Field::Minute,
    Field::Second,
];

impl Field {
    const COUNT: usize = 6;

    /// Returns the field of a pattern letter and its required width.
    fn from_letter(letter: char) -> Option<(Self, usize)> {
        match letter {
            'y' | 'u' => Some((Self::Year, 4)),
            'M' => Some((Self::Month, 2)),
            'd' => Some((Self::Day, 2)),
            'H' => Some((Self::Hour, 2)),
            'm' => Some((Self::Minute, 2)),
            's' => Some((Self::Second, 2)),
            _ => None,
        }
    }

    fn range(self) -> RangeInclusive<i32> {
        match self {
            Self::Year => MIN_YEAR..=MAX_YEAR,
            Self::Month => 1..=12,
            Self::Day => 1..=31,
            Self::Hour => 0..=23,
            Self::Minute | Self::Second => 0..=59,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Month => "MonthOfYear",
            Self::Day => "DayOfMonth",
            Self::Hour => "HourOfDay",
            Self::Minute => "MinuteOfHour",
            Self::Second => "SecondOfMinute",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternItem {
    Field(Field),
    Literal(String),
}

/// A formatter and parser for a custom date-time pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatter {
    pattern: String,
    items: Vec<PatternItem>,
}

fn pattern_error(pattern: &str, index: usize, reason: impl fmt::Display) -> TemporalError {
    TemporalError::parse().with_message(format!(
        "Invalid pattern '{pattern}' at index {index}: {reason}"
    ))
}

fn text_error(text: &str, index: usize, reason: impl fmt::Display) -> TemporalError {
    TemporalError::parse().with_message(format!(
        "Text '{text}' could not be parsed at index {index}: {reason}"
    ))
}

fn push_literal(items: &mut Vec<PatternItem>, literal: &str) {
    if let Some(PatternItem::Literal(last)) = items.last_mut() {
        last.push_str(literal);
    } else {
        items.push(PatternItem::Literal(literal.into()));
    }
}

impl DateTimeFormatter {
    /// Compiles `pattern`.
    pub fn of_pattern(pattern: &str) -> TemporalResult<Self> {
        let mut items = Vec::new();
        let mut chars = pattern.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            if ch == '\'' {
                if chars.next_if(|(_, c)| *c == '\'').is_some() {
                    push_literal(&mut items, "'");
                    continue;
                }
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\'')) => {
                            if chars.next_if(|(_, c)| *c == '\'').is_none() {
                                break;
                            }
                            literal.push('\'');
                        }
                        Some((_, c)) => literal.push(c),
                        None => {
                            return Err(pattern_error(
                                pattern,
                                index,
                                "unterminated quoted literal",
                            ))
                        }
                    }
                }
                push_literal(&mut items, &literal);
            } else if ch.is_ascii_alphabetic() {
                let mut width = 1;
                while chars.next_if(|(_, c)| *c == ch).is_some() {
                    width += 1;
                }
                let field = match Field::from_letter(ch) {
                    Some((field, expected)) if expected == width => field,
                    Some((_, expected)) => {
                        return Err(pattern_error(
                            pattern,
                            index,
                            format!("letter '{ch}' must appear {expected} times, found {width}"),
                        ))
                    }
                    None => {
                        return Err(pattern_error(
                            pattern,
                            index,
                            format!("unknown pattern letter '{ch}'"),
                        ))
                    }
                };
                items.push(PatternItem::Field(field));
            } else {
                push_literal(&mut items, ch.encode_utf8(&mut [0; 4]));
            }
        }

        Ok(Self {
            pattern: pattern.into(),
            items,
        })
    }

    /// Returns the pattern this formatter was compiled from.
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses text that must match the pattern exactly into a date.
    pub fn parse_date(&self, text: &str) -> TemporalResult<LocalDate> {
        let fields = self.parse_fields(text)?;
        fields.date(text)
    }

    /// Parses text that must match the pattern exactly into a time.
    ///
    /// Seconds default to zero when the pattern has no `ss` field.
    pub fn parse_time(&self, text: &str) -> TemporalResult<LocalTime> {
        let fields = self.parse_fields(text)?;
        fields.time(text)
    }

    /// Parses text that must match the pattern exactly into a date-time.
    pub fn parse_date_time(&self, text: &str) -> TemporalResult<LocalDateTime> {
        let fields = self.parse_fields(text)?;
        Ok(LocalDateTime::new(fields.date(text)?, fields.time(text)?))
    }

    /// Formats a date. The pattern may not contain time fields.
    pub fn format_date(&self, date: &LocalDate) -> TemporalResult<String> {
        self.format(BrokenDownFields::from_date(date))
    }

    /// Formats a time. The pattern may not contain date fields.
    pub fn format_time(&self, time: &LocalTime) -> TemporalResult<String> {
        self.format(BrokenDownFields::from_time(time))
    }

    /// Formats a date-time.
    pub fn format_date_time(&self, date_time: &LocalDateTime) -> TemporalResult<String> {
        let mut fields = BrokenDownFields::from_date(&date_time.date());
        fields.merge(BrokenDownFields::from_time(&date_time.time()));
        self.format(fields)
    }

    fn format(&self, fields: BrokenDownFields) -> TemporalResult<String> {
        for item in &self.items {
            if let PatternItem::Field(field) = item {
                if fields.get(*field).is_none() {
                    return Err(TemporalError::range()
                        .with_message(format!("Unsupported field: {}", field.name())));
                }
            }
        }
        let formatted = FormattedPattern {
            items: &self.items,
            fields,
        };
        Ok(formatted.write_to_string().into_owned())
    }

    fn parse_fields(&self, text: &str) -> TemporalResult<BrokenDownFields> {
        let mut fields = BrokenDownFields::default();
        let mut position = 0;
        for item in &self.items {
            let rest = &text[position..];
            match item {
                PatternItem::Literal(literal) => {
                    if !rest.starts_with(literal.as_str()) {
                        return Err(text_error(text, position, format!("expected '{literal}'")));
                    }
                    position += literal.len();
                }
                PatternItem::Field(field) => {
                    let (value, consumed) = match field {
                        Field::Year => parse_year(rest),
                        _ => parse_digits(rest, 2).map(|value| (value, 2)),
                    }
                    .ok_or_else(|| {
                        text_error(text, position, format!("expected {}", field.name()))
                    })?;
                    if fields.get(*field).is_some_and(|prior| prior != value) {
                        return Err(text_error(
                            text,
                            position,
                            format!("conflicting values for {}", field.name()),
                        ));
                    }
                    fields.set(*field, value);
                    position += consumed;
                }
            }
        }
        if position != text.len() {
            return Err(text_error(text, position, "unparsed text found"));
        }
        fields.validate(text)?;
        Ok(fields)
    }
}

impl fmt::Display for DateTimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn parse_digits(text: &str, count: usize) -> Option<i32> {
    let digits = text.as_bytes().get(..count)?;
    digits.iter().try_fold(0i32, |acc, byte| {
        byte.is_ascii_digit()
            .then(|| acc * 10 + i32::from(byte - b'0'))
    })
}

/// Parses a year in the form `write_year` produces: 4 digits within
/// 0..=9999, otherwise a sign and 6 digits.
fn parse_year(text: &str) -> Option<(i32, usize)> {
    match text.as_bytes().first()? {
        b'+' => parse_digits(&text[1..], 6)
            .filter(|year| *year > 9999)
            .map(|year| (year, 7)),
        b'-' => parse_digits(&text[1..], 6)
            .filter(|year| *year > 0)
            .map(|year| (-year, 7)),
        _ => parse_digits(text, 4).map(|year| (year, 4)),
    }
}

/// The field values read from, or written to, text.
#[derive(Debug, Default, Clone, Copy)]
struct BrokenDownFields([Option<i32>; Field::COUNT]);

impl BrokenDownFields {
    fn from_date(date: &LocalDate) -> Self {
        let mut fields = Self::default();
        fields.set(Field::Year, date.year());
        fields.set(Field::Month, i32::from(date.month()));
        fields.set(Field::Day, i32::from(date.day()));
        fields
    }

    fn from_time(time: &LocalTime) -> Self {
        let mut fields = Self::default();
        fields.set(Field::Hour, i32::from(time.hour()));
        fields.set(Field::Minute, i32::from(time.minute()));
        fields.set(Field::Second, i32::from(time.second()));
        fields
    }

    fn merge(&mut self, other: Self) {
        for (slot, value) in self.0.iter_mut().zip(other.0) {
            *slot = slot.or(value);
        }
    }

    fn get(&self, field: Field) -> Option<i32> {
        self.0[field as usize]
    }

    fn set(&mut self, field: Field, value: i32) {
        self.0[field as usize] = Some(value);
    }

    /// Rejects every out of range value, including those of fields the
    /// requested type does not use.
    fn validate(&self, text: &str) -> TemporalResult<()> {
        for field in FIELDS {
            if let Some(value) = self.get(field) {
                if !field.range().contains(&value) {
                    return Err(TemporalError::parse().with_message(format!(
                        "Text '{text}' could not be parsed: invalid value for {}: {value}",
                        field.name()
                    )));
                }
            }
        }
        if let (Some(year), Some(month), Some(day)) = (
            self.get(Field::Year),
            self.get(Field::Month),
            self.get(Field::Day),
        ) {
            calendar::validate_date(year, month as u8, day as u8)
                .map_err(|e| invalid_value(text, &e))?;
        }
        Ok(())
    }

    fn require(&self, field: Field, text: &str) -> TemporalResult<i32> {
        self.get(field).ok_or_else(|| {
            TemporalError::parse().with_message(format!(
                "Text '{text}' could not be parsed: unable to obtain {}",
                field.name()
            ))
        })
    }

    fn date(&self, text: &str) -> TemporalResult<LocalDate> {
        let year = self.require(Field::Year, text)?;
        let month = self.require(Field::Month, text)?;
        let day = self.require(Field::Day, text)?;
        LocalDate::try_new(year, month as u8, day as u8).map_err(|e| invalid_value(text, &e))
    }

    fn time(&self, text: &str) -> TemporalResult<LocalTime> {
        let hour = self.require(Field::Hour, text)?;
        let minute = self.require(Field::Minute, text)?;
        let second = self.get(Field::Second).unwrap_or(0);
        LocalTime::try_new(hour as u8, minute as u8, second as u8, 0)
            .map_err(|e| invalid_value(text, &e))
    }
}

fn invalid_value(text: &str, err: &TemporalError) -> TemporalError {
    TemporalError::parse().with_message(format!(
        "Text '{text}' could not be parsed: {}",
        err.message()
    ))
}

struct FormattedPattern<'a> {
    items: &'a [PatternItem],
    fields: BrokenDownFields,
}

impl Writeable for FormattedPattern<'_> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        for item in self.items {
            match item {
                PatternItem::Literal(literal) => sink.write_str(literal)?,
                PatternItem::Field(field) => {
                    let value = self.fields.get(*field).unwrap_or_default();
                    match field {
                        Field::Year => write_year(value, sink)?,
                        _ => write_padded_u8(value as u8, sink)?,
                    }
                }
            }
        }
        Ok(())
    }
}

impl core::str::FromStr for DateTimeFormatter {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of_pattern(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    #[test]
    fn round_trip() {
        let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd HH:mm:ss").unwrap();
        let parsed = formatter.parse_date_time("2014-04-15 09:20:30").unwrap();
        assert_eq!(parsed.to_string(), "2014-04-15T09:20:30");
        assert_eq!(
            formatter.format_date_time(&parsed).unwrap(),
            "2014-04-15 09:20:30"
        );
        assert_eq!(
            formatter.parse_date("2014-04-15 09:20:30").unwrap().to_string(),
            "2014-04-15"
        );
    }

    #[test]
    fn quoted_literals() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd'T'HH:mm''").unwrap();
        let parsed = formatter.parse_date_time("2014-04-28T21:45'").unwrap();
        assert_eq!(parsed.to_string(), "2014-04-28T21:45");

        let formatter = DateTimeFormatter::of_pattern("dd 'o''clock' yyyy").unwrap();
        let date = LocalDate::try_new(2014, 4, 8).unwrap();
        assert_eq!(formatter.format_date(&date).unwrap(), "08 o'clock 2014");
        assert_eq!(formatter.parse_date("08 o'clock 2014").unwrap(), date);
        assert!(formatter.parse_date("08 oclock 2014").is_err());
    }

    #[test]
    fn invalid_patterns() {
        for pattern in ["yy-MM-dd", "yyyy-MMM-dd", "yyyy-MM-dd G", "HH:mm 'open"] {
            let err = DateTimeFormatter::of_pattern(pattern).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{pattern}");
            assert!(err.message().contains("at index"), "{pattern}");
        }
    }

    #[test]
    fn strict_text() {
        let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd").unwrap();
        let err = formatter.parse_date("2014-4-28").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("index 5"));
        assert!(formatter.parse_date("2014-04-28 ").is_err());
        assert!(formatter.parse_date("2014-04").is_err());
        assert_eq!(
            formatter.parse_date("2014-02-30").map_err(|e| e.kind()),
            Err(ErrorKind::Parse)
        );
        assert!(formatter.parse_time("2014-04-28").is_err());
    }

    #[test]
    fn time_patterns() {
        let formatter = DateTimeFormatter::of_pattern("HH.mm").unwrap();
        let time = formatter.parse_time("21.45").unwrap();
        assert_eq!(time, LocalTime::try_new(21, 45, 0, 0).unwrap());
        assert_eq!(formatter.format_time(&time).unwrap(), "21.45");
        assert!(formatter
            .format_date(&LocalDate::try_new(2014, 4, 28).unwrap())
            .is_err());
        assert!(formatter.parse_time("24.00").is_err());
    }

    #[test]
    fn extended_years() {
        let formatter = DateTimeFormatter::of_pattern("yyyyMMdd").unwrap();
        let date = LocalDate::try_new(-12_345, 1, 2).unwrap();
        assert_eq!(formatter.format_date(&date).unwrap(), "-0123450102");
        assert_eq!(formatter.parse_date("-0123450102").unwrap(), date);
        assert_eq!(
            formatter.parse_date("20140428").unwrap().to_string(),
            "2014-04-28"
        );
        let date = LocalDate::try_new(123_456, 1, 2).unwrap();
        assert_eq!(formatter.format_date(&date).unwrap(), "+1234560102");
        assert_eq!(formatter.parse_date("+1234560102").unwrap(), date);
    }

    #[test]
    fn years_only_in_formatted_width() {
        let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd").unwrap();
        for text in ["+002014-04-28", "+009999-04-28", "-000000-04-28", "014-04-28", "02014-04-28"] {
            assert_eq!(
                formatter.parse_date(text).map_err(|e| e.kind()),
                Err(ErrorKind::Parse),
                "{text}"
            );
        }
        let date = formatter.parse_date("+010000-04-28").unwrap();
        assert_eq!(formatter.format_date(&date).unwrap(), "+010000-04-28");
        let date = formatter.parse_date("-000001-04-28").unwrap();
        assert_eq!(date.year(), -1);
        assert_eq!(formatter.format_date(&date).unwrap(), "-000001-04-28");
    }

    #[test]
    fn fields_outside_the_target_are_validated() {
        let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd HH:mm:ss").unwrap();
        for text in ["2014-04-15 99:99:99", "2014-04-15 24:00:00", "2014-04-15 10:60:00"] {
            let err = formatter.parse_date(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
        }
        for text in ["2014-13-45 10:00:00", "2014-02-30 10:00:00", "2014-00-10 10:00:00"] {
            let err = formatter.parse_time(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
        }
        assert!(formatter
            .parse_date("2014-04-15 99:99:99")
            .unwrap_err()
            .message()
            .contains("HourOfDay"));
        assert_eq!(
            formatter.parse_time("2014-04-15 10:00:00").unwrap(),
            LocalTime::try_new(10, 0, 0, 0).unwrap()
        );
    }
}
