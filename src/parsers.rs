//! This module implements `tempora`'s text parsing and formatting.
//!
//! ISO-8601 text is parsed with [`ixdtf`] and validated against the value
//! types' invariants. Formatting is done through [`Writeable`]
//! implementations that the value types' `Display` impls delegate to.
//!
//! Custom patterns are handled by [`pattern::DateTimeFormatter`].

use alloc::format;
use ixdtf::parsers::IxdtfParser;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    iso::{IsoDate, IsoDateTime, IsoTime},
    Sign, TemporalError, TemporalResult,
};

pub mod pattern;
mod timezone;

pub(crate) use timezone::{parse_offset_str, parse_zone_text, ZoneText};

// ==== ISO-8601 parsing ====

/// The fields of an ISO-8601 date-time string.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedIxdtf<'a> {
    pub(crate) date: IsoDate,
    pub(crate) time: Option<IsoTime>,
    /// The UTC offset in seconds.
    pub(crate) offset: Option<i32>,
    /// The text of the zone annotation.
    pub(crate) zone: Option<&'a str>,
    pub(crate) has_calendar: bool,
}

fn parse_failure(source: &str, reason: impl core::fmt::Display) -> TemporalError {
    TemporalError::parse().with_message(format!("Text '{source}' could not be parsed: {reason}"))
}

/// Relabels a construction error as a parse error of `source`.
fn invalid_field(source: &str, err: TemporalError) -> TemporalError {
    parse_failure(source, err.message())
}

fn time_from_record(source: &str, record: ixdtf::records::TimeRecord) -> TemporalResult<IsoTime> {
    let nanosecond = match record.fraction {
        Some(fraction) => fraction
            .to_nanoseconds()
            .ok_or_else(|| parse_failure(source, "fraction exceeds nanosecond precision"))?,
        None => 0,
    };
    IsoTime::try_new(record.hour, record.minute, record.second, nanosecond)
        .map_err(|e| invalid_field(source, e))
}

/// Returns the offset and zone annotation text following the time.
///
/// The source has already passed the extended layout check and `ixdtf`,
/// so the offset is whatever follows the time once a sign or `Z` appears,
/// and the zone is the first bracketed annotation that is not a key-value
/// pair.
fn split_suffix(source: &str) -> (Option<&str>, Option<&str>) {
    let (head, zone) = match source.find('[') {
        Some(open) => {
            let annotation = &source[open + 1..];
            let zone = annotation
                .find(']')
                .map(|close| annotation[..close].trim_start_matches('!'))
                .filter(|zone| !zone.contains('='));
            (&source[..open], zone)
        }
        None => (source, None),
    };

    let offset = head
        .find('T')
        .map(|sep| &head[sep + 1..])
        .and_then(|time| time.find(['+', '-', 'Z']).map(|start| &time[start..]));
    (offset, zone)
}

/// A cursor checking the extended ISO-8601 layout, which `ixdtf` relaxes
/// to the basic format, space or lowercase separators, comma decimals and
/// hour-only times.
struct ExtendedLayout<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ExtendedLayout<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn byte(&mut self, expected: u8) -> Option<()> {
        let found = self.peek() == Some(expected);
        found.then(|| self.position += 1)
    }

    fn digits(&mut self, count: usize) -> Option<()> {
        let end = self.position + count;
        let found = self
            .bytes
            .get(self.position..end)
            .is_some_and(|digits| digits.iter().all(u8::is_ascii_digit));
        found.then(|| self.position = end)
    }

    /// `YYYY-MM-DD` or `±YYYYYY-MM-DD`.
    fn date(&mut self) -> Option<()> {
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.position += 1;
            self.digits(6)?;
        } else {
            self.digits(4)?;
        }
        self.byte(b'-')?;
        self.digits(2)?;
        self.byte(b'-')?;
        self.digits(2)
    }

    /// `HH:mm[:ss[.f]]` with at least one fraction digit after the `.`.
    fn time(&mut self) -> Option<()> {
        self.digits(2)?;
        self.byte(b':')?;
        self.digits(2)?;
        if self.byte(b':').is_some() {
            self.digits(2)?;
            if self.byte(b'.').is_some() {
                self.digits(1)?;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.position += 1;
                }
            }
        }
        Some(())
    }

    fn error(&self, source: &str) -> TemporalError {
        parse_failure(
            source,
            format!("unexpected character at index {}", self.position),
        )
    }
}

/// Checks that `source` starts with an extended date, optionally followed
/// by `T` and an extended time, and that only an offset or annotations
/// follow.
fn check_extended_date_time(source: &str) -> TemporalResult<()> {
    let mut layout = ExtendedLayout::new(source);
    let checked = layout.date().and_then(|()| match layout.peek() {
        Some(b'T') => {
            layout.position += 1;
            layout.time()
        }
        _ => Some(()),
    });
    match (checked, layout.peek()) {
        (Some(()), None | Some(b'+' | b'-' | b'Z' | b'[')) => Ok(()),
        _ => Err(layout.error(source)),
    }
}

/// Checks that `source` is exactly an extended time of day.
fn check_extended_time(source: &str) -> TemporalResult<()> {
    let mut layout = ExtendedLayout::new(source);
    match (layout.time(), layout.peek()) {
        (Some(()), None) => Ok(()),
        _ => Err(layout.error(source)),
    }
}

/// Parses an ISO-8601 date or date-time with an optional offset and
/// annotations.
pub(crate) fn parse_ixdtf(source: &str) -> TemporalResult<ParsedIxdtf<'_>> {
    check_extended_date_time(source)?;
    let record = IxdtfParser::from_utf8(source.as_bytes())
        .parse()
        .map_err(|e| parse_failure(source, format!("{e:?}")))?;

    let Some(date) = record.date else {
        return Err(parse_failure(source, "a date is required"));
    };
    let date = IsoDate::try_new(date.year, date.month, date.day)
        .map_err(|e| invalid_field(source, e))?;
    let time = record
        .time
        .map(|time| time_from_record(source, time))
        .transpose()?;

    let (offset_text, zone_text) = split_suffix(source);
    let offset = match (record.offset.is_some(), offset_text) {
        (true, Some(text)) => Some(parse_offset_str(text).map_err(|e| invalid_field(source, e))?),
        (true, None) => return Err(parse_failure(source, "unreadable offset")),
        (false, _) => None,
    };
    let zone = if record.tz.is_some() { zone_text } else { None };

    Ok(ParsedIxdtf {
        date,
        time,
        offset,
        zone,
        has_calendar: record.calendar.is_some(),
    })
}

/// Rejects any offset, zone or calendar information.
fn require_local(source: &str, parsed: &ParsedIxdtf<'_>) -> TemporalResult<()> {
    if parsed.offset.is_some() || parsed.zone.is_some() || parsed.has_calendar {
        return Err(parse_failure(
            source,
            "local values cannot carry an offset, zone or calendar",
        ));
    }
    Ok(())
}

/// Parses `uuuu-MM-dd`.
pub(crate) fn parse_date(source: &str) -> TemporalResult<IsoDate> {
    let parsed = parse_ixdtf(source)?;
    require_local(source, &parsed)?;
    if parsed.time.is_some() {
        return Err(parse_failure(source, "unexpected time component"));
    }
    Ok(parsed.date)
}

/// Parses `uuuu-MM-dd'T'HH:mm[:ss[.fffffffff]]`.
pub(crate) fn parse_date_time(source: &str) -> TemporalResult<IsoDateTime> {
    let parsed = parse_ixdtf(source)?;
    require_local(source, &parsed)?;
    let Some(time) = parsed.time else {
        return Err(parse_failure(source, "a time component is required"));
    };
    Ok(IsoDateTime::new(parsed.date, time))
}

/// Parses `HH:mm[:ss[.fffffffff]]`.
pub(crate) fn parse_time(source: &str) -> TemporalResult<IsoTime> {
    check_extended_time(source)?;
    let record = IxdtfParser::from_utf8(source.as_bytes())
        .parse_time()
        .map_err(|e| parse_failure(source, format!("{e:?}")))?;
    if record.date.is_some()
        || record.offset.is_some()
        || record.tz.is_some()
        || record.calendar.is_some()
    {
        return Err(parse_failure(source, "only a time of day is allowed"));
    }
    let time = record
        .time
        .ok_or_else(|| parse_failure(source, "a time component is required"))?;
    time_from_record(source, time)
}

/// A date-time on the time-line: the local fields, the offset in seconds
/// and the text of an optional zone annotation.
pub(crate) type OffsetRecord<'a> = (IsoDateTime, i32, Option<&'a str>);

/// Parses a date-time that must carry an offset, optionally followed by a
/// zone annotation.
pub(crate) fn parse_offset_date_time(source: &str) -> TemporalResult<OffsetRecord<'_>> {
    let parsed = parse_ixdtf(source)?;
    let (Some(time), Some(offset)) = (parsed.time, parsed.offset) else {
        return Err(parse_failure(source, "a time and an offset are required"));
    };
    if parsed.has_calendar {
        return Err(parse_failure(source, "calendar annotations are not supported"));
    }
    Ok((IsoDateTime::new(parsed.date, time), offset, parsed.zone))
}

// ==== Writeable formatting ====

/// The precision used to write a time of day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    /// Seconds are omitted when they and the fraction are zero, and the
    /// fraction is written with as few digits as needed.
    #[default]
    Auto,
    /// Only hours and minutes are written.
    Minute,
    /// Seconds are always written, the fraction as in `Auto`.
    Second,
    /// Seconds and exactly this many fraction digits are written.
    Digit(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    pub precision: Precision,
}

impl FormattableTime {
    fn writes_seconds(&self) -> bool {
        match self.precision {
            Precision::Minute => false,
            Precision::Auto => self.second != 0 || self.nanosecond != 0,
            Precision::Second | Precision::Digit(_) => true,
        }
    }
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if !self.writes_seconds() {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if (self.nanosecond == 0 && !matches!(self.precision, Precision::Digit(_)))
            || self.precision == Precision::Digit(0)
        {
            return Ok(());
        }
        sink.write_char('.')?;
        write_nanosecond(self.nanosecond, self.precision, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if !self.writes_seconds() {
            return LengthHint::exact(5);
        }
        match self.precision {
            Precision::Digit(0) => LengthHint::exact(8),
            Precision::Digit(d) => LengthHint::exact(9 + usize::from(d.min(9))),
            _ if self.nanosecond == 0 => LengthHint::exact(8),
            _ => LengthHint::between(10, 18),
        }
    }
}

/// A UTC offset, written as `Z` when zero.
#[derive(Debug, Clone, Copy)]
pub struct FormattableOffset {
    pub sign: Sign,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl FormattableOffset {
    pub(crate) fn from_seconds(total_seconds: i32) -> Self {
        let abs = total_seconds.unsigned_abs();
        Self {
            sign: Sign::from(total_seconds.signum() as i8),
            hour: (abs / 3600) as u8,
            minute: (abs % 3600 / 60) as u8,
            second: (abs % 60) as u8,
        }
    }
}

impl Writeable for FormattableOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self.sign {
            Sign::Zero => return sink.write_char('Z'),
            Sign::Negative => sink.write_char('-')?,
            Sign::Positive => sink.write_char('+')?,
        }
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if self.second != 0 {
            sink.write_char(':')?;
            write_padded_u8(self.second, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match (self.sign, self.second) {
            (Sign::Zero, _) => LengthHint::exact(1),
            (_, 0) => LengthHint::exact(6),
            _ => LengthHint::exact(9),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattableDate(pub i32, pub u8, pub u8);

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let year_length = match self.0.unsigned_abs() {
            _ if (0..=9999).contains(&self.0) => 4,
            0..=999_999 => 7,
            _ => 8,
        };

        LengthHint::exact(6 + year_length)
    }
}

/// A zone identifier annotation, `[America/New_York]`.
#[derive(Debug, Clone, Copy)]
pub struct FormattableZoneId<'a>(pub &'a str);

impl Writeable for FormattableZoneId<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char('[')?;
        sink.write_str(self.0)?;
        sink.write_char(']')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(2 + self.0.len())
    }
}

/// A complete ISO-8601 string made of optional parts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormattableIxdtf<'a> {
    pub date: Option<FormattableDate>,
    pub time: Option<FormattableTime>,
    pub offset: Option<FormattableOffset>,
    pub zone: Option<FormattableZoneId<'a>>,
}

impl Writeable for FormattableIxdtf<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if let Some(date) = &self.date {
            date.write_to(sink)?;
        }
        if let Some(time) = &self.time {
            if self.date.is_some() {
                sink.write_char('T')?;
            }
            time.write_to(sink)?;
        }
        if let Some(offset) = &self.offset {
            offset.write_to(sink)?;
        }
        if let Some(zone) = &self.zone {
            zone.write_to(sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let date_length = self
            .date
            .map(|d| d.writeable_length_hint())
            .unwrap_or(LengthHint::exact(0));
        let time_length = self
            .time
            .map(|t| t.writeable_length_hint() + usize::from(self.date.is_some()))
            .unwrap_or(LengthHint::exact(0));
        let offset_length = self
            .offset
            .map(|o| o.writeable_length_hint())
            .unwrap_or(LengthHint::exact(0));
        let zone_length = self
            .zone
            .map(|z| z.writeable_length_hint())
            .unwrap_or(LengthHint::exact(0));
        date_length + time_length + offset_length + zone_length
    }
}

/// An exact duration, written as `[-]PT#H#M#[.f]S`.
#[derive(Debug, Clone, Copy)]
pub struct FormattableDuration {
    pub sign: Sign,
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub nanoseconds: u32,
}

impl Writeable for FormattableDuration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.sign == Sign::Negative {
            sink.write_char('-')?;
        }
        sink.write_str("PT")?;
        if self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.nanoseconds == 0 {
            return sink.write_str("0S");
        }
        checked_write_u64_with_suffix(self.hours, 'H', sink)?;
        checked_write_u64_with_suffix(u64::from(self.minutes), 'M', sink)?;
        if self.seconds == 0 && self.nanoseconds == 0 {
            return Ok(());
        }
        self.seconds.write_to(sink)?;
        if self.nanoseconds != 0 {
            sink.write_char('.')?;
            write_nanosecond(self.nanoseconds, Precision::Auto, sink)?;
        }
        sink.write_char('S')
    }
}

/// A calendar period, written as `P#Y#M#D` with signed components.
#[derive(Debug, Clone, Copy)]
pub struct FormattablePeriod {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Writeable for FormattablePeriod {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char('P')?;
        if self.years == 0 && self.months == 0 && self.days == 0 {
            return sink.write_str("0D");
        }
        for (value, suffix) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if value != 0 {
                value.write_to(sink)?;
                sink.write_char(suffix)?;
            }
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattableIxdtf<'_>);
impl_display_with_writeable!(FormattableDuration);
impl_display_with_writeable!(FormattablePeriod);
impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattableZoneId<'_>);

pub(crate) fn write_padded_u8<W: core::fmt::Write + ?Sized>(
    num: u8,
    sink: &mut W,
) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_nanosecond<W: core::fmt::Write + ?Sized>(
    nanoseconds: u32,
    precision: Precision,
    sink: &mut W,
) -> core::fmt::Result {
    let (digits, index) = u32_to_digits(nanoseconds);
    let precision = match precision {
        Precision::Digit(digit) if digit <= 9 => digit as usize,
        _ => index,
    };
    write_digit_slice_to_precision(digits, 0, precision, sink)
}

/// Splits `value` into its nine lowest decimal digits, returning them with
/// the position after the last non-zero digit.
pub fn u32_to_digits(mut value: u32) -> ([u8; 9], usize) {
    let mut output = [0; 9];
    let mut precision = 0;
    let mut i = 9;
    while i != 0 {
        let v = (value % 10) as u8;
        value /= 10;
        if precision == 0 && v != 0 {
            precision = i;
        }
        output[i - 1] = v;
        i -= 1;
    }

    (output, precision)
}

fn write_digit_slice_to_precision<W: core::fmt::Write + ?Sized>(
    digits: [u8; 9],
    base: usize,
    precision: usize,
    sink: &mut W,
) -> core::fmt::Result {
    for digit in digits.iter().take(precision).skip(base) {
        digit.write_to(sink)?;
    }
    Ok(())
}

pub(crate) fn write_year<W: core::fmt::Write + ?Sized>(
    year: i32,
    sink: &mut W,
) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        write_four_digit_year(year, sink)
    } else {
        write_extended_year(year, sink)
    }
}

fn write_four_digit_year<W: core::fmt::Write + ?Sized>(
    mut y: i32,
    sink: &mut W,
) -> core::fmt::Result {
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

fn write_extended_year<W: core::fmt::Write + ?Sized>(y: i32, sink: &mut W) -> core::fmt::Result {
    let sign = if y < 0 { '-' } else { '+' };
    sink.write_char(sign)?;
    let abs = y.unsigned_abs();
    let (digits, _) = u32_to_digits(abs);
    let base = if abs >= 1_000_000 { 2 } else { 3 };
    write_digit_slice_to_precision(digits, base, 9, sink)
}

fn checked_write_u64_with_suffix<W: core::fmt::Write + ?Sized>(
    val: u64,
    suffix: char,
    sink: &mut W,
) -> core::fmt::Result {
    if val == 0 {
        return Ok(());
    }
    val.write_to(sink)?;
    sink.write_char(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use writeable::assert_writeable_eq;

    #[test]
    fn offset_string() {
        assert_writeable_eq!(FormattableOffset::from_seconds(4 * 3600), "+04:00");
        assert_writeable_eq!(FormattableOffset::from_seconds(-(5 * 3600 + 30)), "-05:00:30");
        assert_writeable_eq!(FormattableOffset::from_seconds(0), "Z");
    }

    #[test]
    fn time_precision() {
        let time = FormattableTime {
            hour: 21,
            minute: 45,
            second: 0,
            nanosecond: 0,
            precision: Precision::Auto,
        };
        assert_writeable_eq!(time, "21:45");
        assert_writeable_eq!(
            FormattableTime {
                precision: Precision::Second,
                ..time
            },
            "21:45:00"
        );
        assert_writeable_eq!(
            FormattableTime {
                second: 50,
                nanosecond: 120_000_000,
                ..time
            },
            "21:45:50.12"
        );
        assert_writeable_eq!(
            FormattableTime {
                second: 50,
                nanosecond: 120_000_000,
                precision: Precision::Digit(6),
                ..time
            },
            "21:45:50.120000"
        );
        assert_writeable_eq!(
            FormattableTime {
                second: 50,
                precision: Precision::Minute,
                ..time
            },
            "21:45"
        );
    }

    #[test]
    fn extended_years() {
        assert_writeable_eq!(FormattableDate(2014, 4, 28), "2014-04-28");
        assert_writeable_eq!(FormattableDate(12_345, 1, 2), "+012345-01-02");
        assert_writeable_eq!(FormattableDate(-1, 1, 2), "-000001-01-02");
    }

    #[test]
    fn durations_and_periods() {
        let duration = FormattableDuration {
            sign: Sign::Positive,
            hours: 49,
            minutes: 5,
            seconds: 5,
            nanoseconds: 0,
        };
        assert_writeable_eq!(duration, "PT49H5M5S");
        assert_writeable_eq!(
            FormattableDuration {
                sign: Sign::Negative,
                hours: 0,
                minutes: 0,
                seconds: 0,
                nanoseconds: 500_000_000,
            },
            "-PT0.5S"
        );
        assert_writeable_eq!(
            FormattablePeriod {
                years: 1,
                months: 1,
                days: 3
            },
            "P1Y1M3D"
        );
        assert_writeable_eq!(
            FormattablePeriod {
                years: 0,
                months: -13,
                days: 0
            },
            "P-13M"
        );
    }

    #[test]
    fn suffix_split() {
        assert_eq!(
            split_suffix("2014-04-28T21:45:50-04:00[America/New_York]"),
            (Some("-04:00"), Some("America/New_York"))
        );
        assert_eq!(split_suffix("2014-04-28T21:45:50Z"), (Some("Z"), None));
        assert_eq!(split_suffix("-002014-04-28T21:45"), (None, None));
        assert_eq!(
            split_suffix("2014-04-28T21:45+01:00[!Europe/Paris][u-ca=iso8601]"),
            (Some("+01:00"), Some("Europe/Paris"))
        );
    }

    #[test]
    fn strict_local_parsing() {
        assert!(parse_date("2014-04-28").is_ok());
        assert!(parse_date("2014-04-28T10:00").is_err());
        assert!(parse_date("2014-02-30").is_err());
        assert!(parse_date_time("2014-04-28").is_err());
        assert!(parse_date_time("2014-04-28T21:45:50-04:00").is_err());
        assert!(parse_date_time("2014-04-28T21:45:50[Europe/Paris]").is_err());
        let dt = parse_date_time("2014-04-28T21:45:50.5").unwrap();
        assert_eq!(dt.time.nanosecond, 500_000_000);
        assert!(parse_time("21:45").is_ok());
        assert!(parse_time("T21:45").is_err());
        assert!(parse_time("21:45Z").is_err());
        assert_eq!(
            parse_date("2014-13-01").map_err(|e| e.kind()),
            Err(ErrorKind::Parse)
        );
    }

    #[test]
    fn extended_layout_only() {
        for text in [
            "2014-04-28 21:45",
            "2014-04-28t21:45",
            "2014-04-28T21",
            "20140428T2145",
            "2014-04-28T2145",
            "2014-04-28T21:45:00,5",
            "2014-04-28T21:45.5",
            "2014-04-28T21:45:00.",
            "+2014-04-28T21:45",
        ] {
            let err = parse_date_time(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
            assert!(err.message().contains("at index"), "{text}");
        }
        assert!(parse_date("20140428").is_err());
        assert!(parse_date("2014-04-28 ").is_err());
        for text in ["21", "2145", "21:45:00,5", "21:45:5", "t21:45"] {
            assert!(parse_time(text).is_err(), "{text}");
        }
        for text in ["2014-04-28T21:45:50z", "2014-04-28 21:45:50Z"] {
            assert!(parse_offset_date_time(text).is_err(), "{text}");
        }

        assert!(parse_date_time("+002014-04-28T21:45:00.123456789").is_ok());
        assert!(parse_time("21:45:00.5").is_ok());
        assert!(parse_offset_date_time("2014-04-28T21:45-04:00[America/New_York]").is_ok());
    }
}
