use core::{iter::Peekable, str::Chars};

use alloc::format;

use crate::{TemporalError, TemporalResult};

/// A zone identifier as written: either a UTC offset or a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneText<'a> {
    Offset(i32),
    Name(&'a str),
}

#[inline]
pub(crate) fn parse_zone_text(source: &str) -> TemporalResult<ZoneText<'_>> {
    if source == "Z" || source == "z" {
        return Ok(ZoneText::Offset(0));
    }
    let mut cursor = source.chars().peekable();
    if cursor.peek().is_some_and(is_ascii_sign) {
        return parse_offset_str(source).map(ZoneText::Offset);
    } else if parse_iana_component(&mut cursor) {
        return Ok(ZoneText::Name(source));
    }
    Err(TemporalError::parse().with_message(format!("Invalid zone identifier '{source}'")))
}

/// Parses a complete offset string, returning its total seconds.
#[inline]
pub(crate) fn parse_offset_str(source: &str) -> TemporalResult<i32> {
    if source == "Z" || source == "z" {
        return Ok(0);
    }
    let mut cursor = source.chars().peekable();
    let seconds = parse_offset(&mut cursor)?;
    if let Some(ch) = cursor.next() {
        return Err(TemporalError::parse().with_message(format!(
            "Unexpected character '{ch}' after offset in '{source}'"
        )));
    }
    Ok(seconds)
}

/// Parses `±HH`, `±HH:MM`, `±HHMM`, `±HH:MM:SS` or `±HHMMSS`.
#[inline]
pub(crate) fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-' | '\u{2212}') => -1,
        Some(_) => {
            return Err(TemporalError::parse().with_message("Offset must start with '+' or '-'"))
        }
        None => return Err(abrupt_end()),
    };
    let hours = parse_digit_pair(chars)?;

    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep {
        let _ = chars.next();
    }

    let minutes = match chars.peek() {
        Some(ch) if ch.is_ascii_digit() => parse_digit_pair(chars)?,
        Some(_) => return Err(non_ascii_digit()),
        None if sep => return Err(abrupt_end()),
        None => return Ok(sign * hours * 3600),
    };

    let seconds = match chars.peek() {
        Some(':') if sep => {
            let _ = chars.next();
            parse_digit_pair(chars)?
        }
        Some(ch) if ch.is_ascii_digit() && !sep => parse_digit_pair(chars)?,
        _ => 0,
    };

    if minutes > 59 || seconds > 59 {
        return Err(
            TemporalError::parse().with_message("Offset minutes and seconds must be below 60")
        );
    }

    Ok(sign * (hours * 3600 + minutes * 60 + seconds))
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let mut value = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .ok_or_else(abrupt_end)?
            .to_digit(10)
            .ok_or_else(non_ascii_digit)?;
        value = value * 10 + digit as i32;
    }
    Ok(value)
}

fn parse_iana_component(chars: &mut Peekable<Chars<'_>>) -> bool {
    // Confirm leading Tz char
    if !chars.peek().is_some_and(is_tz_leading_char) {
        return false;
    }
    chars.next();

    // Move and check that chars are an expected tz char
    while chars.peek().is_some_and(is_tz_char) {
        chars.next();
    }

    // Check for sub component and parse
    if chars.peek().is_some_and(is_slash) {
        chars.next();
        return parse_iana_component(chars);
    }

    // Confirm full source text has been parsed.
    chars.peek().is_none()
}

fn abrupt_end() -> TemporalError {
    TemporalError::parse().with_message("Abrupt end while parsing offset string")
}

fn non_ascii_digit() -> TemporalError {
    TemporalError::parse().with_message("Non ascii digit found while parsing offset string")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

fn is_slash(ch: &char) -> bool {
    *ch == '/'
}

fn is_tz_leading_char(ch: &char) -> bool {
    ch.is_ascii_alphabetic() || *ch == '.' || *ch == '_'
}

fn is_tz_char(ch: &char) -> bool {
    is_tz_leading_char(ch) || ch.is_ascii_digit() || *ch == '+' || *ch == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(parse_offset_str("Z"), Ok(0));
        assert_eq!(parse_offset_str("+05"), Ok(5 * 3600));
        assert_eq!(parse_offset_str("-04:00"), Ok(-4 * 3600));
        assert_eq!(parse_offset_str("+0530"), Ok(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset_str("-00:30:15"), Ok(-(30 * 60 + 15)));
        assert_eq!(parse_offset_str("+013015"), Ok(3600 + 30 * 60 + 15));
        assert!(parse_offset_str("+5").is_err());
        assert!(parse_offset_str("+05:").is_err());
        assert!(parse_offset_str("+05:60").is_err());
        assert!(parse_offset_str("+05:00x").is_err());
        assert!(parse_offset_str("+05:0030").is_err());
    }

    #[test]
    fn zone_text() {
        assert_eq!(
            parse_zone_text("America/New_York"),
            Ok(ZoneText::Name("America/New_York"))
        );
        assert_eq!(parse_zone_text("Etc/GMT+5"), Ok(ZoneText::Name("Etc/GMT+5")));
        assert_eq!(parse_zone_text("+01:00"), Ok(ZoneText::Offset(3600)));
        assert_eq!(parse_zone_text("Z"), Ok(ZoneText::Offset(0)));
        assert!(parse_zone_text("America/").is_err());
        assert!(parse_zone_text("").is_err());
        assert!(parse_zone_text("9Zone").is_err());
    }
}
