//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use core::fmt;

use tempora_provider::ZoneProviderError;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A date field is outside of the calendar's range.
    InvalidDate,
    /// A time field is outside of its range.
    InvalidTime,
    /// An offset is beyond ±18 hours or not valid for a zone.
    InvalidOffset,
    /// Text did not match the expected format.
    Parse,
    /// The zone identifier is unknown to the rules provider.
    UnknownZone,
    /// Arithmetic overflow or an unsupported unit.
    Range,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::InvalidDate => "InvalidDateError",
            Self::InvalidTime => "InvalidTimeError",
            Self::InvalidOffset => "InvalidOffsetError",
            Self::Parse => "ParseError",
            Self::UnknownZone => "UnknownZoneError",
            Self::Range => "RangeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `tempora`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TemporalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create an `InvalidDateError`.
    #[inline]
    #[must_use]
    pub const fn invalid_date() -> Self {
        Self::new(ErrorKind::InvalidDate)
    }

    /// Create an `InvalidTimeError`.
    #[inline]
    #[must_use]
    pub const fn invalid_time() -> Self {
        Self::new(ErrorKind::InvalidTime)
    }

    /// Create an `InvalidOffsetError`.
    #[inline]
    #[must_use]
    pub const fn invalid_offset() -> Self {
        Self::new(ErrorKind::InvalidOffset)
    }

    /// Create a `ParseError`.
    #[inline]
    #[must_use]
    pub const fn parse() -> Self {
        Self::new(ErrorKind::Parse)
    }

    /// Create an `UnknownZoneError`.
    #[inline]
    #[must_use]
    pub const fn unknown_zone() -> Self {
        Self::new(ErrorKind::UnknownZone)
    }

    /// Create a `RangeError`.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create an abrupt end error.
    #[inline]
    #[must_use]
    pub fn abrupt_end() -> Self {
        Self::parse().with_message("Abrupt end to parsing target.")
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create an error with the provided message.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl From<ZoneProviderError> for TemporalError {
    fn from(value: ZoneProviderError) -> Self {
        match value {
            ZoneProviderError::UnknownIdentifier(id) => Self::unknown_zone()
                .with_message(alloc::format!("Unknown time zone identifier: {id}")),
            ZoneProviderError::InvalidData(msg) => Self::general(msg),
            ZoneProviderError::Assert(msg) => Self::assert().with_message(msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TemporalError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display() {
        let err = TemporalError::invalid_date().with_message("day 30 is invalid for 2014-02");
        assert_eq!(
            err.to_string(),
            "InvalidDateError: day 30 is invalid for 2014-02"
        );
        assert_eq!(TemporalError::parse().to_string(), "ParseError");
    }

    #[test]
    fn provider_errors() {
        let err = TemporalError::from(ZoneProviderError::UnknownIdentifier("Mars/Base".into()));
        assert_eq!(err.kind(), ErrorKind::UnknownZone);
        assert!(err.message().contains("Mars/Base"));
    }
}
