//! This module implements `Period`, a calendar amount of years, months and
//! days.

use alloc::format;
use core::str::FromStr;

use writeable::Writeable;

use crate::{
    builtins::core::LocalDate, parsers::FormattablePeriod, TemporalError, TemporalResult,
};

/// An amount of calendar time, such as "1 year, 2 months and 3 days".
///
/// The components are independent and never normalized implicitly: 14
/// months stay 14 months until `normalized` is called.
///
/// ```rust
/// use tempora::{LocalDate, Period};
///
/// let start = LocalDate::try_new(2014, 4, 30).unwrap();
/// let end = LocalDate::try_new(2015, 6, 2).unwrap();
/// let period = Period::between(&start, &end);
/// assert_eq!((period.years(), period.months(), period.days()), (1, 1, 3));
/// assert_eq!(period.to_string(), "P1Y1M3D");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

fn overflow() -> TemporalError {
    TemporalError::range().with_message("Period component overflows")
}

impl Period {
    /// A period of zero length.
    pub const ZERO: Self = Self::of(0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn of(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from_years(years: i32) -> Self {
        Self::of(years, 0, 0)
    }

    #[inline]
    #[must_use]
    pub const fn from_months(months: i32) -> Self {
        Self::of(0, months, 0)
    }

    /// Creates a period of `weeks * 7` days.
    pub fn from_weeks(weeks: i32) -> TemporalResult<Self> {
        weeks
            .checked_mul(7)
            .map(Self::from_days)
            .ok_or_else(overflow)
    }

    #[inline]
    #[must_use]
    pub const fn from_days(days: i32) -> Self {
        Self::of(0, 0, days)
    }

    /// The period from `start` (inclusive) until `end` (exclusive).
    ///
    /// Whole months are counted first and split into years and months, the
    /// remainder is counted in days. When `end` is before `start`, every
    /// component is negative or zero.
    #[must_use]
    pub fn between(start: &LocalDate, end: &LocalDate) -> Self {
        let (total_months, days) = start.iso.period_until(&end.iso);
        // Supported years are within ±999,999, so every component fits.
        Self::of(
            (total_months / 12) as i32,
            (total_months % 12) as i32,
            days as i32,
        )
    }

    #[inline]
    #[must_use]
    pub const fn years(&self) -> i32 {
        self.years
    }

    #[inline]
    #[must_use]
    pub const fn months(&self) -> i32 {
        self.months
    }

    #[inline]
    #[must_use]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Returns `years * 12 + months`.
    #[inline]
    #[must_use]
    pub const fn to_total_months(&self) -> i64 {
        self.years as i64 * 12 + self.months as i64
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Returns whether any component is negative.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Folds whole years out of the months, so that months are within
    /// `-11..=11` and share the sign of the years. Days are unchanged.
    pub fn normalized(&self) -> TemporalResult<Self> {
        let total = self.to_total_months();
        let years = i32::try_from(total / 12).map_err(|_| overflow())?;
        Ok(Self::of(years, (total % 12) as i32, self.days))
    }

    pub fn negated(&self) -> TemporalResult<Self> {
        Ok(Self::of(
            self.years.checked_neg().ok_or_else(overflow)?,
            self.months.checked_neg().ok_or_else(overflow)?,
            self.days.checked_neg().ok_or_else(overflow)?,
        ))
    }

    /// Adds the components of two periods pairwise.
    pub fn checked_add(&self, other: &Self) -> TemporalResult<Self> {
        Ok(Self::of(
            self.years.checked_add(other.years).ok_or_else(overflow)?,
            self.months.checked_add(other.months).ok_or_else(overflow)?,
            self.days.checked_add(other.days).ok_or_else(overflow)?,
        ))
    }

    pub fn plus_years(&self, years: i32) -> TemporalResult<Self> {
        self.checked_add(&Self::from_years(years))
    }

    pub fn plus_months(&self, months: i32) -> TemporalResult<Self> {
        self.checked_add(&Self::from_months(months))
    }

    pub fn plus_days(&self, days: i32) -> TemporalResult<Self> {
        self.checked_add(&Self::from_days(days))
    }

    pub(crate) fn to_formattable(self) -> FormattablePeriod {
        FormattablePeriod {
            years: self.years,
            months: self.months,
            days: self.days,
        }
    }
}

impl core::fmt::Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_formattable().write_to(f)
    }
}

// ==== Parsing ====

/// A cursor over the bytes of a period string.
struct PeriodCursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> PeriodCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    fn next_if(&mut self, predicate: impl Fn(u8) -> bool) -> Option<u8> {
        let byte = self.peek().filter(|b| predicate(*b))?;
        self.position += 1;
        Some(byte)
    }

    fn error(&self, reason: &str) -> TemporalError {
        TemporalError::parse().with_message(format!(
            "Text '{}' could not be parsed at index {}: {reason}",
            self.source, self.position
        ))
    }

    /// Parses a sign, returning -1 for `-` and 1 otherwise.
    fn sign(&mut self) -> i32 {
        match self.next_if(|b| b == b'+' || b == b'-') {
            Some(b'-') => -1,
            _ => 1,
        }
    }

    /// Parses `[±]digits` followed by a designator.
    fn component(&mut self) -> TemporalResult<Option<(i32, u8)>> {
        if self.peek().is_none() {
            return Ok(None);
        }
        let sign = self.sign();
        let start = self.position;
        let mut value: i32 = 0;
        while let Some(digit) = self.next_if(|b| b.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i32::from(digit - b'0')))
                .ok_or_else(|| self.error("component overflows"))?;
        }
        if self.position == start {
            return Err(self.error("expected digits"));
        }
        let designator = self
            .next_if(|b| b.is_ascii_alphabetic())
            .ok_or_else(|| self.error("expected a designator"))?;
        Ok(Some((sign * value, designator.to_ascii_uppercase())))
    }
}

impl FromStr for Period {
    type Err = TemporalError;

    /// Parses `[±]P[±nY][±nM][±nW][±nD]`. Each component may carry its own
    /// sign, and weeks become 7 days.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = PeriodCursor::new(s);
        let sign = cursor.sign();
        if cursor.next_if(|b| b == b'P' || b == b'p').is_none() {
            return Err(cursor.error("expected 'P'"));
        }

        let mut period = Self::ZERO;
        let mut weeks = 0;
        let mut last_order = 0;
        let mut found = false;
        while let Some((value, designator)) = cursor.component()? {
            let order = match designator {
                b'Y' => 1,
                b'M' => 2,
                b'W' => 3,
                b'D' => 4,
                b'T' | b'H' | b'S' => {
                    return Err(cursor.error("time components are not part of a period"))
                }
                _ => return Err(cursor.error("unknown designator")),
            };
            if order <= last_order {
                return Err(cursor.error("components are out of order"));
            }
            last_order = order;
            found = true;
            match order {
                1 => period.years = value,
                2 => period.months = value,
                3 => weeks = value,
                _ => period.days = value,
            }
        }
        if !found {
            return Err(cursor.error("a period requires at least one component"));
        }

        let week_days = Self::from_weeks(weeks).map_err(|_| cursor.error("weeks overflow"))?;
        let period = period
            .checked_add(&week_days)
            .map_err(|_| cursor.error("days overflow"))?;
        if sign < 0 {
            period.negated().map_err(|_| cursor.error("period overflows"))
        } else {
            Ok(period)
        }
    }
}
