//! The `tempora` crate is a library of calendar-correct, immutable date and
//! time values.
//!
//! ```rust
//! use tempora::{LocalDate, Period};
//!
//! let date = LocalDate::try_new(2014, 4, 30).unwrap();
//! let later = date.plus_period(&Period::of(1, 2, 3)).unwrap();
//! assert_eq!(later.to_string(), "2015-07-03");
//!
//! let between = Period::between(&date, &LocalDate::try_new(2015, 6, 2).unwrap());
//! assert_eq!(between.to_string(), "P1Y1M3D");
//! assert_eq!(between.to_total_months(), 13);
//! ```
//!
//! The library models the proleptic Gregorian calendar. Wall-clock values
//! ([`LocalDate`], [`LocalTime`], [`LocalDateTime`]) carry no zone. Exact
//! amounts of elapsed time are a [`Duration`], calendar amounts are a
//! [`Period`]. Values on the time-line are an [`Instant`], an
//! [`OffsetDateTime`] with a fixed [`ZoneOffset`] or a [`ZonedDateTime`]
//! whose offset follows the rules of a [`ZoneId`].
//!
//! Zone rules are sourced from a
//! [`ZoneRulesProvider`](tempora_provider::provider::ZoneRulesProvider).
//! Methods ending in `_with_provider` take one explicitly, while the
//! `compiled_data` feature adds conveniences backed by the bundled
//! time zone database.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_panics_doc
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod calendar;
pub mod error;
pub mod host;
pub mod options;
pub mod parsers;

#[cfg(feature = "sys")]
pub mod sys;

mod builtins;
pub(crate) mod iso;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::TemporalError;

/// The `tempora` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

/// Re-export of the provider crate.
pub use tempora_provider as provider;

pub use crate::builtins::{
    core::{
        zone::{LocalOffsets, ZoneOffsetTransition, ZoneRules},
        Duration, Instant, LocalDate, LocalDateTime, LocalTime, Now, OffsetDateTime, Period,
        ZoneId, ZoneOffset, ZonedDateTime,
    },
};

pub use calendar::Weekday;
pub use options::{Disambiguation, Unit};
pub use parsers::pattern::DateTimeFormatter;

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err(TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err(TemporalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    pub(crate) fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

// Relevant numeric constants
/// Nanoseconds per second constant: 1e+9
pub const NS_PER_SECOND: i64 = 1_000_000_000;
/// Seconds per day constant: 86,400
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: i64 = SECONDS_PER_DAY * NS_PER_SECOND;
