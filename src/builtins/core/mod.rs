//! The primary date/time value types of `tempora`.
//!
//! Every method that needs zone rules takes a
//! [`ZoneRulesProvider`](tempora_provider::provider::ZoneRulesProvider) and
//! ends in `_with_provider`.

pub(crate) mod date;
pub(crate) mod datetime;
pub(crate) mod duration;
pub(crate) mod instant;
pub(crate) mod now;
pub(crate) mod offset;
pub(crate) mod offsetdatetime;
pub(crate) mod period;
pub(crate) mod time;
pub mod zone;
pub(crate) mod zoneddatetime;

#[doc(inline)]
pub use date::LocalDate;
#[doc(inline)]
pub use datetime::LocalDateTime;
#[doc(inline)]
pub use duration::Duration;
#[doc(inline)]
pub use instant::Instant;
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use offset::ZoneOffset;
#[doc(inline)]
pub use offsetdatetime::OffsetDateTime;
#[doc(inline)]
pub use period::Period;
#[doc(inline)]
pub use time::LocalTime;
#[doc(inline)]
pub use zone::ZoneId;
#[doc(inline)]
pub use zoneddatetime::ZonedDateTime;

use crate::{TemporalError, TemporalResult};

pub(crate) fn checked_neg(value: i64) -> TemporalResult<i64> {
    value
        .checked_neg()
        .ok_or_else(|| TemporalError::range().with_message("Amount cannot be negated"))
}
