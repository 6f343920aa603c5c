//! Gregorian calendar equations shared by the providers and `tempora`.
//!
//! Conversions between dates and epoch days use the Euclidean affine
//! functions of Cassio Neri and Lorenz Schneider, [Euclidean affine
//! functions and their application to calendar algorithms][eaf]. The
//! computational calendar starts on March 1st so that the leap day is
//! the last day of the year, and the input is shifted by whole 400 year
//! cycles to keep the intermediate values positive.
//!
//! [eaf]: https://onlinelibrary.wiley.com/doi/full/10.1002/spe.3172

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days from 0000-03-01 (the computational epoch) to 1970-01-01.
const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;
/// Number of 400 year cycles added to every input, placing the Unix epoch
/// near the middle of the supported range.
const SHIFT_CONSTANT: i64 = 3670;

const TWO_POWER_THIRTY_NINE: u32 = 39;
const TWO_POWER_SIXTEEN: u32 = 16;

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar.
#[inline]
pub const fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `month` of `year`.
///
/// `month` must be in `1..=12`; any other value returns 0.
#[inline]
pub const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns the number of days in `year`.
#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

/// Returns the days since 1970-01-01 of the given Gregorian date.
///
/// The date is not validated.
pub const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let j = (month <= 2) as i64;
    let computational_year = year as i64 + 400 * SHIFT_CONSTANT - j;
    let computational_month = month as i64 + 12 * j;
    let computational_day = day as i64 - 1;

    let century = computational_year.div_euclid(100);
    let year_days = (1461 * computational_year).div_euclid(4) - century + century.div_euclid(4);
    let month_days = (979 * computational_month - 2919).div_euclid(32);

    year_days + month_days + computational_day
        - (SHIFT_CONSTANT * DAYS_IN_A_400Y_CYCLE + EPOCH_COMPUTATIONAL_RATA_DIE)
}

/// Returns the Gregorian `(year, month, day)` for days since 1970-01-01.
pub const fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let rata_die = epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE + DAYS_IN_A_400Y_CYCLE * SHIFT_CONSTANT;

    // Century and day of century.
    let n_one = 4 * rata_die + 3;
    let century = n_one.div_euclid(DAYS_IN_A_400Y_CYCLE);
    let n_two = n_one.rem_euclid(DAYS_IN_A_400Y_CYCLE) as u64 | 3;

    // Year of century and day of year.
    let year_of_century = (376_287_347 * n_two) >> TWO_POWER_THIRTY_NINE;
    let day_of_year = (n_two - 1461 * year_of_century) / 4;

    // Month and day of month.
    let n_three = 2141 * day_of_year + 197_913;
    let computational_month = n_three >> TWO_POWER_SIXTEEN;
    let computational_day = (n_three & 0xFFFF) / 2141;

    // January and February belong to the next Gregorian year.
    let j = (day_of_year >= 306) as i64;
    let year = 100 * century + year_of_century as i64 + j - 400 * SHIFT_CONSTANT;
    let month = computational_month as i64 - 12 * j;

    (year as i32, month as u8, computational_day as u8 + 1)
}

/// Returns the day of the week for days since 1970-01-01, with Sunday as 0.
#[inline]
pub const fn weekday_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}

/// Returns the days since 1970-01-01 containing `epoch_seconds`.
#[inline]
pub const fn epoch_seconds_to_epoch_days(epoch_seconds: i64) -> i64 {
    epoch_seconds.div_euclid(SECONDS_PER_DAY)
}
