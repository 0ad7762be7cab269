//! Julian Day conversions (proleptic Gregorian calendar, Universal Time).

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day for a calendar date plus decimal hours.
///
/// `hour` may exceed 24 or be negative; the excess rolls into neighbouring days.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let month = month as i64;
    let a = (14 - month) / 12;
    let y = year as i64 + 4800 - a;
    let m = month + 12 * a - 3;
    let jdn = day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045;
    jdn as f64 - 0.5 + hour / 24.0
}

pub fn julian_day_from_date(date: NaiveDate, hour: f64) -> f64 {
    julian_day(date.year(), date.month(), date.day(), hour)
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    julian_day(dt.year(), dt.month(), dt.day(), hour)
}

/// Julian Day for a local civil date and time.
///
/// An unknown time of day defaults to local noon.
pub fn local_julian_day(date: NaiveDate, time: Option<NaiveTime>, utc_offset_minutes: i32) -> f64 {
    let local_hours = time
        .map(|t| t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0)
        .unwrap_or(12.0);
    let utc_hours = local_hours - utc_offset_minutes as f64 / 60.0;
    julian_day_from_date(date, utc_hours)
}

/// Convert a Julian Day to a UTC datetime, rounded to the nearest second
pub fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let seconds = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Every calendar date of the month, or `None` for an invalid month
pub fn dates_in_month(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take(days_in_month(year, month) as usize)
            .collect(),
    )
}

/// Julian Days of the first instant of the month and of midnight after its last day
pub fn month_bounds(year: i32, month: u32) -> (f64, f64) {
    let start = julian_day(year, month, 1, 0.0);
    let end = julian_day(year, month, days_in_month(year, month), 24.0);
    (start, end)
}
