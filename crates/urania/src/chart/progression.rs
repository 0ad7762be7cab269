//! Secondary progressions: one day after birth for each year of life.

use chrono::NaiveDate;

const DAYS_PER_YEAR: f64 = 365.25;

/// Julian Day of the progressed chart for `progressed_date`.
///
/// Elapsed years are counted between the civil dates only; the birth time is
/// already carried by `birth_jd`.
pub fn progressed_julian_day(birth_jd: f64, birth_date: NaiveDate, progressed_date: NaiveDate) -> f64 {
    birth_jd + years_elapsed(birth_date, progressed_date)
}

pub fn years_elapsed(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_years_is_about_thirty_days() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let target = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        let jd = progressed_julian_day(2_448_058.0, birth, target);
        // 10958 days / 365.25
        assert!((jd - 2_448_058.0 - 30.001_368_9).abs() < 1e-6);
    }

    #[test]
    fn test_progression_before_birth_runs_backwards() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        assert!(years_elapsed(birth, target) < 0.0);
    }
}
