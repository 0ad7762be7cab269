mod common;

use common::{Motion, SyntheticProvider, MOON_SPEED};
use urania::aspects::AspectType;
use urania::ephemeris::julian;
use urania::ephemeris::{Body, Capabilities, EphemerisError, Sign};
use urania::events::{
    find_last_exact_aspect, find_moon_ingresses, void_of_course_periods, void_of_course_report,
};
use urania::events::search::PRECISION_DAYS;
use urania::geometry;

const MOON_START: f64 = 3.0;

fn epoch() -> f64 {
    julian::month_bounds(2024, 3).0
}

/// Moon on a uniform orbit against a motionless sky with the given target longitudes
fn sky(sun: f64, mercury: f64, rest: f64) -> SyntheticProvider {
    let provider = SyntheticProvider::new(epoch())
        .with(Body::Moon, Motion::linear(MOON_START, MOON_SPEED))
        .with_fixed(Body::Sun, sun)
        .with_fixed(Body::Mercury, mercury);
    Body::SLOW[2..]
        .iter()
        .fold(provider, |p, &body| p.with_fixed(body, rest))
}

/// Moon longitudes at which an exact Ptolemaic aspect to `target` occurs
fn aspect_points(target: f64) -> Vec<f64> {
    AspectType::PTOLEMAIC
        .iter()
        .flat_map(|t| {
            let angle = t.exact_angle();
            [geometry::normalize(target + angle), geometry::normalize(target - angle)]
        })
        .collect()
}

fn moon_at(jd: f64) -> f64 {
    geometry::normalize(MOON_START + MOON_SPEED * (jd - epoch()))
}

#[test]
fn test_ingresses_land_within_a_minute_of_the_boundary() {
    let provider = sky(100.0, 145.0, 215.0);
    let start = epoch();
    let end = start + 10.0;

    let ingresses = find_moon_ingresses(&provider, start, end).unwrap();
    // 131.76° of travel from 3°: Taurus through Leo
    assert_eq!(ingresses.len(), 4);

    for (k, ingress) in ingresses.iter().enumerate() {
        let boundary = 30.0 * (k as f64 + 1.0);
        let exact = start + (boundary - MOON_START) / MOON_SPEED;
        assert!(ingress.jd >= exact - 1e-9, "ingress {k} recorded before the boundary");
        assert!(ingress.jd - exact <= PRECISION_DAYS + 1e-9, "ingress {k} off by {}", ingress.jd - exact);
        assert_eq!(ingress.sign, Sign::from_index(k as u8 + 1));
    }
}

#[test]
fn test_last_exact_aspect_in_a_sign() {
    let provider = sky(100.0, 145.0, 215.0);
    let start = epoch();
    // Moon from 3° to 29.9° Aries: square Sun at 10°, trine Mercury at 25°
    let end = start + (29.9 - MOON_START) / MOON_SPEED;

    let hit = find_last_exact_aspect(&provider, &Capabilities::full(), start, end)
        .unwrap()
        .unwrap();
    assert_eq!(hit.body, Body::Mercury);
    assert_eq!(hit.aspect_type, AspectType::Trine);
    let exact = start + (25.0 - MOON_START) / MOON_SPEED;
    assert!((hit.jd - exact).abs() <= PRECISION_DAYS);
}

#[test]
fn test_no_aspect_in_window() {
    let provider = sky(215.0, 215.0, 215.0);
    let start = epoch();
    let end = start + (29.9 - MOON_START) / MOON_SPEED;
    let hit = find_last_exact_aspect(&provider, &Capabilities::full(), start, end).unwrap();
    assert!(hit.is_none());
}

#[test]
fn test_periods_are_ordered_and_disjoint() {
    let provider = sky(100.0, 145.0, 215.0);
    let (month_start, month_end) = julian::month_bounds(2024, 3);

    let periods = void_of_course_periods(&provider, &Capabilities::full(), 2024, 3).unwrap();
    assert!(periods.len() >= 13, "only {} periods", periods.len());

    for period in &periods {
        assert!(period.start_jd <= period.end_jd);
        assert!(period.end_jd >= month_start && period.start_jd <= month_end);
        assert!(!period.approximate);
        assert!(period.last_aspect_type.is_ptolemaic());
        assert_eq!(period.start, julian::julian_day_to_datetime(period.start_jd));
    }
    for pair in periods.windows(2) {
        assert!(pair[0].end_jd <= pair[1].start_jd);
    }
}

#[test]
fn test_period_starts_at_the_last_aspect_of_the_sign() {
    let targets = [100.0, 145.0, 215.0];
    let provider = sky(targets[0], targets[1], targets[2]);
    let points: Vec<f64> = targets.iter().flat_map(|t| aspect_points(*t)).collect();

    let periods = void_of_course_periods(&provider, &Capabilities::full(), 2024, 3).unwrap();
    for period in &periods {
        let sign = (period.end_sign.index() + 11) % 12;
        let last = points
            .iter()
            .copied()
            .filter(|p| geometry::sign_index(*p) == sign)
            .fold(f64::MIN, f64::max);
        let moon = moon_at(period.start_jd);
        assert!(
            geometry::distance(moon, last) < 0.02,
            "period ending in {} starts with the Moon at {moon}, expected {last}",
            period.end_sign
        );
        // the Moon leaves the sign when the period ends
        assert_eq!(geometry::sign_index(moon_at(period.end_jd)), period.end_sign.index());
    }
}

#[test]
fn test_sign_without_aspects_is_approximate() {
    // aspects only at 215 ± {0, 60, 90, 120, 180}: nothing in Aries
    let provider = sky(215.0, 215.0, 215.0);
    let periods = void_of_course_periods(&provider, &Capabilities::full(), 2024, 3).unwrap();

    let into_taurus: Vec<_> = periods
        .iter()
        .enumerate()
        .filter(|(_, p)| p.end_sign == Sign::Taurus)
        .collect();
    assert!(!into_taurus.is_empty());

    for (i, period) in into_taurus {
        assert!(period.approximate);
        assert_eq!(period.last_aspect_body, Body::Moon);
        assert_eq!(period.last_aspect_type, AspectType::Conjunction);
        if i > 0 {
            // starts where the Moon entered Aries
            assert_eq!(period.start_jd, periods[i - 1].end_jd);
        }
    }

    assert!(periods
        .iter()
        .filter(|p| !p.approximate)
        .all(|p| p.last_aspect_type.is_ptolemaic() && p.last_aspect_body != Body::Moon));
}

#[test]
fn test_invalid_month() {
    let provider = sky(100.0, 145.0, 215.0);
    let err = void_of_course_report(&provider, &Capabilities::full(), 2024, 13).unwrap_err();
    assert!(matches!(err, EphemerisError::InvalidMonth { month: 13, .. }));
}

#[test]
fn test_missing_target_propagates() {
    let provider = SyntheticProvider::new(epoch())
        .with(Body::Moon, Motion::linear(MOON_START, MOON_SPEED))
        .with_fixed(Body::Sun, 100.0);
    let err = void_of_course_periods(&provider, &Capabilities::full(), 2024, 3).unwrap_err();
    assert!(matches!(err, EphemerisError::CalculationFailed { .. }));
}
