//! Monthly ephemeris timeline.
//!
//! Positions are sampled once a day at 12:00 UT and consecutive days are
//! compared. Everything here is day-granular: an event is dated on the later
//! of the two days it was detected between, with no interpolation inside the
//! day.

use crate::aspects::AspectType;
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::julian;
use crate::ephemeris::provider::{body_positions, PositionProvider};
use crate::ephemeris::types::{Body, BodyPosition, Capabilities};
use crate::events::types::{EphemerisDay, EphemerisEvent, EphemerisMonth, EventKind, ReportMeta};
use crate::geometry;
use log::debug;

/// Hour of day (UT) at which each day is sampled
pub const REFERENCE_HOUR: f64 = 12.0;

/// Largest deviation from exact, on the earlier day, still reported as an exact aspect
pub const EXACT_ASPECT_ORB: f64 = 1.5;

/// Sample `bodies` daily across a month and detect its events
pub fn month_timeline<P: PositionProvider + ?Sized>(
    provider: &P,
    capabilities: &Capabilities,
    year: i32,
    month: u32,
    bodies: &[Body],
) -> Result<EphemerisMonth, EphemerisError> {
    let dates = julian::dates_in_month(year, month)
        .ok_or(EphemerisError::InvalidMonth { year, month })?;

    let mut days = Vec::with_capacity(dates.len());
    for date in dates {
        let jd = julian::julian_day_from_date(date, REFERENCE_HOUR);
        days.push(EphemerisDay {
            date,
            bodies: body_positions(provider, capabilities, jd, bodies)?,
        });
    }

    let events = detect_events(&days);
    debug!("{year}-{month:02}: {} events over {} days", events.len(), days.len());

    Ok(EphemerisMonth {
        year,
        month,
        days,
        events,
        meta: ReportMeta::now(),
    })
}

/// Events between each pair of consecutive sampled days
pub fn detect_events(days: &[EphemerisDay]) -> Vec<EphemerisEvent> {
    let mut events = Vec::new();

    for pair in days.windows(2) {
        let (today, tomorrow) = (&pair[0], &pair[1]);
        let date = tomorrow.date;

        for position in &today.bodies {
            let Some(next) = find(&tomorrow.bodies, position.body) else {
                continue;
            };
            body_events(position, next, date, &mut events);
        }

        exact_aspect_events(&today.bodies, &tomorrow.bodies, date, &mut events);
    }

    events
}

fn find(bodies: &[BodyPosition], body: Body) -> Option<&BodyPosition> {
    bodies.iter().find(|p| p.body == body)
}

fn body_events(
    today: &BodyPosition,
    tomorrow: &BodyPosition,
    date: chrono::NaiveDate,
    events: &mut Vec<EphemerisEvent>,
) {
    let body = today.body;
    let mut push = |kind: EventKind, detail: String| {
        events.push(EphemerisEvent {
            date,
            kind,
            body,
            detail,
            target_body: None,
            aspect_type: None,
        });
    };

    if today.sign != tomorrow.sign {
        push(EventKind::Ingress, format!("{body} enters {}", tomorrow.sign));
    }
    if today.speed >= 0.0 && tomorrow.speed < 0.0 {
        push(EventKind::StationRetrograde, format!("{body} stations retrograde"));
    }
    if today.speed < 0.0 && tomorrow.speed >= 0.0 {
        push(EventKind::StationDirect, format!("{body} stations direct"));
    }
}

/// Major aspects between slow bodies that perfect overnight
fn exact_aspect_events(
    today: &[BodyPosition],
    tomorrow: &[BodyPosition],
    date: chrono::NaiveDate,
    events: &mut Vec<EphemerisEvent>,
) {
    let slow: Vec<&BodyPosition> = today.iter().filter(|p| p.body.is_slow()).collect();

    for (i, a) in slow.iter().enumerate() {
        for b in &slow[i + 1..] {
            let (Some(next_a), Some(next_b)) = (find(tomorrow, a.body), find(tomorrow, b.body))
            else {
                continue;
            };

            for aspect_type in AspectType::MAJOR {
                let angle = aspect_type.exact_angle();
                let dev_today = geometry::aspect_deviation(a.longitude, b.longitude, angle);
                let dev_tomorrow = geometry::aspect_deviation(next_a.longitude, next_b.longitude, angle);

                if dev_today.abs() <= EXACT_ASPECT_ORB && dev_today * dev_tomorrow < 0.0 {
                    events.push(EphemerisEvent {
                        date,
                        kind: EventKind::ExactAspect,
                        body: a.body,
                        detail: format!("{} {} {}", a.body, aspect_type, b.body),
                        target_body: Some(b.body),
                        aspect_type: Some(aspect_type),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, bodies: Vec<BodyPosition>) -> EphemerisDay {
        EphemerisDay {
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            bodies,
        }
    }

    #[test]
    fn test_ingress_is_dated_on_the_later_day() {
        let days = vec![
            day(1, vec![BodyPosition::new(Body::Sun, 29.5, 0.0, 1.0)]),
            day(2, vec![BodyPosition::new(Body::Sun, 30.5, 0.0, 1.0)]),
        ];
        let events = detect_events(&days);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Ingress);
        assert_eq!(events[0].date, days[1].date);
        assert_eq!(events[0].detail, "SUN enters TAU");
    }

    #[test]
    fn test_stations() {
        let days = vec![
            day(1, vec![BodyPosition::new(Body::Mercury, 100.0, 0.0, 0.02), BodyPosition::new(Body::Mars, 200.0, 0.0, -0.01)]),
            day(2, vec![BodyPosition::new(Body::Mercury, 100.01, 0.0, -0.01), BodyPosition::new(Body::Mars, 200.0, 0.0, 0.0)]),
        ];
        let kinds: Vec<(Body, EventKind)> = detect_events(&days).iter().map(|e| (e.body, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![(Body::Mercury, EventKind::StationRetrograde), (Body::Mars, EventKind::StationDirect)]
        );
    }

    #[test]
    fn test_exact_square_between_slow_bodies() {
        let days = vec![
            day(1, vec![BodyPosition::new(Body::Venus, 10.0, 0.0, 1.2), BodyPosition::new(Body::Saturn, 100.5, 0.0, 0.05)]),
            day(2, vec![BodyPosition::new(Body::Venus, 11.2, 0.0, 1.2), BodyPosition::new(Body::Saturn, 100.55, 0.0, 0.05)]),
        ];
        let events = detect_events(&days);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aspect_type, Some(AspectType::Square));
        assert_eq!(events[0].target_body, Some(Body::Saturn));
        assert_eq!(events[0].detail, "VENUS SQUARE SATURN");
    }

    #[test]
    fn test_moon_never_produces_exact_aspects() {
        let days = vec![
            day(1, vec![BodyPosition::new(Body::Moon, 99.0, 0.0, 13.0), BodyPosition::new(Body::Jupiter, 100.0, 0.0, 0.1)]),
            day(2, vec![BodyPosition::new(Body::Moon, 101.0, 0.0, 13.0), BodyPosition::new(Body::Jupiter, 100.1, 0.0, 0.1)]),
        ];
        assert!(detect_events(&days).is_empty());
    }

    #[test]
    fn test_conjunction_crossing_is_detected() {
        let days = vec![
            day(1, vec![BodyPosition::new(Body::Sun, 99.0, 0.0, 1.0), BodyPosition::new(Body::Jupiter, 100.0, 0.0, 0.1)]),
            day(2, vec![BodyPosition::new(Body::Sun, 100.0, 0.0, 1.0), BodyPosition::new(Body::Jupiter, 99.9, 0.0, 0.1)]),
        ];
        let events = detect_events(&days);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aspect_type, Some(AspectType::Conjunction));
    }
}
