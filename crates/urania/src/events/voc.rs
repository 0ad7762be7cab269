//! Void-of-course Moon finder.
//!
//! Two root-finding passes over a window padded by three days on each side of
//! the month:
//!
//! 1. Moon sign ingresses, from a two-hour coarse scan of the Moon's sign index
//!    refined by bisection to one minute.
//! 2. For each sign the Moon passes through, the last exact Ptolemaic aspect it
//!    makes to Sun..Pluto, found the same way.
//!
//! The void-of-course period runs from that last aspect to the next ingress.

use crate::aspects::AspectType;
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::julian;
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{Body, Capabilities, Sign};
use crate::events::search::{bisect, sample_times, COARSE_STEP_DAYS, PRECISION_DAYS};
use crate::events::types::{ReportMeta, VocPeriod, VocReport};
use crate::geometry;
use log::debug;

/// Padding around the requested month, in days
pub const BUFFER_DAYS: f64 = 3.0;

/// Both samples must lie this close to exact for a crossing to count
pub const CAPTURE_WINDOW: f64 = 15.0;

/// Bodies the Moon's last aspect is searched against
pub const TARGET_BODIES: [Body; 9] = Body::SLOW;

/// Moment the Moon enters a new sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonIngress {
    pub jd: f64,
    pub sign: Sign,
}

/// An exact Moon aspect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectHit {
    pub jd: f64,
    pub body: Body,
    pub aspect_type: AspectType,
}

fn moon_longitude<P: PositionProvider + ?Sized>(provider: &P, jd: f64) -> Result<f64, EphemerisError> {
    Ok(provider.position_at(jd, Body::Moon)?.lon)
}

fn moon_sign<P: PositionProvider + ?Sized>(provider: &P, jd: f64) -> Result<u8, EphemerisError> {
    moon_longitude(provider, jd).map(geometry::sign_index)
}

/// Moon sign ingresses between `start` and `end`, each located to one minute.
///
/// The recorded instant is the late end of the final bracket, so the Moon is
/// already in the new sign at `jd`.
pub fn find_moon_ingresses<P: PositionProvider + ?Sized>(
    provider: &P,
    start: f64,
    end: f64,
) -> Result<Vec<MoonIngress>, EphemerisError> {
    let mut ingresses = Vec::new();
    let times = sample_times(start, end, COARSE_STEP_DAYS);

    let mut prev_t = start;
    let mut prev_sign = moon_sign(provider, start)?;
    for &t in &times[1..] {
        let sign = moon_sign(provider, t)?;
        if sign != prev_sign {
            let from = prev_sign;
            let (_, hi) = bisect(prev_t, t, PRECISION_DAYS, |mid| {
                Ok(moon_sign(provider, mid)? == from)
            })?;
            ingresses.push(MoonIngress {
                jd: hi,
                sign: Sign::from_index(sign),
            });
        }
        prev_t = t;
        prev_sign = sign;
    }

    Ok(ingresses)
}

/// Latest exact Ptolemaic aspect the Moon makes to a target body in `[start, end]`
pub fn find_last_exact_aspect<P: PositionProvider + ?Sized>(
    provider: &P,
    capabilities: &Capabilities,
    start: f64,
    end: f64,
) -> Result<Option<AspectHit>, EphemerisError> {
    let targets: Vec<Body> = TARGET_BODIES
        .into_iter()
        .filter(|b| capabilities.supports(*b))
        .collect();
    let times = sample_times(start, end, COARSE_STEP_DAYS);

    let mut latest: Option<AspectHit> = None;
    let mut prev_t = start;
    let mut prev_moon = moon_longitude(provider, start)?;
    let mut prev_targets = Vec::with_capacity(targets.len());
    for &body in &targets {
        prev_targets.push(provider.position_at(start, body)?.lon);
    }

    for &t in &times[1..] {
        let moon = moon_longitude(provider, t)?;

        for (i, &body) in targets.iter().enumerate() {
            let target = provider.position_at(t, body)?.lon;

            for aspect_type in AspectType::PTOLEMAIC {
                let angle = aspect_type.exact_angle();
                let prev_dev = geometry::aspect_deviation(prev_moon, prev_targets[i], angle);
                let dev = geometry::aspect_deviation(moon, target, angle);

                if prev_dev.abs() > CAPTURE_WINDOW || dev.abs() > CAPTURE_WINDOW {
                    continue;
                }
                if prev_dev * dev >= 0.0 {
                    continue;
                }

                let before_negative = prev_dev < 0.0;
                let (lo, hi) = bisect(prev_t, t, PRECISION_DAYS, |mid| {
                    let dev = geometry::aspect_deviation(
                        moon_longitude(provider, mid)?,
                        provider.position_at(mid, body)?.lon,
                        angle,
                    );
                    Ok(if before_negative { dev < 0.0 } else { dev >= 0.0 })
                })?;
                let jd = 0.5 * (lo + hi);

                if latest.map_or(true, |hit| jd > hit.jd) {
                    latest = Some(AspectHit {
                        jd,
                        body,
                        aspect_type,
                    });
                }
            }

            prev_targets[i] = target;
        }

        prev_t = t;
        prev_moon = moon;
    }

    Ok(latest)
}

/// Void-of-course periods that overlap the calendar month.
///
/// A sign in which no aspect crossing is found (only possible for the
/// segment clipped by the start of the search window) still yields a period:
/// it starts at the segment start and is marked `approximate`, with the
/// Moon/conjunction placeholder as its last aspect.
pub fn void_of_course_periods<P: PositionProvider + ?Sized>(
    provider: &P,
    capabilities: &Capabilities,
    year: i32,
    month: u32,
) -> Result<Vec<VocPeriod>, EphemerisError> {
    if !(1..=12).contains(&month) {
        return Err(EphemerisError::InvalidMonth { year, month });
    }

    let (month_start, month_end) = julian::month_bounds(year, month);
    let window_start = month_start - BUFFER_DAYS;
    let window_end = month_end + BUFFER_DAYS;

    let ingresses = find_moon_ingresses(provider, window_start, window_end)?;
    debug!("{year}-{month:02}: {} moon ingresses in search window", ingresses.len());

    let mut periods = Vec::new();
    let mut segment_start = window_start;
    for ingress in &ingresses {
        let hit = find_last_exact_aspect(provider, capabilities, segment_start, ingress.jd)?;
        let period_start = segment_start;
        segment_start = ingress.jd;

        let (start_jd, body, aspect_type, approximate) = match hit {
            Some(hit) => (hit.jd, hit.body, hit.aspect_type, false),
            None => (period_start, Body::Moon, AspectType::Conjunction, true),
        };

        if ingress.jd < month_start || start_jd > month_end {
            continue;
        }

        periods.push(VocPeriod {
            start: julian::julian_day_to_datetime(start_jd),
            end: julian::julian_day_to_datetime(ingress.jd),
            start_jd,
            end_jd: ingress.jd,
            last_aspect_body: body,
            last_aspect_type: aspect_type,
            end_sign: ingress.sign,
            approximate,
        });
    }

    debug!("{year}-{month:02}: {} void-of-course periods", periods.len());
    Ok(periods)
}

/// Void-of-course report for one month
pub fn void_of_course_report<P: PositionProvider + ?Sized>(
    provider: &P,
    capabilities: &Capabilities,
    year: i32,
    month: u32,
) -> Result<VocReport, EphemerisError> {
    Ok(VocReport {
        year,
        month,
        periods: void_of_course_periods(provider, capabilities, year, month)?,
        meta: ReportMeta::now(),
    })
}
