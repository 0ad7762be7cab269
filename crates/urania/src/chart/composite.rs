//! Composite-chart midpoints.
//!
//! Longitudes meet on the shorter arc; latitude and speed are plain means.

use crate::ephemeris::types::{BodyPosition, ChartAngles, GeoLocation};
use crate::geometry::short_midpoint;

/// Midpoint of two positions of the same body
pub fn midpoint_position(a: &BodyPosition, b: &BodyPosition) -> BodyPosition {
    BodyPosition::new(
        a.body,
        short_midpoint(a.longitude, b.longitude),
        (a.latitude + b.latitude) / 2.0,
        (a.speed + b.speed) / 2.0,
    )
}

/// Composite body set, in the order of `chart_a`.
///
/// A body present only in `chart_a` is carried over unchanged; one present
/// only in `chart_b` is dropped.
pub fn composite_bodies(chart_a: &[BodyPosition], chart_b: &[BodyPosition]) -> Vec<BodyPosition> {
    chart_a
        .iter()
        .map(|a| match chart_b.iter().find(|b| b.body == a.body) {
            Some(b) => midpoint_position(a, b),
            None => a.clone(),
        })
        .collect()
}

/// Composite angles: midpoints of each angle, descendant and IC re-derived,
/// part of fortune recomputed from the composite luminaries
pub fn composite_angles(a: &ChartAngles, b: &ChartAngles, bodies: &[BodyPosition]) -> ChartAngles {
    let mut angles = ChartAngles::new(
        short_midpoint(a.asc, b.asc),
        short_midpoint(a.mc, b.mc),
        short_midpoint(a.vertex, b.vertex),
        short_midpoint(a.east_point, b.east_point),
    );
    angles.apply_part_of_fortune(bodies);
    angles
}

/// Geographic midpoint used for composite house cusps
pub fn midpoint_location(a: &GeoLocation, b: &GeoLocation) -> GeoLocation {
    let lon = short_midpoint(a.lon, b.lon);
    GeoLocation {
        lat: (a.lat + b.lat) / 2.0,
        // keep east/west sign convention
        lon: if lon > 180.0 { lon - 360.0 } else { lon },
    }
}
