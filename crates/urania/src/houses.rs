//! House placement of ecliptic longitudes.

use crate::ephemeris::types::{Body, BodyPosition, HouseCusp};
use crate::geometry;
use serde::{Deserialize, Serialize};

/// House (1-12) containing `longitude`, given 12 cusps in house order.
///
/// A cusp interval may straddle 0°; it then holds everything at or past its
/// own cusp or before the next one. Falls back to house 1 when no interval
/// matches, which only happens with malformed cusps.
pub fn house_of(longitude: f64, cusps: &[HouseCusp; 12]) -> u8 {
    let lon = geometry::normalize(longitude);
    for i in 0..12 {
        let cusp = cusps[i].longitude;
        let next = cusps[(i + 1) % 12].longitude;
        let inside = if cusp <= next {
            lon >= cusp && lon < next
        } else {
            lon >= cusp || lon < next
        };
        if inside {
            return (i + 1) as u8;
        }
    }
    1
}

/// House placement of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousePlacement {
    pub body: Body,
    pub house: u8,
}

pub fn place_bodies(bodies: &[BodyPosition], cusps: &[HouseCusp; 12]) -> Vec<HousePlacement> {
    bodies
        .iter()
        .map(|p| HousePlacement {
            body: p.body,
            house: house_of(p.longitude, cusps),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cusps(longitudes: [f64; 12]) -> [HouseCusp; 12] {
        let mut out = [HouseCusp { house: 1, longitude: 0.0 }; 12];
        for (i, lon) in longitudes.into_iter().enumerate() {
            out[i] = HouseCusp { house: (i + 1) as u8, longitude: lon };
        }
        out
    }

    #[test]
    fn test_equal_houses_from_zero() {
        let c = cusps([0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0]);
        assert_eq!(house_of(0.0, &c), 1);
        assert_eq!(house_of(29.99, &c), 1);
        assert_eq!(house_of(30.0, &c), 2);
        assert_eq!(house_of(359.0, &c), 12);
    }

    #[test]
    fn test_interval_wrapping_through_aries() {
        // house 3 runs from 350 to 20
        let c = cusps([290.0, 320.0, 350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0]);
        assert_eq!(house_of(355.0, &c), 3);
        assert_eq!(house_of(5.0, &c), 3);
        assert_eq!(house_of(20.0, &c), 4);
        assert_eq!(house_of(300.0, &c), 1);
        assert_eq!(house_of(275.0, &c), 12);
    }

    #[test]
    fn test_degenerate_cusps_fall_back_to_first_house() {
        let c = cusps([10.0; 12]);
        assert_eq!(house_of(100.0, &c), 1);
    }
}
