//! Ecliptic angle arithmetic.
//!
//! Every helper here is wraparound-safe: inputs may be any finite degree value,
//! outputs are folded back onto the circle.

/// Degrees spanned by one zodiac sign
pub const SIGN_SPAN: f64 = 30.0;

/// Normalize a longitude into [0, 360)
pub fn normalize(longitude: f64) -> f64 {
    let lon = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}

/// Sign index (0-11) of a longitude
pub fn sign_index(longitude: f64) -> u8 {
    ((normalize(longitude) / SIGN_SPAN).floor() as u8).min(11)
}

/// Degree within the sign (0-30)
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize(longitude) % SIGN_SPAN
}

/// Shortest angular distance between two longitudes, in [0, 180]
pub fn distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Signed difference `a - b` folded into (-180, 180]
pub fn signed_difference(a: f64, b: f64) -> f64 {
    let diff = normalize(a - b);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Midpoint of two longitudes on the shorter arc between them.
///
/// `short_midpoint(350.0, 10.0)` is `0.0`, never `180.0`.
pub fn short_midpoint(a: f64, b: f64) -> f64 {
    let a = normalize(a);
    let diff = signed_difference(normalize(b), a);
    normalize(a + diff / 2.0)
}

/// Signed deviation of the pair `(a, b)` from an exact aspect angle.
///
/// Zero exactly when the pair is at `exact_angle` and continuous through that
/// zero, so a sign change between two samples brackets the exact moment. For
/// 0° and 180° the unsigned distance never changes sign, so the folded signed
/// separation is used instead.
pub fn aspect_deviation(a: f64, b: f64, exact_angle: f64) -> f64 {
    let separation = signed_difference(a, b);
    if exact_angle <= 0.0 {
        separation
    } else if exact_angle >= 180.0 {
        signed_difference(separation, 180.0)
    } else {
        separation.abs() - exact_angle
    }
}
