//! Position provider seam.
//!
//! The engine never computes raw positions itself. Anything that can answer
//! "where is this body at this Julian Day" and "what are the house cusps here"
//! can drive it: the Swiss Ephemeris adapter in production, analytic models in
//! tests.

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{Body, BodyPosition, Capabilities, HouseFrame, HouseSystem, RawPosition};
use log::trace;

pub trait PositionProvider {
    /// Raw position of `body` at `jd` (Universal Time)
    fn position_at(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError>;

    /// House cusps and angles for a moment and place
    fn houses_at(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;

    /// Capabilities probed when the provider was created
    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn position_at(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        (**self).position_at(jd, body)
    }

    fn houses_at(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).houses_at(jd, lat, lon, system)
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }
}

/// Position of a single body with derived sign data
pub fn body_position<P: PositionProvider + ?Sized>(
    provider: &P,
    jd: f64,
    body: Body,
) -> Result<BodyPosition, EphemerisError> {
    provider
        .position_at(jd, body)
        .map(|raw| BodyPosition::from_raw(body, raw))
}

/// Positions for a set of bodies.
///
/// Optional bodies are left out when `capabilities` says their files are
/// missing, or when the provider reports them unavailable. Any other failure
/// aborts the whole computation.
pub fn body_positions<P: PositionProvider + ?Sized>(
    provider: &P,
    capabilities: &Capabilities,
    jd: f64,
    bodies: &[Body],
) -> Result<Vec<BodyPosition>, EphemerisError> {
    let mut positions = Vec::with_capacity(bodies.len());
    for &body in bodies {
        if !capabilities.supports(body) {
            continue;
        }
        match body_position(provider, jd, body) {
            Ok(position) => positions.push(position),
            Err(EphemerisError::BodyUnavailable { .. }) if body.is_optional() => {
                trace!("omitting {body} at JD {jd}: unavailable");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(positions)
}
