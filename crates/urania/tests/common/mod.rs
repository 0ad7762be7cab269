#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use urania::ephemeris::{
    Body, Capabilities, EphemerisError, HouseCusp, HouseFrame, HouseSystem, PositionProvider,
    RawPosition,
};
use urania::geometry;

/// Mean daily motion of the Moon
pub const MOON_SPEED: f64 = 13.176;
/// Mean daily motion of the Sun
pub const SUN_SPEED: f64 = 0.9856;

/// Quadratic motion: `lon0 + speed * dt + accel * dt² / 2`, `dt = jd - epoch`
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    pub lon0: f64,
    pub speed: f64,
    pub accel: f64,
}

impl Motion {
    pub fn fixed(lon0: f64) -> Self {
        Self::linear(lon0, 0.0)
    }

    pub fn linear(lon0: f64, speed: f64) -> Self {
        Self { lon0, speed, accel: 0.0 }
    }

    pub fn longitude_at(&self, dt: f64) -> f64 {
        geometry::normalize(self.lon0 + self.speed * dt + 0.5 * self.accel * dt * dt)
    }

    pub fn speed_at(&self, dt: f64) -> f64 {
        self.speed + self.accel * dt
    }
}

/// Analytic position provider.
///
/// Bodies move by their configured [`Motion`]; an unconfigured body fails
/// with `BodyUnavailable` when optional and `CalculationFailed` otherwise.
/// Houses are equal houses from an ascendant that sits 90° east of the
/// location's longitude, ignoring time.
pub struct SyntheticProvider {
    pub epoch: f64,
    motions: HashMap<Body, Motion>,
    capabilities: Capabilities,
    capability_probes: AtomicUsize,
    house_calls: AtomicUsize,
}

impl SyntheticProvider {
    pub fn new(epoch: f64) -> Self {
        Self {
            epoch,
            motions: HashMap::new(),
            capabilities: Capabilities::full(),
            capability_probes: AtomicUsize::new(0),
            house_calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, body: Body, motion: Motion) -> Self {
        self.motions.insert(body, motion);
        self
    }

    pub fn with_fixed(self, body: Body, lon: f64) -> Self {
        self.with(body, Motion::fixed(lon))
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn longitude(&self, jd: f64, body: Body) -> Option<f64> {
        self.motions.get(&body).map(|m| m.longitude_at(jd - self.epoch))
    }

    pub fn capability_probes(&self) -> usize {
        self.capability_probes.load(Ordering::SeqCst)
    }

    pub fn house_calls(&self) -> usize {
        self.house_calls.load(Ordering::SeqCst)
    }
}

impl PositionProvider for SyntheticProvider {
    fn position_at(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        let Some(motion) = self.motions.get(&body) else {
            return Err(if body.is_optional() {
                EphemerisError::BodyUnavailable { body }
            } else {
                EphemerisError::CalculationFailed {
                    body,
                    julian_day: jd,
                    message: "no motion configured".to_string(),
                }
            });
        };
        let dt = jd - self.epoch;
        Ok(RawPosition {
            lon: motion.longitude_at(dt),
            lat: 0.0,
            speed_lon: motion.speed_at(dt),
        })
    }

    fn houses_at(
        &self,
        _jd: f64,
        _lat: f64,
        lon: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        self.house_calls.fetch_add(1, Ordering::SeqCst);
        let asc = geometry::normalize(lon + 90.0);
        let mut cusps = [HouseCusp { house: 1, longitude: asc }; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            cusp.house = (i + 1) as u8;
            cusp.longitude = geometry::normalize(asc + 30.0 * i as f64);
        }
        Ok(HouseFrame {
            cusps,
            asc,
            mc: geometry::normalize(asc - 90.0),
            vertex: geometry::normalize(asc + 180.0),
            east_point: asc,
        })
    }

    fn capabilities(&self) -> Capabilities {
        self.capability_probes.fetch_add(1, Ordering::SeqCst);
        self.capabilities
    }
}

/// Every body of the engine's default set, motionless at distinct longitudes
pub fn static_sky(epoch: f64) -> SyntheticProvider {
    Body::ALL
        .into_iter()
        .enumerate()
        .fold(SyntheticProvider::new(epoch), |p, (i, body)| {
            p.with_fixed(body, 17.0 * i as f64 + 1.0)
        })
}
