use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{Body, Capabilities, HouseCusp, HouseFrame, HouseSystem, RawPosition};
use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex};

/// FLG_SWIEPH: use Swiss Ephemeris files
const FLG_SWIEPH: i32 = 2;
/// FLG_SPEED: also compute daily motion
const FLG_SPEED: i32 = 256;
const CALC_FLAGS: i32 = FLG_SWIEPH | FLG_SPEED;

/// J2000.0, used to probe for the supplementary asteroid files
const PROBE_JD: f64 = 2_451_545.0;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    capabilities: Capabilities,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    /// The availability of the asteroid files is probed once here and never
    /// re-checked.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // The C library reads SE_EPHE_PATH on its first calculation
        env::set_var("SE_EPHE_PATH", &path);

        let capabilities = Capabilities {
            extra_bodies: probe_extra_bodies(),
        };
        if capabilities.extra_bodies {
            debug!("swiss ephemeris ready at {}", path.display());
        } else {
            warn!(
                "seas_*.se1 not found under {}: Chiron and asteroids will be omitted from results",
                path.display()
            );
        }

        Ok(Self {
            ephemeris_path: path,
            capabilities,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

fn probe_extra_bodies() -> bool {
    calc_ut(PROBE_JD, Body::Chiron.swiss_id() as u32, CALC_FLAGS as u32).is_ok()
}

impl PositionProvider for SwissEphemerisAdapter {
    fn position_at(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        if !self.capabilities.supports(body) {
            return Err(EphemerisError::BodyUnavailable { body });
        }

        let result = calc_ut(jd, body.swiss_id() as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(RawPosition {
            lon: out[0].rem_euclid(360.0),
            lat: out[1],
            speed_lon: out[3],
        })
    }

    fn houses_at(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(jd, 0, lat, lon, system.code() as i32);
        let vertex = a[3];
        let east_point = a[4];
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|v| !v.is_finite()) || !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                julian_day: jd,
                message: format!("non-finite cusps for {:?} at lat {lat}, lon {lon}", system),
            });
        }

        let mut frame_cusps = [HouseCusp { house: 1, longitude: 0.0 }; 12];
        for (i, value) in cusp_values.iter().enumerate() {
            frame_cusps[i] = HouseCusp {
                house: (i + 1) as u8,
                longitude: value.rem_euclid(360.0),
            };
        }

        Ok(HouseFrame {
            cusps: frame_cusps,
            asc: ascmc.ascendant.rem_euclid(360.0),
            mc: ascmc.mc.rem_euclid(360.0),
            vertex: vertex.rem_euclid(360.0),
            east_point: east_point.rem_euclid(360.0),
        })
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
