use crate::aspects::{AspectCalculator, AspectSettings};
use crate::chart::composite;
use crate::chart::progression;
use crate::chart::types::{
    ChartMeta, ChartRequest, NatalChart, SynastryChart, TripleChart, TripleCrossAspects,
};
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::provider::{body_positions, PositionProvider};
use crate::ephemeris::types::{Body, Capabilities, GeoLocation, HouseSystem};
use crate::events::{self, EphemerisMonth, VocReport};
use crate::houses;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// What the engine computes: which bodies, which aspects, which orbs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub bodies: Vec<Body>,
    pub aspects: AspectSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            bodies: Body::ALL.to_vec(),
            aspects: AspectSettings::default(),
        }
    }
}

/// Chart and event computations over a position provider.
///
/// The provider's capabilities are read once at construction and reused for
/// every query.
pub struct ChartEngine<P> {
    provider: P,
    capabilities: Capabilities,
    settings: EngineSettings,
    calculator: AspectCalculator,
}

impl<P: PositionProvider> ChartEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, EngineSettings::default())
    }

    pub fn with_settings(provider: P, settings: EngineSettings) -> Self {
        let capabilities = provider.capabilities();
        let calculator = AspectCalculator::with_settings(settings.aspects.clone());
        Self {
            provider,
            capabilities,
            settings,
            calculator,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Chart at a Julian Day. Houses, angles and placements are filled in only
    /// when `location` is given.
    pub fn chart_at(
        &self,
        jd: f64,
        location: Option<GeoLocation>,
        system: HouseSystem,
    ) -> Result<NatalChart, EphemerisError> {
        let bodies = body_positions(&self.provider, &self.capabilities, jd, &self.settings.bodies)?;
        let aspects = self.calculator.detect_aspects(&bodies);

        let (houses, angles, placements) = match location {
            Some(loc) => {
                let frame = self.provider.houses_at(jd, loc.lat, loc.lon, system)?;
                let mut angles = frame.angles();
                angles.apply_part_of_fortune(&bodies);
                let placements = houses::place_bodies(&bodies, &frame.cusps);
                (Some(frame.cusps), Some(angles), placements)
            }
            None => (None, None, Vec::new()),
        };

        Ok(NatalChart {
            bodies,
            houses,
            angles,
            placements,
            aspects,
            meta: ChartMeta::new(system, jd),
        })
    }

    /// Birth chart; houses require a known birth time
    pub fn natal(&self, request: &ChartRequest) -> Result<NatalChart, EphemerisError> {
        let location = request.has_time().then_some(request.location);
        self.chart_at(request.julian_day(), location, request.house_system)
    }

    /// Chart for a transit moment
    pub fn transit(&self, request: &ChartRequest) -> Result<NatalChart, EphemerisError> {
        self.natal(request)
    }

    /// Secondary progressed chart for `progressed_date`, optionally cast for a
    /// new location
    pub fn progressed(
        &self,
        birth: &ChartRequest,
        progressed_date: NaiveDate,
        relocated: Option<GeoLocation>,
    ) -> Result<NatalChart, EphemerisError> {
        let jd = progression::progressed_julian_day(birth.julian_day(), birth.date, progressed_date);
        let location = birth
            .has_time()
            .then(|| relocated.unwrap_or(birth.location));
        self.chart_at(jd, location, birth.house_system)
    }

    pub fn synastry(
        &self,
        person_a: &ChartRequest,
        person_b: &ChartRequest,
    ) -> Result<SynastryChart, EphemerisError> {
        let person_a = self.natal(person_a)?;
        let person_b = self.natal(person_b)?;
        let cross_aspects = self
            .calculator
            .detect_cross_aspects(&person_a.bodies, &person_b.bodies);
        Ok(SynastryChart {
            person_a,
            person_b,
            cross_aspects,
        })
    }

    /// Natal, progressed and transit charts together. The three cross-aspect
    /// lists are only computed when `cross_aspects` is set.
    pub fn triple(
        &self,
        natal: &ChartRequest,
        progressed_date: NaiveDate,
        transit: &ChartRequest,
        cross_aspects: bool,
    ) -> Result<TripleChart, EphemerisError> {
        let natal_chart = self.natal(natal)?;
        let progressed = self.progressed(natal, progressed_date, None)?;
        let transit = self.transit(transit)?;

        let cross_aspects = if cross_aspects {
            TripleCrossAspects {
                natal_to_progressed: self
                    .calculator
                    .detect_cross_aspects(&natal_chart.bodies, &progressed.bodies),
                natal_to_transit: self
                    .calculator
                    .detect_cross_aspects(&natal_chart.bodies, &transit.bodies),
                progressed_to_transit: self
                    .calculator
                    .detect_cross_aspects(&progressed.bodies, &transit.bodies),
            }
        } else {
            TripleCrossAspects::default()
        };

        Ok(TripleChart {
            natal: natal_chart,
            progressed,
            transit,
            cross_aspects,
        })
    }

    /// Midpoint composite of two charts.
    ///
    /// Houses need both birth times: cusps are cast for the midpoint moment at
    /// the midpoint location, in person A's house system. Otherwise the chart
    /// has no houses and its Julian Day is 0.
    pub fn composite(
        &self,
        person_a: &ChartRequest,
        person_b: &ChartRequest,
    ) -> Result<NatalChart, EphemerisError> {
        let chart_a = self.natal(person_a)?;
        let chart_b = self.natal(person_b)?;

        let bodies = composite::composite_bodies(&chart_a.bodies, &chart_b.bodies);
        let aspects = self.calculator.detect_aspects(&bodies);
        let system = person_a.house_system;

        let (Some(angles_a), Some(angles_b)) = (&chart_a.angles, &chart_b.angles) else {
            return Ok(NatalChart {
                bodies,
                houses: None,
                angles: None,
                placements: Vec::new(),
                aspects,
                meta: ChartMeta::new(system, 0.0),
            });
        };

        let jd = (chart_a.meta.julian_day + chart_b.meta.julian_day) / 2.0;
        let location = composite::midpoint_location(&person_a.location, &person_b.location);
        let frame = self.provider.houses_at(jd, location.lat, location.lon, system)?;
        let angles = composite::composite_angles(angles_a, angles_b, &bodies);
        let placements = houses::place_bodies(&bodies, &frame.cusps);
        debug!("composite cast at JD {jd:.5} ({:.3}, {:.3})", location.lat, location.lon);

        Ok(NatalChart {
            bodies,
            houses: Some(frame.cusps),
            angles: Some(angles),
            placements,
            aspects,
            meta: ChartMeta::new(system, jd),
        })
    }

    /// Daily positions and events of the configured bodies for one month
    pub fn month_timeline(&self, year: i32, month: u32) -> Result<EphemerisMonth, EphemerisError> {
        events::month_timeline(
            &self.provider,
            &self.capabilities,
            year,
            month,
            &self.settings.bodies,
        )
    }

    pub fn void_of_course(&self, year: i32, month: u32) -> Result<VocReport, EphemerisError> {
        events::void_of_course_report(&self.provider, &self.capabilities, year, month)
    }
}
