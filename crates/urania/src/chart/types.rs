use crate::aspects::Aspect;
use crate::ephemeris::julian;
use crate::ephemeris::types::{BodyPosition, ChartAngles, GeoLocation, HouseCusp, HouseSystem};
use crate::events::types::SCHEMA_VERSION;
use crate::houses::HousePlacement;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Moment and place of a chart, in local civil time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub date: NaiveDate,
    /// `None` when the time of day is unknown; houses are then skipped
    pub time: Option<NaiveTime>,
    pub utc_offset_minutes: i32,
    pub location: GeoLocation,
    #[serde(default)]
    pub house_system: HouseSystem,
}

impl ChartRequest {
    pub fn julian_day(&self) -> f64 {
        julian::local_julian_day(self.date, self.time, self.utc_offset_minutes)
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub schema_version: u32,
    pub calculated_at: DateTime<Utc>,
    pub house_system: HouseSystem,
    pub julian_day: f64,
}

impl ChartMeta {
    pub fn new(house_system: HouseSystem, julian_day: f64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            calculated_at: Utc::now(),
            house_system,
            julian_day,
        }
    }
}

/// A single chart: natal, transit, progressed or composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub bodies: Vec<BodyPosition>,
    pub houses: Option<[HouseCusp; 12]>,
    pub angles: Option<ChartAngles>,
    /// House of each body; empty without houses
    pub placements: Vec<HousePlacement>,
    pub aspects: Vec<Aspect>,
    pub meta: ChartMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynastryChart {
    pub person_a: NatalChart,
    pub person_b: NatalChart,
    pub cross_aspects: Vec<Aspect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripleCrossAspects {
    pub natal_to_progressed: Vec<Aspect>,
    pub natal_to_transit: Vec<Aspect>,
    pub progressed_to_transit: Vec<Aspect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripleChart {
    pub natal: NatalChart,
    pub progressed: NatalChart,
    pub transit: NatalChart,
    pub cross_aspects: TripleCrossAspects,
}
