use crate::aspects::AspectType;
use crate::ephemeris::types::{Body, BodyPosition, Sign};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Version of the report layouts below
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Ingress,
    StationRetrograde,
    StationDirect,
    ExactAspect,
}

/// A dated event found by the monthly scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemerisEvent {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub body: Body,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_type: Option<AspectType>,
}

/// Positions sampled for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisDay {
    pub date: NaiveDate,
    pub bodies: Vec<BodyPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub schema_version: u32,
    pub calculated_at: DateTime<Utc>,
}

impl ReportMeta {
    pub fn now() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            calculated_at: Utc::now(),
        }
    }
}

/// Daily positions and events for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<EphemerisDay>,
    pub events: Vec<EphemerisEvent>,
    pub meta: ReportMeta,
}

/// A void-of-course Moon interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub start_jd: f64,
    pub end_jd: f64,
    pub last_aspect_body: Body,
    pub last_aspect_type: AspectType,
    /// Sign the Moon enters when the period ends
    pub end_sign: Sign,
    /// No exact aspect was found in the sign; the period starts at the
    /// beginning of the searched segment and the aspect fields hold the
    /// Moon/conjunction placeholder
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub approximate: bool,
}

impl VocPeriod {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }
}

/// Void-of-course periods overlapping one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocReport {
    pub year: i32,
    pub month: u32,
    pub periods: Vec<VocPeriod>,
    pub meta: ReportMeta,
}
