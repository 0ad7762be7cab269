use crate::ephemeris::error::EphemerisError;
use crate::geometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Celestial bodies tracked by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    TrueNode,
    Chiron,
    MeanNode,
    MeanLilith,
    TrueLilith,
    Pholus,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

impl Body {
    /// All bodies, in report order
    pub const ALL: [Body; 20] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::TrueNode,
        Body::Chiron,
        Body::MeanNode,
        Body::MeanLilith,
        Body::TrueLilith,
        Body::Pholus,
        Body::Ceres,
        Body::Pallas,
        Body::Juno,
        Body::Vesta,
    ];

    /// Sun through Pluto without the Moon
    pub const SLOW: [Body; 9] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Swiss Ephemeris body code
    pub fn swiss_id(self) -> i32 {
        match self {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::MeanNode => 10,
            Body::TrueNode => 11,
            Body::MeanLilith => 12,
            Body::TrueLilith => 13,
            Body::Chiron => 15,
            Body::Pholus => 16,
            Body::Ceres => 17,
            Body::Pallas => 18,
            Body::Juno => 19,
            Body::Vesta => 20,
        }
    }

    /// Bodies that need the supplementary asteroid files (seas_*.se1)
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Body::Chiron | Body::Pholus | Body::Ceres | Body::Pallas | Body::Juno | Body::Vesta
        )
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }

    pub fn is_slow(self) -> bool {
        Self::SLOW.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Body::Sun => "SUN",
            Body::Moon => "MOON",
            Body::Mercury => "MERCURY",
            Body::Venus => "VENUS",
            Body::Mars => "MARS",
            Body::Jupiter => "JUPITER",
            Body::Saturn => "SATURN",
            Body::Uranus => "URANUS",
            Body::Neptune => "NEPTUNE",
            Body::Pluto => "PLUTO",
            Body::TrueNode => "TRUE_NODE",
            Body::Chiron => "CHIRON",
            Body::MeanNode => "MEAN_NODE",
            Body::MeanLilith => "MEAN_LILITH",
            Body::TrueLilith => "TRUE_LILITH",
            Body::Pholus => "PHOLUS",
            Body::Ceres => "CERES",
            Body::Pallas => "PALLAS",
            Body::Juno => "JUNO",
            Body::Vesta => "VESTA",
        }
    }

    /// Parse a body name, case-insensitive ("sun", "TRUE_NODE", "true-node")
    pub fn from_name(name: &str) -> Option<Body> {
        let wanted = name.trim().to_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|b| b.as_str() == wanted)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zodiac signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "ARI")]
    Aries,
    #[serde(rename = "TAU")]
    Taurus,
    #[serde(rename = "GEM")]
    Gemini,
    #[serde(rename = "CAN")]
    Cancer,
    #[serde(rename = "LEO")]
    Leo,
    #[serde(rename = "VIR")]
    Virgo,
    #[serde(rename = "LIB")]
    Libra,
    #[serde(rename = "SCO")]
    Scorpio,
    #[serde(rename = "SAG")]
    Sagittarius,
    #[serde(rename = "CAP")]
    Capricorn,
    #[serde(rename = "AQU")]
    Aquarius,
    #[serde(rename = "PIS")]
    Pisces,
}

impl Sign {
    const ORDER: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn from_index(index: u8) -> Sign {
        Self::ORDER[(index % 12) as usize]
    }

    pub fn from_longitude(longitude: f64) -> Sign {
        Self::from_index(geometry::sign_index(longitude))
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn abbreviation(self) -> &'static str {
        const ABBREVIATIONS: [&str; 12] = [
            "ARI", "TAU", "GEM", "CAN", "LEO", "VIR", "LIB", "SCO", "SAG", "CAP", "AQU", "PIS",
        ];
        ABBREVIATIONS[self.index() as usize]
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Raw provider output for one body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
}

/// Position of a body with its derived zodiac placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    pub latitude: f64,
    /// Degrees per day, negative when retrograde
    pub speed: f64,
    pub is_retrograde: bool,
    pub sign: Sign,
    /// Degree within the sign (0-30)
    pub degree: f64,
}

impl BodyPosition {
    pub fn new(body: Body, longitude: f64, latitude: f64, speed: f64) -> Self {
        let longitude = geometry::normalize(longitude);
        Self {
            body,
            longitude,
            latitude,
            speed,
            is_retrograde: speed < 0.0,
            sign: Sign::from_longitude(longitude),
            degree: geometry::degree_in_sign(longitude),
        }
    }

    pub fn from_raw(body: Body, raw: RawPosition) -> Self {
        Self::new(body, raw.lon, raw.lat, raw.speed_lon)
    }

    pub fn sign_index(&self) -> u8 {
        self.sign.index()
    }
}

/// House system selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    const NAMES: [(&'static str, HouseSystem); 8] = [
        ("placidus", HouseSystem::Placidus),
        ("whole_sign", HouseSystem::WholeSign),
        ("koch", HouseSystem::Koch),
        ("equal", HouseSystem::Equal),
        ("regiomontanus", HouseSystem::Regiomontanus),
        ("campanus", HouseSystem::Campanus),
        ("alcabitius", HouseSystem::Alcabitius),
        ("morinus", HouseSystem::Morinus),
    ];

    /// Swiss Ephemeris house system letter
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'A',
            HouseSystem::Morinus => b'M',
        }
    }

    pub fn from_name(name: &str) -> Option<HouseSystem> {
        let wanted = name.trim().to_lowercase().replace('-', "_");
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, system)| *system)
    }

    pub fn valid_names() -> Vec<String> {
        Self::NAMES.iter().map(|(n, _)| n.to_string()).collect()
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: s.to_string(),
            valid: Self::valid_names(),
        })
    }
}

/// A house cusp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1-12
    pub house: u8,
    pub longitude: f64,
}

/// Angular chart points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAngles {
    pub asc: f64,
    pub mc: f64,
    pub dsc: f64,
    pub ic: f64,
    pub vertex: f64,
    pub east_point: f64,
    pub part_of_fortune: f64,
}

impl ChartAngles {
    /// Derive descendant and IC; part of fortune stays 0 until luminaries are known
    pub fn new(asc: f64, mc: f64, vertex: f64, east_point: f64) -> Self {
        let asc = geometry::normalize(asc);
        let mc = geometry::normalize(mc);
        Self {
            asc,
            mc,
            dsc: geometry::normalize(asc + 180.0),
            ic: geometry::normalize(mc + 180.0),
            vertex: geometry::normalize(vertex),
            east_point: geometry::normalize(east_point),
            part_of_fortune: 0.0,
        }
    }

    /// Set the part of fortune (asc + moon - sun) when both luminaries are present
    pub fn apply_part_of_fortune(&mut self, bodies: &[BodyPosition]) {
        let sun = bodies.iter().find(|p| p.body == Body::Sun);
        let moon = bodies.iter().find(|p| p.body == Body::Moon);
        if let (Some(sun), Some(moon)) = (sun, moon) {
            self.part_of_fortune = geometry::normalize(self.asc + moon.longitude - sun.longitude);
        }
    }
}

/// Provider output for a house computation
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFrame {
    pub cusps: [HouseCusp; 12],
    pub asc: f64,
    pub mc: f64,
    pub vertex: f64,
    pub east_point: f64,
}

impl HouseFrame {
    pub fn angles(&self) -> ChartAngles {
        ChartAngles::new(self.asc, self.mc, self.vertex, self.east_point)
    }
}

/// What the position provider can compute, probed once at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Supplementary asteroid files are installed
    pub extra_bodies: bool,
}

impl Capabilities {
    pub fn full() -> Self {
        Self { extra_bodies: true }
    }

    /// Whether results for `body` can be produced
    pub fn supports(&self, body: Body) -> bool {
        self.extra_bodies || !body.is_optional()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}
