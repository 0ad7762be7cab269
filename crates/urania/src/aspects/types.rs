use crate::ephemeris::types::Body;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Orb multiplier for aspects within one chart
pub const SAME_CHART_ORB_MULTIPLIER: f64 = 1.0;
/// Orb multiplier for aspects between two charts
pub const CROSS_CHART_ORB_MULTIPLIER: f64 = 0.5;
/// Default extra orb granted when the Sun or Moon takes part
pub const DEFAULT_LUMINARY_BONUS: f64 = 2.0;

/// Aspect types, in canonical priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    Semisextile,
    Semisquare,
    Sesquiquadrate,
    Quintile,
}

impl AspectType {
    /// Detection order: the first type whose orb window matches wins
    pub const CANONICAL: [AspectType; 10] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
        AspectType::Quincunx,
        AspectType::Semisextile,
        AspectType::Semisquare,
        AspectType::Sesquiquadrate,
        AspectType::Quintile,
    ];

    /// Major aspects scanned by the monthly timeline
    pub const MAJOR: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
    ];

    /// The classical aspects, by increasing angle
    pub const PTOLEMAIC: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    pub fn exact_angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Trine => 120.0,
            AspectType::Square => 90.0,
            AspectType::Sextile => 60.0,
            AspectType::Quincunx => 150.0,
            AspectType::Semisextile => 30.0,
            AspectType::Semisquare => 45.0,
            AspectType::Sesquiquadrate => 135.0,
            AspectType::Quintile => 72.0,
        }
    }

    pub fn default_orb(self) -> f64 {
        match self {
            AspectType::Conjunction | AspectType::Opposition => 8.0,
            AspectType::Trine | AspectType::Square => 7.0,
            AspectType::Sextile => 5.0,
            AspectType::Quincunx => 3.0,
            AspectType::Semisextile | AspectType::Semisquare | AspectType::Sesquiquadrate => 2.0,
            AspectType::Quintile => 1.5,
        }
    }

    pub fn is_ptolemaic(self) -> bool {
        Self::PTOLEMAIC.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectType::Conjunction => "CONJUNCTION",
            AspectType::Opposition => "OPPOSITION",
            AspectType::Trine => "TRINE",
            AspectType::Square => "SQUARE",
            AspectType::Sextile => "SEXTILE",
            AspectType::Quincunx => "QUINCUNX",
            AspectType::Semisextile => "SEMISEXTILE",
            AspectType::Semisquare => "SEMISQUARE",
            AspectType::Sesquiquadrate => "SESQUIQUADRATE",
            AspectType::Quintile => "QUINTILE",
        }
    }

    pub fn from_name(name: &str) -> Option<AspectType> {
        let wanted = name.trim().to_uppercase();
        Self::CANONICAL.into_iter().find(|t| t.as_str() == wanted)
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    /// Exact angle for this aspect type
    pub angle: f64,
    /// Deviation from the exact angle (always >= 0)
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
}

/// Orb policy for aspect detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    /// Aspect types to detect; `None` means all of them
    pub enabled: Option<Vec<AspectType>>,
    /// Base orb per aspect type, replacing the default table entry
    pub orb_overrides: HashMap<AspectType, f64>,
    pub sun_orb_bonus: f64,
    pub moon_orb_bonus: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            enabled: None,
            orb_overrides: HashMap::new(),
            sun_orb_bonus: DEFAULT_LUMINARY_BONUS,
            moon_orb_bonus: DEFAULT_LUMINARY_BONUS,
        }
    }
}

impl AspectSettings {
    /// Enabled aspect types with their exact angles, in canonical order
    pub fn active_types(&self) -> Vec<(AspectType, f64)> {
        AspectType::CANONICAL
            .into_iter()
            .filter(|t| self.is_enabled(*t))
            .map(|t| (t, t.exact_angle()))
            .collect()
    }

    pub fn is_enabled(&self, aspect_type: AspectType) -> bool {
        self.enabled
            .as_ref()
            .map_or(true, |enabled| enabled.contains(&aspect_type))
    }

    /// Orb before luminary bonus and multiplier
    pub fn base_orb(&self, aspect_type: AspectType) -> f64 {
        self.orb_overrides
            .get(&aspect_type)
            .copied()
            .unwrap_or_else(|| aspect_type.default_orb())
    }

    /// Maximum allowed orb for `aspect_type` between `a` and `b`.
    ///
    /// The Sun bonus takes precedence over the Moon bonus for a Sun-Moon pair.
    pub fn max_orb(&self, aspect_type: AspectType, a: Body, b: Body, multiplier: f64) -> f64 {
        let base = self.base_orb(aspect_type);
        let bonus = if a == Body::Sun || b == Body::Sun {
            self.sun_orb_bonus
        } else if a == Body::Moon || b == Body::Moon {
            self.moon_orb_bonus
        } else {
            0.0
        };
        (base + bonus) * multiplier
    }
}
