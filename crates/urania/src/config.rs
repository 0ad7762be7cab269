//! Engine configuration file.
//!
//! ```toml
//! house_system = "placidus"
//!
//! [ephemeris]
//! path = "/usr/local/share/swisseph"
//!
//! [aspects]
//! enabled = ["conjunction", "opposition", "trine", "square", "sextile"]
//! sun_orb_bonus = 2.0
//! moon_orb_bonus = 2.0
//!
//! [aspects.orbs]
//! conjunction = 10.0
//!
//! [bodies]
//! enabled = ["sun", "moon", "mercury"]
//! ```

use crate::aspects::{AspectSettings, AspectType};
use crate::chart::EngineSettings;
use crate::ephemeris::types::{Body, HouseSystem};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "URANIA_CONFIG";

/// Relative locations tried when no config path is given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

/// Resolved engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Swiss Ephemeris data directory; `None` lets the adapter fall back to
    /// `SWISS_EPHEMERIS_PATH` and then the system default
    pub ephemeris_path: Option<PathBuf>,
    pub house_system: HouseSystem,
    pub engine: EngineSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            house_system: HouseSystem::default(),
            engine: EngineSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    enabled: Option<Vec<String>>,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
    #[serde(default)]
    sun_orb_bonus: Option<f64>,
    #[serde(default)]
    moon_orb_bonus: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BodiesToml {
    #[serde(default)]
    enabled: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    bodies: BodiesToml,
}

impl EngineConfig {
    /// Parse a config document. Unknown body, aspect or house system names are
    /// rejected.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let root: RootConfigToml =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania config: {e}"))?;

        let house_system = match root.house_system {
            Some(name) => name.parse::<HouseSystem>()?,
            None => HouseSystem::default(),
        };

        let bodies = match root.bodies.enabled {
            Some(names) => names
                .iter()
                .map(|name| {
                    Body::from_name(name)
                        .ok_or_else(|| anyhow::anyhow!("Unknown body '{name}' in [bodies] enabled"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
            None => Body::ALL.to_vec(),
        };
        if bodies.is_empty() {
            anyhow::bail!("[bodies] enabled must name at least one body");
        }

        let aspects = aspect_settings(root.aspects)?;

        Ok(Self {
            ephemeris_path: root.ephemeris.path,
            house_system,
            engine: EngineSettings { bodies, aspects },
        })
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Load from `path`, else `URANIA_CONFIG`, else `configs/urania.toml`.
    ///
    /// An explicitly named file must exist; when nothing is found at the
    /// default locations the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        for p in &DEFAULT_CONFIG_PATHS {
            if let Ok(text) = fs::read_to_string(p) {
                log::debug!("using config {p}");
                return Self::from_toml_str(&text);
            }
        }
        Ok(Self::default())
    }
}

fn aspect_settings(aspects: AspectsToml) -> anyhow::Result<AspectSettings> {
    let parse = |name: &str| {
        AspectType::from_name(name).ok_or_else(|| anyhow::anyhow!("Unknown aspect type '{name}'"))
    };

    let enabled = match aspects.enabled {
        Some(names) => Some(names.iter().map(|n| parse(n)).collect::<anyhow::Result<Vec<_>>>()?),
        None => None,
    };

    let mut orb_overrides = HashMap::new();
    for (name, orb) in &aspects.orbs {
        if !orb.is_finite() || *orb < 0.0 {
            anyhow::bail!("[aspects.orbs] {name} must be a non-negative number, got {orb}");
        }
        orb_overrides.insert(parse(name)?, *orb);
    }

    let defaults = AspectSettings::default();
    Ok(AspectSettings {
        enabled,
        orb_overrides,
        sun_orb_bonus: aspects.sun_orb_bonus.unwrap_or(defaults.sun_orb_bonus),
        moon_orb_bonus: aspects.moon_orb_bonus.unwrap_or(defaults.moon_orb_bonus),
    })
}
