//! Astrological ephemeris engine: chart assembly, aspect detection, monthly
//! event timelines and void-of-course Moon periods on top of a pluggable
//! position provider.

pub mod aspects;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod events;
pub mod geometry;
pub mod houses;

pub use aspects::{Aspect, AspectCalculator, AspectSettings, AspectType};
pub use chart::{ChartEngine, ChartRequest, EngineSettings, NatalChart};
pub use config::EngineConfig;
pub use ephemeris::{
    Body, BodyPosition, Capabilities, EphemerisError, GeoLocation, HouseSystem,
    PositionProvider, SwissEphemerisAdapter,
};
pub use events::{EphemerisMonth, VocPeriod, VocReport};
