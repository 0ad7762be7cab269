pub mod composite;
pub mod engine;
pub mod progression;
pub mod types;

pub use engine::{ChartEngine, EngineSettings};
pub use types::{
    ChartMeta, ChartRequest, NatalChart, SynastryChart, TripleChart, TripleCrossAspects,
};
