pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{
    Aspect, AspectSettings, AspectType, CROSS_CHART_ORB_MULTIPLIER, DEFAULT_LUMINARY_BONUS,
    SAME_CHART_ORB_MULTIPLIER,
};
