pub mod search;
pub mod timeline;
pub mod types;
pub mod voc;

pub use timeline::{detect_events, month_timeline};
pub use types::{
    EphemerisDay, EphemerisEvent, EphemerisMonth, EventKind, ReportMeta, VocPeriod, VocReport,
    SCHEMA_VERSION,
};
pub use voc::{
    find_last_exact_aspect, find_moon_ingresses, void_of_course_periods, void_of_course_report,
    AspectHit, MoonIngress,
};
