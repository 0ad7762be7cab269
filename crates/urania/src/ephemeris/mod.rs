pub mod adapter;
pub mod error;
pub mod julian;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use error::EphemerisError;
pub use provider::{body_position, body_positions, PositionProvider};
pub use types::{
    Body, BodyPosition, Capabilities, ChartAngles, GeoLocation, HouseCusp, HouseFrame,
    HouseSystem, RawPosition, Sign,
};
