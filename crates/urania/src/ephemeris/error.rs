use crate::ephemeris::types::Body;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("{body} is unavailable: supplementary ephemeris files are not installed")]
    BodyUnavailable { body: Body },
    #[error("Invalid calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("House calculation failed at JD {julian_day}: {message}")]
    HouseCalculationFailed { julian_day: f64, message: String },
}
