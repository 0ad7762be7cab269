use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;
use urania::{ChartRequest, GeoLocation, HouseSystem};

/// A chart subject given on the command line as
/// `DATE[THH:MM],LAT,LON[,UTC_OFFSET_MINUTES]`, e.g. `1990-06-15T14:30,40.71,-74.01,-240`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: GeoLocation,
    pub utc_offset_minutes: i32,
}

impl Subject {
    pub fn request(&self, house_system: HouseSystem) -> ChartRequest {
        ChartRequest {
            date: self.date,
            time: self.time,
            utc_offset_minutes: self.utc_offset_minutes,
            location: self.location,
            house_system,
        }
    }
}

impl FromStr for Subject {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) {
            anyhow::bail!("expected DATE[THH:MM],LAT,LON[,UTC_OFFSET_MINUTES], got '{s}'");
        }

        let (date, time) = match parts[0].split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (parts[0], None),
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{date}'"))?;
        let time = time
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").with_context(|| format!("invalid time '{t}'")))
            .transpose()?;

        let lat: f64 = parts[1].parse().with_context(|| format!("invalid latitude '{}'", parts[1]))?;
        let lon: f64 = parts[2].parse().with_context(|| format!("invalid longitude '{}'", parts[2]))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("location out of range: {lat}, {lon}");
        }

        let utc_offset_minutes = match parts.get(3) {
            Some(offset) => offset
                .parse()
                .with_context(|| format!("invalid UTC offset '{offset}'"))?,
            None => 0,
        };

        Ok(Self {
            date,
            time,
            location: GeoLocation { lat, lon },
            utc_offset_minutes,
        })
    }
}
