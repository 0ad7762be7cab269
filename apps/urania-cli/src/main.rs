mod subject;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use subject::Subject;
use urania::{ChartEngine, EngineConfig, SwissEphemerisAdapter};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (defaults to $URANIA_CONFIG, then configs/urania.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory, overriding the config file
    #[arg(long)]
    ephe_path: Option<PathBuf>,

    /// House system, overriding the config file (placidus, koch, whole_sign, ...)
    #[arg(long)]
    house_system: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Birth chart. SUBJECT is DATE[THH:MM],LAT,LON[,UTC_OFFSET_MINUTES]
    Natal { subject: Subject },
    /// Chart for a transit moment
    Transit { subject: Subject },
    /// Secondary progressions of a birth chart to a date
    Progressed {
        subject: Subject,
        #[arg(long)]
        to: NaiveDate,
        /// Cast progressed houses for another place, as LAT,LON
        #[arg(long)]
        relocate: Option<String>,
    },
    /// Two birth charts and the aspects between them
    Synastry { a: Subject, b: Subject },
    /// Midpoint composite of two birth charts
    Composite { a: Subject, b: Subject },
    /// Daily positions and events for a month
    Ephemeris {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    /// Void-of-course Moon periods for a month
    Voc {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_location(s: &str) -> anyhow::Result<urania::GeoLocation> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected LAT,LON, got '{s}'"))?;
    Ok(urania::GeoLocation {
        lat: lat.trim().parse().context("invalid latitude")?,
        lon: lon.trim().parse().context("invalid longitude")?,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = EngineConfig::load(args.config.as_deref())?;
    if let Some(path) = args.ephe_path {
        config.ephemeris_path = Some(path);
    }
    if let Some(name) = &args.house_system {
        config.house_system = name.parse()?;
    }

    let adapter = SwissEphemerisAdapter::new(config.ephemeris_path.clone())?;
    log::info!("ephemeris files at {}", adapter.ephemeris_path().display());
    let engine = ChartEngine::with_settings(adapter, config.engine.clone());
    let system = config.house_system;

    match args.command {
        Command::Natal { subject } => print_json(&engine.natal(&subject.request(system))?),
        Command::Transit { subject } => print_json(&engine.transit(&subject.request(system))?),
        Command::Progressed {
            subject,
            to,
            relocate,
        } => {
            let relocated = relocate.as_deref().map(parse_location).transpose()?;
            print_json(&engine.progressed(&subject.request(system), to, relocated)?)
        }
        Command::Synastry { a, b } => {
            print_json(&engine.synastry(&a.request(system), &b.request(system))?)
        }
        Command::Composite { a, b } => {
            print_json(&engine.composite(&a.request(system), &b.request(system))?)
        }
        Command::Ephemeris { year, month } => print_json(&engine.month_timeline(year, month)?),
        Command::Voc { year, month } => print_json(&engine.void_of_course(year, month)?),
    }
}
