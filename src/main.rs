use chrono::{Datelike, NaiveDate};
use clap::Parser;
use modip::{GeodeticPoint, IgrfModel};
use std::path::PathBuf;

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Geodetic latitude in degrees
    #[arg(allow_hyphen_values = true)]
    latitude: f64,

    /// Longitude in degrees, east positive
    #[arg(allow_hyphen_values = true)]
    longitude: f64,

    /// Altitude in km above the WGS84 ellipsoid
    #[arg(allow_hyphen_values = true)]
    altitude: f64,

    /// Epoch as a decimal year, e.g. 2017 or 2021.5
    #[arg(short, long, conflicts_with = "date")]
    epoch: Option<f64>,

    /// Epoch as a calendar date, YYYY-MM-DD
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Coefficient file in the IAGA column format; defaults to the set
    /// shipped with the binary
    #[arg(short, long)]
    coefficients: Option<PathBuf>,
}

/// Fraction of the year elapsed at a calendar date.
fn decimal_year(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

fn bin_main() -> BinResult<()> {
    let args = Args::parse();

    let model = match args.coefficients {
        Some(path) => IgrfModel::from_file(path)?,
        None => IgrfModel::new()?,
    };
    let year = match (args.epoch, args.date) {
        (Some(epoch), _) => epoch,
        (None, Some(date)) => decimal_year(date),
        (None, None) => Err("one of --epoch or --date is required")?,
    };

    let point = GeodeticPoint::new(args.latitude, args.longitude, args.altitude);
    let field = model.field_at(&point, year)?;
    let modip = model.modip_at(&point, year)?;

    println!("Epoch:       {year:.3}");
    println!("X (north):   {:10.1} nT", field.x);
    println!("Y (east):    {:10.1} nT", field.y);
    println!("Z (down):    {:10.1} nT", field.z);
    println!("H:           {:10.1} nT", field.h);
    println!("F:           {:10.1} nT", field.f);
    println!("D:           {:10.3} deg", field.d);
    println!("I:           {:10.3} deg", field.i);
    println!("MODIP:       {:10.3} deg", modip.modip);
    Ok(())
}
