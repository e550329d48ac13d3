use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use roadtrip::api::{TripAPI, TripFields};
use roadtrip::config::Config;
use roadtrip::engine::Engine;
use roadtrip::entities::{Leg, Trip};
use roadtrip::error::Error;
use roadtrip::store::TripRecord;

#[derive(Debug, Parser)]
#[command(name = "roadtrip", version)]
#[command(about = "Plan road trips and keep their itineraries and costs on disk")]
struct Args {
    /// Folder holding one JSON file per trip (overrides ROADTRIP_TRIPS_DIR)
    #[arg(long, global = true)]
    trips_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved trips by name
    List,
    /// Print one trip with its derived totals
    Show { id: String },
    /// Delete a trip
    Delete { id: String },
    /// Save a new trip
    Create {
        #[arg(long)]
        name: String,
        /// ORIGIN:DESTINATION:KM:HOURS[:SLEEPING[:FOOD]], repeat in itinerary order
        #[arg(long = "leg", value_parser = parse_leg)]
        legs: Vec<Leg>,
        #[arg(long, default_value_t = roadtrip::entities::DEFAULT_FUEL_PRICE_PER_LITRE)]
        fuel_price: f64,
        #[arg(long, default_value_t = roadtrip::entities::DEFAULT_FUEL_CONSUMPTION_PER_100KM)]
        consumption: f64,
        #[arg(long, default_value_t = roadtrip::entities::DEFAULT_NUM_PEOPLE)]
        people: u32,
        #[arg(long = "activity")]
        activities: Vec<String>,
        #[arg(long = "url")]
        booking_urls: Vec<String>,
    },
    /// Rewrite records saved by older versions in the current format
    Upgrade,
}

fn parse_leg(value: &str) -> Result<Leg, String> {
    let parts: Vec<&str> = value.split(':').collect();
    if !(4..=6).contains(&parts.len()) {
        return Err("expected ORIGIN:DESTINATION:KM:HOURS[:SLEEPING[:FOOD]]".into());
    }

    let number = |index: usize, label: &str| -> Result<f64, String> {
        match parts.get(index) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid {label} {raw:?}: {err}")),
            None => Ok(0.0),
        }
    };

    Ok(Leg::new(parts[0].trim(), parts[1].trim(), number(2, "distance")?, number(3, "hours")?)
        .with_costs(number(4, "sleeping cost")?, number(5, "food cost")?))
}

fn print_summary(trip: &Trip) {
    let per_person = trip
        .cost_per_person()
        .map(|cost| format!("{cost:.2}"))
        .unwrap_or_else(|_| "-".into());

    println!(
        "{}  {}  {:.1} km  {:.1} h ({} breaks)  fuel {:.2}  total {:.2}  per person {}",
        trip.id,
        trip.name,
        trip.total_distance_km(),
        trip.total_travel_time_hours(),
        trip.total_driving_breaks(),
        trip.fuel_cost(),
        trip.total_price(),
        per_person,
    );
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = Config::from_env()?;
    if let Some(dir) = args.trips_dir {
        config.trips_dir = dir;
    }

    let engine = Engine::open(config.trips_dir);

    match args.command {
        Command::List => {
            let trips = engine.list_trips()?;
            if trips.is_empty() {
                println!("No trips saved yet.");
            }
            for trip in &trips {
                print_summary(trip);
            }
        }
        Command::Show { id } => {
            let trip = engine.find_trip(&id)?;
            println!("{}", serde_json::to_string_pretty(&TripRecord::from(&trip))?);
        }
        Command::Delete { id } => {
            if engine.delete_trip(&id)? {
                println!("Deleted {id}");
            } else {
                println!("No trip with id {id}");
            }
        }
        Command::Create {
            name,
            legs,
            fuel_price,
            consumption,
            people,
            activities,
            booking_urls,
        } => {
            let fields = TripFields {
                fuel_price_per_litre: fuel_price,
                fuel_consumption_per_100km: consumption,
                num_people: people,
                activities,
                booking_urls,
                ..TripFields::new(name, legs)
            };
            let trip = engine.create_trip(fields)?;
            print_summary(&trip);
        }
        Command::Upgrade => {
            let upgraded = engine.store().upgrade_all()?;
            println!("Upgraded {upgraded} trip records");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = err.code, "{}", err.message);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
