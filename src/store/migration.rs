//! Reading every on-disk trip shape into the current [`Trip`].
//!
//! Four generations of records exist in the wild. Each has one pure function that
//! turns its JSON object into a `Trip`. `MIGRATIONS` lists them in the order they
//! are tried; the first whose key test matches wins and the last always matches.
//!
//! | generation        | recognised by                        |
//! |-------------------|--------------------------------------|
//! | `FlatPrice`       | a `price` object                     |
//! | `TripLevelCosts`  | `price_sleeping` / `price_food`      |
//! | `NamedLegs`       | legs carrying `name` but no endpoints |
//! | `Current`         | anything else                        |

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::entities::{
    Leg, Trip, DEFAULT_FUEL_CONSUMPTION_PER_100KM, DEFAULT_FUEL_PRICE_PER_LITRE,
    DEFAULT_NUM_PEOPLE,
};
use crate::error::{structural_error, Error};

type Record = Map<String, Value>;

/// Derived values written next to the raw fields for people reading the file.
/// They are never trusted on the way back in.
pub const COMPUTED_FIELDS: &[&str] = &[
    "total_distance_km",
    "total_travel_time_hours",
    "total_driving_breaks",
    "total_break_minutes",
    "total_break_time_minutes",
    "route_waypoints",
    "fuel_cost",
    "total_sleeping_cost",
    "total_food_cost",
    "total_price",
    "cost_per_person",
];

/// Name given to the single leg synthesised for records that predate legs.
pub const LEGACY_LEG_NAME: &str = "Trip";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// One `price {fuel, sleeping, food}` object and a trip-level travel time.
    FlatPrice,
    /// Trip-level `price_sleeping` / `price_food`, legs keyed by `name`.
    TripLevelCosts,
    /// Per-leg costs, legs keyed by `name`, flat `gas_price_per_km`.
    NamedLegs,
    Current,
}

struct Migration {
    generation: Generation,
    matches: fn(&Record) -> bool,
    migrate: fn(Record) -> Result<Trip, Error>,
}

static MIGRATIONS: [Migration; 4] = [
    Migration {
        generation: Generation::FlatPrice,
        matches: has_flat_price,
        migrate: from_flat_price,
    },
    Migration {
        generation: Generation::TripLevelCosts,
        matches: has_trip_level_costs,
        migrate: from_trip_level_costs,
    },
    Migration {
        generation: Generation::NamedLegs,
        matches: has_named_legs,
        migrate: from_named_legs,
    },
    Migration {
        generation: Generation::Current,
        matches: any_record,
        migrate: from_current,
    },
];

pub fn strip_computed_fields(record: &mut Record) {
    for key in COMPUTED_FIELDS {
        record.remove(*key);
    }
}

#[cfg(test)]
fn detect(record: &Record) -> Generation {
    find_migration(record).generation
}

/// Strip derived fields and upgrade whatever generation `value` is written in.
pub fn migrate(value: Value) -> Result<(Generation, Trip), Error> {
    let Value::Object(mut record) = value else {
        return Err(structural_error("trip record is not a JSON object"));
    };

    strip_computed_fields(&mut record);

    let migration = find_migration(&record);
    tracing::debug!(generation = ?migration.generation, "migrating trip record");

    let trip = (migration.migrate)(record)?;
    Ok((migration.generation, trip))
}

fn find_migration(record: &Record) -> &'static Migration {
    MIGRATIONS
        .iter()
        .find(|migration| (migration.matches)(record))
        .unwrap_or(&MIGRATIONS[MIGRATIONS.len() - 1])
}

fn any_record(_: &Record) -> bool {
    true
}

fn has_flat_price(record: &Record) -> bool {
    record.contains_key("price")
}

fn has_trip_level_costs(record: &Record) -> bool {
    record.contains_key("price_sleeping") || record.contains_key("price_food")
}

fn has_named_legs(record: &Record) -> bool {
    let Some(Value::Array(legs)) = record.get("legs") else {
        return false;
    };

    legs.iter().any(|leg| {
        leg.as_object().is_some_and(|leg| {
            leg.contains_key("name")
                && !(leg.contains_key("origin") && leg.contains_key("destination"))
        })
    })
}

// `price.fuel` was a hand-entered amount. With no distance on record it cannot be
// recomputed, so it is not read.
#[derive(Deserialize)]
struct FlatPrice {
    #[serde(default)]
    sleeping: f64,
    #[serde(default)]
    food: f64,
}

#[derive(Deserialize)]
struct FlatPriceRecord {
    name: String,
    id: String,
    price: FlatPrice,
    #[serde(default)]
    travel_time_hours: f64,
    #[serde(default)]
    num_people: Option<u32>,
    #[serde(default)]
    activities: Vec<String>,
    #[serde(default)]
    booking_urls: Vec<String>,
}

fn from_flat_price(record: Record) -> Result<Trip, Error> {
    let old: FlatPriceRecord = serde_json::from_value(Value::Object(record))?;

    let leg = Leg::new(LEGACY_LEG_NAME, LEGACY_LEG_NAME, 0.0, old.travel_time_hours)
        .with_costs(old.price.sleeping, old.price.food);

    Ok(Trip {
        name: old.name,
        id: old.id,
        legs: vec![leg],
        fuel_price_per_litre: DEFAULT_FUEL_PRICE_PER_LITRE,
        fuel_consumption_per_100km: DEFAULT_FUEL_CONSUMPTION_PER_100KM,
        num_people: old.num_people.unwrap_or(DEFAULT_NUM_PEOPLE),
        activities: old.activities,
        booking_urls: old.booking_urls,
    })
}

/// A leg from any generation: endpoints may be missing in favour of a `name`.
#[derive(Deserialize)]
struct LegacyLeg {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    destination: Option<String>,
    distance_km: f64,
    travel_time_hours: f64,
    #[serde(default)]
    sleeping_cost: f64,
    #[serde(default)]
    food_cost: f64,
}

impl LegacyLeg {
    /// A named leg becomes a leg from `name` to `name`.
    fn into_leg(self, index: usize) -> Result<Leg, Error> {
        let origin = self.origin.or_else(|| self.name.clone());
        let destination = self.destination.or(self.name);

        let (Some(origin), Some(destination)) = (origin, destination) else {
            return Err(structural_error(format!(
                "leg {} has neither origin/destination nor name",
                index
            )));
        };

        Ok(Leg {
            origin,
            destination,
            distance_km: self.distance_km,
            travel_time_hours: self.travel_time_hours,
            sleeping_cost: self.sleeping_cost,
            food_cost: self.food_cost,
        })
    }
}

fn into_legs(legs: Vec<LegacyLeg>) -> Result<Vec<Leg>, Error> {
    legs.into_iter()
        .enumerate()
        .map(|(index, leg)| leg.into_leg(index))
        .collect()
}

#[derive(Deserialize)]
struct TripLevelCostRecord {
    name: String,
    id: String,
    #[serde(default)]
    legs: Vec<LegacyLeg>,
    #[serde(default)]
    price_sleeping: f64,
    #[serde(default)]
    price_food: f64,
    #[serde(default)]
    fuel_consumption_per_100km: Option<f64>,
    #[serde(default)]
    num_people: Option<u32>,
    #[serde(default)]
    activities: Vec<String>,
    #[serde(default)]
    booking_urls: Vec<String>,
}

/// Trip-level sleeping and food become the first leg's costs. Later legs cost nothing.
fn from_trip_level_costs(record: Record) -> Result<Trip, Error> {
    let old: TripLevelCostRecord = serde_json::from_value(Value::Object(record))?;
    let mut legs = into_legs(old.legs)?;

    for leg in legs.iter_mut().skip(1) {
        leg.sleeping_cost = 0.0;
        leg.food_cost = 0.0;
    }

    match legs.first_mut() {
        Some(first) => {
            first.sleeping_cost = old.price_sleeping;
            first.food_cost = old.price_food;
        }
        None if old.price_sleeping != 0.0 || old.price_food != 0.0 => {
            tracing::warn!(
                id = %old.id,
                price_sleeping = old.price_sleeping,
                price_food = old.price_food,
                "trip has costs but no legs to carry them, dropping costs"
            );
        }
        None => {}
    }

    Ok(Trip {
        name: old.name,
        id: old.id,
        legs,
        fuel_price_per_litre: DEFAULT_FUEL_PRICE_PER_LITRE,
        fuel_consumption_per_100km: old
            .fuel_consumption_per_100km
            .unwrap_or(DEFAULT_FUEL_CONSUMPTION_PER_100KM),
        num_people: old.num_people.unwrap_or(DEFAULT_NUM_PEOPLE),
        activities: old.activities,
        booking_urls: old.booking_urls,
    })
}

#[derive(Deserialize)]
struct NamedLegRecord {
    name: String,
    id: String,
    legs: Vec<LegacyLeg>,
    #[serde(default)]
    fuel_consumption_per_100km: Option<f64>,
    #[serde(default)]
    num_people: Option<u32>,
    #[serde(default)]
    activities: Vec<String>,
    #[serde(default)]
    booking_urls: Vec<String>,
}

fn from_named_legs(record: Record) -> Result<Trip, Error> {
    let old: NamedLegRecord = serde_json::from_value(Value::Object(record))?;

    Ok(Trip {
        name: old.name,
        id: old.id,
        legs: into_legs(old.legs)?,
        fuel_price_per_litre: DEFAULT_FUEL_PRICE_PER_LITRE,
        fuel_consumption_per_100km: old
            .fuel_consumption_per_100km
            .unwrap_or(DEFAULT_FUEL_CONSUMPTION_PER_100KM),
        num_people: old.num_people.unwrap_or(DEFAULT_NUM_PEOPLE),
        activities: old.activities,
        booking_urls: old.booking_urls,
    })
}

fn from_current(record: Record) -> Result<Trip, Error> {
    Ok(serde_json::from_value(Value::Object(record))?)
}
