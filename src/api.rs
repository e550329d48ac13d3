use serde::{Deserialize, Serialize};

use crate::entities::{
    Leg, Trip, DEFAULT_FUEL_CONSUMPTION_PER_100KM, DEFAULT_FUEL_PRICE_PER_LITRE,
    DEFAULT_NUM_PEOPLE,
};
use crate::error::Error;

/// Raw values collected by a form, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripFields {
    pub name: String,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default = "default_fuel_price_per_litre")]
    pub fuel_price_per_litre: f64,
    #[serde(default = "default_fuel_consumption_per_100km")]
    pub fuel_consumption_per_100km: f64,
    #[serde(default = "default_num_people")]
    pub num_people: u32,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub booking_urls: Vec<String>,
}

fn default_fuel_price_per_litre() -> f64 {
    DEFAULT_FUEL_PRICE_PER_LITRE
}

fn default_fuel_consumption_per_100km() -> f64 {
    DEFAULT_FUEL_CONSUMPTION_PER_100KM
}

fn default_num_people() -> u32 {
    DEFAULT_NUM_PEOPLE
}

impl TripFields {
    pub fn new(name: impl Into<String>, legs: Vec<Leg>) -> Self {
        Self {
            name: name.into(),
            legs,
            fuel_price_per_litre: DEFAULT_FUEL_PRICE_PER_LITRE,
            fuel_consumption_per_100km: DEFAULT_FUEL_CONSUMPTION_PER_100KM,
            num_people: DEFAULT_NUM_PEOPLE,
            activities: Vec::new(),
            booking_urls: Vec::new(),
        }
    }
}

impl From<&Trip> for TripFields {
    fn from(trip: &Trip) -> Self {
        Self {
            name: trip.name.clone(),
            legs: trip.legs.clone(),
            fuel_price_per_litre: trip.fuel_price_per_litre,
            fuel_consumption_per_100km: trip.fuel_consumption_per_100km,
            num_people: trip.num_people,
            activities: trip.activities.clone(),
            booking_urls: trip.booking_urls.clone(),
        }
    }
}

/// The commands a front end issues against stored trips.
///
/// Any "currently editing" state belongs to the caller; it passes ids and fields in
/// and gets trips back.
pub trait TripAPI {
    fn create_trip(&self, fields: TripFields) -> Result<Trip, Error>;

    /// Replace every field of an existing trip except its id.
    fn update_trip(&self, id: &str, fields: TripFields) -> Result<Trip, Error>;

    fn delete_trip(&self, id: &str) -> Result<bool, Error>;

    fn list_trips(&self) -> Result<Vec<Trip>, Error>;

    fn find_trip(&self, id: &str) -> Result<Trip, Error>;
}
