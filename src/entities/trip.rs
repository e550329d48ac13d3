use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Leg;
use crate::error::Error;
use crate::{costs, itinerary};

pub const DEFAULT_FUEL_PRICE_PER_LITRE: f64 = 1.6;
pub const DEFAULT_FUEL_CONSUMPTION_PER_100KM: f64 = 7.0;
pub const DEFAULT_NUM_PEOPLE: u32 = 1;

/// An ordered itinerary.
///
/// Only raw fields are stored. Every aggregate is recomputed from `legs` on each
/// call, so a trip never carries a stale total. Two trips are the same trip when
/// their ids match; everything else may change between saves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub name: String,
    pub id: String,
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

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            legs: Vec::new(),
            fuel_price_per_litre: DEFAULT_FUEL_PRICE_PER_LITRE,
            fuel_consumption_per_100km: DEFAULT_FUEL_CONSUMPTION_PER_100KM,
            num_people: DEFAULT_NUM_PEOPLE,
            activities: Vec::new(),
            booking_urls: Vec::new(),
        }
    }

    pub fn with_legs(mut self, legs: Vec<Leg>) -> Self {
        self.legs = legs;
        self
    }

    pub fn is_same_trip(&self, other: &Trip) -> bool {
        self.id == other.id
    }

    pub fn total_distance_km(&self) -> f64 {
        itinerary::total_distance_km(&self.legs)
    }

    pub fn total_travel_time_hours(&self) -> f64 {
        itinerary::total_travel_time_hours(&self.legs)
    }

    pub fn total_driving_breaks(&self) -> u32 {
        itinerary::total_driving_breaks(&self.legs)
    }

    pub fn total_break_minutes(&self) -> u32 {
        itinerary::total_break_minutes(&self.legs)
    }

    pub fn route_waypoints(&self) -> Vec<String> {
        itinerary::route_waypoints(&self.legs)
    }

    pub fn fuel_cost(&self) -> f64 {
        costs::trip_fuel_cost(self)
    }

    pub fn total_sleeping_cost(&self) -> f64 {
        costs::total_sleeping_cost(self)
    }

    pub fn total_food_cost(&self) -> f64 {
        costs::total_food_cost(self)
    }

    pub fn total_price(&self) -> f64 {
        costs::total_price(self)
    }

    /// Fails with a domain error when the trip has no travellers.
    pub fn cost_per_person(&self) -> Result<f64, Error> {
        costs::cost_per_person(self)
    }
}
