use serde::{Deserialize, Serialize};

use crate::{costs, itinerary};

/// One directed segment of a trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub travel_time_hours: f64,
    #[serde(default)]
    pub sleeping_cost: f64,
    #[serde(default)]
    pub food_cost: f64,
}

impl Leg {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
        travel_time_hours: f64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            travel_time_hours,
            sleeping_cost: 0.0,
            food_cost: 0.0,
        }
    }

    pub fn with_costs(mut self, sleeping_cost: f64, food_cost: f64) -> Self {
        self.sleeping_cost = sleeping_cost;
        self.food_cost = food_cost;
        self
    }

    pub fn driving_breaks(&self) -> u32 {
        itinerary::driving_breaks(self.travel_time_hours)
    }

    pub fn break_minutes(&self) -> u32 {
        itinerary::break_minutes(self.driving_breaks())
    }

    /// Sleeping plus food; fuel is charged on the whole trip.
    pub fn leg_cost(&self) -> f64 {
        costs::leg_cost(self)
    }
}
