//! Fuel, lodging and food cost derivations.
//!
//! Nothing here rounds; formatting money for display is left to the caller.

use crate::entities::{Leg, Trip};
use crate::error::{domain_error, Error};
use crate::itinerary;

pub fn litres_consumed(distance_km: f64, consumption_per_100km: f64) -> f64 {
    (distance_km / 100.0) * consumption_per_100km
}

pub fn fuel_cost(distance_km: f64, consumption_per_100km: f64, price_per_litre: f64) -> f64 {
    litres_consumed(distance_km, consumption_per_100km) * price_per_litre
}

/// Lodging and food for one leg. Fuel is a trip-level cost.
pub fn leg_cost(leg: &Leg) -> f64 {
    leg.sleeping_cost + leg.food_cost
}

pub fn trip_fuel_cost(trip: &Trip) -> f64 {
    fuel_cost(
        itinerary::total_distance_km(&trip.legs),
        trip.fuel_consumption_per_100km,
        trip.fuel_price_per_litre,
    )
}

pub fn total_sleeping_cost(trip: &Trip) -> f64 {
    trip.legs.iter().map(|leg| leg.sleeping_cost).sum()
}

pub fn total_food_cost(trip: &Trip) -> f64 {
    trip.legs.iter().map(|leg| leg.food_cost).sum()
}

pub fn total_price(trip: &Trip) -> f64 {
    trip_fuel_cost(trip) + total_sleeping_cost(trip) + total_food_cost(trip)
}

pub fn cost_per_person(trip: &Trip) -> Result<f64, Error> {
    if trip.num_people == 0 {
        return Err(domain_error(
            "cost per person requires at least one traveller",
        ));
    }

    Ok(total_price(trip) / f64::from(trip.num_people))
}
