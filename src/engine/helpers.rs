use crate::api::TripFields;
use crate::entities::{Leg, Trip};
use crate::error::{validation_error, Error};

/// Check `fields` and build the trip they describe under `id`.
///
/// Names, activities and booking URLs are trimmed; blank activities and URLs are
/// dropped.
pub fn build_trip(id: String, fields: TripFields) -> Result<Trip, Error> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(validation_error("please enter a trip name"));
    }

    if fields.legs.is_empty() {
        return Err(validation_error("please add at least one leg"));
    }

    if fields.num_people == 0 {
        return Err(validation_error("a trip needs at least one traveller"));
    }

    ensure_positive("fuel price per litre", fields.fuel_price_per_litre)?;
    ensure_positive("fuel consumption per 100 km", fields.fuel_consumption_per_100km)?;

    for (index, leg) in fields.legs.iter().enumerate() {
        validate_leg(index, leg)?;
    }

    Ok(Trip {
        name: name.to_string(),
        id,
        legs: fields.legs,
        fuel_price_per_litre: fields.fuel_price_per_litre,
        fuel_consumption_per_100km: fields.fuel_consumption_per_100km,
        num_people: fields.num_people,
        activities: non_blank(fields.activities),
        booking_urls: non_blank(fields.booking_urls),
    })
}

fn validate_leg(index: usize, leg: &Leg) -> Result<(), Error> {
    let values = [
        ("distance", leg.distance_km),
        ("travel time", leg.travel_time_hours),
        ("sleeping cost", leg.sleeping_cost),
        ("food cost", leg.food_cost),
    ];

    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(validation_error(format!(
                "leg {} {} must be a non-negative number (got {})",
                index + 1,
                field,
                value
            )));
        }
    }

    Ok(())
}

fn ensure_positive(field: &str, value: f64) -> Result<(), Error> {
    if !value.is_finite() || value <= 0.0 {
        return Err(validation_error(format!(
            "{} must be positive (got {})",
            field, value
        )));
    }

    Ok(())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
