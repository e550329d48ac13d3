mod leg;
mod trip;

pub use leg::Leg;
pub use trip::{
    Trip, DEFAULT_FUEL_CONSUMPTION_PER_100KM, DEFAULT_FUEL_PRICE_PER_LITRE, DEFAULT_NUM_PEOPLE,
};
