pub mod api;
pub mod config;
pub mod costs;
pub mod engine;
pub mod entities;
pub mod error;
pub mod itinerary;
pub mod store;
