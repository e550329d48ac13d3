mod file;
mod memory;
pub mod migration;
pub mod slug;

pub use file::{delete_by_id, find_by_id, load, load_all, save, FileStore, TripRecord};
pub use memory::MemoryStore;

use crate::entities::Trip;
use crate::error::Error;

/// Where trips live between commands.
///
/// Saving a trip whose id is already stored replaces the stored copy in full.
pub trait TripStore {
    fn save(&self, trip: &Trip) -> Result<(), Error>;

    /// Every readable trip, ordered by case-insensitive name.
    fn load_all(&self) -> Result<Vec<Trip>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<Trip>, Error>;

    /// Removes the first trip found with `id`. Returns whether anything was removed.
    fn delete_by_id(&self, id: &str) -> Result<bool, Error>;
}

pub(crate) fn sort_by_name(trips: &mut [Trip]) {
    trips.sort_by_cached_key(|trip| trip.name.to_lowercase());
}
