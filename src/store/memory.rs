use std::sync::RwLock;

use super::{sort_by_name, TripStore};
use crate::entities::Trip;
use crate::error::{unexpected_error, Error};

/// In-memory storage for tests and embedding without a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    trips: RwLock<Vec<Trip>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for MemoryStore {
    fn save(&self, trip: &Trip) -> Result<(), Error> {
        let mut trips = self.trips.write().map_err(|_| unexpected_error())?;

        match trips.iter_mut().find(|stored| stored.is_same_trip(trip)) {
            Some(stored) => *stored = trip.clone(),
            None => trips.push(trip.clone()),
        }

        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Trip>, Error> {
        let mut trips = self.trips.read().map_err(|_| unexpected_error())?.clone();
        sort_by_name(&mut trips);
        Ok(trips)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Trip>, Error> {
        let trips = self.trips.read().map_err(|_| unexpected_error())?;
        Ok(trips.iter().find(|trip| trip.id == id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> Result<bool, Error> {
        let mut trips = self.trips.write().map_err(|_| unexpected_error())?;

        match trips.iter().position(|trip| trip.id == id) {
            Some(index) => {
                trips.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
