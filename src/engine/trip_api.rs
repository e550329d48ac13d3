use uuid::Uuid;

use super::helpers::build_trip;
use super::Engine;

use crate::{
    api::{TripAPI, TripFields},
    entities::Trip,
    error::{not_found_error, Error},
    store::TripStore,
};

impl<S: TripStore> TripAPI for Engine<S> {
    #[tracing::instrument(skip(self, fields), fields(name = %fields.name))]
    fn create_trip(&self, fields: TripFields) -> Result<Trip, Error> {
        let trip = build_trip(Uuid::new_v4().to_string(), fields)?;

        self.store.save(&trip)?;

        tracing::info!(id = %trip.id, "created trip");
        Ok(trip)
    }

    #[tracing::instrument(skip(self, fields))]
    fn update_trip(&self, id: &str, fields: TripFields) -> Result<Trip, Error> {
        // validate before touching the store so a bad form never reaches disk
        let trip = build_trip(id.to_string(), fields)?;

        if self.store.find_by_id(id)?.is_none() {
            return Err(not_found_error(id));
        }

        self.store.save(&trip)?;

        tracing::info!("updated trip");
        Ok(trip)
    }

    #[tracing::instrument(skip(self))]
    fn delete_trip(&self, id: &str) -> Result<bool, Error> {
        let deleted = self.store.delete_by_id(id)?;

        if !deleted {
            tracing::info!("no trip to delete");
        }

        Ok(deleted)
    }

    #[tracing::instrument(skip(self))]
    fn list_trips(&self) -> Result<Vec<Trip>, Error> {
        self.store.load_all()
    }

    #[tracing::instrument(skip(self))]
    fn find_trip(&self, id: &str) -> Result<Trip, Error> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| not_found_error(id))
    }
}
