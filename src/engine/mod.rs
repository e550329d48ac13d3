mod helpers;
mod trip_api;

use std::path::PathBuf;

use crate::store::{FileStore, TripStore};

/// Command handlers over an injected trip store.
#[derive(Debug)]
pub struct Engine<S: TripStore> {
    store: S,
}

impl<S: TripStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl Engine<FileStore> {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }
}
