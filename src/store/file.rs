use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use super::migration::{self, Generation};
use super::slug::trip_filename;
use super::{sort_by_name, TripStore};
use crate::entities::Trip;
use crate::error::{validation_error, Error};

/// One JSON file per trip inside a single directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rewrite every readable record in the current generation.
    ///
    /// Returns how many records were rewritten. Records that already match the
    /// current shape and filename are left alone.
    #[tracing::instrument(skip(self), fields(trips_dir = %self.dir.display()))]
    pub fn upgrade_all(&self) -> Result<usize, Error> {
        let mut upgraded = 0;

        for path in json_files(&self.dir)? {
            // an earlier rewrite in this pass may already have replaced it
            if !path.exists() {
                continue;
            }

            let (generation, trip) = match read_record(&path) {
                Ok(record) => record,
                Err(err) if err.is_unreadable_record() => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable trip");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let in_place = path.file_name().and_then(|name| name.to_str())
                == Some(trip_filename(&trip).as_str());
            if generation == Generation::Current && in_place {
                continue;
            }

            match save(&trip, &self.dir) {
                Ok(_) => upgraded += 1,
                Err(err) if err.is_caller_facing() => {
                    tracing::warn!(path = %path.display(), error = %err, "cannot rewrite trip");
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(upgraded, "upgraded trip records");
        Ok(upgraded)
    }
}

impl TripStore for FileStore {
    fn save(&self, trip: &Trip) -> Result<(), Error> {
        save(trip, &self.dir).map(|_| ())
    }

    fn load_all(&self) -> Result<Vec<Trip>, Error> {
        load_all(&self.dir)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Trip>, Error> {
        find_by_id(id, &self.dir)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool, Error> {
        delete_by_id(id, &self.dir)
    }
}

/// The file layout: raw fields first, then derived values for human readers.
#[derive(Serialize)]
pub struct TripRecord<'a> {
    #[serde(flatten)]
    trip: &'a Trip,
    total_distance_km: f64,
    total_travel_time_hours: f64,
    total_driving_breaks: u32,
    total_break_minutes: u32,
    route_waypoints: Vec<String>,
    fuel_cost: f64,
    total_sleeping_cost: f64,
    total_food_cost: f64,
    total_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_per_person: Option<f64>,
}

impl<'a> From<&'a Trip> for TripRecord<'a> {
    fn from(trip: &'a Trip) -> Self {
        Self {
            trip,
            total_distance_km: trip.total_distance_km(),
            total_travel_time_hours: trip.total_travel_time_hours(),
            total_driving_breaks: trip.total_driving_breaks(),
            total_break_minutes: trip.total_break_minutes(),
            route_waypoints: trip.route_waypoints(),
            fuel_cost: trip.fuel_cost(),
            total_sleeping_cost: trip.total_sleeping_cost(),
            total_food_cost: trip.total_food_cost(),
            total_price: trip.total_price(),
            cost_per_person: trip.cost_per_person().ok(),
        }
    }
}

/// Rejects ids that would escape the directory once part of a filename.
fn validate_id(id: &str) -> Result<(), Error> {
    if id.is_empty() {
        return Err(validation_error("trip id cannot be empty"));
    }
    if id.contains('/') || id.contains('\\') || id.contains("..") || id.contains('\0') {
        return Err(validation_error(format!(
            "trip id contains invalid characters: {id:?}"
        )));
    }
    if id.chars().any(|c| c.is_control()) {
        return Err(validation_error(format!(
            "trip id contains control characters: {id:?}"
        )));
    }
    Ok(())
}

/// Write `trip` into `dir`, creating the directory if needed.
///
/// Any other record in `dir` carrying the same id is removed once the new file is
/// in place, so renaming a trip does not leave its old file behind.
#[tracing::instrument(skip(trip, dir), fields(id = %trip.id, trips_dir = %dir.display()))]
pub fn save(trip: &Trip, dir: &Path) -> Result<PathBuf, Error> {
    validate_id(&trip.id)?;
    fs::create_dir_all(dir)?;

    let path = dir.join(trip_filename(trip));
    let content = serde_json::to_string_pretty(&TripRecord::from(trip))?;
    write_atomically(dir, &path, content.as_bytes())?;

    for other in json_files(dir)? {
        if other == path {
            continue;
        }
        if matches!(load(&other), Ok(stored) if stored.is_same_trip(trip)) {
            tracing::info!(path = %other.display(), "removing superseded trip file");
            fs::remove_file(&other)?;
        }
    }

    tracing::info!(path = %path.display(), "saved trip");
    Ok(path)
}

fn write_atomically(dir: &Path, path: &Path, content: &[u8]) -> Result<(), Error> {
    let tmp_path = dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, path)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}

fn read_record(path: &Path) -> Result<(Generation, Trip), Error> {
    let bytes = fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    migration::migrate(value)
}

/// Read one record, upgrading it from whichever generation it was written in.
pub fn load(path: &Path) -> Result<Trip, Error> {
    read_record(path).map(|(_, trip)| trip)
}

/// `*.json` files directly inside `dir`, in filename order. A missing directory is empty.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Every readable trip in `dir`, ordered by case-insensitive name.
///
/// Files that are not valid JSON, or that cannot be rebuilt into a trip, are
/// skipped. Other I/O failures are returned.
pub fn load_all(dir: &Path) -> Result<Vec<Trip>, Error> {
    let mut trips = Vec::new();

    for path in json_files(dir)? {
        match load(&path) {
            Ok(trip) => trips.push(trip),
            Err(err) if err.is_unreadable_record() => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable trip");
            }
            Err(err) => return Err(err),
        }
    }

    sort_by_name(&mut trips);
    Ok(trips)
}

pub fn find_by_id(id: &str, dir: &Path) -> Result<Option<Trip>, Error> {
    Ok(load_all(dir)?.into_iter().find(|trip| trip.id == id))
}

/// Remove the first file whose trip has `id`.
#[tracing::instrument(skip(dir), fields(trips_dir = %dir.display()))]
pub fn delete_by_id(id: &str, dir: &Path) -> Result<bool, Error> {
    for path in json_files(dir)? {
        match load(&path) {
            Ok(trip) if trip.id == id => {
                fs::remove_file(&path)?;
                tracing::info!(path = %path.display(), "deleted trip");
                return Ok(true);
            }
            Ok(_) => {}
            Err(err) if err.is_unreadable_record() => {}
            Err(err) => return Err(err),
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Leg;
    use crate::error::ErrorKind;
    use serde_json::Value;
    use tempfile::TempDir;

    fn road_trip() -> Trip {
        let mut trip = Trip::new("Road Trip").with_legs(vec![
            Leg::new("Home", "Paris", 480.5, 4.75).with_costs(95.0, 32.4),
            Leg::new("Paris", "Lyon", 465.0, 4.5).with_costs(0.0, 18.25),
        ]);
        trip.fuel_price_per_litre = 1.83;
        trip.fuel_consumption_per_100km = 6.1;
        trip.num_people = 3;
        trip.activities = vec!["Louvre".into(), "Bouchon dinner".into()];
        trip.booking_urls = vec!["https://example.com/hotel".into()];
        trip
    }

    #[test]
    fn save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let trip = road_trip();

        let path = save(&trip, temp_dir.path()).unwrap();
        assert_eq!(load(&path).unwrap(), trip);
    }

    #[test]
    fn save_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("trips");
        let trip = road_trip();

        let path = save(&trip, &dir).unwrap();
        assert!(path.starts_with(&dir));
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("road-trip_{}.json", &trip.id[..8])
        );
    }

    #[test]
    fn saved_file_carries_derived_values() {
        let temp_dir = TempDir::new().unwrap();
        let trip = road_trip();
        let path = save(&trip, temp_dir.path()).unwrap();

        let value: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["name"], "Road Trip");
        assert_eq!(value["legs"][0]["origin"], "Home");
        assert_eq!(value["total_driving_breaks"], 4);
        assert_eq!(value["route_waypoints"][2], "Lyon");
        assert!(value["total_price"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn stale_derived_values_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let trip = road_trip();
        let path = save(&trip, temp_dir.path()).unwrap();

        let mut value: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        value["total_price"] = Value::from(1.0);
        value["total_distance_km"] = Value::from(-5);
        fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, trip);
        assert_eq!(loaded.total_distance_km(), 945.5);
    }

    #[test]
    fn rename_replaces_old_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut trip = road_trip();
        let old_path = save(&trip, temp_dir.path()).unwrap();

        trip.name = "Grand Tour".into();
        let new_path = save(&trip, temp_dir.path()).unwrap();

        assert!(!old_path.exists());
        assert!(new_path.exists());
        assert_eq!(json_files(temp_dir.path()).unwrap(), vec![new_path]);
    }

    #[test]
    fn unsafe_ids_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let trip = Trip::with_id("../../etc", "Escape");

        let err = save(&trip, temp_dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(json_files(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn load_propagates_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{\"name\": ").unwrap();

        assert_eq!(load(&path).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn load_missing_file_is_io() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_all(&temp_dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn corrupt_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let trip = road_trip();
        save(&trip, temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("corrupt.json"), "not json at all").unwrap();
        fs::write(temp_dir.path().join("partial.json"), r#"{"id": "no-name"}"#).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(load_all(temp_dir.path()).unwrap(), vec![trip]);
    }

    #[test]
    fn delete_first_match_only() {
        let temp_dir = TempDir::new().unwrap();
        let record = r#"{"name": "Dup", "id": "same-id", "legs": []}"#;
        fs::write(temp_dir.path().join("a.json"), record).unwrap();
        fs::write(temp_dir.path().join("b.json"), record).unwrap();

        assert!(delete_by_id("same-id", temp_dir.path()).unwrap());
        assert_eq!(json_files(temp_dir.path()).unwrap().len(), 1);
        assert!(find_by_id("same-id", temp_dir.path()).unwrap().is_some());
    }

    #[test]
    fn delete_without_match_leaves_directory() {
        let temp_dir = TempDir::new().unwrap();
        save(&road_trip(), temp_dir.path()).unwrap();

        assert!(!delete_by_id("unknown", temp_dir.path()).unwrap());
        assert_eq!(json_files(temp_dir.path()).unwrap().len(), 1);
        assert!(!delete_by_id("unknown", &temp_dir.path().join("absent")).unwrap());
    }

    #[test]
    fn upgrade_rewrites_legacy_records() {
        let temp_dir = TempDir::new().unwrap();
        let legacy = temp_dir.path().join("old.json");
        fs::write(
            &legacy,
            r#"{"price": {"fuel": 10, "sleeping": 20, "food": 5}, "travel_time_hours": 3, "name": "Old Trip", "id": "abcdef123456"}"#,
        )
        .unwrap();
        let current = save(&road_trip(), temp_dir.path()).unwrap();

        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.upgrade_all().unwrap(), 1);
        assert!(!legacy.exists());
        assert!(current.exists());

        let upgraded = temp_dir.path().join("old-trip_abcdef12.json");
        let value: Value = serde_json::from_slice(&fs::read(&upgraded).unwrap()).unwrap();
        assert!(value.get("price").is_none());
        assert_eq!(value["legs"][0]["sleeping_cost"], 20.0);

        assert_eq!(store.upgrade_all().unwrap(), 0);
    }
}
