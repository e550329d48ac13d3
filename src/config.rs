use std::env;
use std::path::PathBuf;

use crate::error::Error;

pub const TRIPS_DIR_VAR: &str = "ROADTRIP_TRIPS_DIR";
pub const DEFAULT_TRIPS_DIR: &str = "trips";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub trips_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trips_dir: PathBuf::from(DEFAULT_TRIPS_DIR),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_var(env::var(TRIPS_DIR_VAR))
    }

    fn from_var(trips_dir: Result<String, env::VarError>) -> Result<Self, Error> {
        match trips_dir {
            Ok(dir) if !dir.trim().is_empty() => Ok(Self {
                trips_dir: PathBuf::from(dir),
            }),
            Ok(_) | Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::ffi::OsString;

    #[test]
    fn defaults_to_trips_folder() {
        let config = Config::from_var(Err(env::VarError::NotPresent)).unwrap();
        assert_eq!(config.trips_dir, PathBuf::from("trips"));

        let config = Config::from_var(Ok("  ".into())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_configured_folder() {
        let config = Config::from_var(Ok("/var/lib/roadtrip".into())).unwrap();
        assert_eq!(config.trips_dir, PathBuf::from("/var/lib/roadtrip"));
    }

    #[test]
    fn non_unicode_value_is_an_error() {
        let err = Config::from_var(Err(env::VarError::NotUnicode(OsString::new()))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
