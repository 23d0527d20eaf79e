use std::env;
use std::path::{Path, PathBuf};

pub const TRAINS_FILE: &str = "trains.json";
pub const USERS_FILE: &str = "users.json";

/// Locations of the two JSON documents backing the system: one array of
/// trains, one array of users, both under a single data directory.
#[derive(Debug, Clone)]
pub struct StorePaths {
    data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_env() -> Option<Self> {
        let data_dir = env::var("BOOKING_DATA_DIR").ok()?;
        Some(Self::new(data_dir))
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn trains_file(&self) -> PathBuf {
        self.data_dir.join(TRAINS_FILE)
    }

    #[must_use]
    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }
}
