use std::result;

pub mod catalog;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod events;
pub mod password;

pub use catalog::TrainCatalog;
pub use config::StorePaths;
pub use directory::UserDirectory;
pub use engine::BookingEngine;
pub use error::BookingError;
pub use events::{Event, EventSink, LogSink};
pub use password::PasswordHasher;

pub type Result<T> = result::Result<T, BookingError>;
