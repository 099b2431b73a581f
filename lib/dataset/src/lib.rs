//! # Similo Dataset
//!
//! Loads location tables into candidate pools and writes saved results.
//!
//! Datasets are loaded once at start-up and passed by reference into the
//! engine; nothing here caches state between requests.

pub mod error;
pub mod export;
pub mod loader;

pub use error::DatasetError;
pub use export::{export_saved, SavedRow};
pub use loader::{load_csv, load_reader};
