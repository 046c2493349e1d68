//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, Dataset, MatchRecord, MatchTable, REQUIRED_COLUMNS};
pub use processor::{DataProcessor, CANONICAL_TEAM_NAME, LEGACY_TEAM_NAME};
