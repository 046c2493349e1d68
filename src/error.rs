//! Dashboard Error Types
//! Failure conditions surfaced to the user by the loader, aggregators and selector.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Dataset missing or unreadable. No view can render.
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),
    /// A single aggregate has no rows; only that chart is replaced.
    #[error("No data for {0}")]
    EmptyInput(&'static str),
    #[error("Unknown selection: {0:?}")]
    UnknownSelection(String),
}

impl DashboardError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        DashboardError::DataUnavailable(msg.into())
    }
}
