//! Cricket Insights - Match Performance and Analysis Dashboard
//!
//! Loads a match dataset once, aggregates it per navigation option and
//! renders the resulting charts interactively or as PNG images.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod stats;
pub mod view;

pub use error::DashboardError;
pub use view::{Panel, View};
