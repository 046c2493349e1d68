//! Stats module - aggregation and distribution math

mod aggregator;
mod calculator;

pub use aggregator::{
    Aggregator, CitySeasonMatrix, CountSeries, Distribution, MarginKind, MarginSample, Share,
    TOP_PLAYERS, TOSS_LOST_MATCH, TOSS_WON_MATCH,
};
pub use calculator::{Histogram, StatsCalculator, DENSITY_GRID_POINTS};
