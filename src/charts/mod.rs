//! Charts module - chart specifications and rendering

pub mod palette;
mod plotter;
mod renderer;
mod spec;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{
    Bar, BarChartSpec, ChartKind, ChartSpec, HeatmapSpec, HistogramSpec, PieChartSpec, Slice,
};
