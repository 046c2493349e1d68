//! Static Chart Renderer
//! Draws chart specifications into PNG images with plotters.
//!
//! Layout follows the interactive panels:
//! - bars: categories on one axis, integer counts on the other
//! - pies: percentage labels inside, category labels outside
//! - heatmap: first season on the top row, every cell annotated
//! - histograms: translucent bins with the density curve on top

use crate::charts::palette::Rgb;
use crate::charts::{BarChartSpec, ChartSpec, HeatmapSpec, HistogramSpec, PieChartSpec};
use crate::data::MatchTable;
use crate::view::View;
use image::{ImageFormat, RgbImage};
use log::{info, warn};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rayon::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Bytes in an RGB bitmap of the given size.
fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to PNG bytes.
    pub fn render_png(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; rgb_buffer_len(width, height)];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            match spec {
                ChartSpec::Bar(bar) if bar.horizontal => Self::draw_horizontal_bars(&root, bar)?,
                ChartSpec::Bar(bar) => Self::draw_vertical_bars(&root, bar)?,
                ChartSpec::Pie(pie) => Self::draw_pie(&root, pie)?,
                ChartSpec::Heatmap(heat) => Self::draw_heatmap(&root, heat)?,
                ChartSpec::Histogram(hist) => Self::draw_histogram(&root, hist)?,
            }
            root.present().map_err(draw_err)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write every non-empty chart of `view` into `dir`.
    pub fn export_view(
        view: View,
        table: &MatchTable,
        dir: &Path,
        size: [u32; 2],
    ) -> Result<Vec<PathBuf>, RenderError> {
        let mut written = Vec::new();

        for (idx, panel) in view.build(table).iter().enumerate() {
            let spec = match &panel.chart {
                Ok(spec) => spec,
                Err(e) => {
                    warn!("Skipping export of {} chart {}: {}", view.label(), idx + 1, e);
                    continue;
                }
            };
            let path = dir.join(format!("{}_{}.png", view.slug(), idx + 1));
            let bytes = Self::render_png(spec, size[0], size[1])?;
            std::fs::write(&path, bytes)?;
            info!("Exported {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Export all views, rendering them in parallel.
    pub fn export_all(
        table: &MatchTable,
        dir: &Path,
        size: [u32; 2],
    ) -> Result<Vec<PathBuf>, RenderError> {
        let per_view: Vec<Vec<PathBuf>> = View::ALL
            .par_iter()
            .map(|view| Self::export_view(*view, table, dir, size))
            .collect::<Result<_, _>>()?;
        Ok(per_view.into_iter().flatten().collect())
    }

    fn draw_vertical_bars(root: &Area, spec: &BarChartSpec) -> Result<(), RenderError> {
        let n = spec.bars.len() as i32;
        let y_max = spec.max_value() as f64 * 1.15 + 1.0;
        let labels: Vec<&str> = spec.bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 26).into_font())
            .margin(20)
            .x_label_area_size(170)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(labels.len())
            .x_label_style(
                (FONT, 13)
                    .into_font()
                    .color(&BLACK)
                    .transform(FontTransform::Rotate90)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            )
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).unwrap_or(&"").to_string(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
                let i = i as i32;
                let mut rect = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), bar.value as f64),
                    ],
                    rgb(bar.color).filled(),
                );
                rect.set_margin(0, 0, 6, 6);
                rect
            }))
            .map_err(draw_err)?;

        if spec.annotate {
            let style = (FONT, 15)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart
                .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
                    Text::new(
                        bar.value.to_string(),
                        (SegmentValue::CenterOf(i as i32), bar.value as f64 + y_max * 0.01),
                        style.clone(),
                    )
                }))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_horizontal_bars(root: &Area, spec: &BarChartSpec) -> Result<(), RenderError> {
        let n = spec.bars.len() as i32;
        let x_max = spec.max_value() as f64 * 1.1 + 1.0;
        // Row 0 is the bottom of the chart; the first entry goes on top.
        let labels: Vec<&str> = spec.bars.iter().rev().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 26).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(180)
            .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .y_labels(labels.len())
            .y_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).unwrap_or(&"").to_string(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
                let row = n - 1 - i as i32;
                let mut rect = Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(row)),
                        (bar.value as f64, SegmentValue::Exact(row + 1)),
                    ],
                    rgb(bar.color).filled(),
                );
                rect.set_margin(4, 4, 0, 0);
                rect
            }))
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_pie(root: &Area, spec: &PieChartSpec) -> Result<(), RenderError> {
        let area = root
            .titled(&spec.title, (FONT, 26).into_font())
            .map_err(draw_err)?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = w.min(h) as f64 * 0.38;

        let sizes: Vec<f64> = spec.slices.iter().map(|s| s.count as f64).collect();
        let colors: Vec<RGBColor> = spec.slices.iter().map(|s| rgb(s.color)).collect();
        let labels: Vec<&str> = spec.slices.iter().map(|s| s.label.as_str()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-spec.start_angle);
        pie.label_style((FONT, 18).into_font().color(&BLACK));
        pie.percentages((FONT, 16).into_font().color(&BLACK));
        area.draw(&pie).map_err(draw_err)?;

        Ok(())
    }

    fn draw_heatmap(root: &Area, spec: &HeatmapSpec) -> Result<(), RenderError> {
        let rows = spec.row_labels.len() as i32;
        let cols = spec.col_labels.len() as i32;
        let row_labels: Vec<&str> = spec.row_labels.iter().rev().map(|s| s.as_str()).collect();
        let col_labels: Vec<&str> = spec.col_labels.iter().map(|s| s.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 26).into_font())
            .margin(20)
            .x_label_area_size(130)
            .y_label_area_size(70)
            .build_cartesian_2d((0..cols).into_segmented(), (0..rows).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(col_labels.len())
            .y_labels(row_labels.len())
            .x_label_style(
                (FONT, 12)
                    .into_font()
                    .color(&BLACK)
                    .transform(FontTransform::Rotate90)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            )
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => col_labels.get(*i as usize).unwrap_or(&"").to_string(),
                _ => String::new(),
            })
            .y_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => row_labels.get(*i as usize).unwrap_or(&"").to_string(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        let cells: Vec<(i32, i32, usize)> = spec
            .cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                let y = rows - 1 - r as i32;
                row.iter()
                    .enumerate()
                    .map(move |(c, &value)| (c as i32, y, value))
            })
            .collect();

        chart
            .draw_series(cells.iter().map(|&(x, y, value)| {
                let mut rect = Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    rgb(spec.cell_color(value)).filled(),
                );
                rect.set_margin(1, 1, 1, 1);
                rect
            }))
            .map_err(draw_err)?;

        if spec.annotate {
            chart
                .draw_series(cells.iter().map(|&(x, y, value)| {
                    let text_color = rgb(spec.cell_color(value).contrast_text());
                    Text::new(
                        value.to_string(),
                        (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                        (FONT, 11)
                            .into_font()
                            .color(&text_color)
                            .pos(Pos::new(HPos::Center, VPos::Center)),
                    )
                }))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_histogram(root: &Area, spec: &HistogramSpec) -> Result<(), RenderError> {
        let hist = &spec.histogram;
        let (Some(&x_min), Some(&x_max)) = (hist.edges.first(), hist.edges.last()) else {
            return Err(RenderError::Draw("histogram has no bins".to_string()));
        };
        let density_max = spec
            .density
            .iter()
            .flatten()
            .map(|p| p[1])
            .fold(0.0, f64::max);
        let y_max = (hist.max_count() as f64).max(density_max) * 1.1 + 0.5;
        let color = rgb(spec.color);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 24).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(hist.bins().map(|(left, right, count)| {
                Rectangle::new([(left, 0.0), (right, count as f64)], color.mix(0.45).filled())
            }))
            .map_err(draw_err)?;
        chart
            .draw_series(hist.bins().map(|(left, right, count)| {
                Rectangle::new([(left, 0.0), (right, count as f64)], color.stroke_width(1))
            }))
            .map_err(draw_err)?;

        if let Some(curve) = &spec.density {
            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|p| (p[0], p[1])),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_does_not_wrap_for_large_exports() {
        assert_eq!(rgb_buffer_len(1200, 800), 2_880_000);
        assert_eq!(rgb_buffer_len(40_000, 40_000), 4_800_000_000);
    }
}
