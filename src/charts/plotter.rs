//! Chart Plotter Module
//! Draws chart specifications interactively using egui_plot.

use crate::charts::palette::Rgb;
use crate::charts::{BarChartSpec, ChartSpec, HeatmapSpec, HistogramSpec, PieChartSpec};
use egui::{Align2, Color32, FontId, Pos2, RichText, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

/// Largest arc drawn as one convex wedge.
const MAX_WEDGE_ARC: f64 = std::f64::consts::FRAC_PI_2;

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Axis formatter that shows `labels[i]` at integer position `i`.
fn index_labels(
    labels: Vec<String>,
) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let v = mark.value;
        if (v - v.round()).abs() > 1e-6 || v < 0.0 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

/// One grid mark per category, so every label is shown.
fn index_marks(n: usize) -> impl Fn(GridInput) -> Vec<GridMark> + 'static {
    move |_input| {
        (0..n)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }
}

/// Draws chart specifications onto egui panels.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, height: f32) {
        ui.label(RichText::new(spec.title()).size(15.0).strong());
        ui.add_space(4.0);
        match spec {
            ChartSpec::Bar(bar) if bar.horizontal => Self::draw_horizontal_bars(ui, id, bar, height),
            ChartSpec::Bar(bar) => Self::draw_vertical_bars(ui, id, bar, height),
            ChartSpec::Pie(pie) => Self::draw_pie(ui, pie, height),
            ChartSpec::Heatmap(heat) => Self::draw_heatmap(ui, id, heat, height),
            ChartSpec::Histogram(hist) => Self::draw_histogram(ui, id, hist, height),
        }
    }

    /// Vertical bars with the integer value printed above each bar.
    pub fn draw_vertical_bars(ui: &mut egui::Ui, id: &str, spec: &BarChartSpec, height: f32) {
        let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
        let offset = (spec.max_value() as f64 * 0.03).max(0.2);

        Plot::new(format!("bars_{id}"))
            .height(height)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(spec.max_value() as f64 * 1.12)
            .x_grid_spacer(index_marks(labels.len()))
            .x_axis_formatter(index_labels(labels))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = spec
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, b)| {
                        Bar::new(i as f64, b.value as f64)
                            .width(0.7)
                            .fill(color32(b.color))
                            .name(&b.label)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));

                if spec.annotate {
                    for (i, b) in spec.bars.iter().enumerate() {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(i as f64, b.value as f64 + offset),
                                RichText::new(b.value.to_string()).strong(),
                            )
                            .anchor(Align2::CENTER_BOTTOM),
                        );
                    }
                }
            });
    }

    /// Horizontal bars, first entry at the top.
    pub fn draw_horizontal_bars(ui: &mut egui::Ui, id: &str, spec: &BarChartSpec, height: f32) {
        let n = spec.bars.len();
        let labels: Vec<String> = spec.bars.iter().rev().map(|b| b.label.clone()).collect();

        Plot::new(format!("hbars_{id}"))
            .height(height)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .y_grid_spacer(index_marks(n))
            .y_axis_formatter(index_labels(labels))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = spec
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, b)| {
                        Bar::new((n - 1 - i) as f64, b.value as f64)
                            .width(0.7)
                            .fill(color32(b.color))
                            .name(&b.label)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Pie drawn with the painter; slices run counter-clockwise from the start angle.
    pub fn draw_pie(ui: &mut egui::Ui, spec: &PieChartSpec, height: f32) {
        let size = egui::vec2(ui.available_width(), height);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);

        let center = rect.center();
        let radius = (rect.width().min(rect.height()) * 0.38) as f64;
        let text_color = ui.visuals().text_color();

        let point = |angle: f64, r: f64| {
            Pos2::new(
                center.x + (r * angle.cos()) as f32,
                center.y - (r * angle.sin()) as f32,
            )
        };

        let mut angle = spec.start_angle.to_radians();
        for slice in &spec.slices {
            let sweep = slice.fraction * std::f64::consts::TAU;
            if sweep <= 0.0 {
                continue;
            }
            let fill = color32(slice.color);

            // Split into convex wedges.
            let pieces = (sweep / MAX_WEDGE_ARC).ceil().max(1.0) as usize;
            let piece_sweep = sweep / pieces as f64;
            for p in 0..pieces {
                let from = angle + p as f64 * piece_sweep;
                let mut points = vec![center];
                let steps = 16;
                for s in 0..=steps {
                    points.push(point(from + piece_sweep * s as f64 / steps as f64, radius));
                }
                painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
            }

            let mid = angle + sweep / 2.0;
            painter.text(
                point(mid, radius * 0.6),
                Align2::CENTER_CENTER,
                slice.percent_label(),
                FontId::proportional(13.0),
                Color32::BLACK,
            );
            painter.text(
                point(mid, radius * 1.15),
                Align2::CENTER_CENTER,
                &slice.label,
                FontId::proportional(13.0),
                text_color,
            );

            angle += sweep;
        }
    }

    /// Heatmap of unit cells, first row at the top, annotated with counts.
    pub fn draw_heatmap(ui: &mut egui::Ui, id: &str, spec: &HeatmapSpec, height: f32) {
        let rows = spec.row_labels.len();
        let cols = spec.col_labels.len();
        let row_labels: Vec<String> = spec.row_labels.iter().rev().cloned().collect();

        Plot::new(format!("heatmap_{id}"))
            .height(height)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .show_grid(false)
            .x_grid_spacer(index_marks(cols))
            .y_grid_spacer(index_marks(rows))
            .x_axis_formatter(index_labels(spec.col_labels.clone()))
            .y_axis_formatter(index_labels(row_labels))
            .show(ui, |plot_ui| {
                for (r, row) in spec.cells.iter().enumerate() {
                    let y = (rows - 1 - r) as f64;
                    for (c, &value) in row.iter().enumerate() {
                        let x = c as f64;
                        let fill = spec.cell_color(value);
                        let cell = PlotPoints::from_iter([
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]);
                        plot_ui.polygon(
                            Polygon::new(cell)
                                .fill_color(color32(fill))
                                .stroke(Stroke::new(0.5, Color32::WHITE)),
                        );
                        if spec.annotate {
                            plot_ui.text(Text::new(
                                PlotPoint::new(x, y),
                                RichText::new(value.to_string())
                                    .size(10.0)
                                    .color(color32(fill.contrast_text())),
                            ));
                        }
                    }
                }
            });
    }

    /// Count histogram with the density curve on top.
    pub fn draw_histogram(ui: &mut egui::Ui, id: &str, spec: &HistogramSpec, height: f32) {
        let color = color32(spec.color);
        let width = spec.histogram.bin_width();

        Plot::new(format!("hist_{id}"))
            .height(height)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = spec
                    .histogram
                    .bins()
                    .map(|(left, right, count)| {
                        Bar::new((left + right) / 2.0, count as f64)
                            .width(width)
                            .fill(color.gamma_multiply(0.5))
                            .stroke(Stroke::new(1.0, color))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));

                if let Some(curve) = &spec.density {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(curve.iter().copied()))
                            .color(color)
                            .width(2.0),
                    );
                }
            });
    }
}
