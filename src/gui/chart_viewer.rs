//! Chart Viewer Widget
//! Central scrollable panel showing the charts of the selected view.
//! Two-chart views are laid out side by side.

use crate::charts::ChartPlotter;
use crate::data::MatchTable;
use crate::error::DashboardError;
use crate::view::{Panel, View};
use egui::{Color32, RichText, ScrollArea};

const SINGLE_CHART_HEIGHT: f32 = 520.0;
const PAIRED_CHART_HEIGHT: f32 = 380.0;

/// Aggregates for the active view. Rebuilt on every selection.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<View>,
    pub panels: Vec<Panel>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
        self.panels.clear();
    }

    /// Recompute the charts for `view`.
    pub fn set_view(&mut self, view: View, table: &MatchTable) {
        self.panels = view.build(table);
        self.view = Some(view);
    }

    /// Draw the viewer. `problem` replaces the charts when the dataset or the
    /// selection is unusable.
    pub fn show(&self, ui: &mut egui::Ui, problem: Option<&DashboardError>) {
        if let Some(err) = problem {
            Self::draw_message(ui, &Self::problem_text(err), true);
            return;
        }

        let Some(view) = self.view else {
            Self::draw_message(ui, "Choose an analysis option from the sidebar.", false);
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(view.heading()).size(22.0).strong());
                ui.add_space(10.0);

                match self.panels.as_slice() {
                    [left, right] => {
                        ui.columns(2, |cols| {
                            Self::draw_panel(&mut cols[0], view, 0, left, PAIRED_CHART_HEIGHT);
                            Self::draw_panel(&mut cols[1], view, 1, right, PAIRED_CHART_HEIGHT);
                        });
                    }
                    panels => {
                        for (idx, panel) in panels.iter().enumerate() {
                            Self::draw_panel(ui, view, idx, panel, SINGLE_CHART_HEIGHT);
                            ui.add_space(15.0);
                        }
                    }
                }

                ui.add_space(10.0);
                ui.separator();
            });
    }

    fn draw_panel(ui: &mut egui::Ui, view: View, idx: usize, panel: &Panel, height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                if let Some(heading) = panel.heading {
                    ui.label(RichText::new(heading).size(18.0).strong());
                    ui.add_space(6.0);
                }
                match &panel.chart {
                    Ok(spec) => {
                        let id = format!("{}_{}", view.slug(), idx);
                        ChartPlotter::draw_chart(ui, &id, spec, height);
                    }
                    Err(err) => {
                        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                            Self::draw_message(ui, &Self::problem_text(err), false);
                        });
                    }
                }
            });
    }

    fn problem_text(err: &DashboardError) -> String {
        match err {
            DashboardError::DataUnavailable(_) => format!("⚠ {err}"),
            DashboardError::EmptyInput(what) => format!("No {what} to chart."),
            DashboardError::UnknownSelection(_) => {
                format!("{err}. Choose an analysis option from the sidebar.")
            }
        }
    }

    fn draw_message(ui: &mut egui::Ui, text: &str, is_error: bool) {
        let color = if is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(text).size(18.0).color(color));
        });
    }
}
