//! Control Panel Widget
//! Left side navigation with the view selector, dataset summary and export buttons.

use crate::data::Dataset;
use crate::view::View;
use egui::{Color32, ComboBox, RichText};

/// Left side navigation panel.
pub struct ControlPanel {
    /// `None` until a valid option has been chosen.
    pub selected: Option<View>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selected: None,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new(selected: Option<View>) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: Option<&Dataset>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏏 Cricket Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Match Performance and Analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("Navigation").size(16.0).strong());
        ui.add_space(5.0);
        ui.label("Choose an analysis option:");

        let selected_text = self.selected.map(View::label).unwrap_or("Select...");
        ComboBox::from_id_salt("analysis_option")
            .width(220.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for view in View::ALL {
                    if ui
                        .selectable_label(self.selected == Some(view), view.label())
                        .clicked()
                    {
                        action = ControlPanelAction::Select(view.label().to_string());
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| match dataset {
                Some(data) => {
                    let name = data
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| data.path.display().to_string());
                    ui.label(RichText::new(name).size(12.0).strong());
                    ui.label(RichText::new(format!("{} matches", data.table.len())).size(11.0));
                    if let Some((first, last)) = data.table.season_span() {
                        ui.label(RichText::new(format!("Seasons {first}–{last}")).size(11.0));
                    }
                    ui.label(
                        RichText::new(format!("{} team names normalized", data.normalized_cells))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
                None => {
                    ui.label(RichText::new("No dataset loaded").size(12.0).color(Color32::GRAY));
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled && self.selected.is_some(), |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export View").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportView;
                }
            });

            ui.add_space(6.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📦 Export All").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportAll;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") || self.status.contains("unavailable")
        {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") || self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    /// Option label picked in the selector.
    Select(String),
    ExportView,
    ExportAll,
}
