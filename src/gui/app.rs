//! Cricket Insights Main Application
//! Main window with navigation panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{DataLoader, Dataset};
use crate::error::DashboardError;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::View;
use egui::SidePanel;
use log::{error, info, warn};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(DashboardError),
}

/// Main application window.
pub struct CricketApp {
    config: AppConfig,
    dataset: Option<Dataset>,
    /// Dataset or selection problem shown instead of charts.
    problem: Option<DashboardError>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl CricketApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let (selected, problem) = match View::from_label(&config.default_view) {
            Ok(view) => (Some(view), None),
            Err(e) => {
                warn!("Configured default view rejected: {}", e);
                (None, Some(e))
            }
        };

        let mut app = Self {
            config,
            dataset: None,
            problem,
            control_panel: ControlPanel::new(selected),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_loading();
        app
    }

    /// Load the configured dataset once, off the UI thread.
    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.control_panel.set_status("Loading dataset...");

        let path = self.config.dataset_path.clone();
        thread::spawn(move || {
            let result = match DataLoader::load(&path) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                self.control_panel
                    .set_status(&format!("Loaded {} matches", dataset.table.len()));
                self.control_panel.export_enabled = true;
                if let Some(view) = self.control_panel.selected {
                    self.chart_viewer.set_view(view, &dataset.table);
                }
                self.dataset = Some(dataset);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                error!("{}", e);
                self.control_panel.set_status(&e.to_string());
                self.chart_viewer.clear();
                self.problem = Some(e);
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                let e = DashboardError::data_unavailable("loader stopped unexpectedly");
                error!("{}", e);
                self.problem = Some(e);
                self.is_loading = false;
            }
        }
    }

    /// Handle a label chosen in the navigation selector.
    fn handle_select(&mut self, label: &str) {
        match View::from_label(label) {
            Ok(view) => {
                info!("Selected view: {}", view.label());
                self.control_panel.selected = Some(view);
                if matches!(self.problem, Some(DashboardError::UnknownSelection(_))) {
                    self.problem = None;
                }
                if let Some(dataset) = &self.dataset {
                    self.chart_viewer.set_view(view, &dataset.table);
                }
            }
            Err(e) => {
                warn!("{}", e);
                self.control_panel.selected = None;
                self.chart_viewer.clear();
                self.problem = Some(e);
            }
        }
    }

    /// Export the active view's charts as PNG files
    fn handle_export_view(&mut self) {
        let (Some(dataset), Some(view)) = (&self.dataset, self.control_panel.selected) else {
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_view(view, &dataset.table, &dir, self.config.export_size)
        {
            Ok(paths) if paths.is_empty() => {
                self.control_panel.set_status("Nothing to export");
            }
            Ok(paths) => {
                self.control_panel
                    .set_status(&format!("Exported {} chart(s)", paths.len()));
                if let Err(e) = open::that(&paths[0]) {
                    warn!("Could not open {}: {}", paths[0].display(), e);
                }
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Export every view's charts as PNG files
    fn handle_export_all(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        match StaticChartRenderer::export_all(&dataset.table, &dir, self.config.export_size) {
            Ok(paths) => {
                self.control_panel.set_status(&format!(
                    "Exported {} charts to {}",
                    paths.len(),
                    dir.display()
                ));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for CricketApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Navigation
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, self.dataset.as_ref());

                    match action {
                        ControlPanelAction::Select(label) => self.handle_select(&label),
                        ControlPanelAction::ExportView => self.handle_export_view(),
                        ControlPanelAction::ExportAll => self.handle_export_all(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.is_loading {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            self.chart_viewer.show(ui, self.problem.as_ref());
        });
    }
}
