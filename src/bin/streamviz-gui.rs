/*!
 * GUI application for streamviz - interactive CSV streamgraph viewer
 *
 * A cross-platform desktop application providing:
 * - CSV upload via a native file dialog
 * - A wiggle-offset streamgraph of the five tracked series
 * - A hover tooltip with a per-series mini bar chart
 * - SVG export of the current scene
 *
 * Platform support: Windows, macOS, Linux
 */

use chrono::NaiveDate;
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Polygon};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use streamviz::layout::StreamLayout;
use streamviz::models::{HoverSelection, Record, SeriesKey};
use streamviz::stats::{self, Summary};
use streamviz::{ingest, viz};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 560.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("streamviz - CSV Streamgraph Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "streamviz",
        options,
        Box::new(|_cc| Ok(Box::new(StreamvizApp::new()))),
    )
}

#[derive(Debug)]
enum LoadOutcome {
    Loaded { name: String, records: Vec<Record> },
    Failed(String),
}

/// Main application state.
///
/// `records` is the single in-memory record sequence; a finished load
/// replaces it wholesale (no in-place mutation) and the derived layout is
/// rebuilt from scratch.
struct StreamvizApp {
    records: Vec<Record>,
    layout: Option<StreamLayout>,
    summaries: Vec<Summary>,
    source_name: String,

    // Hover state machine: idle (None) <-> hovering (Some)
    hover: Option<HoverSelection>,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background load
    load_receiver: Option<mpsc::Receiver<LoadOutcome>>,
}

impl StreamvizApp {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            layout: None,
            summaries: Vec::new(),
            source_name: String::new(),
            hover: None,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            load_receiver: None,
        }
    }

    /// Pick a file and parse it on a background thread. A cancelled dialog
    /// is a no-op: the prior chart stays.
    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new().pick_file() else {
            return;
        };

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = format!("Loading {}...", path.display());

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let outcome = match ingest::load_csv(&path) {
                Ok(records) => LoadOutcome::Loaded { name, records },
                Err(err) => LoadOutcome::Failed(format!("Failed to load {}: {}", name, err)),
            };
            let _ = sender.send(outcome);
        });
    }

    /// Apply a finished background load. The new record sequence supersedes
    /// the previous one; all derived state is rebuilt.
    fn check_load_result(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(outcome) = receiver.try_recv() else {
            return;
        };
        self.is_loading = false;
        self.load_receiver = None;

        match outcome {
            LoadOutcome::Loaded { name, records } => {
                self.records = records;
                self.layout = StreamLayout::compute(&self.records);
                self.summaries = stats::series_summary(&self.records);
                self.hover = None;
                self.source_name = name;
                self.error_message.clear();
                self.status_message = if self.layout.is_some() {
                    format!(
                        "Loaded {} records from {}",
                        self.records.len(),
                        self.source_name
                    )
                } else {
                    format!("{} contains no data rows", self.source_name)
                };
            }
            LoadOutcome::Failed(error) => {
                self.error_message = error;
                self.status_message.clear();
            }
        }
    }

    fn export_svg(&mut self) {
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name("streamgraph.svg")
            .save_file()
        else {
            return;
        };
        match viz::render_streamgraph(&self.records, &path, viz::CHART_WIDTH, viz::CHART_HEIGHT) {
            Ok(()) => self.status_message = format!("Chart written to {}", path.display()),
            Err(err) => self.error_message = format!("Failed to write chart: {}", err),
        }
    }

    fn draw_streamgraph(&mut self, ui: &mut egui::Ui) {
        let Some(layout) = &self.layout else {
            ui.centered_and_justified(|ui| {
                ui.heading("Open a CSV file to view the streamgraph");
            });
            return;
        };

        let response = Plot::new("streamgraph")
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| format_day(mark.value, "%b %Y"))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                for layer in &layout.layers {
                    let color = series_color32(layer.key);
                    let mut points: Vec<[f64; 2]> = Vec::with_capacity(layer.bands.len() * 2);
                    points.extend(
                        layout
                            .xs
                            .iter()
                            .zip(layer.bands.iter())
                            .map(|(&x, &(lo, _))| [x, lo]),
                    );
                    points.extend(
                        layout
                            .xs
                            .iter()
                            .zip(layer.bands.iter())
                            .rev()
                            .map(|(&x, &(_, hi))| [x, hi]),
                    );
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .name(layer.key.label())
                            .fill_color(color)
                            .stroke(egui::Stroke::new(1.0, color)),
                    );
                }
                plot_ui.pointer_coordinate()
            });

        // Hover transition: band under the pointer -> hovering, else idle.
        let picked = response
            .inner
            .and_then(|p| layout.pick(p.x, p.y));
        let new_hover = picked.map(|key| HoverSelection::capture(&self.records, key));
        self.hover = new_hover;
    }

    /// Floating tooltip at pointer + (10, 5) px with the mini bar chart.
    fn draw_hover_tooltip(&self, ctx: &egui::Context) {
        let (Some(hover), Some(pos)) = (self.hover.as_ref(), ctx.pointer_hover_pos()) else {
            return;
        };

        egui::Area::new(egui::Id::new("hover-detail"))
            .fixed_pos(pos + egui::vec2(10.0, 5.0))
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(hover.key.label()).strong());
                    mini_bar_chart(ui, hover);
                });
            });
    }

    fn draw_summary(&self, ui: &mut egui::Ui) {
        egui::Grid::new("series-summary")
            .striped(true)
            .show(ui, |ui| {
                for header in ["Series", "Count", "Missing", "Min", "Max", "Mean", "Median"] {
                    ui.label(egui::RichText::new(header).strong());
                }
                ui.end_row();
                for s in &self.summaries {
                    ui.label(s.key.label());
                    ui.label(s.count.to_string());
                    ui.label(s.missing.to_string());
                    ui.label(format_opt(s.min));
                    ui.label(format_opt(s.max));
                    ui.label(format_opt(s.mean));
                    ui.label(format_opt(s.median));
                    ui.end_row();
                }
            });
    }
}

impl eframe::App for StreamvizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_load_result();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.is_loading, egui::Button::new("Open CSV..."))
                    .clicked()
                {
                    self.open_file();
                }
                if ui
                    .add_enabled(self.layout.is_some(), egui::Button::new("Export SVG..."))
                    .clicked()
                {
                    self.export_svg();
                }
                if self.is_loading {
                    ui.spinner();
                    ui.label("Loading...");
                }
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });

        if self.layout.is_some() {
            egui::TopBottomPanel::bottom("summary").show(ctx, |ui| {
                ui.collapsing("Series summary", |ui| {
                    self.draw_summary(ui);
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_streamgraph(ui);
        });

        self.draw_hover_tooltip(ctx);
    }
}

/// Mini bar chart for the hovered series: one bar per record, month ticks.
fn mini_bar_chart(ui: &mut egui::Ui, hover: &HoverSelection) {
    let color = series_color32(hover.key);
    let months: Vec<String> = hover
        .samples
        .iter()
        .map(|(d, _)| d.format("%b").to_string())
        .collect();
    let bars: Vec<Bar> = hover
        .samples
        .iter()
        .enumerate()
        .map(|(i, (_, v))| {
            let h = if v.is_finite() { v.max(0.0) } else { 0.0 };
            Bar::new(i as f64, h).width(0.9).fill(color)
        })
        .collect();

    Plot::new("hover-mini")
        .width(200.0)
        .height(150.0)
        .x_axis_label("Month")
        .y_axis_label("Value")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 0.25 || i < 0.0 {
                return String::new();
            }
            months.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn series_color32(key: SeriesKey) -> egui::Color32 {
    let (r, g, b) = key.color();
    egui::Color32::from_rgb(r, g, b)
}

fn format_day(days_from_ce: f64, fmt: &str) -> String {
    NaiveDate::from_num_days_from_ce_opt(days_from_ce.round() as i32)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}

fn format_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into())
}
