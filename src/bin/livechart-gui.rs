/*!
 * Desktop host for the live chart widget.
 *
 * The left panel is the control panel (chart type, theme, grid, speed, range,
 * play/pause, reset, export). The chart is rendered through the plotters bitmap
 * backend into a pixel buffer that is uploaded as an egui texture.
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use livechart::config::{self, Settings};
use livechart::plotters_surface::bitmap_surface;
use livechart::scheduler::RunState;
use livechart::stats::map_locale;
use livechart::{ChartType, ControlEvent, LiveChart, Outcome, Theme, storage};
use num_format::ToFormattedString;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let settings = config::load_settings(None);
    let width = settings.canvas.width as f32;
    let height = settings.canvas.height as f32;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width + 260.0, height + 80.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Live Chart - livechart-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Live Chart",
        options,
        Box::new(|_cc| Ok(Box::new(LiveChartApp::new(settings)))),
    )
}

/// Main application state
struct LiveChartApp {
    chart: Option<LiveChart>,
    settings: Settings,

    // Staged control values, applied when edited
    interval_ms: u32,
    max_range: u32,

    // Frame buffer and its texture
    pixels: Vec<u8>,
    texture: Option<egui::TextureHandle>,
    frame_dirty: bool,

    // UI state
    status_message: String,
    error_message: String,
}

impl LiveChartApp {
    fn new(settings: Settings) -> Self {
        let (chart, error_message) = match LiveChart::new(
            settings.chart.clone(),
            settings.canvas,
            settings.seed,
            Instant::now(),
        ) {
            Ok(c) => (Some(c.with_font_path(settings.font_path.clone())), String::new()),
            Err(e) => (None, format!("Invalid settings: {e}")),
        };
        let pixels = vec![0u8; settings.canvas.width as usize * settings.canvas.height as usize * 3];

        let mut app = Self {
            chart,
            interval_ms: settings.chart.update_interval_ms,
            max_range: settings.chart.max_range,
            settings,
            pixels,
            texture: None,
            frame_dirty: true,
            status_message: String::new(),
            error_message,
        };
        app.redraw();
        app
    }

    /// Render the current state into the pixel buffer.
    fn redraw(&mut self) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let result = bitmap_surface(&mut self.pixels, chart.geometry(), chart.font_path())
            .and_then(|mut surface| {
                chart.render(&mut surface)?;
                surface.present()?;
                Ok(())
            });
        match result {
            Ok(()) => self.frame_dirty = true,
            Err(err) => self.error_message = format!("Render failed: {err:#}"),
        }
    }

    /// Hand a control event to the widget, drawing into the frame buffer.
    fn dispatch(&mut self, event: ControlEvent) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let font = chart.font_path().map(PathBuf::from);
        let geometry = *chart.geometry();
        let result = bitmap_surface(&mut self.pixels, &geometry, font.as_deref())
            .and_then(|mut surface| {
                let outcome = chart.dispatch(event, Instant::now(), &mut surface)?;
                surface.present()?;
                Ok(outcome)
            });
        match result {
            Ok(Outcome::Redrawn) => self.frame_dirty = true,
            Ok(Outcome::Exported(path)) => {
                self.status_message = format!("Exported {}", path.display());
                self.error_message.clear();
            }
            Ok(Outcome::Rejected(reason)) => self.error_message = reason,
            Ok(Outcome::Toggled(_) | Outcome::Updated) => {}
            Err(err) => self.error_message = format!("{err:#}"),
        }
    }

    /// Run a tick if one is due and schedule the next repaint.
    fn poll_timer(&mut self, ctx: &egui::Context) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let now = Instant::now();
        let font = chart.font_path().map(PathBuf::from);
        let geometry = *chart.geometry();
        let ticked = bitmap_surface(&mut self.pixels, &geometry, font.as_deref())
            .and_then(|mut surface| {
                let ticked = chart.poll(now, &mut surface)?;
                surface.present()?;
                Ok(ticked)
            });
        match ticked {
            Ok(true) => self.frame_dirty = true,
            Ok(false) => {}
            Err(err) => log::warn!("tick failed: {err:#}"),
        }
        if let Some(wait) = chart.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        if !self.frame_dirty {
            return;
        }
        let size = [
            self.settings.canvas.width as usize,
            self.settings.canvas.height as usize,
        ];
        let image = egui::ColorImage::from_rgb(size, &self.pixels);
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("live-chart", image, egui::TextureOptions::LINEAR))
            }
        }
        self.frame_dirty = false;
    }

    fn export_image(&mut self) {
        let default_name = chrono::Local::now().format("chart-%Y%m%d-%H%M%S.png").to_string();
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .set_file_name(default_name);
        if let Some(dir) = dirs::picture_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.dispatch(ControlEvent::Export(path));
        }
    }

    fn export_data(&mut self) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .set_file_name("chart-window.csv")
            .save_file()
        else {
            return;
        };
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let result = if is_json {
            storage::save_json(chart.store(), &path)
        } else {
            storage::save_csv(chart.store(), &path)
        };
        match result {
            Ok(()) => self.status_message = format!("Saved {}", path.display()),
            Err(err) => self.error_message = format!("Failed to save data: {err:#}"),
        }
    }

    fn save_settings(&mut self) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        self.settings.chart = chart.config().clone();
        let Some(path) = config::settings_path() else {
            self.error_message = "No config directory available".to_string();
            return;
        };
        match config::write_settings(&path, &self.settings) {
            Ok(()) => self.status_message = format!("Settings saved to {}", path.display()),
            Err(err) => self.error_message = format!("{err:#}"),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let Some(config) = self.chart.as_ref().map(|c| c.config().clone()) else {
            return;
        };
        let running = self
            .chart
            .as_ref()
            .is_some_and(|c| c.scheduler().state() == RunState::Running);

        ui.heading("Controls");
        ui.add_space(5.0);

        ui.group(|ui| {
            ui.label("Chart type");
            ui.horizontal_wrapped(|ui| {
                for kind in ChartType::ALL {
                    if ui.selectable_label(config.chart_type == kind, kind.as_str()).clicked() {
                        self.dispatch(ControlEvent::SetChartType(kind));
                    }
                }
            });
        });

        ui.group(|ui| {
            ui.label("Theme");
            ui.horizontal(|ui| {
                for theme in Theme::ALL {
                    if ui.selectable_label(config.theme == theme, theme.as_str()).clicked() {
                        self.dispatch(ControlEvent::SetTheme(theme));
                    }
                }
            });
        });

        let mut show_grid = config.show_grid;
        if ui.checkbox(&mut show_grid, "Show grid").changed() {
            self.dispatch(ControlEvent::SetShowGrid(show_grid));
        }

        ui.horizontal(|ui| {
            ui.label("Interval (ms):");
            let resp = ui.add(egui::DragValue::new(&mut self.interval_ms).range(10..=10_000));
            if resp.changed() {
                self.dispatch(ControlEvent::SetUpdateInterval(self.interval_ms));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Max range:");
            let resp = ui.add(egui::DragValue::new(&mut self.max_range).range(1..=100_000));
            if resp.changed() {
                self.dispatch(ControlEvent::SetMaxRange(self.max_range));
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button(if running { "Pause" } else { "Play" }).clicked() {
                self.dispatch(ControlEvent::ToggleRun);
            }
            if ui.button("Reset").clicked() {
                self.dispatch(ControlEvent::Reset);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Export image").clicked() {
                self.export_image();
            }
            if ui.button("Save data").clicked() {
                self.export_data();
            }
        });
        if ui.button("Save settings").clicked() {
            self.save_settings();
        }
    }

    fn stats_row(&self, ui: &mut egui::Ui) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let loc = map_locale(&self.settings.locale);
        ui.horizontal(|ui| match chart.stats() {
            Some(s) => {
                ui.label(format!("Current: {}", s.current.to_formatted_string(loc)));
                ui.separator();
                ui.label(format!("Max: {}", s.max.to_formatted_string(loc)));
                ui.separator();
                ui.label(format!("Min: {}", s.min.to_formatted_string(loc)));
                ui.separator();
                ui.label(format!("Avg: {}", s.average.to_formatted_string(loc)));
                ui.separator();
                ui.label(format!("Trend: {}", s.trend));
            }
            None => {
                ui.label("Stats unavailable");
            }
        });
    }
}

impl eframe::App for LiveChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_timer(ctx);
        self.upload_frame(ctx);

        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| {
                self.controls(ui);

                ui.add_space(10.0);
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.stats_row(ui);
            ui.add_space(5.0);

            let (Some(texture), Some(chart)) = (self.texture.as_ref(), self.chart.as_ref()) else {
                return;
            };
            let size = egui::vec2(
                self.settings.canvas.width as f32,
                self.settings.canvas.height as f32,
            );
            let response = ui.add(
                egui::Image::from_texture(egui::load::SizedTexture::new(texture.id(), size))
                    .sense(egui::Sense::hover()),
            );
            if let Some(pos) = response.hover_pos() {
                let scale = size.x / response.rect.width().max(1.0);
                let x = ((pos.x - response.rect.min.x) * scale) as f64;
                if let Some(text) = chart.tooltip(x) {
                    response.on_hover_text_at_pointer(text);
                }
            }
        });
    }
}
