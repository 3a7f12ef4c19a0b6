//! The widget instance: single owner of configuration, series, sample source and scheduler.
//!
//! Every mutation goes through `&mut self`, so a tick or a control event always
//! runs to completion before the next one starts.

use crate::control::ControlEvent;
use crate::error::{ChartError, Result};
use crate::geometry::Geometry;
use crate::models::{ChartConfig, ChartType, Theme};
use crate::palette::{self, Palette};
use crate::plotters_surface::export_image;
use crate::render::render;
use crate::scheduler::{RunState, Scheduler};
use crate::series::{RandomSamples, SeriesStore};
use crate::stats::{WindowStats, summarize};
use crate::surface::Surface;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What a dispatched event did, so hosts know whether to repaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The surface was redrawn.
    Redrawn,
    /// State changed but nothing needed redrawing.
    Updated,
    /// Run state after a toggle.
    Toggled(RunState),
    /// An image was written.
    Exported(PathBuf),
    /// A setting was rejected; the previous value is kept.
    Rejected(String),
}

pub struct LiveChart {
    config: ChartConfig,
    geometry: Geometry,
    store: SeriesStore,
    samples: RandomSamples,
    scheduler: Scheduler,
    stats: Option<WindowStats>,
    font_path: Option<PathBuf>,
    ticks: u64,
}

impl LiveChart {
    /// Build a widget and perform the initial full-window fill. The scheduler starts Running.
    pub fn new(config: ChartConfig, geometry: Geometry, seed: Option<u64>, now: Instant) -> Result<Self> {
        config.validate()?;
        geometry.validate()?;
        let scheduler = Scheduler::new(interval(&config), now);
        let mut chart = Self {
            store: SeriesStore::new(geometry.capacity()),
            samples: RandomSamples::new(seed),
            config,
            geometry,
            scheduler,
            stats: None,
            font_path: None,
            ticks: 0,
        };
        chart.fill_window();
        Ok(chart)
    }

    /// Font used for bitmap labels on export.
    pub fn with_font_path(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn palette(&self) -> Palette {
        palette::resolve(self.config.theme)
    }

    /// Stats of the primary window, `None` until the first fill.
    pub fn stats(&self) -> Option<&WindowStats> {
        self.stats.as_ref()
    }

    /// Ticks performed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }

    /// Draw the current state.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        render(surface, &self.store, &self.config, &self.geometry)
    }

    /// Run one tick if the scheduler says one is due. Returns whether it ticked.
    pub fn poll<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> Result<bool> {
        if !self.scheduler.poll(now) {
            return Ok(false);
        }
        self.tick(surface)?;
        Ok(true)
    }

    /// Time until the next scheduled tick, `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    /// One update cycle: advance the window, redraw, recompute stats.
    ///
    /// Stats follow the new window even when drawing fails.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.slide_window();
        let drawn = self.render(surface);
        self.refresh_stats();
        drawn
    }

    /// Advance the window without drawing; for headless hosts that render later.
    pub fn advance(&mut self) {
        self.slide_window();
        self.refresh_stats();
    }

    /// Primary-series sample under a horizontal pixel offset.
    pub fn query_at(&self, pixel_x: f64) -> Option<u32> {
        self.geometry
            .index_at(pixel_x, self.store.len())
            .and_then(|i| self.store.primary_at(i))
    }

    /// Tooltip text for a pointer position, `None` outside the window.
    pub fn tooltip(&self, pixel_x: f64) -> Option<String> {
        self.query_at(pixel_x).map(|v| format!("Value: {v}"))
    }

    /// Stats or an explicit [`ChartError::EmptyWindow`].
    pub fn require_stats(&self) -> Result<&WindowStats> {
        self.stats.as_ref().ok_or(ChartError::EmptyWindow)
    }

    /// Apply a control event at `now`, redrawing `surface` when the event calls for it.
    ///
    /// Configuration errors are logged and reported as [`Outcome::Rejected`]; only
    /// surface and export failures come back as `Err`.
    pub fn dispatch<S: Surface + ?Sized>(
        &mut self,
        event: ControlEvent,
        now: Instant,
        surface: &mut S,
    ) -> anyhow::Result<Outcome> {
        log::debug!("control event {event:?}");
        let outcome = match event {
            ControlEvent::SetChartType(kind) => {
                self.set_chart_type(kind);
                self.redraw(surface)?
            }
            ControlEvent::SetTheme(theme) => {
                self.set_theme(theme);
                self.redraw(surface)?
            }
            ControlEvent::SetShowGrid(show) => {
                self.config.show_grid = show;
                self.redraw(surface)?
            }
            ControlEvent::SetUpdateInterval(ms) => match self.set_update_interval(ms, now) {
                Ok(()) => Outcome::Updated,
                Err(e) => rejected(e),
            },
            ControlEvent::SetMaxRange(n) => match self.config.set_max_range(n) {
                Ok(()) => Outcome::Updated,
                Err(e) => rejected(e),
            },
            ControlEvent::ToggleRun => Outcome::Toggled(self.toggle_run(now)),
            ControlEvent::Reset => {
                self.reset();
                self.redraw(surface)?
            }
            ControlEvent::Export(path) => {
                self.export(&path)?;
                Outcome::Exported(path)
            }
        };
        Ok(outcome)
    }

    pub fn set_chart_type(&mut self, kind: ChartType) {
        self.config.chart_type = kind;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Change the tick period; a running timer is replaced at once.
    pub fn set_update_interval(&mut self, ms: u32, now: Instant) -> Result<()> {
        self.config.set_update_interval(ms)?;
        self.scheduler.set_interval(interval(&self.config), now);
        Ok(())
    }

    pub fn toggle_run(&mut self, now: Instant) -> RunState {
        self.scheduler.toggle(now)
    }

    /// Regenerate the whole window from the current range.
    pub fn reset(&mut self) {
        self.fill_window();
    }

    /// Write the current chart as `.png` or `.svg`.
    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        export_image(
            path,
            &self.store,
            &self.config,
            &self.geometry,
            self.font_path.as_deref(),
        )
    }

    fn fill_window(&mut self) {
        let max_range = self.config.max_range;
        let samples = &mut self.samples;
        self.store
            .initialize(self.geometry.capacity(), || samples.sample(max_range));
        self.refresh_stats();
    }

    fn slide_window(&mut self) {
        let max_range = self.config.max_range;
        let samples = &mut self.samples;
        self.store.advance(|| samples.sample(max_range));
        self.ticks += 1;
    }

    fn refresh_stats(&mut self) {
        self.stats = summarize(&self.store.primary());
    }

    fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<Outcome> {
        self.render(surface)?;
        Ok(Outcome::Redrawn)
    }
}

fn interval(config: &ChartConfig) -> Duration {
    Duration::from_millis(config.update_interval_ms as u64)
}

fn rejected(e: ChartError) -> Outcome {
    log::warn!("{e}; keeping previous value");
    Outcome::Rejected(e.to_string())
}
