//! livechart
//!
//! A real-time animated chart widget engine: three rolling series, four chart kinds,
//! and a timer-driven update loop. Pairs with the `livechart` CLI and the
//! `livechart-gui` desktop app.
//!
//! ### Features
//! - Sliding-window series store with a seedable synthetic sample source
//! - 3-tap smoothing for line and area charts
//! - Line, bar, area and scatter rendering onto any [`surface::Surface`]
//! - Light, dark and high-contrast palettes
//! - Running/Stopped scheduler that never keeps more than one timer
//! - PNG/SVG export through plotters, CSV/JSON export of the visible window
//!
//! ### Example
//! ```no_run
//! use livechart::{ChartConfig, Geometry, LiveChart};
//! use livechart::surface::RecordingSurface;
//! use std::time::Instant;
//!
//! let mut chart = LiveChart::new(ChartConfig::default(), Geometry::default(), Some(1), Instant::now())?;
//! let mut surface = RecordingSurface::new(900, 600);
//! chart.tick(&mut surface)?;
//! chart.export(std::path::Path::new("chart.svg"))?;
//! println!("{:?}", chart.stats());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod models;
pub mod palette;
pub mod plotters_surface;
pub mod render;
pub mod scheduler;
pub mod series;
pub mod smoothing;
pub mod stats;
pub mod storage;
pub mod surface;
pub mod widget;

pub use control::ControlEvent;
pub use error::ChartError;
pub use geometry::Geometry;
pub use models::{ChartConfig, ChartType, Theme};
pub use widget::{LiveChart, Outcome};
