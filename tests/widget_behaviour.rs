use livechart::error::Result as ChartResult;
use livechart::geometry::Point;
use livechart::palette::Color;
use livechart::scheduler::RunState;
use livechart::stats::Trend;
use livechart::surface::{RecordingSurface, Surface};
use livechart::{ChartConfig, ChartError, ChartType, ControlEvent, Geometry, LiveChart, Outcome, Theme};
use std::time::{Duration, Instant};

fn chart(now: Instant) -> LiveChart {
    LiveChart::new(ChartConfig::default(), Geometry::default(), Some(42), now).expect("chart")
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(900, 600)
}

/// Surface whose every draw call fails.
struct BrokenSurface;

impl Surface for BrokenSurface {
    fn size(&self) -> (u32, u32) {
        (900, 600)
    }

    fn fill(&mut self, _: Color) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }

    fn stroke_path(&mut self, _: &[Point], _: Color, _: u32) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }

    fn fill_polygon(&mut self, _: &[Point], _: Color) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }

    fn fill_rect(&mut self, _: Point, _: (f64, f64), _: Color) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }

    fn fill_circle(&mut self, _: Point, _: f64, _: Color) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }

    fn text(&mut self, _: &str, _: Point, _: u32, _: Color) -> ChartResult<()> {
        Err(ChartError::Surface("device lost".into()))
    }
}

#[test]
fn construction_fills_every_window() {
    let c = chart(Instant::now());
    assert_eq!(c.store().len(), 46);
    for w in c.store().windows() {
        assert_eq!(w.len(), 46);
        assert!(w.iter().all(|v| *v < 600));
    }
    assert_eq!(c.scheduler().state(), RunState::Running);
    let s = c.stats().expect("stats after fill");
    assert_eq!(s.current, *c.store().primary().last().unwrap());
    assert_eq!(c.ticks(), 0);
}

#[test]
fn same_seed_gives_same_stream() {
    let t0 = Instant::now();
    let mut a = chart(t0);
    let mut b = chart(t0);
    assert_eq!(a.store(), b.store());
    a.advance();
    b.advance();
    assert_eq!(a.store(), b.store());
}

#[test]
fn invalid_construction_is_rejected() {
    let t0 = Instant::now();
    let cfg = ChartConfig {
        update_interval_ms: 0,
        ..ChartConfig::default()
    };
    assert!(LiveChart::new(cfg, Geometry::default(), None, t0).is_err());
    let g = Geometry {
        value_increment: 0,
        ..Geometry::default()
    };
    assert!(LiveChart::new(ChartConfig::default(), g, None, t0).is_err());
}

#[test]
fn tick_slides_window_by_one() {
    let mut c = chart(Instant::now());
    let before = c.store().primary();
    let mut s = surface();
    c.tick(&mut s).unwrap();
    let after = c.store().primary();
    assert_eq!(after.len(), before.len());
    assert_eq!(&after[..45], &before[1..]);
    assert_eq!(c.ticks(), 1);
    assert!(!s.ops().is_empty());
    assert_eq!(c.stats().unwrap().current, after[45]);
}

#[test]
fn failed_draw_still_refreshes_stats() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let err = c.tick(&mut BrokenSurface).unwrap_err();
    assert!(matches!(err, ChartError::Surface(_)));
    assert_eq!(c.ticks(), 1);
    let last = *c.store().primary().last().unwrap();
    assert_eq!(c.stats().unwrap().current, last);

    // poll reports the failure but the timer keeps running.
    assert!(c.poll(t0 + Duration::from_secs(1), &mut BrokenSurface).is_err());
    assert_eq!(c.ticks(), 2);
    assert_eq!(c.stats().unwrap().current, *c.store().primary().last().unwrap());
    assert!(c.scheduler().active_timer().is_some());
}

#[test]
fn tooltip_reports_the_raw_sample_under_the_pointer() {
    let c = chart(Instant::now());
    let primary = c.store().primary();
    assert_eq!(c.query_at(0.0), Some(primary[0]));
    assert_eq!(c.query_at(25.0), Some(primary[1]));
    assert_eq!(c.query_at(39.9), Some(primary[1]));
    assert_eq!(c.query_at(900.0), Some(primary[45]));
    assert_eq!(c.query_at(920.0), None);
    assert_eq!(c.query_at(-1.0), None);
    assert_eq!(c.query_at(f64::NAN), None);
    assert_eq!(c.tooltip(25.0), Some(format!("Value: {}", primary[1])));
}

#[test]
fn poll_ticks_once_per_interval_without_catch_up() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let ms = Duration::from_millis;

    assert!(!c.poll(t0 + ms(999), &mut s).unwrap());
    assert!(c.poll(t0 + ms(1000), &mut s).unwrap());
    assert_eq!(c.ticks(), 1);

    // Five intervals late: one tick, then wait a full period again.
    let late = t0 + ms(6500);
    assert!(c.poll(late, &mut s).unwrap());
    assert!(!c.poll(late, &mut s).unwrap());
    assert_eq!(c.ticks(), 2);
    assert_eq!(c.time_until_next(late), Some(ms(1000)));
}

#[test]
fn toggling_keeps_at_most_one_timer() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let first = c.scheduler().active_timer().unwrap().id();

    let out = c.dispatch(ControlEvent::ToggleRun, t0, &mut s).unwrap();
    assert_eq!(out, Outcome::Toggled(RunState::Stopped));
    assert!(c.scheduler().active_timer().is_none());
    assert_eq!(c.time_until_next(t0), None);
    assert!(!c.poll(t0 + Duration::from_secs(10), &mut s).unwrap());

    let out = c.dispatch(ControlEvent::ToggleRun, t0, &mut s).unwrap();
    assert_eq!(out, Outcome::Toggled(RunState::Running));
    let second = c.scheduler().active_timer().unwrap().id();
    assert_ne!(first, second);

    for _ in 0..5 {
        c.toggle_run(t0);
        c.toggle_run(t0);
    }
    assert!(c.scheduler().is_running());
    assert_eq!(c.scheduler().cancelled_timers(), 6);
}

#[test]
fn interval_change_replaces_a_running_timer() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let old = c.scheduler().active_timer().unwrap().id();

    let t1 = t0 + Duration::from_millis(300);
    let out = c.dispatch(ControlEvent::SetUpdateInterval(250), t1, &mut s).unwrap();
    assert_eq!(out, Outcome::Updated);
    assert_eq!(c.config().update_interval_ms, 250);
    let timer = c.scheduler().active_timer().unwrap();
    assert_ne!(timer.id(), old);
    assert_eq!(timer.period(), Duration::from_millis(250));
    assert_eq!(timer.next_fire(), t1 + Duration::from_millis(250));
}

#[test]
fn interval_change_while_stopped_applies_on_resume() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    c.toggle_run(t0);
    c.set_update_interval(200, t0).unwrap();
    assert!(c.scheduler().active_timer().is_none());

    c.toggle_run(t0);
    assert_eq!(
        c.scheduler().active_timer().unwrap().period(),
        Duration::from_millis(200)
    );
}

#[test]
fn zero_settings_are_rejected_and_old_values_kept() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();

    let out = c.dispatch(ControlEvent::SetUpdateInterval(0), t0, &mut s).unwrap();
    assert!(matches!(out, Outcome::Rejected(_)));
    assert_eq!(c.config().update_interval_ms, 1000);
    assert_eq!(c.scheduler().interval(), Duration::from_secs(1));

    let out = c.dispatch(ControlEvent::SetMaxRange(0), t0, &mut s).unwrap();
    assert!(matches!(out, Outcome::Rejected(_)));
    assert_eq!(c.config().max_range, 600);
}

#[test]
fn appearance_events_redraw_immediately() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let events = [
        ControlEvent::SetChartType(ChartType::Bar),
        ControlEvent::SetTheme(Theme::Dark),
        ControlEvent::SetShowGrid(false),
    ];
    for e in events {
        s.clear();
        assert_eq!(c.dispatch(e, t0, &mut s).unwrap(), Outcome::Redrawn);
        assert!(!s.ops().is_empty());
    }
    assert_eq!(c.config().chart_type, ChartType::Bar);
    assert_eq!(c.config().theme, Theme::Dark);
    assert!(!c.config().show_grid);
    assert_eq!(c.palette(), livechart::palette::resolve(Theme::Dark));
    assert_eq!(c.ticks(), 0);
}

#[test]
fn unknown_theme_text_falls_back_to_light() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    c.set_theme(Theme::Dark);
    let event: ControlEvent = "theme neon".parse().unwrap();
    c.dispatch(event, t0, &mut s).unwrap();
    assert_eq!(c.config().theme, Theme::Light);
}

#[test]
fn new_range_applies_to_future_samples_only() {
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let before = c.store().primary();
    c.dispatch(ControlEvent::SetMaxRange(1), t0, &mut s).unwrap();
    assert_eq!(c.store().primary(), before);

    c.advance();
    assert_eq!(c.store().primary()[45], 0);

    assert_eq!(c.dispatch(ControlEvent::Reset, t0, &mut s).unwrap(), Outcome::Redrawn);
    for w in c.store().windows() {
        assert_eq!(w, vec![0; 46]);
    }
    let stats = c.require_stats().unwrap();
    assert_eq!((stats.max, stats.min, stats.average), (0, 0, 0));
    assert_eq!(stats.trend, Trend::Down);
}

#[test]
fn export_event_writes_an_image() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let mut c = chart(t0);
    let mut s = surface();
    let path = dir.path().join("frame.svg");
    let out = c.dispatch(ControlEvent::Export(path.clone()), t0, &mut s).unwrap();
    assert_eq!(out, Outcome::Exported(path.clone()));
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));

    let bad = dir.path().join("frame.gif");
    assert!(c.dispatch(ControlEvent::Export(bad), t0, &mut s).is_err());
}
