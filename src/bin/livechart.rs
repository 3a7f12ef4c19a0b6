use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use livechart::config::{self, Settings};
use livechart::control::ScriptedEvent;
use livechart::stats::display_or_unavailable;
use livechart::surface::RecordingSurface;
use livechart::{ChartType, LiveChart, Outcome, Theme, storage};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "livechart",
    version,
    about = "Animate, snapshot & summarize a live three-series chart"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill the window, advance it, and write an image (and optionally the data).
    Snapshot(SnapshotArgs),
    /// Run the animation in real time for a number of ticks, printing stats.
    Run(RunArgs),
    /// Show the settings file location and effective settings.
    Config(ConfigArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Settings file (defaults to the per-user settings.json).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Chart type: line, bar, area or scatter. Unknown names fall back to line.
    #[arg(short = 't', long = "type")]
    chart_type: Option<String>,
    /// Theme: light, dark or contrast. Unknown names fall back to light.
    #[arg(long)]
    theme: Option<String>,
    /// Hide the grid.
    #[arg(long, default_value_t = false)]
    no_grid: bool,
    /// Update interval in milliseconds.
    #[arg(long)]
    interval: Option<u32>,
    /// Exclusive upper bound for generated samples.
    #[arg(long)]
    range: Option<u32>,
    /// RNG seed for a reproducible sample stream.
    #[arg(long)]
    seed: Option<u64>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Locale for stats output (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// TTF font for PNG axis labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Ticks to advance after the initial fill.
    #[arg(long, default_value_t = 0)]
    ticks: u64,
    /// Image path (.png or .svg). Defaults to a timestamped PNG.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also save the visible window (format inferred by --format or extension).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Data format (csv or json). If omitted, inferred from --data extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print window statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Stop after this many ticks.
    #[arg(long, default_value_t = 10)]
    ticks: u64,
    /// Scripted control event, `TICK:COMMAND` (e.g. `3:theme dark`, `5:interval 200`). Repeatable.
    #[arg(long = "event")]
    events: Vec<String>,
    /// Write an image of the final frame.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Settings file to inspect.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Run(args) => cmd_run(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Settings file merged with command-line overrides.
fn effective_settings(args: &ChartArgs) -> Settings {
    let mut s = config::load_settings(args.config.as_deref());
    if let Some(t) = &args.chart_type {
        s.chart.chart_type = ChartType::parse_or_default(t);
    }
    if let Some(t) = &args.theme {
        s.chart.theme = Theme::parse_or_default(t);
    }
    if args.no_grid {
        s.chart.show_grid = false;
    }
    if let Some(ms) = args.interval {
        s.chart.update_interval_ms = ms;
    }
    if let Some(r) = args.range {
        s.chart.max_range = r;
    }
    if let Some(w) = args.width {
        s.canvas.width = w;
    }
    if let Some(h) = args.height {
        s.canvas.height = h;
    }
    if args.seed.is_some() {
        s.seed = args.seed;
    }
    if let Some(l) = &args.locale {
        s.locale = l.clone();
    }
    if args.font.is_some() {
        s.font_path = args.font.clone();
    }
    s
}

fn build_chart(settings: &Settings) -> Result<LiveChart> {
    let chart = LiveChart::new(
        settings.chart.clone(),
        settings.canvas,
        settings.seed,
        Instant::now(),
    )
    .context("invalid chart settings")?;
    Ok(chart.with_font_path(settings.font_path.clone()))
}

fn default_image_path() -> PathBuf {
    PathBuf::from(chrono::Local::now().format("chart-%Y%m%d-%H%M%S.png").to_string())
}

fn cmd_snapshot(args: SnapshotArgs) -> Result<()> {
    let settings = effective_settings(&args.chart);
    let mut chart = build_chart(&settings)?;
    for _ in 0..args.ticks {
        chart.advance();
    }

    let out = args.out.unwrap_or_else(default_image_path);
    chart.export(&out)?;
    eprintln!("Wrote chart to {}", out.display());

    if let Some(path) = args.data.as_ref() {
        save_data(&chart, path, args.format)?;
        eprintln!("Saved {} rows to {}", chart.store().len(), path.display());
    }

    if args.stats {
        println!("{}", display_or_unavailable(chart.stats(), &settings.locale));
    }
    Ok(())
}

fn save_data(chart: &LiveChart, path: &Path, format: Option<OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(chart.store(), path),
        "json" => storage::save_json(chart.store(), path),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let settings = effective_settings(&args.chart);
    let mut script: Vec<ScriptedEvent> = args
        .events
        .iter()
        .map(|e| e.parse().with_context(|| format!("invalid --event {e:?}")))
        .collect::<Result<_>>()?;
    script.sort_by_key(|e| e.tick);

    let mut chart = build_chart(&settings)?;
    let mut frame = RecordingSurface::new(settings.canvas.width, settings.canvas.height);
    let mut pending = script.into_iter().peekable();

    while chart.ticks() < args.ticks {
        while let Some(next) = pending.next_if(|e| e.tick <= chart.ticks()) {
            match chart.dispatch(next.event, Instant::now(), &mut frame)? {
                Outcome::Rejected(reason) => eprintln!("tick {}: rejected: {reason}", next.tick),
                outcome => eprintln!("tick {}: {outcome:?}", next.tick),
            }
        }
        let Some(wait) = chart.time_until_next(Instant::now()) else {
            eprintln!("animation stopped at tick {}", chart.ticks());
            break;
        };
        std::thread::sleep(wait);
        frame.clear();
        if chart.poll(Instant::now(), &mut frame)? {
            println!(
                "tick {:>4}  {}",
                chart.ticks(),
                display_or_unavailable(chart.stats(), &settings.locale)
            );
        }
    }

    if let Some(out) = args.out.as_ref() {
        chart.export(out)?;
        eprintln!("Wrote chart to {}", out.display());
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    match args.config.clone().or_else(config::settings_path) {
        Some(p) => println!("settings file: {}", p.display()),
        None => println!("settings file: (no config directory)"),
    }
    let settings = config::load_settings(args.config.as_deref());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
