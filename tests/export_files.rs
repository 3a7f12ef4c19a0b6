use livechart::geometry::Geometry;
use livechart::models::{ChartConfig, ChartType, Theme};
use livechart::plotters_surface::export_image;
use livechart::series::SeriesStore;
use livechart::storage;
use std::fs;
use std::path::Path;

fn sample_store() -> SeriesStore {
    let g = Geometry::default();
    let n = g.capacity() as u32;
    SeriesStore::from_windows(
        g.capacity(),
        [
            (0..n).map(|i| (i * 37) % 600).collect(),
            (0..n).map(|i| (i * 53) % 600).collect(),
            (0..n).map(|i| 599 - (i * 11) % 600).collect(),
        ],
    )
}

fn write_and_check<F: Fn(&Path)>(maker: F, name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{name} has content");
}

#[test]
fn every_chart_type_exports_svg() {
    let store = sample_store();
    let g = Geometry::default();
    for kind in ChartType::ALL {
        for theme in Theme::ALL {
            let cfg = ChartConfig {
                chart_type: kind,
                theme,
                ..ChartConfig::default()
            };
            write_and_check(
                |p| export_image(p, &store, &cfg, &g, None).unwrap(),
                &format!("chart_{kind}_{theme}.svg"),
            );
        }
    }
}

#[test]
fn svg_carries_axis_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.svg");
    export_image(&path, &sample_store(), &ChartConfig::default(), &Geometry::default(), None).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<text").count(), 12);
    assert!(svg.contains("750"));
}

#[test]
fn png_export_writes_a_bitmap() {
    let cfg = ChartConfig {
        chart_type: ChartType::Area,
        ..ChartConfig::default()
    };
    write_and_check(
        |p| export_image(p, &sample_store(), &cfg, &Geometry::with_size(300, 200), None).unwrap(),
        "area.png",
    );
}

#[test]
fn unknown_extension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.bmp");
    let err = export_image(&path, &sample_store(), &ChartConfig::default(), &Geometry::default(), None);
    assert!(err.is_err());
    assert!(!path.exists());
}

#[test]
fn window_data_round_trips_through_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = sample_store();

    let csv_path = dir.path().join("window.csv");
    storage::save_csv(&store, &csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("index,series1,series2,series3"));
    assert_eq!(lines.next(), Some("0,0,0,599"));
    assert_eq!(csv.lines().count(), 1 + 46);

    let json_path = dir.path().join("window.json");
    storage::save_json(&store, &json_path).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 46);
    assert_eq!(rows[1]["series1"], 37);
    assert_eq!(rows[1]["series2"], 53);
}
