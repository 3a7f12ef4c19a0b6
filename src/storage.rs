use crate::series::SeriesStore;
use anyhow::Result;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One slot of the visible window across all three series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRow {
    pub index: usize,
    pub series1: u32,
    pub series2: u32,
    pub series3: u32,
}

/// Flatten the store into rows, oldest slot first. Short windows leave missing cells out.
pub fn window_rows(store: &SeriesStore) -> Vec<WindowRow> {
    let [a, b, c] = store.windows();
    a.iter()
        .zip(b.iter())
        .zip(c.iter())
        .enumerate()
        .map(|(index, ((s1, s2), s3))| WindowRow {
            index,
            series1: *s1,
            series2: *s2,
            series3: *s3,
        })
        .collect()
}

/// Save the visible window as CSV with header.
pub fn save_csv<P: AsRef<Path>>(store: &SeriesStore, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in window_rows(store) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the visible window as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(store: &SeriesStore, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&window_rows(store))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
