use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the newest sample relative to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    /// Single-sample window: nothing to compare against.
    Flat,
}

impl Trend {
    pub fn glyph(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Summary of the primary series' visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    pub current: u32,
    pub max: u32,
    pub min: u32,
    /// Mean rounded to the nearest integer, halves away from zero.
    pub average: u32,
    pub trend: Trend,
}

/// Compute stats for a window; `None` when the window is empty.
pub fn summarize(window: &[u32]) -> Option<WindowStats> {
    let (&current, rest) = window.split_last()?;
    let max = window.iter().copied().max()?;
    let min = window.iter().copied().min()?;
    let sum: u64 = window.iter().map(|v| *v as u64).sum();
    let average = (sum as f64 / window.len() as f64).round() as u32;
    let trend = match rest.last() {
        Some(prev) if current > *prev => Trend::Up,
        Some(_) => Trend::Down,
        None => Trend::Flat,
    };
    Some(WindowStats {
        current,
        max,
        min,
        average,
        trend,
    })
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

impl WindowStats {
    /// One-line summary with locale-aware digit grouping.
    pub fn display_line(&self, locale_tag: &str) -> String {
        let loc = map_locale(locale_tag);
        format!(
            "current={} max={} min={} avg={} trend={}",
            self.current.to_formatted_string(loc),
            self.max.to_formatted_string(loc),
            self.min.to_formatted_string(loc),
            self.average.to_formatted_string(loc),
            self.trend
        )
    }
}

/// Display line for an optional summary; empty windows show as unavailable.
pub fn display_or_unavailable(stats: Option<&WindowStats>, locale_tag: &str) -> String {
    match stats {
        Some(s) => s.display_line(locale_tag),
        None => "stats unavailable".to_string(),
    }
}
