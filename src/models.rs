use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual encodings supported by the renderer.
///
/// Deserializes leniently: unknown names become [`ChartType::Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Three smoothed polylines (default).
    #[default]
    Line,
    /// Bars of the primary series.
    Bar,
    /// Filled area under the smoothed primary series.
    Area,
    /// Markers only, primary series.
    Scatter,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Area,
        ChartType::Scatter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
        }
    }

    /// Parse a host-supplied identifier, falling back to `Line` on unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ChartError| {
            log::warn!("{e}; falling back to `line`");
            ChartType::default()
        })
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            "area" => Ok(ChartType::Area),
            "scatter" => Ok(ChartType::Scatter),
            _ => Err(ChartError::UnknownChartType(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ChartType::parse_or_default(&s))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color themes. See [`crate::palette::resolve`].
///
/// Deserializes leniently: unknown names become [`Theme::Light`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Contrast,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Contrast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Contrast => "contrast",
        }
    }

    /// Parse a host-supplied identifier, falling back to `Light` on unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ChartError| {
            log::warn!("{e}; falling back to `light`");
            Theme::default()
        })
    }
}

impl FromStr for Theme {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "contrast" | "high-contrast" => Ok(Theme::Contrast),
            _ => Err(ChartError::UnknownTheme(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Theme::parse_or_default(&s))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable widget configuration, read by the renderer and scheduler on every draw/tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub theme: Theme,
    pub show_grid: bool,
    /// Period of the animation timer. Settings files may encode it as a string.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub update_interval_ms: u32,
    /// Exclusive upper bound for generated samples.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub max_range: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            theme: Theme::Light,
            show_grid: true,
            update_interval_ms: 1000,
            max_range: 600,
        }
    }
}

impl ChartConfig {
    pub fn set_update_interval(&mut self, ms: u32) -> Result<()> {
        self.update_interval_ms = positive("update_interval_ms", ms)?;
        Ok(())
    }

    pub fn set_max_range(&mut self, n: u32) -> Result<()> {
        self.max_range = positive("max_range", n)?;
        Ok(())
    }

    /// Check the numeric fields; used after loading settings from disk.
    pub fn validate(&self) -> Result<()> {
        positive("update_interval_ms", self.update_interval_ms)?;
        positive("max_range", self.max_range)?;
        Ok(())
    }
}

fn positive(name: &'static str, v: u32) -> Result<u32> {
    if v == 0 {
        return Err(ChartError::InvalidSetting {
            name,
            reason: "must be a positive integer".into(),
        });
    }
    Ok(v)
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_parse_case_insensitively() {
        assert_eq!("Bar".parse::<ChartType>().unwrap(), ChartType::Bar);
        assert_eq!(" dark ".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("pie".parse::<ChartType>().is_err());
    }

    #[test]
    fn unknown_identifiers_fall_back_to_defaults() {
        assert_eq!(ChartType::parse_or_default("pie"), ChartType::Line);
        assert_eq!(Theme::parse_or_default("solarized"), Theme::Light);
        assert_eq!(Theme::parse_or_default("contrast"), Theme::Contrast);
    }

    #[test]
    fn zero_interval_is_rejected_and_previous_kept() {
        let mut cfg = ChartConfig::default();
        let err = cfg.set_update_interval(0).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(cfg.update_interval_ms, 1000);
        cfg.set_update_interval(250).unwrap();
        assert_eq!(cfg.update_interval_ms, 250);
    }

    #[test]
    fn config_accepts_string_numbers() {
        let cfg: ChartConfig =
            serde_json::from_str(r#"{"chart_type":"area","update_interval_ms":"500","max_range":300}"#)
                .unwrap();
        assert_eq!(cfg.chart_type, ChartType::Area);
        assert_eq!(cfg.update_interval_ms, 500);
        assert_eq!(cfg.max_range, 300);
        assert_eq!(cfg.theme, Theme::Light);
        assert!(cfg.show_grid);
    }

    #[test]
    fn unknown_names_in_config_fall_back_per_field() {
        let cfg: ChartConfig = serde_json::from_str(
            r#"{"theme":"solarized","chart_type":"pie","update_interval_ms":250,"show_grid":false}"#,
        )
        .unwrap();
        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.chart_type, ChartType::Line);
        assert_eq!(cfg.update_interval_ms, 250);
        assert!(!cfg.show_grid);

        let cfg: ChartConfig = serde_json::from_str(r#"{"theme":"High-Contrast"}"#).unwrap();
        assert_eq!(cfg.theme, Theme::Contrast);
    }
}
