//! Error taxonomy for the chart core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Theme identifier outside `light`, `dark`, `contrast`.
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    /// Chart type identifier outside `line`, `bar`, `area`, `scatter`.
    #[error("unknown chart type `{0}`")]
    UnknownChartType(String),
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    /// Stats or tooltip queried before the window was filled.
    #[error("series window is empty")]
    EmptyWindow,
    #[error("drawing surface error: {0}")]
    Surface(String),
    #[error("unrecognized control command `{0}`")]
    UnknownCommand(String),
}

impl ChartError {
    /// Whether this error belongs to the configuration class (recovered by falling back).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChartError::UnknownTheme(_)
                | ChartError::UnknownChartType(_)
                | ChartError::InvalidSetting { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
