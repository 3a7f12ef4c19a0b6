//! Control panel events and their text form.
//!
//! Hosts translate button clicks, sliders and checkboxes into [`ControlEvent`]s and
//! hand them to [`crate::widget::LiveChart::dispatch`]. The CLI reads the same
//! events from short commands such as `theme dark` or `interval 250`.

use crate::error::ChartError;
use crate::models::{ChartType, Theme};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    SetChartType(ChartType),
    SetTheme(Theme),
    SetShowGrid(bool),
    SetUpdateInterval(u32),
    SetMaxRange(u32),
    ToggleRun,
    /// Regenerate the full window and redraw.
    Reset,
    /// Write a static image of the current chart.
    Export(PathBuf),
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "show" => Some(true),
        "off" | "false" | "no" | "0" | "hide" => Some(false),
        _ => None,
    }
}

impl FromStr for ControlEvent {
    type Err = ChartError;

    /// Parse `<command> [argument]`.
    ///
    /// Unknown chart types and themes fall back to their defaults rather than failing,
    /// as a host control would. Malformed numbers and unknown commands are errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ChartError::UnknownCommand(s.trim().to_string());
        let mut parts = s.trim().splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next().map(str::trim).unwrap_or_default();
        let number = || arg.parse::<u32>().map_err(|_| unknown());

        let event = match (cmd.as_str(), arg.is_empty()) {
            ("type" | "chart", false) => ControlEvent::SetChartType(ChartType::parse_or_default(arg)),
            ("theme", false) => ControlEvent::SetTheme(Theme::parse_or_default(arg)),
            ("grid", false) => ControlEvent::SetShowGrid(parse_flag(arg).ok_or_else(unknown)?),
            ("interval" | "speed", false) => ControlEvent::SetUpdateInterval(number()?),
            ("range", false) => ControlEvent::SetMaxRange(number()?),
            ("toggle" | "play" | "pause", true) => ControlEvent::ToggleRun,
            ("reset", true) => ControlEvent::Reset,
            ("export", false) => ControlEvent::Export(PathBuf::from(arg)),
            _ => return Err(unknown()),
        };
        Ok(event)
    }
}

/// A control event scheduled for a given tick, written `TICK:COMMAND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: ControlEvent,
}

impl FromStr for ScriptedEvent {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, cmd) = s
            .split_once(':')
            .ok_or_else(|| ChartError::UnknownCommand(s.to_string()))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| ChartError::UnknownCommand(s.to_string()))?;
        Ok(ScriptedEvent {
            tick,
            event: cmd.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let cases = [
            ("type bar", ControlEvent::SetChartType(ChartType::Bar)),
            ("theme Dark", ControlEvent::SetTheme(Theme::Dark)),
            ("grid off", ControlEvent::SetShowGrid(false)),
            ("interval 250", ControlEvent::SetUpdateInterval(250)),
            ("range 400", ControlEvent::SetMaxRange(400)),
            ("toggle", ControlEvent::ToggleRun),
            ("  reset ", ControlEvent::Reset),
            ("export out/chart.png", ControlEvent::Export("out/chart.png".into())),
        ];
        for (text, want) in cases {
            assert_eq!(text.parse::<ControlEvent>().unwrap(), want, "{text}");
        }
    }

    #[test]
    fn unknown_identifiers_fall_back() {
        assert_eq!(
            "type pie".parse::<ControlEvent>().unwrap(),
            ControlEvent::SetChartType(ChartType::Line)
        );
        assert_eq!(
            "theme neon".parse::<ControlEvent>().unwrap(),
            ControlEvent::SetTheme(Theme::Light)
        );
    }

    #[test]
    fn malformed_commands_are_errors() {
        for text in ["", "jump", "interval fast", "range -3", "grid maybe", "type", "reset now"] {
            assert!(text.parse::<ControlEvent>().is_err(), "{text:?}");
        }
    }

    #[test]
    fn scripted_event_splits_on_first_colon() {
        let e: ScriptedEvent = "3:export C:/tmp/x.svg".parse().unwrap();
        assert_eq!(e.tick, 3);
        assert_eq!(e.event, ControlEvent::Export("C:/tmp/x.svg".into()));
        assert!("x:reset".parse::<ScriptedEvent>().is_err());
        assert!("reset".parse::<ScriptedEvent>().is_err());
    }
}
