//! Display preferences kept between runs: colour theme and time zone.

use std::fmt;

use chrono_tz::Tz;
use log::debug;

use crate::clients::errors::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything but an explicit `dark` means light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph of the toggle: the moon switches to dark, the sun back to light.
    pub fn glyph(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const COMMON_TIME_ZONES: [&str; 13] = [
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "America/Phoenix",
    "America/Anchorage",
    "Pacific/Honolulu",
    "UTC",
    "Europe/London",
    "Europe/Paris",
    "Asia/Tokyo",
    "Australia/Sydney",
    "Asia/Kolkata",
];

/// One entry of the time zone picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Zone of the host, `UTC` when it cannot be determined.
pub fn system_time_zone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(tz) => tz,
        Err(e) => {
            debug!("Could not determine system time zone: {e}");
            "UTC".to_string()
        }
    }
}

pub fn resolve_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownTimeZone(name.to_string()))
}

/// Picker entries: the common zones, plus `selected` up front when it is
/// not one of them.
pub fn time_zone_options(selected: &str) -> Vec<TimeZoneOption> {
    let mut options: Vec<TimeZoneOption> = COMMON_TIME_ZONES
        .iter()
        .map(|tz| TimeZoneOption {
            value: (*tz).to_string(),
            label: tz.replace('_', " "),
            selected: *tz == selected,
        })
        .collect();

    if !selected.is_empty() && !COMMON_TIME_ZONES.iter().any(|tz| *tz == selected) {
        options.insert(
            0,
            TimeZoneOption {
                value: selected.to_string(),
                label: format!("Local: {}", selected.replace('_', " ")),
                selected: true,
            },
        );
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_through_storage_values() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn toggle_flips_theme_and_glyph() {
        let dark = Theme::Light.toggled();
        assert_eq!(dark, Theme::Dark);
        assert_eq!(dark.glyph(), "☀️");
        assert_eq!(dark.toggled().glyph(), "🌙");
    }

    #[test]
    fn common_zone_is_selected_in_place() {
        let options = time_zone_options("Asia/Tokyo");
        assert_eq!(options.len(), COMMON_TIME_ZONES.len());
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Asia/Tokyo");
        assert_eq!(options[0].label, "America/New York");
    }

    #[test]
    fn uncommon_zone_is_listed_first() {
        let options = time_zone_options("America/Argentina/Buenos_Aires");
        assert_eq!(options.len(), COMMON_TIME_ZONES.len() + 1);
        assert_eq!(options[0].label, "Local: America/Argentina/Buenos Aires");
        assert!(options[0].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn zone_names_are_validated() {
        assert_eq!(resolve_time_zone("Europe/Paris").unwrap(), chrono_tz::Europe::Paris);
        assert!(matches!(
            resolve_time_zone("Mars/Olympus_Mons"),
            Err(Error::UnknownTimeZone(_))
        ));
    }
}
