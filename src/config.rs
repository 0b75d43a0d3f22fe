use std::time::Duration;

use crate::constants::{NOTIFICATION_SECS, OPENWEATHER_API_BASE, OPENWEATHER_ICON_BASE};
use crate::location::Coordinates;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub icon_base: String,
    pub notification_ttl: Duration,
    /// Position reported by the host platform, if it exposes one
    pub position: Option<Coordinates>,
    /// Set when a position was configured but could not be parsed
    pub position_invalid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: OPENWEATHER_API_BASE.to_string(),
            icon_base: OPENWEATHER_ICON_BASE.to_string(),
            notification_ttl: Duration::from_secs(NOTIFICATION_SECS),
            position: None,
            position_invalid: false,
        }
    }
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// The API key baked in at build time wins over the runtime variable.
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok());
        if let Some(key) = option_env!("OPENWEATHER_API_KEY") {
            config.api_key = Some(key.to_string());
        }
        config
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notification_ttl = non_empty("WEATHER_NOTIFICATION_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.notification_ttl);

        let (position, position_invalid) =
            match (non_empty("WEATHER_LATITUDE"), non_empty("WEATHER_LONGITUDE")) {
                (None, None) => (None, false),
                (Some(lat), Some(lon)) => match parse_position(&lat, &lon) {
                    Some(coords) => (Some(coords), false),
                    None => (None, true),
                },
                _ => (None, true),
            };

        Self {
            api_key: non_empty("OPENWEATHER_API_KEY"),
            api_base: non_empty("OPENWEATHER_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            icon_base: non_empty("OPENWEATHER_ICON_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.icon_base),
            notification_ttl,
            position,
            position_invalid,
        }
    }
}

fn parse_position(lat: &str, lon: &str) -> Option<Coordinates> {
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lon.trim().parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude)
}
