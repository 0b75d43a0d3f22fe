use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub weather: Vec<ConditionEntry>,
    pub main: MainReadings,
}

#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

// ============================================================================
// Display Models
// ============================================================================

/// Normalized current weather for one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub name: String,
    pub condition: String,
    pub icon: String,
    /// Degrees Celsius
    pub temperature: f64,
}

impl CurrentWeatherResponse {
    /// Flattens the provider payload. `None` when no condition entry is present.
    pub fn into_record(self) -> Option<WeatherRecord> {
        let primary = self.weather.into_iter().next()?;
        Some(WeatherRecord {
            name: self.name,
            condition: primary.main,
            icon: primary.icon,
            temperature: self.main.temp,
        })
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchWeatherRequest {
    /// One or more city names separated by commas
    pub city: String,
}
