/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-weather-search/0.1.0";

/// OpenWeatherMap current weather API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Host serving the condition icons
pub const OPENWEATHER_ICON_BASE: &str = "http://openweathermap.org";

/// How long a notification stays visible
pub const NOTIFICATION_SECS: u64 = 4;

pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found!";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";
pub const LOCATION_ERROR_MESSAGE: &str = "Internal Server Error. Please try again";
