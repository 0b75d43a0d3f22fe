//! One-shot position lookup used to show local weather at startup.

use crate::config::Config;

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either value is outside the valid range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        (lat_ok && lon_ok).then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Location service errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
}

/// Source of the host's current position
#[derive(Debug, Clone)]
pub enum Geolocator {
    Fixed(Coordinates),
    Denied,
    Unavailable,
}

impl Geolocator {
    /// A configured but unparseable position is treated as a denied lookup.
    pub fn from_config(config: &Config) -> Self {
        match (config.position, config.position_invalid) {
            (Some(coords), _) => Self::Fixed(coords),
            (None, true) => Self::Denied,
            (None, false) => Self::Unavailable,
        }
    }

    pub async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            Self::Fixed(coords) => Ok(*coords),
            Self::Denied => Err(LocationError::PermissionDenied),
            Self::Unavailable => Err(LocationError::ServiceUnavailable),
        }
    }
}
