use crate::sdk::routing::coord::Coordinate;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_ROUTE_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
// Nominatim's public usage policy allows one request per second.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive number, got \"{value}\"")]
    InvalidNumber { name: &'static str, value: String },

    #[error("expected \"lat,lon\", got \"{0}\"")]
    InvalidCoordinate(String),
}

#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub geocode_base_url: String,
    pub route_base_url: String,
    pub tile_url: String,
    pub user_agent: String,
    /// `None` lets a slow request hang instead of failing.
    pub request_timeout: Option<Duration>,
    pub requests_per_minute: NonZeroU32,
    pub device_location: Option<Coordinate>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            geocode_base_url: DEFAULT_GEOCODE_URL.to_string(),
            route_base_url: DEFAULT_ROUTE_URL.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            user_agent: default_user_agent(),
            request_timeout: None,
            requests_per_minute: NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE)
                .unwrap_or(NonZeroU32::MIN),
            device_location: None,
        }
    }
}

impl RouterConfig {
    /// Reads `ROAD_ROUTER_*` variables, falling back to the public services.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let request_timeout = match var("ROAD_ROUTER_TIMEOUT_SECS") {
            Some(value) => {
                let secs = parse_positive("ROAD_ROUTER_TIMEOUT_SECS", &value)?;
                Some(Duration::from_secs(u64::from(secs.get())))
            }
            None => None,
        };
        let requests_per_minute = match var("ROAD_ROUTER_REQUESTS_PER_MINUTE") {
            Some(value) => parse_positive("ROAD_ROUTER_REQUESTS_PER_MINUTE", &value)?,
            None => defaults.requests_per_minute,
        };
        let device_location = var("ROAD_ROUTER_DEVICE_LOCATION")
            .map(|value| parse_coordinate(&value))
            .transpose()?;

        Ok(Self {
            geocode_base_url: var("ROAD_ROUTER_GEOCODE_URL").unwrap_or(defaults.geocode_base_url),
            route_base_url: var("ROAD_ROUTER_ROUTE_URL").unwrap_or(defaults.route_base_url),
            tile_url: var("ROAD_ROUTER_TILE_URL").unwrap_or(defaults.tile_url),
            user_agent: var("ROAD_ROUTER_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout,
            requests_per_minute,
            device_location,
        })
    }
}

fn default_user_agent() -> String {
    format!("road-router/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_positive(name: &'static str, value: &str) -> Result<NonZeroU32, ConfigError> {
    value
        .trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

/// Parses `"lat,lon"`, e.g. `"48.1173,-1.6778"`.
pub fn parse_coordinate(value: &str) -> Result<Coordinate, ConfigError> {
    let invalid = || ConfigError::InvalidCoordinate(value.to_string());
    let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Coordinate::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<RouterConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RouterConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_point_at_public_services() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.geocode_base_url, DEFAULT_GEOCODE_URL);
        assert_eq!(config.route_base_url, DEFAULT_ROUTE_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.requests_per_minute.get(), 60);
        assert!(config.device_location.is_none());
        assert!(config.user_agent.starts_with("road-router/"));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("ROAD_ROUTER_ROUTE_URL", "http://localhost:5000"),
            ("ROAD_ROUTER_TIMEOUT_SECS", "15"),
            ("ROAD_ROUTER_REQUESTS_PER_MINUTE", "40"),
            ("ROAD_ROUTER_DEVICE_LOCATION", "48.1173, -1.6778"),
        ])
        .unwrap();
        assert_eq!(config.route_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.requests_per_minute.get(), 40);
        assert_eq!(config.device_location, Some(Coordinate::new(48.1173, -1.6778)));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = config_from(&[("ROAD_ROUTER_GEOCODE_URL", "  ")]).unwrap();
        assert_eq!(config.geocode_base_url, DEFAULT_GEOCODE_URL);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            config_from(&[("ROAD_ROUTER_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidNumber { name: "ROAD_ROUTER_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config_from(&[("ROAD_ROUTER_DEVICE_LOCATION", "here")]),
            Err(ConfigError::InvalidCoordinate(_))
        ));
        assert!(parse_coordinate("1.0,east").is_err());
    }
}
