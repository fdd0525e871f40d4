//! Runtime settings for reaching the external services.
//!
//! Settings come from the process environment (a `.env` file is loaded first if
//! present). Credentials are not part of the settings; the bearer token is
//! passed per run.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "webmap";
pub const DEFAULT_OUTPUT: &str = "friends_map.html";
pub const DEFAULT_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILES_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_ZOOM: u8 = 3;
pub const DEFAULT_GEOCODE_DELAY_MS: u64 = 1000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Social API root; the friends-list endpoint is appended to it.
    pub api_base: String,
    pub geocoder_url: String,
    pub user_agent: String,
    /// Minimum gap between two geocoder lookups. Zero disables the limiter.
    pub geocode_delay: Duration,
    pub http_timeout: Duration,
    pub output: PathBuf,
    pub map: MapSettings,
}

/// Tile layer and initial view of the rendered map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub tiles: String,
    pub attribution: String,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tiles: DEFAULT_TILES.to_string(),
            attribution: DEFAULT_TILES_ATTRIBUTION.to_string(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_delay: Duration::from_millis(DEFAULT_GEOCODE_DELAY_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            map: MapSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Missing or empty keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(v) = get("FRIENDS_MAP_API_BASE") {
            settings.api_base = v;
        }
        if let Some(v) = get("FRIENDS_MAP_GEOCODER_URL") {
            settings.geocoder_url = v;
        }
        if let Some(v) = get("FRIENDS_MAP_USER_AGENT") {
            settings.user_agent = v;
        }
        if let Some(v) = get("FRIENDS_MAP_GEOCODE_DELAY_MS") {
            settings.geocode_delay = Duration::from_millis(parse_var("FRIENDS_MAP_GEOCODE_DELAY_MS", &v)?);
        }
        if let Some(v) = get("FRIENDS_MAP_HTTP_TIMEOUT_SECS") {
            settings.http_timeout = Duration::from_secs(parse_var("FRIENDS_MAP_HTTP_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("FRIENDS_MAP_OUTPUT") {
            settings.output = PathBuf::from(v);
        }
        if let Some(v) = get("FRIENDS_MAP_TILES") {
            settings.map.tiles = v;
        }
        if let Some(v) = get("FRIENDS_MAP_TILES_ATTRIBUTION") {
            settings.map.attribution = v;
        }
        if let Some(v) = get("FRIENDS_MAP_ZOOM") {
            settings.map.zoom = parse_var("FRIENDS_MAP_ZOOM", &v)?;
        }

        Ok(settings)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::usage(format!("Invalid value for {key}: '{raw}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.user_agent, "webmap");
        assert_eq!(settings.map.zoom, 3);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("FRIENDS_MAP_GEOCODE_DELAY_MS", "0"),
            ("FRIENDS_MAP_OUTPUT", "out/map.html"),
            ("FRIENDS_MAP_ZOOM", " 5 "),
            ("FRIENDS_MAP_API_BASE", ""),
        ]))
        .unwrap();
        assert_eq!(settings.geocode_delay, Duration::ZERO);
        assert_eq!(settings.output, PathBuf::from("out/map.html"));
        assert_eq!(settings.map.zoom, 5);
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn bad_numbers_name_the_variable() {
        let err = Settings::from_lookup(lookup(&[("FRIENDS_MAP_HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Usage);
        assert!(err.to_string().contains("FRIENDS_MAP_HTTP_TIMEOUT_SECS"));
    }
}
