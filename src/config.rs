//! Runtime configuration and XDG paths.
//!
//! Settings live in `~/.config/fixmap/fixmap.conf` as `key = value` lines;
//! `#`, `//`, and `;` start comments. Environment variables override the
//! file, and the mapping/geocoding API key is only ever supplied out-of-band
//! (environment), never written by fixmap.

use std::env;
use std::path::PathBuf;

use crate::map::Coordinate;
use crate::sources::geocode::DEFAULT_ENDPOINT;

/// Runtime configuration assembled from defaults, file, and environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the repairer search backend.
    pub backend_url: String,
    /// Geocoding provider endpoint.
    pub geocode_endpoint: String,
    /// API key for the mapping/geocoding provider; may be empty.
    pub maps_api_key: String,
    /// ISO country code restricting geocoding results.
    pub country: String,
    /// Initial map camera center.
    pub default_center: Coordinate,
    /// Initial map zoom level.
    pub default_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            geocode_endpoint: DEFAULT_ENDPOINT.to_string(),
            maps_api_key: String::new(),
            country: "JP".to_string(),
            // Central Tokyo.
            default_center: Coordinate {
                lat: 35.6895,
                lng: 139.6917,
            },
            default_zoom: 10,
        }
    }
}

/// Whether a settings line should be skipped (empty or comment).
fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// Parse a `key = value` line; returns `None` for malformed lines.
fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if !trimmed.contains('=') {
        return None;
    }
    let mut parts = trimmed.splitn(2, '=');
    let key = parts.next()?.trim().to_string();
    let value = parts.next()?.trim().to_string();
    Some((key, value))
}

impl Config {
    /// What: Apply settings text on top of the current values.
    ///
    /// Inputs:
    /// - `text`: Contents of a `fixmap.conf`-style file.
    ///
    /// Details:
    /// - Unknown keys are logged and ignored; malformed numbers keep the
    ///   previous value.
    pub fn apply_settings_text(&mut self, text: &str) {
        for line in text.lines() {
            if skip_comment_or_empty(line) {
                continue;
            }
            let Some((key, value)) = parse_key_value(line) else {
                continue;
            };
            match key.as_str() {
                "backend_url" => self.backend_url = value,
                "geocode_endpoint" => self.geocode_endpoint = value,
                "country" => self.country = value,
                "default_center_lat" => {
                    if let Ok(lat) = value.parse::<f64>() {
                        self.default_center.lat = lat;
                    }
                }
                "default_center_lng" => {
                    if let Ok(lng) = value.parse::<f64>() {
                        self.default_center.lng = lng;
                    }
                }
                "default_zoom" => {
                    if let Ok(zoom) = value.parse::<u8>() {
                        self.default_zoom = zoom;
                    }
                }
                other => {
                    tracing::warn!(key = other, "unknown setting ignored");
                }
            }
        }
    }

    /// What: Load configuration from the settings file and environment.
    ///
    /// Output:
    /// - A complete `Config`; missing file or unset variables fall back to
    ///   defaults.
    ///
    /// Details:
    /// - Precedence: defaults < `fixmap.conf` < environment
    ///   (`FIXMAP_BACKEND_URL`, `FIXMAP_MAPS_API_KEY`/`GOOGLE_MAPS_API_KEY`).
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(path) = settings_path()
            && let Ok(text) = std::fs::read_to_string(&path)
        {
            tracing::info!(path = %path.display(), "settings loaded");
            config.apply_settings_text(&text);
        }
        if let Ok(url) = env::var("FIXMAP_BACKEND_URL")
            && !url.trim().is_empty()
        {
            config.backend_url = url;
        }
        for var in ["FIXMAP_MAPS_API_KEY", "GOOGLE_MAPS_API_KEY"] {
            if let Ok(key) = env::var(var)
                && !key.trim().is_empty()
            {
                config.maps_api_key = key;
                break;
            }
        }
        config
    }
}

/// Resolve an XDG base directory from the environment or `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// `$XDG_CONFIG_HOME/fixmap` (or `~/.config/fixmap`).
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("fixmap")
}

/// `$XDG_STATE_HOME/fixmap` (or `~/.local/state/fixmap`).
pub fn state_dir() -> PathBuf {
    xdg_base_dir("XDG_STATE_HOME", &[".local", "state"]).join("fixmap")
}

/// Log directory under the state dir, created on demand.
pub fn logs_dir() -> PathBuf {
    let dir = state_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Settings file path, when one exists.
fn settings_path() -> Option<PathBuf> {
    let candidate = config_dir().join("fixmap.conf");
    candidate.is_file().then_some(candidate)
}
