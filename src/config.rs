//! App configuration with defaults matching the tour as shipped.
//! The access token is injected at build time through `MAPBOX_TOKEN`.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{CameraOptions, FlightDefaults};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub access_token: String,
    pub map: MapConfig,
    pub terrain: TerrainConfig,
    pub buildings: BuildingsConfig,
    pub controls: ControlsConfig,
    pub flight: FlightDefaults,
    /// A `log::LevelFilter` name such as `info` or `debug`.
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// DOM id of the map container.
    pub container_id: String,
    pub style: String,
    pub initial_camera: CameraOptions,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            style: "mapbox://styles/mapbox/standard".to_string(),
            initial_camera: CameraOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub enabled: bool,
    pub source_id: String,
    pub url: String,
    pub tile_size: u32,
    pub max_zoom: f64,
    /// Elevation multiplier; 1.0 is realistic.
    pub exaggeration: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_id: "mapbox-dem".to_string(),
            url: "mapbox://mapbox.mapbox-terrain-dem-v1".to_string(),
            tile_size: 512,
            max_zoom: 14.0,
            exaggeration: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildingsConfig {
    pub enabled: bool,
    pub layer_id: String,
    pub min_zoom: f64,
    pub color: String,
    pub opacity: f64,
}

impl Default for BuildingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            layer_id: "3d-buildings".to_string(),
            min_zoom: 14.0,
            color: "#aaa".to_string(),
            opacity: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub navigation: bool,
    pub fullscreen: bool,
    pub geolocate: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            navigation: true,
            fullscreen: true,
            geolocate: true,
        }
    }
}

impl Config {
    /// Build the configuration from values baked in by the compiler environment.
    pub fn from_build_env() -> Self {
        Self::with_overrides(option_env!("MAPBOX_TOKEN"), option_env!("TOUR_LOG"))
    }

    fn with_overrides(token: Option<&str>, log_level: Option<&str>) -> Self {
        let mut cfg = Config::default();
        if let Some(t) = token {
            cfg.access_token = t.trim().to_string();
        }
        if let Some(l) = log_level {
            cfg.log_level = l.trim().to_string();
        }
        cfg
    }

    /// Checks what the map needs to start. The log level is not one of those;
    /// callers fall back to `info` when it does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        self.map
            .initial_camera
            .validate()
            .map_err(ConfigError::InvalidCamera)?;
        Ok(())
    }

    /// Parsed log level; an empty setting means `info`.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        if self.log_level.trim().is_empty() {
            return Ok(LevelFilter::Info);
        }
        self.log_level
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
