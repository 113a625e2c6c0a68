//! Error types for configuration and the map SDK boundary.

use wasm_bindgen::{JsCast, JsValue};

/// Errors found while building or validating the app configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No access token was injected at build time.
    #[error("missing Mapbox access token (set MAPBOX_TOKEN at build time)")]
    MissingAccessToken,

    /// The configured log level is not a `log::LevelFilter` name.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    /// The initial camera is outside the valid ranges.
    #[error("invalid initial camera: {0}")]
    InvalidCamera(String),
}

/// Errors raised while creating or configuring the map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `mapboxgl` global is not present on the page.
    #[error("mapboxgl is not loaded on this page")]
    SdkUnavailable,

    /// A call into JavaScript threw.
    #[error("javascript error: {0}")]
    Js(String),

    /// An option object could not be encoded for the SDK.
    #[error("failed to encode map options: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The SDK emitted an `error` event.
    #[error("map error: {0}")]
    Sdk(String),
}

impl MapError {
    /// The only message ever shown to the user, whatever the cause.
    pub const USER_MESSAGE: &'static str =
        "Could not load map. Please check your internet connection and Mapbox access token.";

    pub fn from_js(value: JsValue) -> Self {
        MapError::Js(describe_js(&value))
    }
}

/// Best-effort text for a thrown JS value or an SDK error event.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    // Mapbox error events carry the cause under `.error`
    if let Ok(inner) = js_sys::Reflect::get(value, &JsValue::from_str("error")) {
        if let Some(err) = inner.dyn_ref::<js_sys::Error>() {
            return String::from(err.message());
        }
    }
    format!("{:?}", value)
}
