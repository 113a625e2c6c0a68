//! The external map component, seen through a few small traits.
//!
//! `CameraControl` is all the selection handler needs; `MapSurface` covers the
//! one-time setup done on load; `MapLifecycle` delivers the load/error
//! notifications. `mapbox::MapboxMap` implements all three against Mapbox GL JS,
//! and tests use a recording fake.

pub mod mapbox;
pub mod setup;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::model::TransitionRequest;

pub use mapbox::MapboxMap;

pub trait CameraControl {
    /// Start an animated camera move. Fire-and-forget: completion is not reported.
    fn fly_to(&self, request: &TransitionRequest);
}

pub trait MapSurface {
    fn add_control(&self, control: Control) -> Result<(), MapError>;
    fn add_elevation_source(&self, id: &str, source: &ElevationSource) -> Result<(), MapError>;
    fn enable_terrain(&self, terrain: &Terrain) -> Result<(), MapError>;
    /// Layers of the currently loaded style, in draw order.
    fn style_layers(&self) -> Result<Vec<StyleLayer>, MapError>;
    /// Add a layer, beneath `before_id` when given.
    fn add_overlay_layer(
        &self,
        layer: &serde_json::Value,
        before_id: Option<&str>,
    ) -> Result<(), MapError>;
}

/// Notifications the map sends while it starts up and runs.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// The style finished loading; setup may run.
    Loaded,
    /// The SDK reported an error, with whatever detail it carried.
    Error(String),
}

pub trait MapLifecycle: MapSurface + CameraControl {
    /// Receive every `MapEvent` for the life of the map.
    fn subscribe(&self, listener: Rc<dyn Fn(MapEvent)>);
    /// Tear the map down. Later calls do nothing.
    fn remove(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Zoom buttons and compass.
    Navigation,
    Fullscreen,
    /// Locate-me button that keeps tracking the user's position and heading.
    Geolocate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(rename = "tileSize")]
    pub tile_size: u32,
    pub maxzoom: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub source: String,
    pub exaggeration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Just enough of a style document to list its layers.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StyleDoc {
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
}
