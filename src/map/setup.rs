//! One-time map setup: controls at creation, terrain and 3D buildings once the style loads.

use serde_json::json;

use super::{Control, ElevationSource, MapSurface, StyleLayer, Terrain};
use crate::config::{BuildingsConfig, Config, ControlsConfig, TerrainConfig};
use crate::error::MapError;

/// What `on_style_loaded` ended up adding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SetupReport {
    pub terrain: bool,
    pub buildings: bool,
}

pub fn add_controls(map: &dyn MapSurface, cfg: &ControlsConfig) -> Result<(), MapError> {
    let wanted = [
        (cfg.navigation, Control::Navigation),
        (cfg.fullscreen, Control::Fullscreen),
        (cfg.geolocate, Control::Geolocate),
    ];
    for (_, control) in wanted.into_iter().filter(|(on, _)| *on) {
        map.add_control(control)?;
    }
    Ok(())
}

pub fn elevation_source(cfg: &TerrainConfig) -> ElevationSource {
    ElevationSource {
        kind: "raster-dem".to_string(),
        url: cfg.url.clone(),
        tile_size: cfg.tile_size,
        maxzoom: cfg.max_zoom,
    }
}

/// Id of the first symbol layer; buildings go beneath it so labels stay on top.
pub fn first_symbol_layer(layers: &[StyleLayer]) -> Option<&str> {
    layers
        .iter()
        .find(|l| l.kind == "symbol")
        .map(|l| l.id.as_str())
}

/// Extrusion layer over the `building` source-layer of the style's `composite` source.
pub fn building_layer(cfg: &BuildingsConfig) -> serde_json::Value {
    // ramp from flat at min_zoom to full height just after, so buildings grow in
    let ramp_end = cfg.min_zoom + 0.05;
    json!({
        "id": cfg.layer_id,
        "source": "composite",
        "source-layer": "building",
        "filter": ["==", "extrude", "true"],
        "type": "fill-extrusion",
        "minzoom": cfg.min_zoom,
        "paint": {
            "fill-extrusion-color": cfg.color,
            "fill-extrusion-height": [
                "interpolate", ["linear"], ["zoom"],
                cfg.min_zoom, 0,
                ramp_end, ["get", "height"]
            ],
            "fill-extrusion-base": [
                "interpolate", ["linear"], ["zoom"],
                cfg.min_zoom, 0,
                ramp_end, ["get", "min_height"]
            ],
            "fill-extrusion-opacity": cfg.opacity
        }
    })
}

/// Runs on the SDK's `load` notification.
pub fn on_style_loaded(map: &dyn MapSurface, cfg: &Config) -> Result<SetupReport, MapError> {
    log::info!("Map style loaded.");
    let mut report = SetupReport::default();

    if cfg.terrain.enabled {
        map.add_elevation_source(&cfg.terrain.source_id, &elevation_source(&cfg.terrain))?;
        log::info!("Mapbox DEM source added.");
        map.enable_terrain(&Terrain {
            source: cfg.terrain.source_id.clone(),
            exaggeration: cfg.terrain.exaggeration,
        })?;
        log::info!("Terrain enabled.");
        report.terrain = true;
    }

    if cfg.buildings.enabled {
        let layers = map.style_layers()?;
        match first_symbol_layer(&layers) {
            Some(before) => {
                map.add_overlay_layer(&building_layer(&cfg.buildings), Some(before))?;
                log::info!("3D buildings layer added.");
                report.buildings = true;
            }
            None => {
                log::info!("Could not find a symbol layer to place 3D buildings below.");
            }
        }
    }

    Ok(report)
}
