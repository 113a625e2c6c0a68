//! Core data model: the destination registry and camera requests.
//! Everything here is plain data so it can be exercised without a browser.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair. Encoded as `[lng, lat]`, the order the map SDK expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    /// Sidebar label; unique within the registry.
    pub name: &'static str,
    pub position: LngLat,
    pub zoom: Option<f64>,
    /// Tilt in degrees, 0..=85.
    pub pitch: Option<f64>,
    /// Rotation in degrees; negative values are allowed.
    pub bearing: Option<f64>,
}

pub const DESTINATIONS: &[Destination] = &[
    Destination {
        name: "Stanford University",
        position: LngLat::new(-122.1700, 37.4275),
        zoom: Some(15.0),
        pitch: Some(50.0),
        bearing: None,
    },
    Destination {
        name: "Winchester Mystery House",
        position: LngLat::new(-121.9511, 37.3186),
        zoom: Some(16.5),
        pitch: Some(55.0),
        bearing: None,
    },
    Destination {
        name: "Santana Row",
        position: LngLat::new(-121.9480, 37.3205),
        zoom: Some(16.0),
        pitch: Some(45.0),
        bearing: None,
    },
    Destination {
        name: "Intel Museum",
        position: LngLat::new(-121.9643, 37.3881),
        zoom: Some(17.0),
        pitch: Some(50.0),
        bearing: Some(-30.0),
    },
    Destination {
        name: "California's Great America",
        position: LngLat::new(-121.9740, 37.3978),
        zoom: Some(15.0),
        pitch: Some(40.0),
        bearing: None,
    },
    Destination {
        name: "Computer History Museum",
        position: LngLat::new(-122.0776, 37.4143),
        zoom: Some(17.0),
        pitch: Some(50.0),
        bearing: None,
    },
    Destination {
        name: "Levi's Stadium",
        position: LngLat::new(-121.9700, 37.4032),
        zoom: Some(15.5),
        pitch: Some(45.0),
        bearing: None,
    },
    Destination {
        name: "Lick Observatory (Mt. Hamilton)",
        position: LngLat::new(-121.6429, 37.3414),
        // zoomed out a little for context
        zoom: Some(14.0),
        pitch: Some(30.0),
        bearing: None,
    },
    Destination {
        name: "Downtown San Jose",
        position: LngLat::new(-121.8900, 37.3340),
        zoom: Some(14.5),
        pitch: Some(45.0),
        bearing: None,
    },
];

/// Enumerate the registry in declaration order. The iterator is `Clone`, so it can be restarted.
pub fn destinations() -> impl Iterator<Item = &'static Destination> + Clone {
    DESTINATIONS.iter()
}

#[cfg(test)]
pub fn find(name: &str) -> Option<&'static Destination> {
    destinations().find(|d| d.name == name)
}

/// Values used when a destination leaves a camera parameter unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightDefaults {
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub duration_ms: u32,
    /// Mark flights as essential so they run even with reduced-motion preferences.
    pub essential: bool,
}

impl Default for FlightDefaults {
    fn default() -> Self {
        Self {
            zoom: 15.0,
            pitch: 50.0,
            bearing: 0.0,
            duration_ms: 4000,
            essential: true,
        }
    }
}

/// Options for the SDK's `flyTo`; field names match its option object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub essential: bool,
    pub duration: u32,
}

impl TransitionRequest {
    pub fn for_destination(dest: &Destination, defaults: &FlightDefaults) -> Self {
        Self {
            center: dest.position,
            zoom: dest.zoom.unwrap_or(defaults.zoom),
            pitch: dest.pitch.unwrap_or(defaults.pitch),
            bearing: dest.bearing.unwrap_or(defaults.bearing),
            essential: defaults.essential,
            duration: defaults.duration_ms,
        }
    }
}

/// Camera used when the map is first created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        // roughly Santa Clara County
        Self {
            center: LngLat::new(-121.95, 37.35),
            zoom: 10.0,
            pitch: 45.0,
            bearing: -10.0,
        }
    }
}

impl CameraOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !self.center.is_valid() {
            return Err(format!("center {:?} out of range", self.center));
        }
        if !(self.zoom > 0.0) {
            return Err(format!("zoom {} must be positive", self.zoom));
        }
        if !(0.0..=85.0).contains(&self.pitch) {
            return Err(format!("pitch {} outside 0..=85", self.pitch));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_nine_unique_entries_in_order() {
        let names: Vec<_> = destinations().map(|d| d.name).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Stanford University");
        assert_eq!(names[3], "Intel Museum");
        assert_eq!(names[8], "Downtown San Jose");
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn enumeration_is_restartable_and_stable() {
        let it = destinations();
        let first: Vec<_> = it.clone().collect();
        let second: Vec<_> = it.collect();
        assert_eq!(first, second);
        let again: Vec<_> = destinations().collect();
        assert_eq!(first, again);
    }

    #[test]
    fn registry_values_are_in_range() {
        for d in destinations() {
            assert!(d.position.is_valid(), "{} has invalid position", d.name);
            if let Some(z) = d.zoom {
                assert!(z > 0.0, "{} zoom", d.name);
            }
            if let Some(p) = d.pitch {
                assert!((0.0..=85.0).contains(&p), "{} pitch", d.name);
            }
        }
    }

    #[test]
    fn find_by_name() {
        let d = find("Levi's Stadium").unwrap();
        assert_eq!(d.position, LngLat::new(-121.9700, 37.4032));
        assert!(find("Golden Gate Bridge").is_none());
    }

    #[test]
    fn stanford_request_fills_in_bearing() {
        let d = find("Stanford University").unwrap();
        let req = TransitionRequest::for_destination(d, &FlightDefaults::default());
        assert_eq!(
            req,
            TransitionRequest {
                center: LngLat::new(-122.1700, 37.4275),
                zoom: 15.0,
                pitch: 50.0,
                bearing: 0.0,
                essential: true,
                duration: 4000,
            }
        );
    }

    #[test]
    fn intel_museum_keeps_negative_bearing() {
        let d = find("Intel Museum").unwrap();
        let req = TransitionRequest::for_destination(d, &FlightDefaults::default());
        assert_eq!(req.bearing, -30.0);
        assert_eq!(req.zoom, 17.0);
    }

    #[test]
    fn missing_parameters_take_defaults() {
        let d = Destination {
            name: "Nowhere",
            position: LngLat::new(0.0, 0.0),
            zoom: None,
            pitch: None,
            bearing: None,
        };
        let req = TransitionRequest::for_destination(&d, &FlightDefaults::default());
        assert_eq!((req.zoom, req.pitch, req.bearing), (15.0, 50.0, 0.0));
    }

    #[test]
    fn explicit_zero_is_not_replaced() {
        let d = Destination {
            name: "Flat",
            position: LngLat::new(1.0, 2.0),
            zoom: Some(3.0),
            pitch: Some(0.0),
            bearing: Some(0.0),
        };
        let req = TransitionRequest::for_destination(&d, &FlightDefaults::default());
        assert_eq!(req.pitch, 0.0);
    }

    #[test]
    fn request_encodes_as_fly_to_options() {
        let d = find("Santana Row").unwrap();
        let req = TransitionRequest::for_destination(d, &FlightDefaults::default());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["center"], serde_json::json!([-121.9480, 37.3205]));
        assert_eq!(v["essential"], serde_json::json!(true));
        assert_eq!(v["duration"], serde_json::json!(4000));
    }

    #[test]
    fn lng_lat_range_checks() {
        assert!(LngLat::new(180.0, -90.0).is_valid());
        assert!(!LngLat::new(180.5, 0.0).is_valid());
        assert!(!LngLat::new(0.0, 91.0).is_valid());
    }

    #[test]
    fn default_camera_is_valid() {
        assert!(CameraOptions::default().validate().is_ok());
        let bad = CameraOptions {
            pitch: 90.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
