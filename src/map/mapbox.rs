//! Bindings to Mapbox GL JS, which the page loads as the `mapboxgl` global.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::{
    CameraControl, Control, ElevationSource, MapEvent, MapLifecycle, MapSurface, StyleDoc,
    StyleLayer, Terrain,
};
use crate::config::Config;
use crate::error::{MapError, describe_js};
use crate::model::TransitionRequest;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    type JsMap;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl, js_class = "Map")]
    fn new(options: &JsValue) -> Result<JsMap, JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &JsMap, options: &JsValue);

    #[wasm_bindgen(method, catch, js_name = addControl)]
    fn add_control(this: &JsMap, control: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &JsMap, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setTerrain)]
    fn set_terrain(this: &JsMap, terrain: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &JsMap, layer: &JsValue, before_id: Option<&str>) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = getStyle)]
    fn get_style(this: &JsMap) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &JsMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn remove(this: &JsMap);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = NavigationControl)]
    type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "NavigationControl")]
    fn new() -> NavigationControl;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = FullscreenControl)]
    type FullscreenControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "FullscreenControl")]
    fn new() -> FullscreenControl;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = GeolocateControl)]
    type GeolocateControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "GeolocateControl")]
    fn new(options: &JsValue) -> GeolocateControl;
}

/// JSON round-trip into a plain JS object; the SDK only reads plain options.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, MapError> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(MapError::from_js)
}

/// The `mapboxgl` namespace object, if the SDK script has loaded.
fn sdk() -> Result<JsValue, MapError> {
    let ns = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
        .map_err(MapError::from_js)?;
    if ns.is_undefined() || ns.is_null() {
        return Err(MapError::SdkUnavailable);
    }
    Ok(ns)
}

type Listener = Closure<dyn FnMut(JsValue)>;

/// An owned Mapbox map. Event listeners registered through `on` live as long as it does,
/// and dropping it removes the map from the page.
pub struct MapboxMap {
    inner: JsMap,
    listeners: RefCell<Vec<Listener>>,
    removed: Cell<bool>,
}

impl MapboxMap {
    /// Set the access token and create the map inside `container`.
    /// The map is not usable for setup until its `load` event fires.
    pub fn create(container: &HtmlElement, cfg: &Config) -> Result<Rc<Self>, MapError> {
        cfg.validate()?;
        let ns = sdk()?;
        js_sys::Reflect::set(
            &ns,
            &JsValue::from_str("accessToken"),
            &JsValue::from_str(&cfg.access_token),
        )
        .map_err(MapError::from_js)?;

        let cam = &cfg.map.initial_camera;
        let options = to_js(&json!({
            "style": cfg.map.style,
            "center": cam.center,
            "zoom": cam.zoom,
            "pitch": cam.pitch,
            "bearing": cam.bearing,
        }))?;
        js_sys::Reflect::set(&options, &JsValue::from_str("container"), container)
            .map_err(MapError::from_js)?;

        let inner = JsMap::new(&options).map_err(MapError::from_js)?;
        log::debug!("map created with style {}", cfg.map.style);
        Ok(Rc::new(Self {
            inner,
            listeners: RefCell::new(Vec::new()),
            removed: Cell::new(false),
        }))
    }

    fn on(&self, event: &str, handler: impl FnMut(JsValue) + 'static) {
        let cb: Listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        self.inner.on(event, cb.as_ref().unchecked_ref());
        self.listeners.borrow_mut().push(cb);
    }
}

impl MapLifecycle for MapboxMap {
    fn subscribe(&self, listener: Rc<dyn Fn(MapEvent)>) {
        let on_load = listener.clone();
        self.on("load", move |_| on_load(MapEvent::Loaded));
        self.on("error", move |event| listener(MapEvent::Error(describe_js(&event))));
    }

    /// Tear down the map's canvas and WebGL context.
    fn remove(&self) {
        if !self.removed.replace(true) {
            self.inner.remove();
        }
    }
}

impl Drop for MapboxMap {
    fn drop(&mut self) {
        // before the listener closures are freed
        MapLifecycle::remove(self);
    }
}

impl CameraControl for MapboxMap {
    fn fly_to(&self, request: &TransitionRequest) {
        match to_js(request) {
            Ok(options) => self.inner.fly_to(&options),
            Err(e) => log::warn!("dropping camera request: {}", e),
        }
    }
}

impl MapSurface for MapboxMap {
    fn add_control(&self, control: Control) -> Result<(), MapError> {
        let ctrl: JsValue = match control {
            Control::Navigation => NavigationControl::new().into(),
            Control::Fullscreen => FullscreenControl::new().into(),
            Control::Geolocate => {
                let options = to_js(&json!({
                    "positionOptions": { "enableHighAccuracy": true },
                    "trackUserLocation": true,
                    "showUserHeading": true,
                }))?;
                GeolocateControl::new(&options).into()
            }
        };
        self.inner.add_control(&ctrl).map_err(MapError::from_js)
    }

    fn add_elevation_source(&self, id: &str, source: &ElevationSource) -> Result<(), MapError> {
        self.inner
            .add_source(id, &to_js(source)?)
            .map_err(MapError::from_js)
    }

    fn enable_terrain(&self, terrain: &Terrain) -> Result<(), MapError> {
        self.inner
            .set_terrain(&to_js(terrain)?)
            .map_err(MapError::from_js)
    }

    fn style_layers(&self) -> Result<Vec<StyleLayer>, MapError> {
        let style = self.inner.get_style().map_err(MapError::from_js)?;
        if style.is_undefined() || style.is_null() {
            return Ok(Vec::new());
        }
        let text: String = js_sys::JSON::stringify(&style)
            .map_err(MapError::from_js)?
            .into();
        let doc: StyleDoc = serde_json::from_str(&text)?;
        Ok(doc.layers)
    }

    fn add_overlay_layer(
        &self,
        layer: &serde_json::Value,
        before_id: Option<&str>,
    ) -> Result<(), MapError> {
        self.inner
            .add_layer(&to_js(layer)?, before_id)
            .map_err(MapError::from_js)
    }
}
