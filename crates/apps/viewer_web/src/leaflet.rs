//! Bindings to the subset of Leaflet 1.9 (global `L`) the map view uses.

use foundation::{LatLng, MapCamera};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    /// Throws if the container already hosts a map.
    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn new_map(container: &HtmlElement) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = getCenter)]
    pub fn get_center(this: &Map) -> LatLngObject;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map) -> Map;

    #[wasm_bindgen(method)]
    pub fn locate(this: &Map, options: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function) -> Map;
}

#[wasm_bindgen]
extern "C" {
    /// `L.LatLng`
    #[derive(Debug, Clone)]
    pub type LatLngObject;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &LatLngObject) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &LatLngObject) -> f64;
}

#[wasm_bindgen]
extern "C" {
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;
}

#[wasm_bindgen]
extern "C" {
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &Function) -> Marker;
}

#[wasm_bindgen]
extern "C" {
    pub type Circle;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    pub fn circle(lat_lng: &JsValue, options: &JsValue) -> Circle;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Circle, map: &Map) -> Circle;
}

#[wasm_bindgen]
extern "C" {
    pub type Icon;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    pub fn icon(options: &JsValue) -> Icon;
}

#[wasm_bindgen]
extern "C" {
    pub type Control;

    #[wasm_bindgen(js_namespace = L, js_name = control)]
    pub fn control(options: &JsValue) -> Control;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Control, map: &Map) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "DomEvent"], js_name = disableClickPropagation)]
    pub fn disable_click_propagation(el: &HtmlElement);
}

/// Builds a plain options object: `{ key: value, ... }`.
pub fn options(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in entries {
        // Setting a data property on a fresh Object cannot fail.
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

/// `[lat, lng]` array accepted wherever Leaflet takes a `LatLngExpression`.
pub fn lat_lng(p: LatLng) -> JsValue {
    Array::of2(&JsValue::from_f64(p.lat_deg), &JsValue::from_f64(p.lon_deg)).into()
}

pub fn pair(v: [f64; 2]) -> JsValue {
    Array::of2(&JsValue::from_f64(v[0]), &JsValue::from_f64(v[1])).into()
}

impl Map {
    pub fn camera(&self) -> MapCamera {
        let center = self.get_center();
        MapCamera::new(LatLng::new(center.lat(), center.lng()), self.get_zoom())
    }

    pub fn set_camera(&self, camera: MapCamera) {
        self.set_view(&lat_lng(camera.center), camera.zoom);
    }
}

/// Fields of a `locationfound` event.
pub fn location_found(event: &JsValue) -> Result<(LatLng, f64), JsValue> {
    let latlng: LatLngObject = Reflect::get(event, &JsValue::from_str("latlng"))?.unchecked_into();
    let accuracy = Reflect::get(event, &JsValue::from_str("accuracy"))?
        .as_f64()
        .unwrap_or(0.0);
    Ok((LatLng::new(latlng.lat(), latlng.lng()), accuracy))
}

/// `(code, message)` of a `locationerror` event.
pub fn location_error(event: &JsValue) -> (u32, String) {
    let code = Reflect::get(event, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as u32)
        .unwrap_or(0);
    let message = Reflect::get(event, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    (code, message)
}
