//! Leaflet Bindings
//!
//! Minimal `wasm_bindgen` bindings to the Leaflet mapping library, loaded
//! globally as `L` from `index.html`. Only the primitives the facility map
//! orchestrates are bound; everything else (tile fetching, pan/zoom input,
//! popup lifecycle) stays inside the library.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// An `L.Map` instance bound to a container element.
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container: &HtmlElement, options: &Object) -> Map;

    /// Animate the viewport to fit `bounds` (an array of `[lat, lng]` pairs).
    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &Array, options: &Object);

    /// Destroy the map and release its DOM bindings.
    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    /// An `L.TileLayer` base layer.
    #[derive(Debug, Clone)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn new_tile_layer(url_template: &str, options: &Object) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    /// An `L.LayerGroup`, used as the single mutation target for markers.
    #[derive(Debug, Clone)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn new_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &LayerGroup, map: &Map) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup);

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &Marker);

    /// An `L.Marker` pinned at a coordinate.
    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn new_marker(lat_lng: &Array, options: &Object) -> Marker;

    /// Attach popup HTML; Leaflet renders it lazily when the marker is
    /// clicked.
    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, html: &str) -> Marker;

    /// An `L.DivIcon` carrying custom marker HTML.
    #[derive(Debug, Clone)]
    pub type DivIcon;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn new_div_icon(options: &Object) -> DivIcon;
}

/// A `[lat, lng]` pair in the array form Leaflet accepts everywhere.
pub fn lat_lng(lat: f64, lng: f64) -> Array {
    Array::of2(&lat.into(), &lng.into())
}

fn set(object: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(object, &JsValue::from_str(key), value);
}

/// Options for map construction: starting view plus explicit zoom bounds to
/// prevent degenerate zoom states.
pub fn map_options(center: (f64, f64), zoom: f64, min_zoom: f64, max_zoom: f64) -> Object {
    let options = Object::new();
    set(&options, "center", &lat_lng(center.0, center.1));
    set(&options, "zoom", &zoom.into());
    set(&options, "minZoom", &min_zoom.into());
    set(&options, "maxZoom", &max_zoom.into());
    set(&options, "scrollWheelZoom", &true.into());
    options
}

/// Tile layer options. Attribution is required by the tile provider's terms.
pub fn tile_options(attribution: &str) -> Object {
    let options = Object::new();
    set(&options, "attribution", &attribution.into());
    options
}

/// DivIcon options for a square icon of `size` CSS pixels, anchored at its
/// center with the popup opening above it.
pub fn div_icon_options(html: &str, size: f64) -> Object {
    let half = size / 2.0;
    let options = Object::new();
    set(&options, "html", &html.into());
    set(&options, "className", &"custom-marker".into());
    set(&options, "iconSize", &Array::of2(&size.into(), &size.into()));
    set(&options, "iconAnchor", &Array::of2(&half.into(), &half.into()));
    set(&options, "popupAnchor", &Array::of2(&0.0.into(), &(-half).into()));
    options
}

/// Marker options carrying a custom icon.
pub fn marker_options(icon: &DivIcon) -> Object {
    let options = Object::new();
    set(&options, "icon", icon);
    options
}

/// Fit-to-bounds options: fixed padding plus a zoom cap so a single facility
/// (or colocated facilities) does not over-zoom.
pub fn fit_bounds_options(padding: f64, max_zoom: f64) -> Object {
    let options = Object::new();
    set(&options, "padding", &Array::of2(&padding.into(), &padding.into()));
    set(&options, "maxZoom", &max_zoom.into());
    options
}
