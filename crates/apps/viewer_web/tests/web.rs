//! Browser checks for the DOM views. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use catalog::LocationRecord;
use foundation::{LatLng, LocationId};
use viewer_web::config::{CONFIG_ELEMENT_ID, ViewerConfig};
use viewer_web::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn record() -> LocationRecord {
    LocationRecord {
        id: LocationId::new("3"),
        name: "Sé <Cathedral>".to_string(),
        coords: LatLng::new(41.1429, -8.6110),
        model_url: "models/se.glb?v=2&lod=1".to_string(),
    }
}

fn mount() -> HtmlElement {
    let document = dom::document().unwrap();
    let el: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn ar_view_binds_model_viewer_to_record() {
    let document = dom::document().unwrap();
    let (root, back) = dom::ar_view(&document, &record()).unwrap();

    assert_eq!(root.id(), dom::AR_VIEW_ID);
    assert_eq!(back.text_content().as_deref(), Some(dom::BACK_LABEL));

    let viewer = root.query_selector("model-viewer").unwrap().unwrap();
    assert_eq!(
        viewer.get_attribute("src").as_deref(),
        Some("models/se.glb?v=2&lod=1")
    );
    assert_eq!(
        viewer.get_attribute("alt").as_deref(),
        Some("3D model of Sé <Cathedral>")
    );
    assert_eq!(
        viewer.get_attribute("ar-modes").as_deref(),
        Some("webxr scene-viewer quick-look")
    );
    assert!(viewer.has_attribute("ar"));
    assert!(viewer.has_attribute("camera-controls"));
    assert_eq!(viewer.get_attribute("ar-scale").as_deref(), Some("fixed"));
}

#[wasm_bindgen_test]
fn not_found_view_links_home() {
    let document = dom::document().unwrap();
    let el = mount();
    let view = dom::not_found_view(&document).unwrap();
    dom::replace_contents(&el, &view).unwrap();

    let heading = el.query_selector("h2").unwrap().unwrap();
    assert_eq!(heading.text_content().as_deref(), Some(dom::NOT_FOUND_HEADING));
    let link = el.query_selector("a").unwrap().unwrap();
    assert_eq!(link.get_attribute("href").as_deref(), Some("#"));
}

#[wasm_bindgen_test]
fn popup_names_are_text_not_markup() {
    let document = dom::document().unwrap();
    let (popup, enter) = dom::marker_popup(&document, &record()).unwrap();

    assert!(popup.query_selector("strong cathedral").unwrap().is_none());
    let name = popup.query_selector("strong").unwrap().unwrap();
    assert_eq!(name.text_content().as_deref(), Some("Sé <Cathedral>"));
    assert_eq!(enter.get_attribute("data-id").as_deref(), Some("3"));
}

#[wasm_bindgen_test]
fn replacing_contents_drops_previous_view() {
    let document = dom::document().unwrap();
    let el = mount();
    dom::replace_contents(&el, &dom::not_found_view(&document).unwrap()).unwrap();
    let (ar, _) = dom::ar_view(&document, &record()).unwrap();
    dom::replace_contents(&el, &ar).unwrap();

    assert_eq!(el.child_element_count(), 1);
    assert!(el.query_selector("h2").unwrap().is_none());
}

#[wasm_bindgen_test]
fn config_is_read_from_inline_script() {
    let document = dom::document().unwrap();
    let script = document.create_element("script").unwrap();
    script.set_id(CONFIG_ELEMENT_ID);
    script.set_attribute("type", "application/json").unwrap();
    script.set_text_content(Some(r#"{ "data_url": "places.json" }"#));
    document.body().unwrap().append_child(&script).unwrap();

    let (config, err) = viewer_web::config::load_from_document();
    script.remove();

    assert!(err.is_none());
    assert_eq!(config.data_url, "places.json");
    assert_eq!(config.mount_id, ViewerConfig::default().mount_id);
}

#[wasm_bindgen_test]
fn missing_mount_is_none_not_an_error() {
    let document = dom::document().unwrap();
    assert!(dom::mount_element(&document, "no-such-mount").unwrap().is_none());

    let el = mount();
    el.set_id("viewer-mount");
    let found = dom::mount_element(&document, "viewer-mount").unwrap();
    assert_eq!(found.map(|m| m.id()), Some("viewer-mount".to_string()));
}
