//! DOM construction for the views. Content is set through text nodes and
//! attributes, never parsed as markup.

use catalog::LocationRecord;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Window};

pub const MAP_CONTAINER_ID: &str = "map";
pub const AR_VIEW_ID: &str = "ar-view";
pub const BACK_LABEL: &str = "← Back to Map";
pub const ENTER_AR_LABEL: &str = "Enter AR";
pub const NOT_FOUND_HEADING: &str = "404 - Page Not Found";
pub const NOT_FOUND_LINK: &str = "Back to Home";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// `Ok(None)` when the page has no element with this id.
pub fn mount_element(document: &Document, id: &str) -> Result<Option<HtmlElement>, JsValue> {
    let Some(el) = document.get_element_by_id(id) else {
        return Ok(None);
    };
    el.dyn_into::<HtmlElement>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

/// `location.hash`, or `""` when unavailable.
pub fn current_fragment() -> String {
    window()
        .and_then(|w| w.location().hash())
        .unwrap_or_default()
}

/// Updates the address bar without firing `hashchange`.
pub fn push_fragment(fragment: &str) -> Result<(), JsValue> {
    window()?
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(fragment))
}

fn element(document: &Document, tag: &str) -> Result<Element, JsValue> {
    document.create_element(tag)
}

fn html_element(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    element(document, tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> is not an HTML element")))
}

fn button(document: &Document, class: &str, label: &str) -> Result<HtmlButtonElement, JsValue> {
    let btn = element(document, "button")?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| JsValue::from_str("<button> is not a button"))?;
    btn.set_class_name(class);
    btn.set_type("button");
    btn.set_text_content(Some(label));
    Ok(btn)
}

/// Replaces everything inside `mount` with `child`.
pub fn replace_contents(mount: &HtmlElement, child: &Element) -> Result<(), JsValue> {
    mount.set_inner_html("");
    mount.append_child(child)?;
    Ok(())
}

/// Full-height container the Leaflet map is created in.
pub fn map_container(document: &Document) -> Result<HtmlElement, JsValue> {
    let div = html_element(document, "div")?;
    div.set_id(MAP_CONTAINER_ID);
    div.style().set_property("height", "100%")?;
    Ok(div)
}

/// Popup body for a marker: bold name, line break, "Enter AR" button.
pub fn marker_popup(
    document: &Document,
    record: &LocationRecord,
) -> Result<(Element, HtmlButtonElement), JsValue> {
    let root = element(document, "div")?;
    let name = element(document, "strong")?;
    name.set_text_content(Some(&record.name));
    root.append_child(&name)?;
    let br = element(document, "br")?;
    root.append_child(&br)?;

    let enter = button(document, "enter-ar-btn", ENTER_AR_LABEL)?;
    enter.set_attribute("data-id", record.id.as_str())?;
    root.append_child(&enter)?;
    Ok((root, enter))
}

/// "Locate me" button placed in a Leaflet control corner.
pub fn locate_button(document: &Document, title: &str) -> Result<HtmlButtonElement, JsValue> {
    let btn = button(document, "leaflet-bar center-control", "📍")?;
    btn.set_title(title);
    Ok(btn)
}

/// Back control plus a `<model-viewer>` bound to the record's model.
pub fn ar_view(
    document: &Document,
    record: &LocationRecord,
) -> Result<(Element, HtmlButtonElement), JsValue> {
    let root = element(document, "div")?;
    root.set_id(AR_VIEW_ID);

    let back = button(document, "btn", BACK_LABEL)?;
    root.append_child(&back)?;

    let viewer = element(document, "model-viewer")?;
    let alt = format!("3D model of {}", record.name);
    for (name, value) in [
        ("src", record.model_url.as_str()),
        ("alt", alt.as_str()),
        ("ar", ""),
        ("ar-modes", "webxr scene-viewer quick-look"),
        ("autoplay", ""),
        ("camera-controls", ""),
        ("ar-scale", "fixed"),
        ("max-field-of-view", "180deg"),
    ] {
        viewer.set_attribute(name, value)?;
    }
    root.append_child(&viewer)?;
    Ok((root, back))
}

pub fn not_found_view(document: &Document) -> Result<Element, JsValue> {
    let root = html_element(document, "div")?;
    root.style().set_property("padding", "2rem")?;
    root.style().set_property("text-align", "center")?;

    let heading = element(document, "h2")?;
    heading.set_text_content(Some(NOT_FOUND_HEADING));
    root.append_child(&heading)?;

    let link = element(document, "a")?;
    link.set_attribute("href", "#")?;
    link.set_text_content(Some(NOT_FOUND_LINK));
    root.append_child(&link)?;
    Ok(root.into())
}
