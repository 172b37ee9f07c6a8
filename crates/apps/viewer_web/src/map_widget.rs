use catalog::{LocationCatalog, LocationRecord};
use foundation::MapCamera;
use js_sys::Reflect;
use runtime::{LocateControl, LocateEffect, LocateError, LocateOutcome};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use crate::app::{Command, Dispatcher};
use crate::config::{MarkerClick, MarkerIcon, ViewerConfig};
use crate::dom;
use crate::leaflet::{self, Map};

const USER_POPUP: &str = "You are here";

type Listener = Closure<dyn FnMut(JsValue)>;

/// The one live Leaflet map and every JS callback it references.
///
/// Dropping the widget without [`MapWidget::teardown`] leaves the Leaflet map
/// attached to detached DOM; always tear down.
pub struct MapWidget {
    map: Map,
    locate_button: HtmlButtonElement,
    listeners: Vec<Listener>,
    _control_add: Closure<dyn FnMut(JsValue) -> JsValue>,
}

impl MapWidget {
    pub fn mount(
        document: &Document,
        mount: &HtmlElement,
        camera: MapCamera,
        catalog: &LocationCatalog,
        config: &ViewerConfig,
        dispatcher: &Dispatcher,
    ) -> Result<Self, JsValue> {
        let container = dom::map_container(document)?;
        dom::replace_contents(mount, &container)?;

        let map = leaflet::new_map(&container)?;
        leaflet::tile_layer(
            &config.tile_url,
            &leaflet::options(&[(
                "attribution",
                JsValue::from_str(&config.tile_attribution),
            )]),
        )
        .add_to(&map);
        map.set_camera(camera);

        let mut listeners = Vec::new();
        let icon = config.marker_icon().map(|icon| icon_object(&icon));
        for record in catalog.iter() {
            listeners.extend(add_marker(
                document,
                &map,
                record,
                icon.as_ref(),
                config.marker_click,
                dispatcher,
            )?);
        }

        let locate_button = dom::locate_button(document, LocateControl::READY.title)?;
        leaflet::disable_click_propagation(&locate_button);
        let on_locate_click = {
            let map = map.clone();
            let max_zoom = config.locate().max_zoom;
            Listener::new(move |_event: JsValue| {
                log::debug!("requesting device location");
                map.locate(&leaflet::options(&[
                    ("setView", JsValue::TRUE),
                    ("maxZoom", JsValue::from_f64(max_zoom)),
                    ("enableHighAccuracy", JsValue::TRUE),
                ]));
            })
        };
        locate_button
            .add_event_listener_with_callback("click", on_locate_click.as_ref().unchecked_ref())?;
        listeners.push(on_locate_click);

        let control = leaflet::control(&leaflet::options(&[(
            "position",
            JsValue::from_str(&config.locate_position),
        )]));
        let control_add = {
            let button = locate_button.clone();
            Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |_map: JsValue| {
                JsValue::from(button.clone())
            })
        };
        Reflect::set(&control, &JsValue::from_str("onAdd"), control_add.as_ref())?;
        control.add_to(&map);

        let found = dispatcher.clone();
        listeners.push(on_map(&map, "locationfound", move |event| {
            match leaflet::location_found(&event) {
                Ok((position, accuracy_m)) => found.post(Command::Located(LocateOutcome::Found {
                    position,
                    accuracy_m,
                })),
                Err(err) => log::warn!("malformed locationfound event: {err:?}"),
            }
        }));

        let failed = dispatcher.clone();
        listeners.push(on_map(&map, "locationerror", move |event| {
            let (code, message) = leaflet::location_error(&event);
            failed.post(Command::Located(LocateOutcome::Failed(
                LocateError::from_code(code, message),
            )));
        }));

        // Registered after the initial setView so the restored camera is not echoed back.
        let moved = dispatcher.clone();
        let observed = map.clone();
        listeners.push(on_map(&map, "moveend", move |_event| {
            moved.post(Command::CameraMoved(observed.camera()));
        }));

        log::debug!("map mounted with {} markers", catalog.len());
        Ok(Self {
            map,
            locate_button,
            listeners,
            _control_add: control_add,
        })
    }

    /// Removes the Leaflet map and releases its callbacks, returning the last camera.
    pub fn teardown(self) -> MapCamera {
        let camera = self.map.camera();
        self.map.remove();
        log::debug!("map removed, {} listeners released", self.listeners.len());
        camera
    }

    pub fn apply_locate(&self, effect: &LocateEffect) {
        match effect {
            LocateEffect::ShowUser {
                position,
                accuracy_m,
                ..
            } => {
                let at = leaflet::lat_lng(*position);
                leaflet::marker(&at, &leaflet::options(&[]))
                    .add_to(&self.map)
                    .bind_popup(&JsValue::from_str(USER_POPUP))
                    .open_popup();
                leaflet::circle(
                    &at,
                    &leaflet::options(&[("radius", JsValue::from_f64(*accuracy_m))]),
                )
                .add_to(&self.map);
            }
            LocateEffect::FallBack { camera, .. } => self.map.set_camera(*camera),
        }
        self.set_control(effect.control());
    }

    fn set_control(&self, control: LocateControl) {
        self.locate_button.set_disabled(!control.enabled);
        self.locate_button.set_title(control.title);
    }
}

fn on_map(map: &Map, event: &str, handler: impl FnMut(JsValue) + 'static) -> Listener {
    let listener = Listener::new(handler);
    map.on(event, listener.as_ref().unchecked_ref());
    listener
}

fn icon_object(icon: &MarkerIcon) -> JsValue {
    let mut entries = vec![
        ("iconUrl", JsValue::from_str(&icon.icon_url)),
        ("iconSize", leaflet::pair(icon.icon_size)),
        ("iconAnchor", leaflet::pair(icon.icon_anchor)),
        ("popupAnchor", leaflet::pair(icon.popup_anchor)),
    ];
    if let Some(url) = &icon.shadow_url {
        entries.push(("shadowUrl", JsValue::from_str(url)));
    }
    if let Some(size) = icon.shadow_size {
        entries.push(("shadowSize", leaflet::pair(size)));
    }
    leaflet::icon(&leaflet::options(&entries)).into()
}

fn add_marker(
    document: &Document,
    map: &Map,
    record: &LocationRecord,
    icon: Option<&JsValue>,
    click: MarkerClick,
    dispatcher: &Dispatcher,
) -> Result<Vec<Listener>, JsValue> {
    let options = match icon {
        Some(icon) => leaflet::options(&[("icon", icon.clone())]),
        None => leaflet::options(&[]),
    };
    let marker = leaflet::marker(&leaflet::lat_lng(record.coords), &options).add_to(map);

    let open = {
        let dispatcher = dispatcher.clone();
        let id = record.id.clone();
        Listener::new(move |_event: JsValue| dispatcher.post(Command::OpenLocation(id.clone())))
    };

    match click {
        MarkerClick::Popup => {
            let (popup, enter) = dom::marker_popup(document, record)?;
            enter.add_event_listener_with_callback("click", open.as_ref().unchecked_ref())?;
            marker.bind_popup(&popup);
        }
        MarkerClick::Navigate => {
            marker.on("click", open.as_ref().unchecked_ref());
        }
    }
    Ok(vec![open])
}
