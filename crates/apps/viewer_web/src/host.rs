use catalog::{LocationCatalog, LocationRecord};
use foundation::MapCamera;
use runtime::{LocateEffect, Route, ViewHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::app::{Command, Dispatcher};
use crate::config::ViewerConfig;
use crate::dom;
use crate::map_widget::MapWidget;

/// A failed DOM or Leaflet call, flattened to text for logging.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DomError(String);

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Browser rendering surface: the mount element, the map widget and the
/// listeners of whichever view is on screen.
pub struct WebHost {
    document: Document,
    mount: HtmlElement,
    config: ViewerConfig,
    dispatcher: Dispatcher,
    map: Option<MapWidget>,
    view_listeners: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl WebHost {
    pub fn new(
        document: Document,
        mount: HtmlElement,
        config: ViewerConfig,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            document,
            mount,
            config,
            dispatcher,
            map: None,
            view_listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Disposes the current view before another one is built.
    fn reset(&mut self) {
        if let Some(map) = self.map.take() {
            map.teardown();
        }
        self.view_listeners.clear();
    }
}

impl ViewHost for WebHost {
    type Error = DomError;

    fn show_map(&mut self, camera: MapCamera, catalog: &LocationCatalog) -> Result<(), DomError> {
        self.reset();
        let widget = MapWidget::mount(
            &self.document,
            &self.mount,
            camera,
            catalog,
            &self.config,
            &self.dispatcher,
        )?;
        self.map = Some(widget);
        Ok(())
    }

    fn unmount_map(&mut self) -> Option<MapCamera> {
        self.map.take().map(MapWidget::teardown)
    }

    fn show_ar(&mut self, record: &LocationRecord) -> Result<(), DomError> {
        self.reset();
        let (root, back) = dom::ar_view(&self.document, record)?;
        let dispatcher = self.dispatcher.clone();
        let on_back = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            dispatcher.post(Command::Navigate(Route::Map));
        });
        back.add_event_listener_with_callback("click", on_back.as_ref().unchecked_ref())?;
        self.view_listeners.push(on_back);
        dom::replace_contents(&self.mount, &root)?;
        Ok(())
    }

    fn show_not_found(&mut self) -> Result<(), DomError> {
        self.reset();
        let root = dom::not_found_view(&self.document)?;
        dom::replace_contents(&self.mount, &root)?;
        Ok(())
    }

    fn push_fragment(&mut self, fragment: &str) -> Result<(), DomError> {
        dom::push_fragment(fragment)?;
        Ok(())
    }

    fn apply_locate(&mut self, effect: &LocateEffect) -> Result<(), DomError> {
        if let Some(map) = &self.map {
            map.apply_locate(effect);
        }
        Ok(())
    }
}
