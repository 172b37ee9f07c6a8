use std::cell::RefCell;
use std::rc::{Rc, Weak};

use catalog::{LoadError, LocationCatalog};
use foundation::{LocationId, MapCamera};
use runtime::{LocateOutcome, Route, Router};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::config::ViewerConfig;
use crate::host::WebHost;

/// Work requested by a DOM or Leaflet callback.
#[derive(Debug)]
pub enum Command {
    Fragment(String),
    Navigate(Route),
    NavigateFragment(String),
    OpenLocation(LocationId),
    CameraMoved(MapCamera),
    Located(LocateOutcome),
}

/// Posts commands to the app from inside JS callbacks.
///
/// Commands run on the next microtask. A callback owned by the map widget can
/// therefore never be dropped while it is still executing, and the app is
/// never borrowed re-entrantly.
#[derive(Clone)]
pub struct Dispatcher {
    app: Weak<RefCell<App>>,
}

impl Dispatcher {
    pub fn post(&self, command: Command) {
        let app = self.app.clone();
        spawn_local(async move {
            let Some(app) = app.upgrade() else {
                return;
            };
            match app.try_borrow_mut() {
                Ok(mut app) => app.handle(command),
                Err(_) => log::warn!("dropping {command:?}: app is busy"),
            };
        });
    }
}

/// Application state: the router (once booted) and the browser host.
pub struct App {
    router: Option<Router>,
    host: WebHost,
}

impl App {
    pub fn create(
        document: Document,
        mount: HtmlElement,
        config: ViewerConfig,
    ) -> Rc<RefCell<App>> {
        Rc::new_cyclic(|weak| {
            let dispatcher = Dispatcher { app: weak.clone() };
            RefCell::new(App {
                router: None,
                host: WebHost::new(document, mount, config, dispatcher),
            })
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        self.host.config()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.host.dispatcher().clone()
    }

    /// Renders the first view. Returns `false` when loading failed.
    pub fn boot(&mut self, loaded: Result<LocationCatalog, LoadError>, fragment: &str) -> bool {
        let camera = self.config().default_camera;
        let locate = self.config().locate();
        self.router = Router::boot(loaded, camera, locate, fragment, &mut self.host);
        self.router.is_some()
    }

    pub fn handle(&mut self, command: Command) {
        let App { router, host } = self;
        let Some(router) = router else {
            log::debug!("ignoring {command:?}: no router");
            return;
        };
        match command {
            Command::Fragment(fragment) => {
                router.handle_fragment(&fragment, host);
            }
            Command::Navigate(route) => {
                router.navigate(route, host);
            }
            Command::NavigateFragment(fragment) => {
                router.navigate_fragment(&fragment, host);
            }
            Command::OpenLocation(id) => {
                router.open_location(id, host);
            }
            Command::CameraMoved(camera) => {
                router.camera_moved(camera);
            }
            Command::Located(outcome) => {
                router.locate_resolved(outcome, host);
            }
        }
    }

    pub fn state_json(&self) -> Option<String> {
        let router = self.router.as_ref()?;
        serde_json::to_string(router.state()).ok()
    }
}
