use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod app;
pub mod config;
pub mod dom;
mod host;
pub mod leaflet;
pub mod loader;
mod map_widget;

use app::{App, Command, Dispatcher};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

/// Returns `None` when the app is not running or is mid-update.
fn with_app<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&App) -> R,
{
    APP.try_with(|slot| {
        let slot = slot.borrow();
        let app = slot.as_ref()?;
        let app = app.try_borrow().ok()?;
        Some(f(&*app))
    })
    .ok()
    .flatten()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();

    let (config, config_err) = config::load_from_document();
    console_log::init_with_level(config.log_level()).ok();
    if let Some(err) = config_err {
        log::warn!("{err}; using defaults");
    }

    let document = dom::document()?;
    // Pages without the mount element (test harnesses, embeds) load the module inertly.
    let Some(mount) = dom::mount_element(&document, &config.mount_id)? else {
        log::info!("no #{} element, viewer not started", config.mount_id);
        return Ok(());
    };
    spawn_local(boot(App::create(document, mount, config)));
    Ok(())
}

async fn boot(app: Rc<RefCell<App>>) {
    let url = app.borrow().config().data_url.clone();
    log::info!("loading locations from {url}");
    let loaded = loader::fetch_catalog(&url).await;

    let fragment = dom::current_fragment();
    let routed = app.borrow_mut().boot(loaded, &fragment);
    if routed {
        let dispatcher = app.borrow().dispatcher();
        if let Err(err) = listen_for_hashchange(dispatcher) {
            log::error!("failed to listen for hashchange: {err:?}");
        }
    }

    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

fn listen_for_hashchange(dispatcher: Dispatcher) -> Result<(), JsValue> {
    let on_change = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
        dispatcher.post(Command::Fragment(dom::current_fragment()));
    });
    dom::window()?
        .add_event_listener_with_callback("hashchange", on_change.as_ref().unchecked_ref())?;
    // Page-lifetime listener.
    on_change.forget();
    Ok(())
}

/// Routes to `fragment` as if a link had been followed, recording it in history.
#[wasm_bindgen]
pub fn navigate(fragment: &str) -> Result<(), JsValue> {
    let dispatcher = with_app(App::dispatcher)
        .ok_or_else(|| JsValue::from_str("viewer is not running"))?;
    dispatcher.post(Command::NavigateFragment(fragment.to_string()));
    Ok(())
}

/// Current camera and active view as JSON, or `undefined` before boot.
#[wasm_bindgen]
pub fn view_state_json() -> Option<String> {
    with_app(App::state_json).flatten()
}
