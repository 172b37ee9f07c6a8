use catalog::{LoadError, LocationCatalog};
use foundation::{LocationId, MapCamera};

use crate::event_bus::{Cause, EventBus};
use crate::host::ViewHost;
use crate::locate::{self, LocateConfig, LocateEffect, LocateOutcome};
use crate::route::Route;
use crate::state::{View, ViewState};

/// Fragment router and owner of the session's view state.
///
/// Transition discipline:
/// - Leaving the map unmounts the widget and keeps its final camera.
/// - Re-entering the current view re-renders it; nothing else changes.
#[derive(Debug)]
pub struct Router {
    catalog: LocationCatalog,
    state: ViewState,
    locate: LocateConfig,
    events: EventBus,
}

impl Router {
    pub fn new(catalog: LocationCatalog, initial_camera: MapCamera, locate: LocateConfig) -> Self {
        Self {
            catalog,
            state: ViewState::new(initial_camera),
            locate,
            events: EventBus::new(),
        }
    }

    /// Starts routing once the startup fetch settled.
    ///
    /// A failed load shows the not-found view and yields no router, so no
    /// navigation is wired up afterwards.
    pub fn boot<H: ViewHost>(
        loaded: Result<LocationCatalog, LoadError>,
        initial_camera: MapCamera,
        locate: LocateConfig,
        fragment: &str,
        host: &mut H,
    ) -> Option<Self> {
        match loaded {
            Ok(catalog) => {
                let mut router = Self::new(catalog, initial_camera, locate);
                router.enter(Route::parse(fragment), Cause::Boot, host);
                Some(router)
            }
            Err(err) => {
                log::error!("failed to load locations: {err}");
                if let Err(e) = host.show_not_found() {
                    log::error!("failed to render not-found view: {e}");
                }
                None
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn resolve(&self, route: &Route) -> View {
        match route {
            Route::Map => View::Map,
            Route::Ar(id) if self.catalog.contains(id) => View::Ar(id.clone()),
            Route::Ar(_) | Route::NotFound => View::NotFound,
        }
    }

    pub fn handle_fragment<H: ViewHost>(&mut self, fragment: &str, host: &mut H) -> View {
        self.enter(Route::parse(fragment), Cause::HashChange, host)
    }

    /// Explicit dispatch: updates the address bar, then renders `route`.
    pub fn navigate<H: ViewHost>(&mut self, route: Route, host: &mut H) -> View {
        if let Some(fragment) = route.fragment() {
            if let Err(e) = host.push_fragment(&fragment) {
                log::warn!("failed to record fragment {fragment}: {e}");
            }
        }
        self.enter(route, Cause::Dispatch, host)
    }

    /// Explicit dispatch to a fragment as typed by the caller.
    ///
    /// The fragment is recorded verbatim, so a not-found target stays in the
    /// address bar and a later `#` link is a real hash change.
    pub fn navigate_fragment<H: ViewHost>(&mut self, fragment: &str, host: &mut H) -> View {
        let route = Route::parse(fragment);
        let recorded = match route.fragment() {
            Some(canonical) => canonical,
            None if fragment.starts_with('#') => fragment.to_string(),
            None => format!("#{fragment}"),
        };
        if let Err(e) = host.push_fragment(&recorded) {
            log::warn!("failed to record fragment {recorded}: {e}");
        }
        self.enter(route, Cause::Dispatch, host)
    }

    /// Marker activation.
    pub fn open_location<H: ViewHost>(&mut self, id: LocationId, host: &mut H) -> View {
        self.navigate(Route::Ar(id), host)
    }

    /// Camera reported by the live map (`moveend`). Ignored once the map is gone.
    pub fn camera_moved(&mut self, camera: MapCamera) -> bool {
        if !self.state.is_map_active() {
            return false;
        }
        log::debug!(
            "camera moved to [{:.6}, {:.6}] z{}",
            camera.center.lat_deg,
            camera.center.lon_deg,
            camera.zoom
        );
        self.state.set_camera(camera);
        true
    }

    /// Settles a locate request and applies it to the map.
    ///
    /// Outcomes arriving after the map was left are dropped.
    pub fn locate_resolved<H: ViewHost>(
        &mut self,
        outcome: LocateOutcome,
        host: &mut H,
    ) -> Option<LocateEffect> {
        if !self.state.is_map_active() {
            log::debug!("dropping locate outcome, map is not mounted");
            return None;
        }
        let effect = locate::resolve(outcome, &self.locate);
        if let LocateEffect::FallBack { camera, error, .. } = &effect {
            log::warn!("location failed: {error}");
            self.state.set_camera(*camera);
        }
        if let Err(e) = host.apply_locate(&effect) {
            log::error!("failed to apply locate result: {e}");
        }
        Some(effect)
    }

    fn enter<H: ViewHost>(&mut self, route: Route, cause: Cause, host: &mut H) -> View {
        let view = self.resolve(&route);

        if self.state.is_map_active() {
            if let Some(camera) = host.unmount_map() {
                self.state.set_camera(camera);
            }
        }

        let rendered = match &view {
            View::Map => host.show_map(self.state.camera(), &self.catalog),
            View::Ar(id) => match self.catalog.get(id) {
                Some(record) => host.show_ar(record),
                None => host.show_not_found(),
            },
            View::NotFound => host.show_not_found(),
        };
        if let Err(e) = rendered {
            log::error!("failed to render {view:?}: {e}");
        }

        let from = self.state.active().cloned();
        self.state.set_active(view.clone());
        self.events.emit(cause, from, view.clone());
        view
    }
}
