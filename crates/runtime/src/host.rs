use catalog::{LocationCatalog, LocationRecord};
use foundation::MapCamera;

use crate::locate::LocateEffect;

/// Rendering surface driven by the [`Router`](crate::Router).
///
/// The browser implementation owns the DOM and the map widget; tests use a
/// recording fake. Failures are reported back so the router can log them;
/// they never abort a transition.
pub trait ViewHost {
    type Error: std::fmt::Display;

    /// Replace the page with a fresh map at `camera`, one marker per record.
    ///
    /// Any previously mounted map widget must be disposed first.
    fn show_map(&mut self, camera: MapCamera, catalog: &LocationCatalog) -> Result<(), Self::Error>;

    /// Tear down the live map widget, returning its last camera.
    ///
    /// Returns `None` when no widget is mounted.
    fn unmount_map(&mut self) -> Option<MapCamera>;

    fn show_ar(&mut self, record: &LocationRecord) -> Result<(), Self::Error>;

    fn show_not_found(&mut self) -> Result<(), Self::Error>;

    /// Record `fragment` in the address bar without triggering a `hashchange`.
    fn push_fragment(&mut self, fragment: &str) -> Result<(), Self::Error>;

    fn apply_locate(&mut self, effect: &LocateEffect) -> Result<(), Self::Error>;
}
