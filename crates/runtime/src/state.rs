use foundation::{LocationId, MapCamera};
use serde::Serialize;

/// The view currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum View {
    Map,
    Ar(LocationId),
    NotFound,
}

/// Session view state: one instance, owned by the router.
///
/// `camera` survives while the map is unmounted so returning from AR
/// reopens the map where the user left it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    camera: MapCamera,
    active: Option<View>,
}

impl ViewState {
    pub fn new(camera: MapCamera) -> Self {
        Self {
            camera,
            active: None,
        }
    }

    pub fn camera(&self) -> MapCamera {
        self.camera
    }

    /// `None` until the first view has been rendered.
    pub fn active(&self) -> Option<&View> {
        self.active.as_ref()
    }

    pub fn is_map_active(&self) -> bool {
        self.active == Some(View::Map)
    }

    pub(crate) fn set_camera(&mut self, camera: MapCamera) {
        self.camera = camera;
    }

    pub(crate) fn set_active(&mut self, view: View) {
        self.active = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::{View, ViewState};
    use foundation::{LocationId, DEFAULT_CAMERA};

    #[test]
    fn starts_without_an_active_view() {
        let s = ViewState::new(DEFAULT_CAMERA);
        assert_eq!(s.active(), None);
        assert!(!s.is_map_active());
        assert_eq!(s.camera(), DEFAULT_CAMERA);
    }

    #[test]
    fn serializes_for_debug_inspection() {
        let mut s = ViewState::new(DEFAULT_CAMERA);
        s.set_active(View::Ar(LocationId::new("4")));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["active"]["view"], "ar");
        assert_eq!(json["active"]["id"], "4");
        assert_eq!(json["camera"]["zoom"], 13.0);
    }
}
