use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Map center and zoom level.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCamera {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapCamera {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

/// Initial view of the map before the user has moved it (Porto).
pub const DEFAULT_CAMERA: MapCamera = MapCamera::new(LatLng::new(41.149819, -8.628316), 13.0);

/// Where the map goes when geolocation is unavailable (London).
pub const FALLBACK_CAMERA: MapCamera = MapCamera::new(LatLng::new(51.505, -0.09), 13.0);
