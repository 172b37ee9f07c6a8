use foundation::{LatLng, MapCamera, FALLBACK_CAMERA};

pub const TITLE_READY: &str = "Center on Me";
pub const TITLE_UNAVAILABLE: &str = "Location unavailable";

/// Why the device position could not be obtained.
///
/// Codes follow the W3C `GeolocationPositionError` numbering that Leaflet
/// forwards in its `locationerror` event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("location permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location request timed out: {0}")]
    Timeout(String),
    #[error("geolocation failed: {0}")]
    Other(String),
}

impl LocateError {
    pub fn from_code(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => LocateError::PermissionDenied(message),
            2 => LocateError::PositionUnavailable(message),
            3 => LocateError::Timeout(message),
            _ => LocateError::Other(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    Found { position: LatLng, accuracy_m: f64 },
    Failed(LocateError),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocateConfig {
    /// Upper zoom bound when centering on the user.
    pub max_zoom: f64,
    /// Camera used when the position is unavailable.
    pub fallback: MapCamera,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            max_zoom: 14.0,
            fallback: FALLBACK_CAMERA,
        }
    }
}

/// State of the "locate me" button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocateControl {
    pub enabled: bool,
    pub title: &'static str,
}

impl LocateControl {
    pub const READY: LocateControl = LocateControl {
        enabled: true,
        title: TITLE_READY,
    };
    pub const UNAVAILABLE: LocateControl = LocateControl {
        enabled: false,
        title: TITLE_UNAVAILABLE,
    };
}

/// What the map should do once a locate request settles.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateEffect {
    /// Leaflet already centered the map; mark the user and their accuracy radius.
    ShowUser {
        position: LatLng,
        accuracy_m: f64,
        control: LocateControl,
    },
    /// Move to the fallback camera and disable the control.
    FallBack {
        camera: MapCamera,
        control: LocateControl,
        error: LocateError,
    },
}

impl LocateEffect {
    pub fn control(&self) -> LocateControl {
        match self {
            LocateEffect::ShowUser { control, .. } | LocateEffect::FallBack { control, .. } => {
                *control
            }
        }
    }
}

pub fn resolve(outcome: LocateOutcome, config: &LocateConfig) -> LocateEffect {
    match outcome {
        LocateOutcome::Found {
            position,
            accuracy_m,
        } => LocateEffect::ShowUser {
            position,
            // Browsers report NaN or negative accuracy on some emulated sensors.
            accuracy_m: if accuracy_m.is_finite() {
                accuracy_m.max(0.0)
            } else {
                0.0
            },
            control: LocateControl::READY,
        },
        LocateOutcome::Failed(error) => LocateEffect::FallBack {
            camera: config.fallback,
            control: LocateControl::UNAVAILABLE,
            error,
        },
    }
}
