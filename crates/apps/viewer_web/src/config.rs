use std::str::FromStr;

use foundation::{DEFAULT_CAMERA, FALLBACK_CAMERA, MapCamera};
use runtime::LocateConfig;
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` holding a [`ViewerConfig`].
pub const CONFIG_ELEMENT_ID: &str = "armap-config";

const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// What a tap on a map marker does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerClick {
    /// Open the popup; its "Enter AR" button navigates.
    #[default]
    Popup,
    /// Navigate straight to the AR view.
    Navigate,
}

/// Leaflet `L.icon` options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_url: Option<String>,
    pub icon_size: [f64; 2],
    pub icon_anchor: [f64; 2],
    #[serde(default)]
    pub popup_anchor: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_size: Option<[f64; 2]>,
}

impl MarkerIcon {
    /// Red pin from pointhi/leaflet-color-markers (public domain).
    pub fn red() -> Self {
        Self {
            icon_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-red.png"
                .to_string(),
            shadow_url: Some(
                "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png".to_string(),
            ),
            icon_size: [25.0, 41.0],
            icon_anchor: [12.0, 41.0],
            popup_anchor: [1.0, -34.0],
            shadow_size: Some([41.0, 41.0]),
        }
    }
}

/// Either a named preset (`"red"`) or explicit icon options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerIconSpec {
    Preset(String),
    Custom(MarkerIcon),
}

impl MarkerIconSpec {
    /// Unknown presets resolve to `None` (Leaflet's default pin).
    pub fn resolve(&self) -> Option<MarkerIcon> {
        match self {
            MarkerIconSpec::Preset(name) if name == "red" => Some(MarkerIcon::red()),
            MarkerIconSpec::Preset(name) => {
                log::warn!("unknown marker icon preset {name:?}, using default pin");
                None
            }
            MarkerIconSpec::Custom(icon) => Some(icon.clone()),
        }
    }
}

/// Startup configuration. Every field is optional in the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Location list, fetched once with a relative GET.
    pub data_url: String,
    /// Element the views render into.
    pub mount_id: String,
    /// Camera for the first map render.
    pub default_camera: MapCamera,
    /// Camera used when geolocation fails.
    pub fallback_camera: MapCamera,
    pub locate_max_zoom: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    /// Leaflet control corner for the locate button.
    pub locate_position: String,
    pub marker_click: MarkerClick,
    pub marker_icon: Option<MarkerIconSpec>,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: "models.json".to_string(),
            mount_id: "app".to_string(),
            default_camera: DEFAULT_CAMERA,
            fallback_camera: FALLBACK_CAMERA,
            locate_max_zoom: 14.0,
            tile_url: OSM_TILE_URL.to_string(),
            tile_attribution: OSM_ATTRIBUTION.to_string(),
            locate_position: "bottomright".to_string(),
            marker_click: MarkerClick::default(),
            marker_icon: None,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn locate(&self) -> LocateConfig {
        LocateConfig {
            max_zoom: self.locate_max_zoom,
            fallback: self.fallback_camera,
        }
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }

    pub fn marker_icon(&self) -> Option<MarkerIcon> {
        self.marker_icon.as_ref().and_then(MarkerIconSpec::resolve)
    }
}

/// Reads the inline config element, falling back to defaults.
///
/// A malformed document is returned alongside the defaults so the caller can
/// report it once logging is up.
pub fn load_from_document() -> (ViewerConfig, Option<ConfigError>) {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        Some(raw) if !raw.trim().is_empty() => match ViewerConfig::from_json_str(&raw) {
            Ok(config) => (config, None),
            Err(err) => (ViewerConfig::default(), Some(err)),
        },
        _ => (ViewerConfig::default(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.data_url, "models.json");
        assert_eq!(config.default_camera.zoom, 13.0);
        assert_eq!(config.locate().fallback.center, LatLng::new(51.505, -0.09));
    }

    #[test]
    fn partial_documents_override_only_given_fields() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "data_url": "data/places.json",
                "default_camera": { "center": [38.7223, -9.1393], "zoom": 12 },
                "marker_click": "navigate",
                "log_level": "debug"
            }"#,
        )
        .unwrap();
        assert_eq!(config.data_url, "data/places.json");
        assert_eq!(
            config.default_camera,
            MapCamera::new(LatLng::new(38.7223, -9.1393), 12.0)
        );
        assert_eq!(config.marker_click, MarkerClick::Navigate);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.mount_id, "app");
    }

    #[test]
    fn locate_settings_flow_into_locate_config() {
        let config = ViewerConfig::from_json_str(
            r#"{ "locate_max_zoom": 17, "fallback_camera": { "center": [48.8566, 2.3522], "zoom": 10 } }"#,
        )
        .unwrap();
        let locate = config.locate();
        assert_eq!(locate.max_zoom, 17.0);
        assert_eq!(locate.fallback, MapCamera::new(LatLng::new(48.8566, 2.3522), 10.0));
        assert_eq!(ViewerConfig::default().locate().max_zoom, 14.0);
    }

    #[test]
    fn unknown_log_level_means_info() {
        let config = ViewerConfig {
            log_level: "loud".to_string(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn marker_icon_presets_and_custom_icons() {
        let config = ViewerConfig::from_json_str(r#"{ "marker_icon": "red" }"#).unwrap();
        assert_eq!(config.marker_icon(), Some(MarkerIcon::red()));

        let config = ViewerConfig::from_json_str(
            r#"{ "marker_icon": { "icon_url": "pin.png", "icon_size": [32, 32], "icon_anchor": [16, 32] } }"#,
        )
        .unwrap();
        let icon = config.marker_icon().unwrap();
        assert_eq!(icon.icon_url, "pin.png");
        assert_eq!(icon.popup_anchor, [0.0, 0.0]);
        assert_eq!(icon.shadow_url, None);

        let config = ViewerConfig::from_json_str(r#"{ "marker_icon": "purple" }"#).unwrap();
        assert_eq!(config.marker_icon(), None);
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let err = ViewerConfig::from_json_str(r#"{ "locate_max_zoom": "high" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid viewer config"));
    }
}
