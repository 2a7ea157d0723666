// Service configuration - file plus environment sources

use crate::domain::geo::Bbox;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RadarConfig {
    #[serde(default)]
    pub opensky: OpenSkySettings,
    #[serde(default)]
    pub bbox: BboxPresets,
    pub vesselfinder: Option<VesselFinderSettings>,
    pub ais: Option<AisSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenSkySettings {
    #[serde(default = "default_opensky_base_url")]
    pub base_url: String,
}

impl Default for OpenSkySettings {
    fn default() -> Self {
        Self {
            base_url: default_opensky_base_url(),
        }
    }
}

/// Named query boxes selectable from the API (`?view=`).
#[derive(Debug, Deserialize, Clone)]
pub struct BboxPresets {
    #[serde(default = "default_yvr_bbox")]
    pub yvr: Bbox,
    #[serde(default = "default_wide_bbox")]
    pub wide: Bbox,
}

impl Default for BboxPresets {
    fn default() -> Self {
        Self {
            yvr: default_yvr_bbox(),
            wide: default_wide_bbox(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VesselFinderSettings {
    #[serde(default = "default_vesselfinder_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_vessel_bbox")]
    pub bbox: Bbox,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AisSettings {
    #[serde(default = "default_ais_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_ais_bounding_box")]
    pub bounding_box: Vec<[f64; 2]>,
}

fn default_opensky_base_url() -> String {
    "https://opensky-network.org/api".to_string()
}

fn default_vesselfinder_base_url() -> String {
    "https://api.vesselfinder.com".to_string()
}

fn default_ais_endpoint() -> String {
    "wss://stream.aisstream.io/v0/stream".to_string()
}

fn default_yvr_bbox() -> Bbox {
    Bbox::new(47.0, -134.0, 55.0, -118.0)
}

fn default_wide_bbox() -> Bbox {
    Bbox::new(30.0, -150.0, 60.0, -100.0)
}

pub fn default_vessel_bbox() -> Bbox {
    Bbox::new(47.0, -125.0, 50.0, -122.0)
}

/// AIS subscribe boxes are lon/lat corner pairs, unlike the query bboxes.
fn default_ais_bounding_box() -> Vec<[f64; 2]> {
    vec![[-125.0, 47.0], [-122.0, 50.0]]
}

/// Load `config/radar.toml` if present, then overlay `RADAR__*` environment
/// variables so credentials can come from the hosting environment.
pub fn load_radar_config() -> anyhow::Result<RadarConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/radar").required(false))
        .add_source(
            config::Environment::with_prefix("RADAR")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
