// Application state for HTTP handlers
use crate::application::radar_service::RadarService;
use crate::domain::geo::Bbox;
use crate::infrastructure::config::BboxPresets;
use crate::infrastructure::vesselfinder::VesselFinderClient;

pub struct AppState {
    pub radar_service: RadarService,
    pub vessel_client: Option<VesselFinderClient>,
    pub vessel_bbox: Bbox,
    pub bbox_presets: BboxPresets,
}
