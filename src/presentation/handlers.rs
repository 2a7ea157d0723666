// HTTP request handlers
use crate::domain::geo::Bbox;
use crate::domain::snapshot::RadarSnapshot;
use crate::domain::vessel::Vessel;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct AircraftQuery {
    pub view: Option<String>,
    pub cargo_only: Option<bool>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Run one poll cycle and return the classified table plus KPI summary.
pub async fn aircraft_snapshot(
    Query(query): Query<AircraftQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<RadarSnapshot> {
    let bbox = select_bbox(&state, query.view.as_deref());
    let cargo_only = query.cargo_only.unwrap_or(false);

    Json(state.radar_service.snapshot(bbox, cargo_only).await)
}

/// List vessel positions. Degrades to an empty list when VesselFinder is
/// unconfigured or the fetch fails.
pub async fn list_vessels(State(state): State<Arc<AppState>>) -> Json<Vec<Vessel>> {
    let Some(client) = &state.vessel_client else {
        tracing::debug!("vessel list requested but VesselFinder is not configured");
        return Json(Vec::new());
    };

    match client.fetch_vessels(state.vessel_bbox).await {
        Ok(vessels) => Json(vessels),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vessel data");
            Json(Vec::new())
        }
    }
}

fn select_bbox(state: &AppState, view: Option<&str>) -> Bbox {
    match view {
        Some("wide") => state.bbox_presets.wide,
        _ => state.bbox_presets.yvr,
    }
}
