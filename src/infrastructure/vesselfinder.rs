// VesselFinder list client - single-shot fetch with tolerant field decode

use crate::application::state_feed::FeedError;
use crate::domain::geo::Bbox;
use crate::domain::vessel::Vessel;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct VesselFinderClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VesselFinderClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// One GET against the vessel list endpoint; no retries. A non-array
    /// response is a schema error the caller degrades to an empty list.
    pub async fn fetch_vessels(&self, bbox: Bbox) -> Result<Vec<Vessel>, FeedError> {
        let url = format!("{}/vesselslist", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .query(&[
                ("latmin", bbox.lat_min),
                ("latmax", bbox.lat_max),
                ("lonmin", bbox.lon_min),
                ("lonmax", bbox.lon_max),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_vessels(&body)
    }
}

fn parse_vessels(body: &Value) -> Result<Vec<Vessel>, FeedError> {
    let Some(items) = body.as_array() else {
        return Err(FeedError::UnexpectedSchema(
            "vessel list response is not an array".to_string(),
        ));
    };
    Ok(items.iter().map(parse_vessel).collect())
}

fn parse_vessel(item: &Value) -> Vessel {
    Vessel {
        mmsi: item.get("MMSI").and_then(Value::as_i64),
        name: item
            .get("NAME")
            .and_then(Value::as_str)
            .map(str::to_string),
        lat: item.get("LAT").and_then(Value::as_f64).unwrap_or(0.0),
        lon: item.get("LON").and_then(Value::as_f64).unwrap_or(0.0),
        speed: item.get("SPEED").and_then(Value::as_f64).unwrap_or(0.0),
        vessel_type: item
            .get("TYPE")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
