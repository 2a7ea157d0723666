// OpenSky state-vector client - bounded retries and a short-lived bbox cache

use crate::application::state_feed::{FeedError, StateVectorFeed};
use crate::domain::aircraft::Observation;
use crate::domain::geo::Bbox;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_secs(2);
const CACHE_TTL: Duration = Duration::from_secs(15);

/// Positional fields a state row must carry to be accepted.
const MIN_STATE_FIELDS: usize = 12;

pub struct OpenSkyClient {
    client: reqwest::Client,
    base_url: String,
    cache: BboxCache,
}

impl OpenSkyClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: BboxCache::new(CACHE_TTL),
        }
    }

    async fn fetch_once(&self, bbox: &Bbox) -> Result<Vec<Observation>, FeedError> {
        let url = format!("{}/states/all", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lamin", bbox.lat_min),
                ("lomin", bbox.lon_min),
                ("lamax", bbox.lat_max),
                ("lomax", bbox.lon_max),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_states(&body)
    }
}

#[async_trait]
impl StateVectorFeed for OpenSkyClient {
    async fn fetch(&self, bbox: Bbox, retries: u32) -> Result<Vec<Observation>, FeedError> {
        if let Some(rows) = self.cache.get(&bbox) {
            return Ok(rows);
        }

        for attempt in 1..=retries {
            match self.fetch_once(&bbox).await {
                Ok(rows) => {
                    self.cache.put(&bbox, rows.clone());
                    return Ok(rows);
                }
                Err(e) => {
                    tracing::warn!(attempt, retries, error = %e, "state vector fetch attempt failed");
                    if attempt < retries {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }

        Err(FeedError::Exhausted { attempts: retries })
    }
}

/// Decode the `{states: [...]}` payload. A missing or null `states` key is an
/// empty table; any other shape is a schema error. Rows shorter than
/// `MIN_STATE_FIELDS` are dropped without comment.
fn parse_states(body: &Value) -> Result<Vec<Observation>, FeedError> {
    if !body.is_object() {
        return Err(FeedError::UnexpectedSchema(
            "response is not a JSON object".to_string(),
        ));
    }

    match body.get("states") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rows)) => Ok(rows.iter().filter_map(parse_state_row).collect()),
        Some(other) => Err(FeedError::UnexpectedSchema(format!(
            "states is not an array (got {})",
            value_kind(other)
        ))),
    }
}

/// Decode one positional state array into the named-field Observation. The
/// fixed field order is: id, callsign, origin, time_pos, last_contact, lon,
/// lat, baro_alt, on_ground, velocity, track, vertical_rate.
fn parse_state_row(row: &Value) -> Option<Observation> {
    let fields = row.as_array()?;
    if fields.len() < MIN_STATE_FIELDS {
        return None;
    }

    Some(Observation {
        icao24: fields[0].as_str()?.to_string(),
        callsign: fields[1].as_str().map(|s| s.trim_end().to_string()),
        origin_country: fields[2].as_str().unwrap_or_default().to_string(),
        time_position: fields[3].as_i64(),
        last_contact: fields[4].as_i64(),
        longitude: fields[5].as_f64(),
        latitude: fields[6].as_f64(),
        baro_altitude_ft: fields[7].as_f64(),
        on_ground: fields[8].as_bool().unwrap_or(false),
        velocity_mps: fields[9].as_f64(),
        track_deg: fields[10].as_f64(),
        vertical_rate_fpm: fields[11].as_f64(),
    })
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct CacheEntry {
    fetched_at: Instant,
    rows: Vec<Observation>,
}

/// Time-boxed memoization of fetch results keyed by bbox. Entries only leave
/// the map by being overwritten after expiry.
struct BboxCache {
    ttl: Duration,
    entries: Mutex<HashMap<[u64; 4], CacheEntry>>,
}

impl BboxCache {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, bbox: &Bbox) -> Option<Vec<Observation>> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(&bbox.key())?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.rows.clone())
        } else {
            None
        }
    }

    fn put(&self, bbox: &Bbox, rows: Vec<Observation>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                bbox.key(),
                CacheEntry {
                    fetched_at: Instant::now(),
                    rows,
                },
            );
        }
    }
}
