// Match-history records and their JSON loader.
//
// Match files are hand-maintained or scraped, so every field is optional and
// numeric fields tolerate strings. Nothing here interprets the data; see the
// analysis crate for that.

use crate::ingest::{check_input_file, IngestError, IngestLimits};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Possession assumed when a record does not report one.
pub const DEFAULT_POSSESSION: f64 = 50.0;

/// One played match. `result` is "home-away" from our side, e.g. "3-1".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub opponent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub possession: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub chances: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tactics: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formation: Option<String>,
}

impl MatchRecord {
    /// Result string, empty when absent.
    pub fn result_str(&self) -> &str {
        self.result.as_deref().unwrap_or("")
    }

    pub fn possession_or_default(&self) -> f64 {
        self.possession.unwrap_or(DEFAULT_POSSESSION)
    }

    pub fn chances_or_default(&self) -> u32 {
        self.chances.unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let as_f64 = match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(as_f64
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v.trunc() as u32))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a JSON array of match records.
pub fn parse_matches(text: &str) -> Result<Vec<MatchRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Load match records from a JSON file, enforcing the JSON size ceiling.
pub fn load_matches(path: &Path, limits: &IngestLimits) -> Result<Vec<MatchRecord>, IngestError> {
    let limit = limits.max_json_bytes.min(limits.max_input_bytes);
    check_input_file(path, limit)?;
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let matches = parse_matches(&text).map_err(|e| IngestError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("loaded {} matches from {}", matches.len(), path.display());
    Ok(matches)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
