//! Exclusion Set Builder: turns a lock-status payload into the set of agents
//! that must be skipped.
//!
//! The payload usually arrives on stdin from a lock-check command and may be
//! preceded by package-manager chatter, so parsing starts at the first `{`
//! that opens a JSON object. Any parse failure yields an empty set; it never blocks
//! scheduling.

use rota_core::{AgentId, ExclusionSet};
use serde_json::Value;
use tracing::{debug, warn};

/// Lock-status categories reported by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPayload {
    pub excluded: Vec<AgentId>,
    pub locked: Vec<AgentId>,
    pub completed: Vec<AgentId>,
    pub paused: Vec<AgentId>,
}

/// How the payload was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadStatus {
    /// No payload or only whitespace.
    Absent,
    Parsed,
    /// Unusable payload; the message explains why.
    Malformed(String),
}

impl ExclusionPayload {
    /// Parse raw payload text. Each `{` is tried in turn until one starts a
    /// JSON object, so braces inside the noise prefix are harmless. Trailing
    /// content after the object is ignored.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut first_error = None;
        for (start, _) in input.match_indices('{') {
            match serde_json::Deserializer::from_str(&input[start..])
                .into_iter::<Value>()
                .next()
            {
                Some(Ok(value)) if value.is_object() => return Ok(Self::from_value(&value)),
                Some(Ok(_)) | None => {}
                Some(Err(e)) => {
                    first_error.get_or_insert_with(|| e.to_string());
                }
            }
        }
        Err(first_error.unwrap_or_else(|| "no JSON object found".to_string()))
    }

    /// Extract the four categories. Missing fields, non-array fields and
    /// non-string items are ignored.
    pub fn from_value(value: &Value) -> Self {
        let list = |key: &str| -> Vec<AgentId> {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter_map(AgentId::parse)
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            excluded: list("excluded"),
            locked: list("locked"),
            completed: list("completed"),
            paused: list("paused"),
        }
    }

    /// Union of all four categories.
    pub fn into_set(self) -> ExclusionSet {
        self.excluded
            .into_iter()
            .chain(self.locked)
            .chain(self.completed)
            .chain(self.paused)
            .collect()
    }
}

/// Build the exclusion set from an optional raw payload.
pub fn build_exclusion_set(input: Option<&str>) -> (ExclusionSet, PayloadStatus) {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        debug!("No exclusion payload supplied");
        return (ExclusionSet::new(), PayloadStatus::Absent);
    };

    match ExclusionPayload::parse(raw) {
        Ok(payload) => {
            let set = payload.into_set();
            debug!(count = set.len(), "Parsed exclusion payload");
            (set, PayloadStatus::Parsed)
        }
        Err(message) => {
            warn!("Failed to parse input JSON: {message}");
            (ExclusionSet::new(), PayloadStatus::Malformed(message))
        }
    }
}
