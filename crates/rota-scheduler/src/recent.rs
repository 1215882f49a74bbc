//! Recent-run guard: agents that already completed (or failed) a run within
//! the cadence window are treated as excluded.
//!
//! Covers the case where a date-scoped lock has rolled over at midnight but
//! the agent ran only a few hours ago. Only canonical log names count:
//! `<YYYY-MM-DDTHH-MM-SSZ>__<agent>__<completed|failed>.md`.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use regex::Regex;
use rota_core::{AgentId, Cadence, ExclusionSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::log_scan::{LogRecord, collect_log_records};

static CANONICAL_LOG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}Z)__([^_]+)__(completed|failed)\.md$")
        .unwrap()
});

static CREATED_AT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^created_at:[ \t]*(.*)$").unwrap());

/// Agent and filename timestamp of a canonical log name.
pub fn parse_canonical_name(file_name: &str) -> Option<(AgentId, DateTime<Utc>)> {
    let caps = CANONICAL_LOG_RE.captures(file_name)?;
    let stamp = NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%dT%H-%M-%SZ").ok()?;
    let agent = AgentId::parse(caps.get(2)?.as_str())?;
    Some((agent, stamp.and_utc()))
}

/// `created_at` from the record body, if present and RFC 3339.
pub fn parse_created_at(body: &str) -> Option<DateTime<Utc>> {
    let caps = CREATED_AT_RE.captures(body)?;
    let value = caps.get(1)?.as_str().trim().trim_matches(['"', '\'']);
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// When a canonical record ran: frontmatter `created_at` beats the filename.
fn effective_run_time(record: &LogRecord, name_stamp: DateTime<Utc>) -> DateTime<Utc> {
    record
        .read_body()
        .as_deref()
        .and_then(parse_created_at)
        .unwrap_or(name_stamp)
}

/// Agents with a canonical run log inside `cadence`'s window ending at `now`.
pub fn recently_run_agents(log_dir: &Path, cadence: Cadence, now: DateTime<Utc>) -> ExclusionSet {
    let cutoff = now - Duration::hours(cadence.recent_window_hours());
    let mut recent = ExclusionSet::new();

    for record in collect_log_records(log_dir) {
        let Some((agent, name_stamp)) = parse_canonical_name(record.file_name()) else {
            continue;
        };
        let ran_at = effective_run_time(&record, name_stamp);
        if ran_at >= cutoff {
            debug!(agent = %agent, ran_at = %ran_at, "Agent ran within window");
            recent.insert(agent);
        }
    }
    recent
}
