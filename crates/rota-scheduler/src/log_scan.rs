//! Log Scanner: finds the most recently modified run log in a log store.
//!
//! The store is read-only from our side. An unreadable or missing store is
//! indistinguishable from an empty one.

use rota_core::AgentId;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

use crate::attribution::AttributionChain;

/// One run log written by an external task runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl LogRecord {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Record body, or `None` if it cannot be read as UTF-8 text.
    pub fn read_body(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(path = %self.path.display(), "Unreadable log record: {e}");
                None
            }
        }
    }
}

/// Enumerate `*.md` records in `log_dir`. Hidden files and entries whose
/// metadata cannot be read are skipped.
pub fn collect_log_records(log_dir: &Path) -> Vec<LogRecord> {
    let pattern = format!(
        "{}/*.md",
        glob::Pattern::escape(&log_dir.to_string_lossy())
    );
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let paths = match glob::glob_with(&pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            debug!(pattern = %pattern, "Invalid log glob: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                debug!("Skipping log entry: {e}");
                continue;
            }
        };
        let Ok(metadata) = std::fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        records.push(LogRecord { path, modified });
    }
    records
}

/// Pick the newest record. Equal mtimes resolve to the lexically greatest
/// file name so repeated scans agree.
pub fn latest_record(records: Vec<LogRecord>) -> Option<LogRecord> {
    records
        .into_iter()
        .max_by(|a, b| (a.modified, a.file_name()).cmp(&(b.modified, b.file_name())))
}

pub fn find_latest_record(log_dir: &Path) -> Option<LogRecord> {
    latest_record(collect_log_records(log_dir))
}

/// Agent attributed to the newest record in `log_dir`, or `None` for unknown.
pub fn previous_agent(log_dir: &Path, chain: &AttributionChain) -> Option<AgentId> {
    let Some(record) = find_latest_record(log_dir) else {
        debug!(log_dir = %log_dir.display(), "No previous run log");
        return None;
    };
    let agent = chain.attribute(&record);
    debug!(
        record = %record.file_name(),
        agent = agent.as_ref().map(AgentId::as_str).unwrap_or("unknown"),
        "Latest run log"
    );
    agent
}

#[cfg(test)]
#[path = "log_scan_tests.rs"]
mod tests;
