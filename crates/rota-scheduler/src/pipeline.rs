//! One selection call: exclusion payload and paused agents → previous agent → rotation.
//!
//! All inputs are read fresh; nothing is persisted.

use chrono::{DateTime, Utc};
use rota_core::{AgentId, ExclusionSet, Roster, Selection};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::attribution::AttributionChain;
use crate::exclusion::{PayloadStatus, build_exclusion_set};
use crate::log_scan::previous_agent;
use crate::recent::recently_run_agents;
use crate::rotation::{StartReason, scan_from, start_index};

pub struct SelectionRequest<'a> {
    pub roster: &'a Roster,
    /// Cold-start agent for the roster's cadence.
    pub fallback: Option<AgentId>,
    pub log_dir: PathBuf,
    /// Raw exclusion payload, if the caller supplied one.
    pub payload: Option<&'a str>,
    /// Agents paused in configuration for this cadence.
    pub paused: Vec<AgentId>,
    /// When set, agents with a canonical run log newer than the cadence
    /// window ending at this instant are excluded too.
    pub recent_window_end: Option<DateTime<Utc>>,
}

/// Everything that went into a decision, for output and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub cadence: rota_core::Cadence,
    #[serde(flatten)]
    pub selection: Selection,
    pub previous_agent: Option<AgentId>,
    pub start_index: usize,
    pub start_reason: StartReason,
    pub excluded: ExclusionSet,
    #[serde(skip)]
    pub payload_status: PayloadStatus,
}

pub fn run_selection(request: SelectionRequest<'_>) -> SelectionReport {
    let roster = request.roster;
    let cadence = roster.cadence();

    let (mut excluded, payload_status) = build_exclusion_set(request.payload);
    excluded.extend(request.paused);

    if let Some(now) = request.recent_window_end {
        let recent = recently_run_agents(&request.log_dir, cadence, now);
        let newly: Vec<&AgentId> = recent
            .iter()
            .filter(|a| !excluded.contains(a.as_str()))
            .collect();
        if !newly.is_empty() {
            debug!(cadence = %cadence, agents = ?newly, "Recent-run guard excluded agents");
        }
        excluded.extend(recent.iter().cloned());
    }

    let previous = previous_agent(&request.log_dir, &AttributionChain::default());
    let (start, start_reason) = start_index(
        roster,
        previous.as_ref().map(AgentId::as_str),
        request.fallback.as_ref().map(AgentId::as_str),
    );
    let selection = scan_from(roster, start, start_reason, &excluded);

    SelectionReport {
        cadence,
        selection,
        previous_agent: previous,
        start_index: start,
        start_reason,
        excluded,
        payload_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rota_core::Cadence;
    use std::fs;
    use tempfile::tempdir;

    fn roster(names: &[&str]) -> Roster {
        Roster::from_names(Cadence::Daily, names.iter().copied()).unwrap()
    }

    fn agent(name: &str) -> AgentId {
        AgentId::parse(name).unwrap()
    }

    #[test]
    fn test_resumes_after_logged_agent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2026-02-20T07-00-00Z__b__completed.md"), "agent: b\n").unwrap();
        let r = roster(&["a", "b", "c", "d"]);

        let report = run_selection(SelectionRequest {
            roster: &r,
            fallback: None,
            log_dir: dir.path().to_path_buf(),
            payload: Some(r#"{"locked": ["c"]}"#),
            paused: Vec::new(),
            recent_window_end: None,
        });

        assert_eq!(report.selection, Selection::Selected(agent("d")));
        assert_eq!(report.previous_agent, Some(agent("b")));
        assert_eq!(report.start_index, 2);
        assert_eq!(report.start_reason, StartReason::AfterPrevious);
        assert_eq!(report.payload_status, PayloadStatus::Parsed);
    }

    #[test]
    fn test_cold_start_with_empty_store() {
        let dir = tempdir().unwrap();
        let r = roster(&["a", "b", "c"]);

        let report = run_selection(SelectionRequest {
            roster: &r,
            fallback: Some(agent("b")),
            log_dir: dir.path().join("missing"),
            payload: None,
            paused: Vec::new(),
            recent_window_end: None,
        });

        assert_eq!(report.selection, Selection::Selected(agent("b")));
        assert_eq!(report.previous_agent, None);
        assert_eq!(report.start_reason, StartReason::ColdStartFallback);
        assert_eq!(report.payload_status, PayloadStatus::Absent);
    }

    #[test]
    fn test_malformed_payload_behaves_like_empty() {
        let dir = tempdir().unwrap();
        let r = roster(&["a", "b"]);
        let base = |payload| {
            run_selection(SelectionRequest {
                roster: &r,
                fallback: None,
                log_dir: dir.path().to_path_buf(),
                payload,
                paused: Vec::new(),
                recent_window_end: None,
            })
        };

        let garbage = base(Some("npm ERR! {\"locked\": [\"a\""));
        let empty = base(None);
        assert_eq!(garbage.selection, empty.selection);
        assert!(garbage.excluded.is_empty());
        assert!(matches!(garbage.payload_status, PayloadStatus::Malformed(_)));
    }

    #[test]
    fn test_configured_paused_agents_merge_with_payload() {
        let dir = tempdir().unwrap();
        let r = roster(&["a", "b", "c"]);
        let report = run_selection(SelectionRequest {
            roster: &r,
            fallback: None,
            log_dir: dir.path().to_path_buf(),
            payload: Some(r#"{"locked": ["a"]}"#),
            paused: vec![agent("b")],
            recent_window_end: None,
        });

        assert!(report.excluded.contains("a"));
        assert!(report.excluded.contains("b"));
        assert_eq!(report.selection, Selection::Selected(agent("c")));
    }

    #[test]
    fn test_recent_guard_adds_exclusions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2026-02-21T06-00-00Z__a__completed.md"), "").unwrap();
        let r = roster(&["a", "b"]);
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 8, 0, 0).unwrap();

        let guarded = run_selection(SelectionRequest {
            roster: &r,
            fallback: None,
            log_dir: dir.path().to_path_buf(),
            payload: None,
            paused: Vec::new(),
            recent_window_end: Some(now),
        });
        assert!(guarded.excluded.contains("a"));
        assert_eq!(guarded.selection, Selection::Selected(agent("b")));

        let saturated = run_selection(SelectionRequest {
            roster: &r,
            fallback: None,
            log_dir: dir.path().to_path_buf(),
            payload: Some(r#"{"completed": ["b"]}"#),
            paused: Vec::new(),
            recent_window_end: Some(now),
        });
        assert_eq!(saturated.selection, Selection::Exhausted);
    }

    #[test]
    fn test_report_json_shape() {
        let dir = tempdir().unwrap();
        let r = roster(&["a", "b"]);
        let report = run_selection(SelectionRequest {
            roster: &r,
            fallback: None,
            log_dir: dir.path().to_path_buf(),
            payload: Some(r#"{"paused": ["a"]}"#),
            paused: Vec::new(),
            recent_window_end: None,
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["cadence"], "daily");
        assert_eq!(json["status"], "selected");
        assert_eq!(json["agent"], "b");
        assert_eq!(json["previous_agent"], serde_json::Value::Null);
        assert_eq!(json["start_index"], 0);
        assert_eq!(json["start_reason"], "roster-head");
        assert_eq!(json["excluded"], serde_json::json!(["a"]));
    }
}
