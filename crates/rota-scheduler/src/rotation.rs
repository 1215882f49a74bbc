//! Round-robin agent rotation over a cadence roster.
//!
//! No state is kept between calls: the caller supplies the previous agent
//! (recovered from run logs), so identical inputs always give identical
//! selections.

use rota_core::{AgentId, ExclusionSet, Roster, Selection};
use serde::Serialize;
use tracing::debug;

/// Why the scan started where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartReason {
    /// Previous agent is in the roster; start right after it.
    AfterPrevious,
    /// No usable previous agent; start at the configured first agent.
    ColdStartFallback,
    /// No usable previous agent and no usable fallback.
    RosterHead,
}

/// Index at which the selection scan begins.
///
/// `previous` and `fallback` that are not roster members are ignored.
pub fn start_index(
    roster: &Roster,
    previous: Option<&str>,
    fallback: Option<&str>,
) -> (usize, StartReason) {
    if let Some(idx) = previous.and_then(|p| roster.position(p)) {
        return ((idx + 1) % roster.len(), StartReason::AfterPrevious);
    }
    if let Some(idx) = fallback.and_then(|f| roster.position(f)) {
        return (idx, StartReason::ColdStartFallback);
    }
    (0, StartReason::RosterHead)
}

/// Select the next non-excluded agent, scanning at most one full cycle
/// from [`start_index`].
///
/// Returns [`Selection::Exhausted`] when every roster member is excluded.
pub fn select_next_agent(
    roster: &Roster,
    previous: Option<&str>,
    fallback: Option<&str>,
    excluded: &ExclusionSet,
) -> Selection {
    let (start, reason) = start_index(roster, previous, fallback);
    scan_from(roster, start, reason, excluded)
}

pub(crate) fn scan_from(
    roster: &Roster,
    start: usize,
    reason: StartReason,
    excluded: &ExclusionSet,
) -> Selection {
    let total = roster.len();
    for offset in 0..total {
        let candidate_idx = (start + offset) % total;
        let candidate: &AgentId = roster.at_wrapped(candidate_idx);
        if excluded.contains(candidate.as_str()) {
            continue;
        }
        debug!(
            cadence = %roster.cadence(),
            agent = %candidate,
            index = candidate_idx,
            start,
            reason = ?reason,
            "Round-robin selected agent"
        );
        return Selection::Selected(candidate.clone());
    }

    debug!(cadence = %roster.cadence(), excluded = excluded.len(), "All roster agents excluded");
    Selection::Exhausted
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod tests;
