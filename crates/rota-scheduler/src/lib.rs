//! Scheduler: previous-agent recovery from run logs, exclusion payloads,
//! the recent-run guard and round-robin agent selection.
//!
//! Selection is a decision, not a claim. Callers that act on a selected agent
//! are expected to record it as locked so the next invocation's exclusion
//! payload carries it back in; two racing invocations without that step may
//! pick the same agent.

pub mod attribution;
pub mod exclusion;
pub mod log_scan;
pub mod pipeline;
pub mod recent;
pub mod rotation;

pub use attribution::{AgentAttribution, AttributionChain, FilenameConvention, FrontmatterField};
pub use exclusion::{ExclusionPayload, PayloadStatus, build_exclusion_set};
pub use log_scan::{LogRecord, find_latest_record, previous_agent};
pub use pipeline::{SelectionReport, SelectionRequest, run_selection};
pub use recent::recently_run_agents;
pub use rotation::{StartReason, select_next_agent, start_index};
