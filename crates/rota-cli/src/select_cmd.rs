use anyhow::Result;
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::warn;

use rota_core::Selection;
use rota_core::types::OutputFormat;
use rota_scheduler::{SelectionReport, SelectionRequest, run_selection};

use crate::cli::SourceArgs;
use crate::sources::ResolvedSources;

/// Printed instead of an agent when every roster member is excluded.
pub(crate) const ALL_CLAIMED_MESSAGE: &str = "All roster tasks currently claimed by other agents";

/// Handle `rota select`.
pub(crate) fn handle_select(
    source: SourceArgs,
    exclusions: Option<String>,
    recent_window: bool,
    format: OutputFormat,
) -> Result<()> {
    let sources = ResolvedSources::resolve(&source)?;
    let config = sources.load_config();
    let loaded = sources.load_roster(&config)?;
    let exclusions_path = exclusions.map(|p| sources.project_root.join(p));
    let payload = read_payload(exclusions_path.as_deref());

    let report = run_selection(SelectionRequest {
        roster: &loaded.roster,
        fallback: config.first_agent(sources.cadence),
        log_dir: sources.log_dir.clone(),
        payload: payload.as_deref(),
        paused: config.paused_agents(sources.cadence),
        recent_window_end: recent_window.then(chrono::Utc::now),
    });

    println!("{}", render_report(&report, &format)?);
    Ok(())
}

pub(crate) fn render_report(report: &SelectionReport, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Text => match &report.selection {
            Selection::Selected(agent) => agent.to_string(),
            Selection::Exhausted => ALL_CLAIMED_MESSAGE.to_string(),
        },
    })
}

/// Raw exclusion payload from `--exclusions` or piped stdin.
/// Read failures degrade to "no payload".
fn read_payload(path: Option<&Path>) -> Option<String> {
    if let Some(path) = path {
        return match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Failed to read exclusion payload {}: {e}", path.display());
                None
            }
        };
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buf = String::new();
    match stdin.lock().read_to_string(&mut buf) {
        Ok(_) => Some(buf),
        Err(e) => {
            warn!("Failed to read exclusion payload from stdin: {e}");
            None
        }
    }
}
