use anyhow::Result;

use rota_core::types::OutputFormat;
use rota_core::{AgentId, Roster};
use rota_scheduler::{AttributionChain, previous_agent};

use crate::cli::SourceArgs;
use crate::sources::ResolvedSources;

/// Printed by `rota previous` when no run log names an agent.
const UNKNOWN_AGENT: &str = "unknown";

/// Handle `rota roster`.
pub(crate) fn handle_roster(source: SourceArgs, format: OutputFormat) -> Result<()> {
    let sources = ResolvedSources::resolve(&source)?;
    let loaded = sources.load_roster(&sources.load_config())?;
    print!("{}", render_roster(&loaded.roster, &format)?);
    Ok(())
}

/// Handle `rota previous`.
pub(crate) fn handle_previous(source: SourceArgs, format: OutputFormat) -> Result<()> {
    let sources = ResolvedSources::resolve(&source)?;
    let previous = previous_agent(&sources.log_dir, &AttributionChain::default());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "cadence": sources.cadence,
                "previous_agent": previous,
                "log_dir": sources.log_dir.display().to_string(),
            });
            println!("{output}");
        }
        OutputFormat::Text => {
            println!(
                "{}",
                previous.as_ref().map(AgentId::as_str).unwrap_or(UNKNOWN_AGENT)
            );
        }
    }
    Ok(())
}

fn render_roster(roster: &Roster, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string(roster.agents())?),
        OutputFormat::Text => roster
            .agents()
            .iter()
            .map(|a| format!("{a}\n"))
            .collect(),
    })
}
