use clap::{Args, Parser, Subcommand};
use rota_core::types::{Cadence, OutputFormat};

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Agent Rota: stateless round-robin agent selection from run logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the next agent to run, or the all-claimed sentinel
    Select {
        #[command(flatten)]
        source: SourceArgs,

        /// Exclusion payload file (JSON); reads stdin when omitted and piped
        #[arg(long)]
        exclusions: Option<String>,

        /// Also exclude agents that already ran within the cadence window
        #[arg(long)]
        recent_window: bool,
    },

    /// Print the agent recorded by the most recent run log
    Previous {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the resolved roster in rotation order
    Roster {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where to find the roster, scheduler config and run logs.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Roster cadence
    #[arg(long, value_enum, default_value = "daily")]
    pub cadence: Cadence,

    /// Project root (defaults to CWD)
    #[arg(long)]
    pub root: Option<String>,

    /// Roster file (JSON or TOML); overrides the default lookup
    #[arg(long)]
    pub roster: Option<String>,

    /// Scheduler config holding the cold-start agent (default: torch-config.json)
    #[arg(long)]
    pub config: Option<String>,

    /// Run-log directory (default: task-logs/<cadence>)
    #[arg(long)]
    pub log_dir: Option<String>,
}
