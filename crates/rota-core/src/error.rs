use std::path::PathBuf;

use crate::types::Cadence;

/// Fatal configuration failures. Anything not listed here degrades to a
/// default instead of aborting the selection.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Roster file not found (searched: {})", display_paths(.searched))]
    RosterNotFound { searched: Vec<PathBuf> },

    #[error("Failed to read roster '{}': {source}", .path.display())]
    RosterUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse roster '{}': {message}", .path.display())]
    RosterMalformed { path: PathBuf, message: String },

    #[error("Empty roster for cadence '{cadence}'")]
    EmptyRoster { cadence: Cadence },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "<none>".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
