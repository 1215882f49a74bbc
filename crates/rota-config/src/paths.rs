use rota_core::Cadence;
use std::path::{Path, PathBuf};

/// XDG app name used for the user-level config directory.
pub const APP_NAME: &str = "agent-rota";
pub const ROSTER_FILE_NAME: &str = "roster.json";
pub const CONFIG_FILE_NAME: &str = "torch-config.json";
/// Directory (relative to the project root) holding one log store per cadence.
pub const TASK_LOG_DIR: &str = "task-logs";

/// User-level config directory, e.g. `~/.config/agent-rota`.
pub fn user_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Roster locations in lookup order: project-managed overrides first, then
/// the bundled prompt roster, then the user config dir.
pub fn roster_candidates(project_root: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        project_root.join("torch").join(ROSTER_FILE_NAME),
        project_root.join(ROSTER_FILE_NAME),
        project_root.join("src").join("prompts").join(ROSTER_FILE_NAME),
    ];
    if let Some(dir) = user_dir {
        candidates.push(dir.join(ROSTER_FILE_NAME));
    }
    candidates
}

pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Log store for a cadence: `<root>/task-logs/<cadence>`.
pub fn default_log_dir(project_root: &Path, cadence: Cadence) -> PathBuf {
    project_root.join(TASK_LOG_DIR).join(cadence.as_str())
}
