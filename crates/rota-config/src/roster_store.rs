//! Roster Store: resolves the ordered agent list for a cadence.
//!
//! Sources in priority order:
//! 1. `ROTA_<CADENCE>_ROSTER` (comma-separated) when non-empty.
//! 2. `nostrLock.<cadence>Roster` in the project config when non-empty.
//! 3. An explicit roster path.
//! 4. The first existing candidate from [`paths::roster_candidates`].
//!
//! Every failure here is fatal: without a roster there is nothing to schedule.

use rota_core::{AppError, Cadence, Roster};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::format::ConfigFormat;
use crate::paths;
use crate::scheduler::SchedulerConfig;

/// On-disk roster shape: cadence name -> ordered agent ids.
#[derive(Debug, Default, Deserialize)]
struct RosterFile {
    #[serde(default)]
    daily: Vec<String>,
    #[serde(default)]
    weekly: Vec<String>,
}

impl RosterFile {
    fn names_for(&self, cadence: Cadence) -> &[String] {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Weekly => &self.weekly,
        }
    }
}

/// Where the roster came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    Env(&'static str),
    Config,
    File(PathBuf),
}

impl std::fmt::Display for RosterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(key) => write!(f, "env:{key}"),
            Self::Config => f.write_str("config:nostrLock"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub source: RosterSource,
}

/// Environment variable that overrides the roster for `cadence`.
pub fn env_roster_key(cadence: Cadence) -> &'static str {
    match cadence {
        Cadence::Daily => "ROTA_DAILY_ROSTER",
        Cadence::Weekly => "ROTA_WEEKLY_ROSTER",
    }
}

/// Load the roster for `cadence` using the process environment, the project
/// config and the user config directory.
pub fn load_roster(
    project_root: &Path,
    explicit: Option<&Path>,
    config: &SchedulerConfig,
    cadence: Cadence,
) -> Result<LoadedRoster, AppError> {
    let env_value = std::env::var(env_roster_key(cadence)).ok();
    let user_dir = paths::user_config_dir();
    let candidates = paths::roster_candidates(project_root, user_dir.as_deref());
    load_roster_with(
        env_value.as_deref(),
        &config.roster_override(cadence),
        explicit,
        &candidates,
        cadence,
    )
}

/// Load from explicit inputs. Testable without global state.
pub(crate) fn load_roster_with(
    env_value: Option<&str>,
    config_names: &[String],
    explicit: Option<&Path>,
    candidates: &[PathBuf],
    cadence: Cadence,
) -> Result<LoadedRoster, AppError> {
    if let Some(names) = env_value.map(parse_env_roster).filter(|n| !n.is_empty()) {
        let key = env_roster_key(cadence);
        debug!(cadence = %cadence, key, count = names.len(), "Using roster from environment");
        return Ok(LoadedRoster {
            roster: Roster::from_names(cadence, names)?,
            source: RosterSource::Env(key),
        });
    }

    if !config_names.is_empty() {
        debug!(cadence = %cadence, count = config_names.len(), "Using roster from project config");
        return Ok(LoadedRoster {
            roster: Roster::from_names(cadence, config_names)?,
            source: RosterSource::Config,
        });
    }

    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| AppError::RosterNotFound {
                searched: candidates.to_vec(),
            })?,
    };

    let roster = load_roster_file(&path, cadence)?;
    debug!(cadence = %cadence, path = %path.display(), count = roster.len(), "Loaded roster");
    Ok(LoadedRoster {
        roster,
        source: RosterSource::File(path),
    })
}

fn load_roster_file(path: &Path, cadence: Cadence) -> Result<Roster, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::RosterUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let file: RosterFile =
        ConfigFormat::from_path(path)
            .parse(&content)
            .map_err(|message| AppError::RosterMalformed {
                path: path.to_path_buf(),
                message,
            })?;
    Roster::from_names(cadence, file.names_for(cadence))
}

fn parse_env_roster(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "roster_store_tests.rs"]
mod tests;
