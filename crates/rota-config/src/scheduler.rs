//! Project configuration (`torch-config.json`).
//!
//! Read sections:
//! - `scheduler.firstPromptByCadence`: cold-start agent per cadence.
//! - `scheduler.paused`: agents excluded from every selection.
//! - `nostrLock.dailyRoster` / `nostrLock.weeklyRoster`: roster override.
//!
//! Optional by nature: a missing or broken file only means none of these
//! settings apply.

use anyhow::{Context, Result};
use rota_core::{AgentId, Cadence};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::format::ConfigFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub scheduler: SchedulerSection,
    #[serde(default, rename = "nostrLock", alias = "nostr_lock")]
    pub nostr_lock: LockSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulerSection {
    /// Agent to start from when no previous-run evidence exists.
    #[serde(
        default,
        rename = "firstPromptByCadence",
        alias = "first_prompt_by_cadence"
    )]
    pub first_prompt_by_cadence: HashMap<String, String>,
    /// Cadence name -> agents that must not be selected.
    #[serde(default)]
    pub paused: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockSection {
    #[serde(default, rename = "dailyRoster", alias = "daily_roster")]
    pub daily_roster: Vec<String>,
    #[serde(default, rename = "weeklyRoster", alias = "weekly_roster")]
    pub weekly_roster: Vec<String>,
}

impl SchedulerConfig {
    /// Load config, degrading to the default on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No scheduler config; cold start uses roster head");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring scheduler config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        ConfigFormat::from_path(path)
            .parse(&content)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Configured fallback agent for `cadence`, if any.
    pub fn first_agent(&self, cadence: Cadence) -> Option<AgentId> {
        self.scheduler
            .first_prompt_by_cadence
            .get(cadence.as_str())
            .and_then(|name| AgentId::parse(name))
    }

    /// Roster override for `cadence`, trimmed with blanks dropped. Empty
    /// when not configured.
    pub fn roster_override(&self, cadence: Cadence) -> Vec<String> {
        let names = match cadence {
            Cadence::Daily => &self.nostr_lock.daily_roster,
            Cadence::Weekly => &self.nostr_lock.weekly_roster,
        };
        names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Agents paused for `cadence`.
    pub fn paused_agents(&self, cadence: Cadence) -> Vec<AgentId> {
        self.scheduler
            .paused
            .get(cadence.as_str())
            .map(|names| names.iter().filter_map(|n| AgentId::parse(n)).collect())
            .unwrap_or_default()
    }
}
