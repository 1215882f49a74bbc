use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// Opaque agent identifier. Only equality is meaningful.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Build an identifier from raw text, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| "agent id must not be blank".to_string())
    }
}

impl From<AgentId> for String {
    fn from(agent: AgentId) -> Self {
        agent.0
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named recurrence class with its own roster, log store and fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

impl Cadence {
    /// Returns the config-facing name for this cadence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Width of the recent-run window used by the time-window guard.
    pub fn recent_window_hours(&self) -> i64 {
        match self {
            Self::Daily => 24,
            Self::Weekly => 24 * 7,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agents that must not be picked by the current selection.
///
/// Ordered so that diagnostics and JSON output are stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<AgentId>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an agent; returns `true` if it was not already excluded.
    pub fn insert(&mut self, agent: AgentId) -> bool {
        self.0.insert(agent)
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.0.contains(agent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentId> {
        self.0.iter()
    }
}

impl Extend<AgentId> for ExclusionSet {
    fn extend<T: IntoIterator<Item = AgentId>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<AgentId> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = AgentId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of one rotation decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "agent", rename_all = "lowercase")]
pub enum Selection {
    /// The next eligible agent in rotation order.
    Selected(AgentId),
    /// Every roster member is currently excluded. Not an error.
    Exhausted,
}

impl Selection {
    pub fn agent(&self) -> Option<&AgentId> {
        match self {
            Self::Selected(agent) => Some(agent),
            Self::Exhausted => None,
        }
    }
}

/// Output format for CLI responses
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
