//! Ordered, deduplicated list of agents for one cadence.

use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::types::{AgentId, Cadence};

/// Rotation order for a cadence. Never empty, never contains duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Roster {
    cadence: Cadence,
    agents: Vec<AgentId>,
}

impl Roster {
    /// Build a roster, keeping the first occurrence of each agent.
    ///
    /// Fails with [`AppError::EmptyRoster`] when no agents remain.
    pub fn new(
        cadence: Cadence,
        agents: impl IntoIterator<Item = AgentId>,
    ) -> Result<Self, AppError> {
        let mut unique: Vec<AgentId> = Vec::new();
        for agent in agents {
            if unique.contains(&agent) {
                warn!(cadence = %cadence, agent = %agent, "Dropping duplicate roster entry");
                continue;
            }
            unique.push(agent);
        }

        if unique.is_empty() {
            return Err(AppError::EmptyRoster { cadence });
        }

        Ok(Self {
            cadence,
            agents: unique,
        })
    }

    /// Build a roster from raw strings. Blank entries are skipped.
    pub fn from_names<I, S>(cadence: Cadence, names: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            cadence,
            names.into_iter().filter_map(|n| AgentId::parse(n.as_ref())),
        )
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Index of `agent` in rotation order.
    pub fn position(&self, agent: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.as_str() == agent)
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.position(agent).is_some()
    }

    /// Agent at `index`, wrapping modulo the roster length.
    pub fn at_wrapped(&self, index: usize) -> &AgentId {
        &self.agents[index % self.agents.len()]
    }
}
