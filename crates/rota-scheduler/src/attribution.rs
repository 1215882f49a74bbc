//! Agent attribution for run logs: an ordered chain of strategies where the
//! first non-empty answer wins.

use regex::Regex;
use rota_core::AgentId;
use std::sync::LazyLock;

use crate::log_scan::LogRecord;

static AGENT_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^agent:[ \t]*(.*)$").unwrap());

/// Token separating `<timestamp>`, `<agent>` and `<status>` in log file names.
pub const FILENAME_DELIMITER: &str = "__";

/// One way of recovering the agent that produced a log record.
pub trait AgentAttribution: Send + Sync {
    fn name(&self) -> &'static str;

    /// `body` is `None` when the record could not be read.
    fn attribute(&self, record: &LogRecord, body: Option<&str>) -> Option<AgentId>;
}

/// First `agent:` line in the record body (case-sensitive), value trimmed
/// and unquoted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontmatterField;

impl FrontmatterField {
    pub fn extract(body: &str) -> Option<AgentId> {
        let caps = AGENT_FIELD_RE.captures(body)?;
        let value = caps.get(1)?.as_str().trim();
        AgentId::parse(value.trim_matches(['"', '\'']))
    }
}

impl AgentAttribution for FrontmatterField {
    fn name(&self) -> &'static str {
        "frontmatter"
    }

    fn attribute(&self, _record: &LogRecord, body: Option<&str>) -> Option<AgentId> {
        body.and_then(Self::extract)
    }
}

/// Second `__`-delimited segment of the file name,
/// e.g. `2026-02-20T07-00-00Z__docs-agent__completed.md` → `docs-agent`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameConvention;

impl FilenameConvention {
    pub fn extract(file_name: &str) -> Option<AgentId> {
        let mut segments = file_name.split(FILENAME_DELIMITER);
        let _first = segments.next()?;
        let second = segments.next()?;
        // A two-segment name still carries the `.md` extension on the agent.
        let second = second.strip_suffix(".md").unwrap_or(second);
        AgentId::parse(second)
    }
}

impl AgentAttribution for FilenameConvention {
    fn name(&self) -> &'static str {
        "filename"
    }

    fn attribute(&self, record: &LogRecord, _body: Option<&str>) -> Option<AgentId> {
        Self::extract(record.file_name())
    }
}

pub struct AttributionChain {
    strategies: Vec<Box<dyn AgentAttribution>>,
}

impl Default for AttributionChain {
    /// Frontmatter field first, then the filename convention.
    fn default() -> Self {
        Self::new(vec![Box::new(FrontmatterField), Box::new(FilenameConvention)])
    }
}

impl AttributionChain {
    pub fn new(strategies: Vec<Box<dyn AgentAttribution>>) -> Self {
        Self { strategies }
    }

    pub fn attribute(&self, record: &LogRecord) -> Option<AgentId> {
        let body = record.read_body();
        self.strategies.iter().find_map(|strategy| {
            let agent = strategy.attribute(record, body.as_deref())?;
            tracing::debug!(strategy = strategy.name(), agent = %agent, "Attributed log record");
            Some(agent)
        })
    }
}
