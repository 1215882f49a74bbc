use anyhow::{Context, Result};
use std::path::PathBuf;

use rota_config::{LoadedRoster, SchedulerConfig, load_roster, paths};
use rota_core::Cadence;

use crate::cli::SourceArgs;

/// Inputs for one invocation, resolved against the project root.
pub(crate) struct ResolvedSources {
    pub cadence: Cadence,
    pub project_root: PathBuf,
    pub roster_path: Option<PathBuf>,
    pub config_path: PathBuf,
    pub log_dir: PathBuf,
}

impl ResolvedSources {
    pub(crate) fn resolve(args: &SourceArgs) -> Result<Self> {
        let project_root = determine_project_root(args.root.as_deref())?;
        let resolve = |p: &str| project_root.join(p);

        Ok(Self {
            cadence: args.cadence,
            roster_path: args.roster.as_deref().map(resolve),
            config_path: args
                .config
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| paths::default_config_path(&project_root)),
            log_dir: args
                .log_dir
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| paths::default_log_dir(&project_root, args.cadence)),
            project_root,
        })
    }

    /// Project config; never fatal.
    pub(crate) fn load_config(&self) -> SchedulerConfig {
        SchedulerConfig::load_or_default(&self.config_path)
    }

    /// Fatal on any roster problem.
    pub(crate) fn load_roster(&self, config: &SchedulerConfig) -> Result<LoadedRoster> {
        let loaded = load_roster(
            &self.project_root,
            self.roster_path.as_deref(),
            config,
            self.cadence,
        )?;
        tracing::debug!(source = %loaded.source, "Resolved roster");
        Ok(loaded)
    }
}

pub(crate) fn determine_project_root(root: Option<&str>) -> Result<PathBuf> {
    let path = match root {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };

    path.canonicalize()
        .with_context(|| format!("Project root not found: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(root: &str) -> SourceArgs {
        SourceArgs {
            cadence: Cadence::Weekly,
            root: Some(root.to_string()),
            roster: None,
            config: None,
            log_dir: None,
        }
    }

    #[test]
    fn test_defaults_resolve_under_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let sources = ResolvedSources::resolve(&args(dir.path().to_str().unwrap())).unwrap();

        assert_eq!(sources.project_root, root);
        assert_eq!(sources.log_dir, root.join("task-logs").join("weekly"));
        assert_eq!(sources.config_path, root.join("torch-config.json"));
        assert!(sources.roster_path.is_none());
    }

    #[test]
    fn test_relative_overrides_join_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut a = args(dir.path().to_str().unwrap());
        a.roster = Some("cfg/roster.toml".into());
        a.log_dir = Some("/abs/logs".into());

        let sources = ResolvedSources::resolve(&a).unwrap();
        assert_eq!(sources.roster_path, Some(root.join("cfg/roster.toml")));
        assert_eq!(sources.log_dir, PathBuf::from("/abs/logs"));
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(determine_project_root(missing.to_str()).is_err());
    }
}
