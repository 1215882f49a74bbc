//! Roster and project configuration loading (roster.json, torch-config.json).

pub mod format;
pub mod paths;
pub mod roster_store;
pub mod scheduler;

pub use roster_store::{LoadedRoster, RosterSource, env_roster_key, load_roster};
pub use scheduler::SchedulerConfig;
