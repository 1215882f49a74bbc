//! Core types shared by the roster, scheduler and CLI crates.

pub mod error;
pub mod roster;
pub mod types;

pub use error::AppError;
pub use roster::Roster;
pub use types::{AgentId, Cadence, ExclusionSet, OutputFormat, Selection};
