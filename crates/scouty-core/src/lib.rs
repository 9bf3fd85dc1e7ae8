// Core data model, ingestion and configuration for the scouty toolkit.

pub mod config;
pub mod ingest;
pub mod matches;
pub mod player;

pub use ingest::{IngestError, IngestLimits, ParseOutcome, RowDiagnostic, Schema};
pub use matches::MatchRecord;
pub use player::{Player, Position, Skill, Skills};
