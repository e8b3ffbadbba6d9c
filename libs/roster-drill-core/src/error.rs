//! Error types for roster-drill-core.

use thiserror::Error;

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Errors raised by the flashcard engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    #[error("nothing to drill: every unit, weapon or column is excluded")]
    EmptyCatalog,

    #[error("card judged before its answers were revealed")]
    PrematureJudgment,

    #[error("no active card: the current pass is complete")]
    NoActiveCard,
}

/// Errors that can occur while importing a roster export.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid roster structure: missing roster or forces array")]
    MissingForces,
}

/// Errors that can occur while loading drill settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the trainer controller.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error(transparent)]
    Drill(#[from] DrillError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}
