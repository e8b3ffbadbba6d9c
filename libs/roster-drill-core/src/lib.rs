//! Flashcard drill for tabletop army rosters.
//!
//! Provides:
//! - Roster export import (nested selections flattened into units)
//! - Value normalization and keyword matching for typed answers
//! - The pending/correct/deferred session machine
//! - Keyword tag entry, column layout and a keyboard-driven trainer

pub mod cooldown;
pub mod error;
pub mod filter;
pub mod keywords;
pub mod layout;
pub mod matching;
pub mod normalize;
pub mod roster;
pub mod session;
pub mod settings;
pub mod trainer;
pub mod types;

pub use cooldown::SubmitCooldown;
pub use error::{DrillError, Result, RosterError, SettingsError, TrainerError};
pub use filter::SessionFilter;
pub use keywords::TagInput;
pub use matching::{keywords_match, scalar_matches};
pub use normalize::normalize;
pub use session::Session;
pub use settings::DrillSettings;
pub use trainer::{Stage, Trainer, TrainerEvent};
pub use types::{
    Ability, Answer, Characteristics, FieldId, FieldValue, Guesses, JudgmentResult, Progress, Unit,
    Weapon,
};
