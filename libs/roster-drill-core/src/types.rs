//! Core types for the roster drill.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Weapon range column. Holds `Melee` for close-combat weapons.
pub const RANGE: &str = "Range";
/// Combined ballistic/weapon skill column.
pub const SKILL: &str = "BS/WS";
/// Weapon keyword column; the only list-valued characteristic.
pub const KEYWORDS: &str = "Keywords";

/// A characteristic value: scalar text, or the keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Tags(Vec<String>),
}

impl FieldValue {
    /// Scalar view of the value. Tags are joined with `", "`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Tags(tags) => tags.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Tags(value)
    }
}

/// Weapon characteristics keyed by column name.
pub type Characteristics = BTreeMap<String, FieldValue>;

/// A weapon profile carried by a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub characteristics: Characteristics,
}

impl Weapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characteristics: Characteristics::new(),
        }
    }

    /// Builder method to set a characteristic.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.characteristics.insert(key.into(), value.into());
        self
    }

    /// A weapon is melee iff its range reads `melee`, ignoring case.
    pub fn is_melee(&self) -> bool {
        match self.characteristics.get(RANGE) {
            Some(FieldValue::Text(range)) => range.eq_ignore_ascii_case("melee"),
            _ => false,
        }
    }
}

/// A named unit ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
}

impl Ability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A drillable unit. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, String>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profiles: BTreeMap::new(),
            weapons: Vec::new(),
            abilities: Vec::new(),
        }
    }

    /// Builder method to set a unit-level stat.
    pub fn with_profile(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.profiles.insert(key.into(), value.into());
        self
    }

    /// Builder method to add a weapon.
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    /// Builder method to add an ability.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }
}

/// Identifies one quizzed field on the current card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldId {
    /// Unit-level stat column.
    Profile { key: String },
    /// Characteristic of the weapon at `index` in the card's weapon list.
    Weapon { index: usize, key: String },
}

impl FieldId {
    pub fn profile(key: impl Into<String>) -> Self {
        Self::Profile { key: key.into() }
    }

    pub fn weapon(index: usize, key: impl Into<String>) -> Self {
        Self::Weapon {
            index,
            key: key.into(),
        }
    }

    /// Column key of the field.
    pub fn key(&self) -> &str {
        match self {
            Self::Profile { key } | Self::Weapon { key, .. } => key,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile { key } => write!(f, "{}", key),
            Self::Weapon { index, key } => write!(f, "weapon {} {}", index, key),
        }
    }
}

/// Raw user input for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Tags(Vec<String>),
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Self::Tags(value)
    }
}

/// User guesses for the current card.
pub type Guesses = BTreeMap<FieldId, Answer>;

/// Outcome of judging a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgmentResult {
    /// Per-field verdicts for every supplied guess.
    pub fields: BTreeMap<FieldId, bool>,
    /// True when every supplied field was correct.
    pub all_correct: bool,
}

impl JudgmentResult {
    /// Fields judged wrong, in field order.
    pub fn wrong_fields(&self) -> impl Iterator<Item = &FieldId> {
        self.fields
            .iter()
            .filter(|(_, correct)| !**correct)
            .map(|(field, _)| field)
    }
}

/// Bucket counters for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub remaining: usize,
    pub correct: usize,
    pub deferred: usize,
}

impl Progress {
    pub fn total(&self) -> usize {
        self.remaining + self.correct + self.deferred
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Remaining: {}   Correct: {}   Incorrect: {}",
            self.remaining, self.correct, self.deferred
        )
    }
}
