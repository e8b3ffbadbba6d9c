//! Per-session exclusions applied when a drill starts.

use crate::types::Unit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Units, weapons and profile columns left out of a drill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFilter {
    pub excluded_units: BTreeSet<String>,
    pub excluded_weapons: BTreeSet<String>,
    pub excluded_columns: BTreeSet<String>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to exclude a unit by name.
    pub fn exclude_unit(mut self, name: impl Into<String>) -> Self {
        self.excluded_units.insert(name.into());
        self
    }

    /// Builder method to exclude a weapon by name, on every unit.
    pub fn exclude_weapon(mut self, name: impl Into<String>) -> Self {
        self.excluded_weapons.insert(name.into());
        self
    }

    /// Builder method to exclude a unit profile column.
    pub fn exclude_column(mut self, key: impl Into<String>) -> Self {
        self.excluded_columns.insert(key.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.excluded_units.is_empty()
            && self.excluded_weapons.is_empty()
            && self.excluded_columns.is_empty()
    }

    /// Derive the working unit list: drop excluded units, then excluded
    /// weapons and profile columns inside the survivors.
    pub fn apply(&self, catalog: &[Unit]) -> Vec<Unit> {
        catalog
            .iter()
            .filter(|unit| !self.excluded_units.contains(&unit.name))
            .map(|unit| Unit {
                name: unit.name.clone(),
                profiles: unit
                    .profiles
                    .iter()
                    .filter(|(key, _)| !self.excluded_columns.contains(*key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
                weapons: unit
                    .weapons
                    .iter()
                    .filter(|weapon| !self.excluded_weapons.contains(&weapon.name))
                    .cloned()
                    .collect(),
                abilities: unit.abilities.clone(),
            })
            .collect()
    }
}
