//! Flashcard drill session: the pending/correct/deferred bucket machine.
//!
//! A session is created by [`Session::start`], then driven by the
//! presentation layer through [`Session::submit`], [`Session::reveal`],
//! [`Session::mark_correct`] and [`Session::mark_incorrect`]. Every
//! operation either commits its whole transition or leaves the session
//! untouched.

use crate::error::{DrillError, Result};
use crate::filter::SessionFilter;
use crate::matching::{answer_tags, keywords_match, scalar_matches, stored_tags};
use crate::types::{
    Answer, Characteristics, FieldId, FieldValue, Guesses, JudgmentResult, Progress, Unit, Weapon,
    KEYWORDS, SKILL,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// One live drill over a filtered, shuffled catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: Uuid,
    pending: Vec<Unit>,
    correct: Vec<Unit>,
    deferred: Vec<Unit>,
    current_index: usize,
    revealed: bool,
    known_weapons: HashMap<String, Characteristics>,
}

impl Session {
    /// Start a drill using the thread-local RNG.
    pub fn start(catalog: &[Unit], filter: &SessionFilter) -> Result<Self> {
        Self::start_with_rng(catalog, filter, &mut rand::thread_rng())
    }

    /// Start a drill, shuffling with `rng`.
    ///
    /// Weapons on each card are ordered ranged first, melee last; weapon
    /// field ids index into that order.
    pub fn start_with_rng<R: Rng + ?Sized>(
        catalog: &[Unit],
        filter: &SessionFilter,
        rng: &mut R,
    ) -> Result<Self> {
        let mut pending = filter.apply(catalog);
        if pending.is_empty() {
            tracing::debug!(catalog = catalog.len(), "no units left after filtering");
            return Err(DrillError::EmptyCatalog);
        }

        for unit in &mut pending {
            unit.weapons.sort_by_key(Weapon::is_melee);
        }
        pending.shuffle(rng);

        let session = Self {
            id: Uuid::new_v4(),
            pending,
            correct: Vec::new(),
            deferred: Vec::new(),
            current_index: 0,
            revealed: false,
            known_weapons: HashMap::new(),
        };
        tracing::debug!(session = %session.id, cards = session.pending.len(), "drill session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pending(&self) -> &[Unit] {
        &self.pending
    }

    pub fn correct(&self) -> &[Unit] {
        &self.correct
    }

    pub fn deferred(&self) -> &[Unit] {
        &self.deferred
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The active card, or `None` once the pass is exhausted.
    pub fn current_card(&self) -> Option<&Unit> {
        self.pending.get(self.current_index)
    }

    /// Bucket counters.
    pub fn progress(&self) -> Progress {
        Progress {
            remaining: self.pending.len(),
            correct: self.correct.len(),
            deferred: self.deferred.len(),
        }
    }

    /// True when every card has been retired to the correct bucket.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.deferred.is_empty()
    }

    /// Judge `guesses` against the active card.
    ///
    /// A fully correct submission reveals the card. Fields missing from
    /// `guesses` are not judged.
    pub fn submit(&mut self, guesses: &Guesses) -> Result<JudgmentResult> {
        let unit = self.current_card().ok_or(DrillError::NoActiveCard)?;

        let fields: BTreeMap<FieldId, bool> = guesses
            .iter()
            .map(|(field, answer)| (field.clone(), judge_field(unit, field, answer)))
            .collect();
        let all_correct = fields.values().all(|correct| *correct);

        tracing::debug!(
            session = %self.id,
            unit = %unit.name,
            judged = fields.len(),
            all_correct,
            "answers submitted"
        );

        if all_correct {
            self.reveal();
        }
        self.rotate();

        Ok(JudgmentResult {
            fields,
            all_correct,
        })
    }

    /// Show the answers for the active card. Idempotent.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Retire the active card to the correct bucket and remember its
    /// weapons. The first stat line seen for a weapon name is kept.
    pub fn mark_correct(&mut self) -> Result<()> {
        let card = self.take_current()?;

        for weapon in &card.weapons {
            self.known_weapons
                .entry(weapon.name.clone())
                .or_insert_with(|| weapon.characteristics.clone());
        }

        tracing::debug!(session = %self.id, unit = %card.name, "card marked correct");
        self.correct.push(card);
        self.finish_judgment();
        Ok(())
    }

    /// Hold the active card back until the pending pass is exhausted.
    pub fn mark_incorrect(&mut self) -> Result<()> {
        let card = self.take_current()?;

        tracing::debug!(session = %self.id, unit = %card.name, "card deferred");
        self.deferred.push(card);
        self.finish_judgment();
        Ok(())
    }

    /// Snapshot memoized for a weapon name.
    pub fn known_weapon(&self, name: &str) -> Option<&Characteristics> {
        self.known_weapons.get(name)
    }

    pub fn known_weapons(&self) -> &HashMap<String, Characteristics> {
        &self.known_weapons
    }

    /// Value to pre-fill for `key` on `weapon`, when the user already proved
    /// they know it: the weapon is known and the remembered value equals the
    /// current one. Skill and keywords are always asked again.
    pub fn known_value(&self, weapon: &Weapon, key: &str) -> Option<&FieldValue> {
        if key == SKILL || key == KEYWORDS {
            return None;
        }
        let known = self.known_weapons.get(&weapon.name)?.get(key)?;
        (weapon.characteristics.get(key) == Some(known)).then_some(known)
    }

    fn take_current(&mut self) -> Result<Unit> {
        if !self.revealed {
            tracing::warn!(session = %self.id, "judgment refused before reveal");
            return Err(DrillError::PrematureJudgment);
        }
        if self.current_index >= self.pending.len() {
            return Err(DrillError::NoActiveCard);
        }
        Ok(self.pending.remove(self.current_index))
    }

    fn finish_judgment(&mut self) {
        self.rotate();
        self.revealed = false;
    }

    fn rotate(&mut self) {
        if self.pending.is_empty() && !self.deferred.is_empty() {
            tracing::debug!(session = %self.id, cards = self.deferred.len(), "deferred cards rotated in");
            self.pending = std::mem::take(&mut self.deferred);
        }
        if self.current_index >= self.pending.len() {
            self.current_index = 0;
        }
    }
}

fn judge_field(unit: &Unit, field: &FieldId, answer: &Answer) -> bool {
    match field {
        FieldId::Profile { key } => {
            let correct = unit.profiles.get(key).map(String::as_str).unwrap_or("");
            scalar_matches(key, correct, &answer_text(answer))
        }
        FieldId::Weapon { index, key } => {
            let value = unit
                .weapons
                .get(*index)
                .and_then(|weapon| weapon.characteristics.get(key));

            if key == KEYWORDS {
                keywords_match(&stored_tags(value), &answer_tags(answer))
            } else {
                let correct = value.map(FieldValue::as_text).unwrap_or_default();
                scalar_matches(key, &correct, &answer_text(answer))
            }
        }
    }
}

fn answer_text(answer: &Answer) -> String {
    match answer {
        Answer::Text(text) => text.clone(),
        Answer::Tags(tags) => tags.join(", "),
    }
}
