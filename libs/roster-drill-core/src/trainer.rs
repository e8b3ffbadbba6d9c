//! Keyboard-driven controller tying the roster, the filter and a drill
//! session together.
//!
//! Enter ([`Trainer::confirm`]) submits answers, then marks the revealed
//! card correct. Shift+Enter ([`Trainer::give_up`]) submits and reveals,
//! then marks the card incorrect. Judgment keys pressed inside the submit
//! cooldown are ignored.

use crate::cooldown::SubmitCooldown;
use crate::error::TrainerError;
use crate::filter::SessionFilter;
use crate::roster;
use crate::session::Session;
use crate::settings::DrillSettings;
use crate::types::{Guesses, JudgmentResult, Unit};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which screen the trainer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Review,
    Flashcards,
    Complete,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainerEvent {
    Started { cards: usize },
    Judged(JudgmentResult),
    MarkedCorrect,
    MarkedIncorrect,
    Finished,
    Ignored,
}

pub struct Trainer {
    catalog: Vec<Unit>,
    settings: DrillSettings,
    session: Option<Session>,
    cooldown: SubmitCooldown,
    stage: Stage,
    rng: StdRng,
}

impl Trainer {
    pub fn new(settings: DrillSettings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog: Vec::new(),
            cooldown: settings.cooldown(),
            settings,
            session: None,
            stage: Stage::Upload,
            rng,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn catalog(&self) -> &[Unit] {
        &self.catalog
    }

    /// Hand-correct extracted data before drilling.
    pub fn catalog_mut(&mut self) -> &mut Vec<Unit> {
        &mut self.catalog
    }

    /// Exclusions used by the next session.
    pub fn filter_mut(&mut self) -> &mut SessionFilter {
        &mut self.settings.filter
    }

    /// Import a roster export, replacing the catalog, and move to review.
    pub fn load_roster(&mut self, content: &str) -> Result<usize, TrainerError> {
        let units = roster::load(content)?;
        Ok(self.set_catalog(units))
    }

    /// Replace the catalog and move to review.
    pub fn set_catalog(&mut self, units: Vec<Unit>) -> usize {
        self.catalog = units;
        self.session = None;
        self.stage = Stage::Review;
        tracing::info!(units = self.catalog.len(), "catalog loaded");
        self.catalog.len()
    }

    /// Start a fresh session, discarding any live one.
    pub fn begin(&mut self) -> Result<TrainerEvent, TrainerError> {
        let session = Session::start_with_rng(&self.catalog, &self.settings.filter, &mut self.rng)?;
        let cards = session.progress().remaining;

        self.session = Some(session);
        self.cooldown.clear();
        self.stage = Stage::Flashcards;
        Ok(TrainerEvent::Started { cards })
    }

    pub fn restart(&mut self) -> Result<TrainerEvent, TrainerError> {
        self.begin()
    }

    /// Abandon the session and return to review.
    pub fn back_to_review(&mut self) {
        self.session = None;
        self.stage = Stage::Review;
    }

    /// Escape: leave the drill, or from review go back to loading a roster.
    pub fn back(&mut self) {
        match self.stage {
            Stage::Flashcards | Stage::Complete => self.back_to_review(),
            Stage::Review => self.stage = Stage::Upload,
            Stage::Upload => {}
        }
    }

    /// Enter.
    pub fn confirm(&mut self, guesses: &Guesses, now: DateTime<Utc>) -> Result<TrainerEvent, TrainerError> {
        if self.stage != Stage::Flashcards {
            return self.advance_stage();
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(TrainerEvent::Ignored);
        };

        if !session.is_revealed() {
            let result = session.submit(guesses)?;
            self.cooldown.arm(now);
            return Ok(TrainerEvent::Judged(result));
        }
        if self.cooldown.is_active(now) {
            tracing::debug!("judgment ignored inside submit cooldown");
            return Ok(TrainerEvent::Ignored);
        }

        session.mark_correct()?;
        if session.is_finished() {
            self.stage = Stage::Complete;
            tracing::info!(session = %session.id(), "all flashcards completed");
            return Ok(TrainerEvent::Finished);
        }
        Ok(TrainerEvent::MarkedCorrect)
    }

    /// Shift+Enter.
    pub fn give_up(&mut self, guesses: &Guesses, now: DateTime<Utc>) -> Result<TrainerEvent, TrainerError> {
        if self.stage != Stage::Flashcards {
            return self.advance_stage();
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(TrainerEvent::Ignored);
        };

        if !session.is_revealed() {
            let result = session.submit(guesses)?;
            self.cooldown.arm(now);
            session.reveal();
            return Ok(TrainerEvent::Judged(result));
        }
        if self.cooldown.is_active(now) {
            tracing::debug!("judgment ignored inside submit cooldown");
            return Ok(TrainerEvent::Ignored);
        }

        session.mark_incorrect()?;
        Ok(TrainerEvent::MarkedIncorrect)
    }

    fn advance_stage(&mut self) -> Result<TrainerEvent, TrainerError> {
        match self.stage {
            Stage::Review | Stage::Complete => self.begin(),
            Stage::Upload | Stage::Flashcards => Ok(TrainerEvent::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;
    use crate::types::{FieldId, Weapon};
    use chrono::Duration;

    fn settings() -> DrillSettings {
        DrillSettings {
            rng_seed: Some(3),
            ..DrillSettings::default()
        }
    }

    fn units() -> Vec<Unit> {
        vec![
            Unit::new("Captain").with_profile("SV", "3+"),
            Unit::new("Scouts")
                .with_profile("SV", "4+")
                .with_weapon(Weapon::new("Bolt pistol").with("Range", "12")),
        ]
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn right_answer(trainer: &Trainer) -> Guesses {
        let card = trainer.session().unwrap().current_card().unwrap();
        let mut guesses = Guesses::new();
        guesses.insert(FieldId::profile("SV"), card.profiles["SV"].as_str().into());
        guesses
    }

    #[test]
    fn starts_in_upload_and_ignores_keys() {
        let mut trainer = Trainer::new(settings());
        assert_eq!(trainer.stage(), Stage::Upload);
        assert_eq!(trainer.confirm(&Guesses::new(), now()).unwrap(), TrainerEvent::Ignored);
    }

    #[test]
    fn enter_on_review_begins_drill() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        assert_eq!(trainer.stage(), Stage::Review);

        let event = trainer.confirm(&Guesses::new(), now()).unwrap();
        assert_eq!(event, TrainerEvent::Started { cards: 2 });
        assert_eq!(trainer.stage(), Stage::Flashcards);
    }

    #[test]
    fn begin_with_everything_excluded_fails() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        trainer.filter_mut().excluded_units.extend(["Captain".to_string(), "Scouts".to_string()]);

        assert!(matches!(
            trainer.begin(),
            Err(TrainerError::Drill(DrillError::EmptyCatalog))
        ));
        assert_eq!(trainer.stage(), Stage::Review);
    }

    #[test]
    fn double_enter_inside_cooldown_is_ignored() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        trainer.begin().unwrap();

        let guesses = right_answer(&trainer);
        let event = trainer.confirm(&guesses, now()).unwrap();
        assert!(matches!(event, TrainerEvent::Judged(ref r) if r.all_correct));

        let repeat = trainer.confirm(&guesses, now() + Duration::milliseconds(50)).unwrap();
        assert_eq!(repeat, TrainerEvent::Ignored);
        assert_eq!(trainer.session().unwrap().progress().correct, 0);

        let later = trainer.confirm(&guesses, now() + Duration::milliseconds(500)).unwrap();
        assert_eq!(later, TrainerEvent::MarkedCorrect);
        assert_eq!(trainer.session().unwrap().progress().correct, 1);
    }

    #[test]
    fn shift_enter_reveals_then_defers() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        trainer.begin().unwrap();

        let event = trainer.give_up(&Guesses::new(), now()).unwrap();
        assert!(matches!(event, TrainerEvent::Judged(_)));
        assert!(trainer.session().unwrap().is_revealed());

        let later = now() + Duration::seconds(1);
        assert_eq!(trainer.give_up(&Guesses::new(), later).unwrap(), TrainerEvent::MarkedIncorrect);
        assert_eq!(trainer.session().unwrap().progress().deferred, 1);
    }

    #[test]
    fn finishing_moves_to_complete_and_enter_restarts() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        trainer.begin().unwrap();

        let mut clock = now();
        let mut last = TrainerEvent::Ignored;
        for _ in 0..2 {
            let guesses = right_answer(&trainer);
            trainer.confirm(&guesses, clock).unwrap();
            clock += Duration::seconds(1);
            last = trainer.confirm(&guesses, clock).unwrap();
            clock += Duration::seconds(1);
        }

        assert_eq!(last, TrainerEvent::Finished);
        assert_eq!(trainer.stage(), Stage::Complete);

        let first_id = trainer.session().unwrap().id();
        assert_eq!(trainer.confirm(&Guesses::new(), clock).unwrap(), TrainerEvent::Started { cards: 2 });
        assert_ne!(trainer.session().unwrap().id(), first_id);
    }

    #[test]
    fn back_walks_stages() {
        let mut trainer = Trainer::new(settings());
        trainer.set_catalog(units());
        trainer.begin().unwrap();

        trainer.back();
        assert_eq!(trainer.stage(), Stage::Review);
        assert!(trainer.session().is_none());

        trainer.back();
        assert_eq!(trainer.stage(), Stage::Upload);
    }
}
