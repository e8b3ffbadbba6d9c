//! Card rendering and answer prompts.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use anyhow::Context;
use chrono::Utc;
use roster_drill_core::layout::{profile_columns, quizzable_fields, weapon_columns};
use roster_drill_core::types::{KEYWORDS, RANGE};
use roster_drill_core::{Answer, FieldId, Guesses, Session, Stage, TagInput, Trainer, TrainerEvent};

use crate::read_line;

const HIDDEN: &str = "?";

/// What the user typed at an answer prompt.
enum Reply {
    Guesses(Guesses),
    GiveUp(Guesses),
    Quit,
}

/// Run the drill until the user quits or input ends.
pub fn drill<R: BufRead, W: Write>(trainer: &mut Trainer, input: &mut R, out: &mut W) -> anyhow::Result<()> {
    trainer.begin()?;
    let mut locked: BTreeSet<FieldId> = BTreeSet::new();

    loop {
        match trainer.stage() {
            Stage::Flashcards => {}
            Stage::Complete => {
                writeln!(out, "All flashcards completed! You have no more incomplete cards.")?;
                writeln!(out, "[Enter] restart  [q] quit")?;
                match read_line(input)?.as_deref() {
                    None | Some("q") => return Ok(()),
                    Some(_) => {
                        trainer.confirm(&Guesses::new(), Utc::now())?;
                        continue;
                    }
                }
            }
            Stage::Upload | Stage::Review => return Ok(()),
        }

        let session = trainer.session().context("drill stage without a session")?;
        render_card(session, out)?;

        let event = if session.is_revealed() {
            writeln!(out, "[Enter] correct  [x] incorrect  [q] quit")?;
            match read_line(input)?.as_deref() {
                None | Some("q") => return Ok(()),
                Some("x") => trainer.give_up(&Guesses::new(), Utc::now())?,
                Some(_) => trainer.confirm(&Guesses::new(), Utc::now())?,
            }
        } else {
            let fields: Vec<FieldId> = quizzable_fields(session)
                .into_iter()
                .filter(|field| !locked.contains(field))
                .collect();
            match ask(&fields, input, out)? {
                Reply::Quit => return Ok(()),
                Reply::Guesses(guesses) => trainer.confirm(&guesses, Utc::now())?,
                Reply::GiveUp(guesses) => trainer.give_up(&guesses, Utc::now())?,
            }
        };

        match event {
            TrainerEvent::Judged(result) => {
                for (field, correct) in &result.fields {
                    if *correct {
                        locked.insert(field.clone());
                    } else {
                        writeln!(out, "  wrong: {}", field)?;
                    }
                }
                if result.all_correct && !result.fields.is_empty() {
                    writeln!(out, "All correct!")?;
                }
            }
            TrainerEvent::MarkedCorrect | TrainerEvent::MarkedIncorrect | TrainerEvent::Finished => {
                locked.clear();
            }
            TrainerEvent::Started { .. } | TrainerEvent::Ignored => {}
        }
    }
}

/// Prompt for every field. `?` gives up and reveals, `q` quits.
fn ask<R: BufRead, W: Write>(fields: &[FieldId], input: &mut R, out: &mut W) -> anyhow::Result<Reply> {
    let mut guesses = Guesses::new();

    for field in fields {
        write!(out, "{}: ", field)?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(Reply::Quit);
        };
        match line.as_str() {
            "q" => return Ok(Reply::Quit),
            "?" => return Ok(Reply::GiveUp(guesses)),
            _ => {}
        }

        let answer = if field.key() == KEYWORDS {
            let mut tags = TagInput::new();
            for part in line.split(',') {
                if !tags.enter(part) {
                    tags.add(part);
                }
            }
            Answer::Tags(tags.into_tags())
        } else {
            Answer::Text(line)
        };
        guesses.insert(field.clone(), answer);
    }

    Ok(Reply::Guesses(guesses))
}

fn render_card<W: Write>(session: &Session, out: &mut W) -> anyhow::Result<()> {
    let Some(unit) = session.current_card() else {
        return Ok(());
    };
    let revealed = session.is_revealed();

    writeln!(out)?;
    writeln!(out, "{}", session.progress())?;
    writeln!(out, "== {} ==", unit.name)?;

    let stats: Vec<String> = profile_columns(unit)
        .iter()
        .map(|key| {
            let value = if revealed { unit.profiles[key].as_str() } else { HIDDEN };
            format!("{} {}", key, value)
        })
        .collect();
    writeln!(out, "  {}", stats.join("  "))?;

    let columns = weapon_columns(&unit.weapons);
    for weapon in &unit.weapons {
        let cells: Vec<String> = columns
            .iter()
            .map(|key| {
                let stored = weapon
                    .characteristics
                    .get(key)
                    .map(|v| v.as_text())
                    .unwrap_or_default();
                let melee_range = key == RANGE && weapon.is_melee();
                if revealed || melee_range || session.known_value(weapon, key).is_some() {
                    format!("{} {}", key, stored)
                } else {
                    format!("{} {}", key, HIDDEN)
                }
            })
            .collect();
        writeln!(out, "  {:<24} {}", weapon.name, cells.join("  "))?;
    }

    for ability in &unit.abilities {
        let description = if revealed { ability.description.as_str() } else { "Hidden" };
        writeln!(out, "  * {}: {}", ability.name, description)?;
    }
    Ok(())
}
