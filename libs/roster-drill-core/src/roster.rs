//! Roster export import.
//!
//! # Format
//! ```json
//! { "roster": { "forces": [ { "selections": [
//!     { "type": "unit", "name": "Intercessors",
//!       "profiles": [ { "typeName": "Unit", "name": "Intercessor",
//!                       "characteristics": [ { "name": "M", "$text": "6\"" } ] } ],
//!       "selections": [ ... ] }
//! ] } ] } }
//! ```
//!
//! Selections nest arbitrarily. The outermost `unit` (or `model`) selection
//! becomes a drill card; weapons and the stat profile are collected from its
//! whole subtree, abilities from the selection itself.

use crate::error::RosterError;
use crate::matching::split_keywords;
use crate::normalize::normalize;
use crate::types::{Ability, Characteristics, FieldValue, Unit, Weapon, KEYWORDS, SKILL};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\^\^\*\*|\*\*\^\^)(.*?)(?:\^\^\*\*|\*\*\^\^)").expect("emphasis pattern is valid")
});

#[derive(Debug, Deserialize)]
struct Export {
    roster: Option<RosterDoc>,
}

#[derive(Debug, Deserialize)]
struct RosterDoc {
    forces: Option<Vec<Force>>,
}

#[derive(Debug, Deserialize)]
struct Force {
    #[serde(default)]
    selections: Vec<Selection>,
}

#[derive(Debug, Deserialize)]
struct Selection {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    profiles: Vec<Profile>,
    #[serde(default)]
    selections: Vec<Selection>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    name: Option<String>,
    #[serde(rename = "typeName")]
    type_name: Option<String>,
    #[serde(default)]
    characteristics: Vec<Characteristic>,
}

#[derive(Debug, Deserialize)]
struct Characteristic {
    name: String,
    #[serde(rename = "$text", default)]
    text: String,
}

impl Selection {
    fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

impl Profile {
    fn is_type(&self, type_name: &str) -> bool {
        self.type_name.as_deref() == Some(type_name)
    }
}

/// Parse a roster export into drill units, one per top-level unit
/// selection, in document order. Units are not merged; see [`unify_units`].
pub fn parse(content: &str) -> Result<Vec<Unit>, RosterError> {
    let export: Export = serde_json::from_str(content)?;
    let forces = export
        .roster
        .and_then(|roster| roster.forces)
        .ok_or(RosterError::MissingForces)?;

    let mut units = Vec::new();
    for force in &forces {
        for selection in &force.selections {
            collect_units(selection, false, &mut units);
        }
    }

    tracing::debug!(forces = forces.len(), units = units.len(), "roster parsed");
    Ok(units)
}

/// Parse and merge units sharing a name.
pub fn load(content: &str) -> Result<Vec<Unit>, RosterError> {
    parse(content).map(unify_units)
}

/// Merge units by name. The first unit's stat profile is kept; weapons and
/// abilities are concatenated and deduplicated by name, first one wins.
pub fn unify_units(units: Vec<Unit>) -> Vec<Unit> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, Unit> = HashMap::new();

    for unit in units {
        match merged.get_mut(&unit.name) {
            Some(existing) => {
                existing.weapons.extend(unit.weapons);
                existing.abilities.extend(unit.abilities);
            }
            None => {
                order.push(unit.name.clone());
                merged.insert(unit.name.clone(), unit);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|name| merged.remove(&name))
        .map(|mut unit| {
            let mut weapon_names = HashSet::new();
            unit.weapons.retain(|w| weapon_names.insert(w.name.clone()));
            let mut ability_names = HashSet::new();
            unit.abilities.retain(|a| ability_names.insert(a.name.clone()));
            unit
        })
        .collect()
}

/// Replace `^^**text^^**` style emphasis with upper-cased text.
pub fn format_abilities(text: &str) -> String {
    EMPHASIS
        .replace_all(text, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

fn collect_units(selection: &Selection, inside_unit: bool, units: &mut Vec<Unit>) {
    if (selection.is_kind("unit") || selection.is_kind("model")) && !inside_unit {
        units.push(Unit {
            name: selection
                .name
                .clone()
                .unwrap_or_else(|| "Unnamed Unit".to_string()),
            profiles: stat_profile(selection).unwrap_or_default(),
            weapons: gather_weapons(selection),
            abilities: gather_abilities(selection),
        });
    }

    let inside_unit = inside_unit || selection.is_kind("unit");
    for child in &selection.selections {
        collect_units(child, inside_unit, units);
    }
}

fn stat_profile(selection: &Selection) -> Option<BTreeMap<String, String>> {
    let found = selection
        .profiles
        .iter()
        .find(|p| p.is_type("Unit") || p.is_type("Model"))
        .map(|profile| {
            profile
                .characteristics
                .iter()
                .map(|c| {
                    let value = match c.name.as_str() {
                        "M" | "SV" | "LD" if !c.text.is_empty() => normalize(&c.name, &c.text),
                        _ => c.text.clone(),
                    };
                    (c.name.clone(), value)
                })
                .collect()
        });

    found.or_else(|| selection.selections.iter().find_map(stat_profile))
}

fn gather_weapons(selection: &Selection) -> Vec<Weapon> {
    let mut weapons: Vec<Weapon> = selection
        .profiles
        .iter()
        .filter(|p| p.is_type("Ranged Weapons") || p.is_type("Melee Weapons"))
        .map(|profile| weapon_from_profile(profile, profile.is_type("Melee Weapons")))
        .collect();

    for child in &selection.selections {
        weapons.extend(gather_weapons(child));
    }
    weapons
}

fn weapon_from_profile(profile: &Profile, melee: bool) -> Weapon {
    let mut characteristics = Characteristics::new();
    let mut ballistic = String::new();
    let mut weapon_skill = String::new();

    for c in &profile.characteristics {
        match c.name.as_str() {
            "BS" => ballistic = c.text.clone(),
            "WS" => weapon_skill = c.text.clone(),
            "Range" | "AP" if !c.text.is_empty() => {
                characteristics.insert(c.name.clone(), FieldValue::Text(normalize(&c.name, &c.text)));
            }
            KEYWORDS if !c.text.is_empty() => {
                let mut tags = split_keywords(&c.text);
                tags.sort_by_key(|tag| tag.to_lowercase());
                characteristics.insert(c.name.clone(), FieldValue::Tags(tags));
            }
            _ => {
                characteristics.insert(c.name.clone(), FieldValue::Text(c.text.clone()));
            }
        }
    }

    let skill = if melee { weapon_skill } else { ballistic };
    characteristics.insert(SKILL.to_string(), FieldValue::Text(normalize(SKILL, &skill)));

    Weapon {
        name: profile
            .name
            .clone()
            .unwrap_or_else(|| "Unnamed Weapon".to_string()),
        characteristics,
    }
}

fn gather_abilities(selection: &Selection) -> Vec<Ability> {
    selection
        .profiles
        .iter()
        .filter(|p| p.is_type("Abilities"))
        .filter(|p| !matches!(p.name.as_deref(), Some("Leader") | Some("Attached Unit")))
        .map(|parent| {
            let parent_name = parent.name.clone().unwrap_or_default();
            let mut description = describe(parent);

            for child in selection.profiles.iter().filter(|p| p.is_type(&parent_name)) {
                let child_description = describe(child);
                if !child_description.is_empty() {
                    description.push_str("\n• ");
                    description.push_str(&child_description);
                }
            }

            Ability {
                name: ability_name(&parent_name),
                description,
            }
        })
        .collect()
}

fn describe(profile: &Profile) -> String {
    profile
        .characteristics
        .iter()
        .map(|c| format_abilities(&c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ability_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("invulnerable save") {
        "Invulnerable Save".to_string()
    } else if lower.contains("damaged") {
        "Damaged".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reject_missing_forces() {
        assert!(matches!(parse(r#"{"roster": {}}"#), Err(RosterError::MissingForces)));
        assert!(matches!(parse(r#"{}"#), Err(RosterError::MissingForces)));
    }

    #[test]
    fn reject_invalid_json() {
        assert!(matches!(parse("not json"), Err(RosterError::Json(_))));
    }

    #[test]
    fn parse_empty_forces() {
        let units = parse(r#"{"roster": {"forces": [{}]}}"#).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn emphasis_is_upper_cased() {
        assert_eq!(
            format_abilities("Each time a ^^**Infantry^^** model attacks"),
            "Each time a INFANTRY model attacks"
        );
        assert_eq!(format_abilities("**^^vehicle^^** only"), "VEHICLE only");
        assert_eq!(format_abilities("plain text"), "plain text");
    }

    #[test]
    fn ability_names_are_canonicalized() {
        assert_eq!(ability_name("Invulnerable Save (4+)"), "Invulnerable Save");
        assert_eq!(ability_name("Damaged: 1-5 Wounds Remaining"), "Damaged");
        assert_eq!(ability_name("Oath of Moment"), "Oath of Moment");
    }

    #[test]
    fn unify_merges_by_name_and_dedups() {
        let first = Unit::new("Scouts")
            .with_profile("M", "6")
            .with_weapon(Weapon::new("Bolt pistol"))
            .with_ability(Ability::new("Infiltrators", "a"));
        let second = Unit::new("Scouts")
            .with_profile("M", "7")
            .with_weapon(Weapon::new("Bolt pistol").with("Range", "12"))
            .with_weapon(Weapon::new("Sniper rifle"))
            .with_ability(Ability::new("Infiltrators", "b"));
        let other = Unit::new("Captain");

        let units = unify_units(vec![first, other, second]);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].name, "Scouts");
        assert_eq!(units[1].name, "Captain");
        assert_eq!(units[0].profiles["M"], "6");
        let weapons: Vec<&str> = units[0].weapons.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(weapons, vec!["Bolt pistol", "Sniper rifle"]);
        assert!(units[0].weapons[0].characteristics.is_empty());
        assert_eq!(units[0].abilities.len(), 1);
        assert_eq!(units[0].abilities[0].description, "a");
    }
}
