//! Column order for rendering a card, and the fields a card asks for.

use crate::session::Session;
use crate::types::{FieldId, Unit, Weapon, RANGE};
use std::collections::BTreeSet;

/// Unit stat columns in display order.
pub const PROFILE_ORDER: [&str; 6] = ["M", "SV", "T", "W", "LD", "OC"];

/// Weapon columns in display order.
pub const WEAPON_ORDER: [&str; 7] = ["Range", "BS/WS", "A", "S", "AP", "D", "Keywords"];

/// Profile keys of `unit`, canonical columns first.
pub fn profile_columns(unit: &Unit) -> Vec<String> {
    let mut keys: Vec<String> = unit.profiles.keys().cloned().collect();
    keys.sort_by_key(|key| rank(&PROFILE_ORDER, key));
    keys
}

/// Union of the weapons' characteristic keys, canonical columns first and
/// the rest alphabetically.
pub fn weapon_columns(weapons: &[Weapon]) -> Vec<String> {
    let mut keys: Vec<String> = weapons
        .iter()
        .flat_map(|w| w.characteristics.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    keys.sort_by_key(|key| rank(&WEAPON_ORDER, key));
    keys
}

/// Fields the active card should ask for, in display order.
///
/// Melee range is never asked, and neither is a weapon value the user
/// already proved on an earlier card.
pub fn quizzable_fields(session: &Session) -> Vec<FieldId> {
    let Some(unit) = session.current_card() else {
        return Vec::new();
    };

    let mut fields: Vec<FieldId> = profile_columns(unit)
        .into_iter()
        .map(FieldId::profile)
        .collect();

    let columns = weapon_columns(&unit.weapons);
    for (index, weapon) in unit.weapons.iter().enumerate() {
        for key in &columns {
            if key == RANGE && weapon.is_melee() {
                continue;
            }
            if session.known_value(weapon, key).is_some() {
                continue;
            }
            fields.push(FieldId::weapon(index, key.clone()));
        }
    }
    fields
}

fn rank(order: &[&str], key: &str) -> usize {
    order.iter().position(|k| *k == key).unwrap_or(order.len())
}
