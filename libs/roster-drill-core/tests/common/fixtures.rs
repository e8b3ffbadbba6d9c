//! Test fixtures: small catalogs and roster exports.

use serde_json::{json, Value};

use roster_drill_core::{Unit, Weapon};

/// Generate `count` distinct units with a simple stat line.
pub fn sample_units(count: usize) -> Vec<Unit> {
    (0..count)
        .map(|i| {
            Unit::new(format!("Unit {}", i + 1))
                .with_profile("M", "6")
                .with_profile("SV", format!("{}+", 2 + i % 4))
                .with_weapon(Weapon::new(format!("Weapon {}", i + 1)).with("Range", "24").with("BS/WS", "3"))
        })
        .collect()
}

/// Two units sharing a weapon name with different stat lines.
pub fn bolt_rifle_variants() -> Vec<Unit> {
    vec![
        Unit::new("Intercessors").with_weapon(
            Weapon::new("Bolt Rifle")
                .with("Range", "24")
                .with("BS/WS", "3")
                .with("AP", "1")
                .with("Keywords", vec!["Assault".to_string(), "Heavy".to_string()]),
        ),
        Unit::new("Sternguard").with_weapon(
            Weapon::new("Bolt Rifle")
                .with("Range", "30")
                .with("BS/WS", "2")
                .with("AP", "2")
                .with("Keywords", vec!["Heavy".to_string()]),
        ),
    ]
}

fn characteristic(name: &str, text: &str) -> Value {
    json!({ "name": name, "$text": text })
}

/// A roster export with a squad (nested models carrying wargear), a lone
/// character and a duplicate squad in a second force.
pub fn roster_export() -> String {
    let squad = json!({
        "type": "unit",
        "name": "Intercessor Squad",
        "profiles": [
            {
                "typeName": "Abilities",
                "name": "Oath of Moment",
                "characteristics": [characteristic("Description", "Re-roll hits against ^^**Infantry^^**")]
            },
            {
                "typeName": "Abilities",
                "name": "Leader",
                "characteristics": [characteristic("Description", "ignored")]
            },
            {
                "typeName": "Abilities",
                "name": "Invulnerable Save (4+)",
                "characteristics": [characteristic("Description", "4+")]
            }
        ],
        "selections": [
            {
                "type": "model",
                "name": "Intercessor Sergeant",
                "profiles": [
                    {
                        "typeName": "Unit",
                        "name": "Intercessor",
                        "characteristics": [
                            characteristic("M", "6\""),
                            characteristic("T", "4"),
                            characteristic("SV", "3+"),
                            characteristic("W", "2"),
                            characteristic("LD", "6+"),
                            characteristic("OC", "2")
                        ]
                    }
                ],
                "selections": [
                    {
                        "type": "upgrade",
                        "name": "Bolt rifle",
                        "profiles": [
                            {
                                "typeName": "Ranged Weapons",
                                "name": "Bolt rifle",
                                "characteristics": [
                                    characteristic("Range", "24\""),
                                    characteristic("A", "2"),
                                    characteristic("BS", "3+"),
                                    characteristic("S", "4"),
                                    characteristic("AP", "-1"),
                                    characteristic("D", "1"),
                                    characteristic("Keywords", "Heavy, Assault")
                                ]
                            }
                        ]
                    },
                    {
                        "type": "upgrade",
                        "name": "Close combat weapon",
                        "profiles": [
                            {
                                "typeName": "Melee Weapons",
                                "name": "Close combat weapon",
                                "characteristics": [
                                    characteristic("Range", "Melee"),
                                    characteristic("A", "3"),
                                    characteristic("WS", "3+"),
                                    characteristic("S", "4"),
                                    characteristic("AP", "0"),
                                    characteristic("D", "1"),
                                    characteristic("Keywords", "-")
                                ]
                            }
                        ]
                    }
                ]
            }
        ]
    });

    let captain = json!({
        "type": "model",
        "name": "Captain",
        "profiles": [
            {
                "typeName": "Unit",
                "name": "Captain",
                "characteristics": [characteristic("M", "6\""), characteristic("SV", "3+")]
            }
        ]
    });

    let duplicate_squad = json!({
        "type": "unit",
        "name": "Intercessor Squad",
        "selections": [
            {
                "type": "upgrade",
                "name": "Bolt pistol",
                "profiles": [
                    {
                        "typeName": "Ranged Weapons",
                        "name": "Bolt pistol",
                        "characteristics": [
                            characteristic("Range", "12\""),
                            characteristic("BS", "3+"),
                            characteristic("Keywords", "Pistol")
                        ]
                    }
                ]
            }
        ]
    });

    json!({
        "roster": {
            "forces": [
                { "selections": [squad, captain] },
                { "selections": [duplicate_squad] }
            ]
        }
    })
    .to_string()
}
