//! Canonical forms for raw characteristic values.
//!
//! Roster exports and typed guesses disagree on punctuation (`3+`, `24"`,
//! `-1`), so numeric columns compare on their digits only.

use crate::types::{KEYWORDS, RANGE};

/// Columns compared on their ASCII digits only.
pub const NUMERIC_FIELDS: [&str; 7] = ["Range", "AP", "BS/WS", "M", "SV", "LD", "user"];

/// Canonicalize `raw` for the column `key`. Unknown columns pass through.
pub fn normalize(key: &str, raw: &str) -> String {
    if key == RANGE && raw.eq_ignore_ascii_case("melee") {
        return "Melee".to_string();
    }
    if NUMERIC_FIELDS.contains(&key) {
        return raw.chars().filter(char::is_ascii_digit).collect();
    }
    if key == KEYWORDS && raw == "-" {
        return String::new();
    }
    raw.to_string()
}
