//! Answer matching for typed characteristics and keyword tags.

use crate::normalize::normalize;
use crate::types::{Answer, FieldValue, KEYWORDS, RANGE};
use std::collections::HashSet;

/// Compare a typed scalar value to the stored one.
///
/// Both sides are trimmed and normalized for `key`, then compared ignoring
/// case. Melee range is never quizzed, so it always matches.
pub fn scalar_matches(key: &str, correct: &str, typed: &str) -> bool {
    let correct = correct.trim();
    if key == RANGE && correct.eq_ignore_ascii_case("melee") {
        return true;
    }

    let correct_normalized = normalize(key, correct).to_lowercase();
    let typed_normalized = normalize(key, typed.trim()).to_lowercase();
    correct_normalized == typed_normalized
}

/// Compare user keyword tags to the correct tags, ignoring case, order and
/// surrounding whitespace.
///
/// Every user tag must be one of the correct tags, and the user must give
/// as many tags as the correct list holds, counted either as entered or
/// with the user's repeats folded. Repeated user tags are therefore not rejected:
/// `["Assault", "Assault"]` matches both `["Assault"]` and
/// `["Assault", "Heavy"]`. Parameterized keywords such as `Anti-Infantry 4+`
/// compare as full literal strings.
pub fn keywords_match<C, U>(correct: &[C], user: &[U]) -> bool
where
    C: AsRef<str>,
    U: AsRef<str>,
{
    let correct_tags: Vec<String> = correct.iter().map(|t| fold_tag(t.as_ref())).collect();
    let user_tags: Vec<String> = user.iter().map(|t| fold_tag(t.as_ref())).collect();

    if correct_tags.is_empty() && user_tags.is_empty() {
        return true;
    }

    let correct_set: HashSet<&str> = correct_tags.iter().map(String::as_str).collect();
    if !user_tags.iter().all(|t| correct_set.contains(t.as_str())) {
        return false;
    }

    let user_set: HashSet<&str> = user_tags.iter().map(String::as_str).collect();
    user_tags.len() == correct_tags.len() || user_set.len() == correct_tags.len()
}

/// Split a comma-separated keyword string into tags. `-` means no keywords.
pub fn split_keywords(raw: &str) -> Vec<String> {
    normalize(KEYWORDS, raw.trim())
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tags held by a stored keyword value.
pub fn stored_tags(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::Tags(tags)) => tags.clone(),
        Some(FieldValue::Text(raw)) => split_keywords(raw),
        None => Vec::new(),
    }
}

/// Tags carried by a keyword answer.
pub fn answer_tags(answer: &Answer) -> Vec<String> {
    match answer {
        Answer::Tags(tags) => tags.clone(),
        Answer::Text(raw) => split_keywords(raw),
    }
}

fn fold_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn empty_keyword_lists_match() {
        assert!(keywords_match(&NONE, &NONE));
    }

    #[test]
    fn missing_keywords_do_not_match() {
        assert!(!keywords_match(&["Assault"], &NONE));
        assert!(!keywords_match(&NONE, &["Assault"]));
    }

    #[test]
    fn keyword_order_and_case_are_ignored() {
        assert!(keywords_match(&["Assault", "Heavy"], &["heavy", "ASSAULT"]));
        assert!(keywords_match(&["Lethal Hits"], &["  lethal hits "]));
    }

    #[test]
    fn duplicate_user_tags_are_accepted() {
        assert!(keywords_match(&["Assault"], &["Assault", "Assault"]));
        assert!(keywords_match(&["Assault"], &["assault", "ASSAULT "]));
        assert!(keywords_match(&["Assault", "Heavy"], &["assault", "assault"]));
    }

    #[test]
    fn duplicate_correct_tags_need_as_many_answers() {
        assert!(!keywords_match(&["Assault", "Assault"], &["Assault"]));
        assert!(keywords_match(&["Assault", "Assault"], &["Assault", "Assault"]));
        assert!(!keywords_match(&["Assault", "Heavy"], &["Assault", "Assault", "Assault"]));
    }

    #[test]
    fn suffixed_keywords_compare_literally() {
        assert!(keywords_match(&["Anti-Infantry 4+"], &["anti-infantry 4+"]));
        assert!(!keywords_match(&["Anti-Infantry 4+"], &["Anti-Infantry"]));
        assert!(!keywords_match(&["Anti-Infantry 4+"], &["Anti-Infantry 3+"]));
    }

    #[test]
    fn wrong_keyword_fails() {
        assert!(!keywords_match(&["Assault", "Heavy"], &["Assault", "Blast"]));
    }

    #[test]
    fn scalar_match_normalizes_both_sides() {
        assert!(scalar_matches("SV", "3+", "3"));
        assert!(scalar_matches("SV", "3", "3+"));
        assert!(scalar_matches("Range", "24\"", " 24 "));
        assert!(!scalar_matches("SV", "3+", "4+"));
        assert!(scalar_matches("D", "D6", "d6"));
        assert!(!scalar_matches("D", "D6", "D3"));
    }

    #[test]
    fn melee_range_always_matches() {
        assert!(scalar_matches("Range", "Melee", ""));
        assert!(scalar_matches("Range", "melee", "12"));
    }

    #[test]
    fn split_keywords_handles_marker_and_spacing() {
        assert_eq!(split_keywords("-"), Vec::<String>::new());
        assert_eq!(split_keywords(""), Vec::<String>::new());
        assert_eq!(
            split_keywords("Assault, Heavy ,, Lethal Hits"),
            vec!["Assault", "Heavy", "Lethal Hits"]
        );
    }
}
