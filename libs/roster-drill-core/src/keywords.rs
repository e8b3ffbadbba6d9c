//! Weapon keyword vocabulary and the tag list a user builds while answering.

/// Keywords offered as-is.
pub const KEYWORD_SUGGESTIONS: [&str; 17] = [
    "Assault",
    "Heavy",
    "Twin-Linked",
    "Lethal Hits",
    "Blast",
    "Pistol",
    "Devastating Wounds",
    "Precision",
    "Hazardous",
    "Torrent",
    "Ignores Cover",
    "Psychic",
    "Lance",
    "Indirect Fire",
    "Extra Attacks",
    "Conversion",
    "One Shot",
];

/// Keywords that take a parameter, e.g. `Rapid Fire 2` or `Anti-Infantry 4+`.
pub const SUFFIXED_KEYWORDS: [&str; 11] = [
    "Melta",
    "Rapid Fire",
    "Sustained Hits",
    "Anti-Beast",
    "Anti-Infantry",
    "Anti-Monster",
    "Anti-Vehicle",
    "Anti-Titanic",
    "Anti-Fly",
    "Anti-Character",
    "Anti-Psychic",
];

const PLACEHOLDER: &str = "[x]";

/// Every suggestion, with `[X]` standing in for suffixed parameters.
pub fn suggestions() -> Vec<String> {
    KEYWORD_SUGGESTIONS
        .iter()
        .map(|kw| kw.to_string())
        .chain(SUFFIXED_KEYWORDS.iter().map(|kw| format!("{} [X]", kw)))
        .collect()
}

/// The suffixed keyword `value` starts with, ignoring ASCII case.
pub fn suffixed_base(value: &str) -> Option<&'static str> {
    SUFFIXED_KEYWORDS.iter().copied().find(|base| {
        value
            .get(..base.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(base))
    })
}

fn has_placeholder(value: &str) -> bool {
    value.to_lowercase().contains(PLACEHOLDER)
}

/// Keyword tags entered for one weapon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    tags: Vec<String>,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    /// Add a tag. Returns false when nothing changed.
    ///
    /// Unresolved `[X]` placeholders are refused. A parameterized keyword
    /// replaces an existing tag with the same base, so only one
    /// `Sustained Hits N` is ever held. Case-insensitive duplicates are
    /// ignored.
    pub fn add(&mut self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() || has_placeholder(trimmed) {
            return false;
        }

        if let Some(base) = suffixed_base(trimmed) {
            if let Some(existing) = self.tags.iter_mut().find(|t| suffixed_base(t.as_str()) == Some(base)) {
                *existing = trimmed.to_string();
                return true;
            }
        }

        if self.tags.iter().any(|t| t.eq_ignore_ascii_case(trimmed)) {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }

    /// Remove a tag, ignoring case.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| !t.eq_ignore_ascii_case(value.trim()));
        self.tags.len() != before
    }

    /// Resolve typed text to the tag it stands for: a parameterized keyword
    /// with its parameter, an exact suggestion, or the first suggestion
    /// starting with the text. A bare suffixed keyword without its
    /// parameter resolves to nothing.
    pub fn complete(&self, input: &str) -> Option<String> {
        let value = input.trim();
        if value.is_empty() {
            return None;
        }

        if let Some(base) = suffixed_base(value) {
            if value.len() == base.len() {
                return None;
            }
            return Some(format!("{}{}", base, &value[base.len()..]));
        }

        let all = suggestions();
        let lower = value.to_lowercase();
        all.iter()
            .find(|kw| kw.to_lowercase() == lower)
            .or_else(|| all.iter().find(|kw| kw.to_lowercase().starts_with(&lower)))
            .cloned()
    }

    /// Resolve `input` and add the result.
    pub fn enter(&mut self, input: &str) -> bool {
        match self.complete(input) {
            Some(tag) => self.add(&tag),
            None => false,
        }
    }

    /// Suggestions not overlapping any tag already held.
    pub fn available_suggestions(&self) -> Vec<String> {
        let used: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        suggestions()
            .into_iter()
            .filter(|kw| {
                let kw_lower = kw.to_lowercase();
                !used
                    .iter()
                    .any(|u| u.contains(&kw_lower) || kw_lower.contains(u.as_str()))
            })
            .collect()
    }
}
