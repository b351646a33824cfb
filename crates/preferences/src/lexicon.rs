//! Category → keyword table and the message scanner.

use serde::Serialize;

const DEFAULT_LEXICON: &[(&str, &[&str])] = &[
    ("electronics", &["phone", "laptop", "computer", "gadget", "tech"]),
    ("clothing", &["shirt", "dress", "shoes", "jacket", "fashion"]),
    ("books", &["book", "novel", "reading", "author"]),
    ("sports", &["fitness", "exercise", "sports", "workout"]),
];

/// One detected `(category, keyword)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceMatch {
    pub category: String,
    pub keyword: String,
}

impl PreferenceMatch {
    pub fn new(category: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            keyword: keyword.into(),
        }
    }
}

/// Ordered categories, each with an ordered keyword list. Keywords are lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceLexicon {
    categories: Vec<(String, Vec<String>)>,
}

impl PreferenceLexicon {
    /// Builds a lexicon from `(category, keywords)` pairs; keywords are lowercased.
    pub fn new<C, K>(categories: impl IntoIterator<Item = (C, Vec<K>)>) -> Self
    where
        C: Into<String>,
        K: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(c, ks)| {
                    (
                        c.into(),
                        ks.iter().map(|k| k.as_ref().to_lowercase()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(c, _)| c.as_str())
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, ks)| ks.as_slice())
    }

    /// Case-insensitive substring scan. For each category, in lexicon order, yields the first
    /// keyword of that category's list that occurs in `message`; at most one per category.
    pub fn scan(&self, message: &str) -> Vec<PreferenceMatch> {
        let lowered = message.to_lowercase();
        self.categories
            .iter()
            .filter_map(|(category, keywords)| {
                keywords
                    .iter()
                    .find(|k| lowered.contains(k.as_str()))
                    .map(|k| PreferenceMatch::new(category.clone(), k.clone()))
            })
            .collect()
    }
}

impl Default for PreferenceLexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_LEXICON
                .iter()
                .map(|(category, keywords)| (*category, keywords.to_vec())),
        )
    }
}
