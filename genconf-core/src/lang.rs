//! Language tags and ordered language sets

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::GenconfError;

/// A normalized language identifier such as `en`, `ja` or `zh-tw`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageTag(String);

fn tag_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{1,8})*$").expect("static language tag pattern")
    })
}

impl LanguageTag {
    /// Normalize a locale-ish string (`ja_JP.UTF-8`, `sr@latin`, `C`) into a tag.
    pub fn parse(raw: &str) -> Result<Self, GenconfError> {
        let trimmed = raw.trim();
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default();

        let normalized = match base {
            "C" | "POSIX" => "en".to_string(),
            other => other.replace('_', "-").to_ascii_lowercase(),
        };

        if !tag_shape().is_match(&normalized) {
            return Err(GenconfError::InvalidLanguage(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageTag {
    type Err = GenconfError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of requested languages, iterated in lexicographic tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSet {
    tags: BTreeSet<LanguageTag>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning false when it was already present.
    pub fn insert(&mut self, tag: LanguageTag) -> bool {
        self.tags.insert(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageTag> {
        self.tags.iter()
    }

    /// Parse every raw string, failing on the first invalid tag.
    pub fn parse_all<I, S>(raw: I) -> Result<Self, GenconfError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| LanguageTag::parse(s.as_ref()))
            .collect()
    }
}

impl FromIterator<LanguageTag> for LanguageSet {
    fn from_iter<T: IntoIterator<Item = LanguageTag>>(iter: T) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a LanguageTag;
    type IntoIter = std::collections::btree_set::Iter<'a, LanguageTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
