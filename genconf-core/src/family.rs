//! Family-name deduplication
//!
//! Family names compare equal when they match after dropping every blank
//! character and folding case, so `"Noto Sans"`, `"noto  sans"` and
//! `"NotoSans"` are one family.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Key normalization used by [`FamilyMap`].
pub type Normalizer = fn(&str) -> String;

/// Fold case and drop blanks.
pub fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First-wins map keyed by normalized family name.
///
/// Entries are never replaced or removed.
#[derive(Debug, Clone)]
pub struct FamilyMap<V> {
    normalize: Normalizer,
    entries: HashMap<String, V>,
}

impl<V> Default for FamilyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FamilyMap<V> {
    pub fn new() -> Self {
        Self::with_normalizer(normalize_family)
    }

    pub fn with_normalizer(normalize: Normalizer) -> Self {
        Self {
            normalize,
            entries: HashMap::new(),
        }
    }

    /// Record `value` for `family` unless an equal family is already present.
    ///
    /// Returns true when the family was new.
    pub fn insert_first(&mut self, family: &str, value: V) -> bool {
        match self.entries.entry((self.normalize)(family)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, family: &str) -> Option<&V> {
        self.entries.get(&(self.normalize)(family))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
