//! Markings: the token distribution of a net at one point of a playout.
use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

/// A multiset over place names.
///
/// Places holding zero tokens are never stored, so two markings compare equal exactly when every
/// place carries the same number of tokens in both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Marking(BTreeMap<String, u32>);

impl Marking {
    /// An empty marking (no tokens anywhere).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens currently in `place`.
    #[must_use]
    pub fn tokens(&self, place: &str) -> u32 {
        self.0.get(place).copied().unwrap_or(0)
    }

    /// Put `count` additional tokens into `place`.
    pub fn add(&mut self, place: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.0.entry(place.to_owned()).or_insert(0) += count;
    }

    /// Take `count` tokens out of `place`, returning `false` (and leaving the marking untouched) if
    /// the place does not hold enough tokens.
    pub fn remove(&mut self, place: &str, count: u32) -> bool {
        let available = self.tokens(place);
        if available < count {
            return false;
        }
        if available == count {
            self.0.remove(place);
        } else {
            self.0.insert(place.to_owned(), available - count);
        }
        true
    }

    /// Places with at least one token, with their token counts, ordered by place name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(place, count)| (place.as_str(), *count))
    }

    /// Whether no place holds a token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of tokens over all places.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.0.values().map(|c| u64::from(*c)).sum()
    }
}

impl From<BTreeMap<String, u32>> for Marking {
    fn from(value: BTreeMap<String, u32>) -> Self {
        Self(value.into_iter().filter(|(_, count)| *count > 0).collect())
    }
}

impl From<Marking> for BTreeMap<String, u32> {
    fn from(value: Marking) -> Self {
        value.0
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Marking {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut marking = Self::new();
        for (place, count) in iter {
            marking.add(&place.into(), count);
        }
        marking
    }
}

impl fmt::Display for Marking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().map(|(place, count)| format!("{place}:{count}")).join(", "))
    }
}
