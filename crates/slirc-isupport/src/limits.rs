//! Character sets and `chars:count` limit lists.
//!
//! `CHANLIMIT` and `MAXLIST` share the grammar `keys:count[,keys:count...]`
//! where each key is a run of characters treated as a set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::IntErrorKind;

/// An unordered set of single-character flags or prefixes.
pub type CharSet = BTreeSet<char>;

/// Collect the characters of `s` into a [`CharSet`].
pub fn charset(s: &str) -> CharSet {
    s.chars().collect()
}

/// Render a set as a plain string, in sorted order.
pub fn charset_str(set: &CharSet) -> String {
    set.iter().collect()
}

/// Parse a non-negative decimal count.
///
/// Values too large for a `u32` saturate to `u32::MAX`; anything that is not
/// a number returns `None`.
pub(crate) fn parse_count(s: &str) -> Option<u32> {
    match s.parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
        Err(_) => None,
    }
}

/// A parsed `chars:count` list.
///
/// Keys are character sets; two entries with equal sets are a duplicate even
/// if the characters were written in a different order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LimitMap {
    entries: BTreeMap<CharSet, u32>,
}

impl LimitMap {
    /// Parse a value like `#&:100,!:10` or `b:100,eI:50`.
    ///
    /// Returns `None` for an empty list, a missing `:`, an empty key, a zero
    /// or non-numeric count, or a repeated key set.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut entries = BTreeMap::new();
        for part in s.split(',') {
            let (keys, count) = part.trim().split_once(':')?;
            if keys.is_empty() {
                return None;
            }
            let count = parse_count(count.trim())?;
            if count == 0 {
                return None;
            }
            if entries.insert(charset(keys), count).is_some() {
                return None;
            }
        }
        Some(Self { entries })
    }

    /// Limit for the entry whose key set contains `c`.
    pub fn limit_for(&self, c: char) -> Option<u32> {
        self.entries
            .iter()
            .find(|(keys, _)| keys.contains(&c))
            .map(|(_, n)| *n)
    }

    /// Union of every key set.
    pub fn covered(&self) -> CharSet {
        self.entries.keys().flatten().copied().collect()
    }

    /// Iterate over key sets and their limits.
    pub fn iter(&self) -> impl Iterator<Item = (&CharSet, u32)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for LimitMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (keys, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", charset_str(keys), count)?;
        }
        Ok(())
    }
}
