//! IRC case-mapping rules.
//!
//! Servers name their comparison rule in `CASEMAPPING`. Only `ascii` is
//! implemented; the RFC 1459 variants are recognised so they can be refused
//! explicitly rather than mistaken for garbage.

use std::fmt;

/// A `CASEMAPPING` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseMapping {
    /// Only `A-Z` fold to `a-z`.
    #[default]
    Ascii,
    /// ASCII plus `[]\~` folding to `{}|^`.
    Rfc1459,
    /// ASCII plus `[]\` folding to `{}|`.
    StrictRfc1459,
}

impl CaseMapping {
    /// Recognise a token value. Matching is case-sensitive.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "ascii" => Some(Self::Ascii),
            "rfc1459" => Some(Self::Rfc1459),
            "strict-rfc1459" => Some(Self::StrictRfc1459),
            _ => None,
        }
    }

    /// The token value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
            Self::StrictRfc1459 => "strict-rfc1459",
        }
    }

    /// Whether names can be compared under this rule.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Ascii)
    }
}

impl fmt::Display for CaseMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a single character to lowercase under the `ascii` mapping.
#[inline]
pub const fn ascii_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Convert a string to lowercase under the `ascii` mapping.
///
/// Non-ASCII characters are left untouched.
pub fn ascii_to_lower(s: &str) -> String {
    s.chars().map(ascii_lower_char).collect()
}

/// Compare two names under the `ascii` mapping.
pub fn ascii_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| ascii_lower_char(ca) == ascii_lower_char(cb))
}
