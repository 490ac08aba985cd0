//! The `CHANMODES` token: channel modes split by parameter behaviour.

use std::fmt;
use std::ops::Index;

use crate::limits::{charset, charset_str, CharSet};

/// How a channel mode takes its parameter.
///
/// The discriminant is the group's position in `CHANMODES`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Type A: list modes such as bans. Always take a parameter; may be
    /// queried without one.
    List = 0,
    /// Type B: always take a parameter (e.g. `k`).
    ParamAlways = 1,
    /// Type C: take a parameter only when set (e.g. `l`).
    ParamAddOnly = 2,
    /// Type D: never take a parameter (e.g. `n`, `t`).
    NoParam = 3,
}

impl ModeKind {
    /// All kinds, in token order.
    pub const ALL: [ModeKind; 4] = [
        ModeKind::List,
        ModeKind::ParamAlways,
        ModeKind::ParamAddOnly,
        ModeKind::NoParam,
    ];
}

/// Parsed `CHANMODES` value, e.g. `beI,k,l,imnpst`.
///
/// Always holds exactly four groups. Groups may be empty and are not
/// required to be disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChanModes {
    groups: [CharSet; 4],
}

impl ChanModes {
    /// Parse a `CHANMODES` value.
    ///
    /// Surrounding whitespace is ignored. Returns `None` unless the value
    /// splits into exactly four comma-separated groups.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split(',');
        let groups = [
            charset(parts.next()?),
            charset(parts.next()?),
            charset(parts.next()?),
            charset(parts.next()?),
        ];
        if parts.next().is_some() {
            return None;
        }
        Some(Self { groups })
    }

    /// Build from four mode strings, one per kind.
    pub fn new(list: &str, param_always: &str, param_add_only: &str, no_param: &str) -> Self {
        Self {
            groups: [
                charset(list),
                charset(param_always),
                charset(param_add_only),
                charset(no_param),
            ],
        }
    }

    /// The modes of one kind.
    #[inline]
    pub fn group(&self, kind: ModeKind) -> &CharSet {
        &self.groups[kind as usize]
    }

    /// The type A (list) modes.
    #[inline]
    pub fn list_modes(&self) -> &CharSet {
        self.group(ModeKind::List)
    }

    /// The first kind whose group contains `mode`.
    pub fn kind_of(&self, mode: char) -> Option<ModeKind> {
        ModeKind::ALL
            .into_iter()
            .find(|kind| self.group(*kind).contains(&mode))
    }
}

impl Index<ModeKind> for ChanModes {
    type Output = CharSet;

    fn index(&self, kind: ModeKind) -> &CharSet {
        self.group(kind)
    }
}

impl fmt::Display for ChanModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            charset_str(&self.groups[0]),
            charset_str(&self.groups[1]),
            charset_str(&self.groups[2]),
            charset_str(&self.groups[3])
        )
    }
}
