//! Typed capability values.

use std::fmt;

use crate::capability::Capability;
use crate::casemap::CaseMapping;
use crate::chanmodes::ChanModes;
use crate::limits::{charset_str, CharSet, LimitMap};

/// The validated value of one capability, as returned by
/// [`ServerCapabilities::set`](crate::ServerCapabilities::set) and
/// [`ServerCapabilities::get`](crate::ServerCapabilities::get).
///
/// `Display` renders the value in token syntax, so `KEY=<value>` can be
/// sent back through `set` unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapabilityValue {
    /// `CASEMAPPING`
    CaseMapping(CaseMapping),
    /// `CHANTYPES`
    ChanTypes(CharSet),
    /// `CHANLIMIT`
    ChanLimit(LimitMap),
    /// `CHANMODES`
    ChanModes(ChanModes),
    /// `CHANNELLEN`; `None` means unlimited.
    ChannelLen(Option<u32>),
    /// `EXCEPTS`
    Excepts(char),
    /// `INVEX`
    Invex(char),
    /// `KICKLEN`; `None` means unlimited.
    KickLen(Option<u32>),
    /// `MAXLIST`
    MaxList(LimitMap),
}

impl CapabilityValue {
    /// The capability this value belongs to.
    pub fn capability(&self) -> Capability {
        match self {
            Self::CaseMapping(_) => Capability::CaseMapping,
            Self::ChanTypes(_) => Capability::ChanTypes,
            Self::ChanLimit(_) => Capability::ChanLimit,
            Self::ChanModes(_) => Capability::ChanModes,
            Self::ChannelLen(_) => Capability::ChannelLen,
            Self::Excepts(_) => Capability::Excepts,
            Self::Invex(_) => Capability::Invex,
            Self::KickLen(_) => Capability::KickLen,
            Self::MaxList(_) => Capability::MaxList,
        }
    }
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseMapping(m) => fmt::Display::fmt(m, f),
            Self::ChanTypes(set) => f.write_str(&charset_str(set)),
            Self::ChanLimit(map) | Self::MaxList(map) => fmt::Display::fmt(map, f),
            Self::ChanModes(modes) => fmt::Display::fmt(modes, f),
            Self::ChannelLen(len) | Self::KickLen(len) => match len {
                Some(n) => write!(f, "{}", n),
                None => Ok(()),
            },
            Self::Excepts(c) | Self::Invex(c) => write!(f, "{}", c),
        }
    }
}
