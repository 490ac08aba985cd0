//! Names of the ISUPPORT tokens the store understands.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownCapability;

/// An ISUPPORT token tracked by [`ServerCapabilities`](crate::ServerCapabilities).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// `CASEMAPPING` - comparison rule for nick and channel names.
    CaseMapping,
    /// `CHANTYPES` - allowed channel name prefixes.
    ChanTypes,
    /// `CHANLIMIT` - how many channels of each prefix a client may join.
    ChanLimit,
    /// `CHANMODES` - the four channel mode kinds.
    ChanModes,
    /// `CHANNELLEN` - maximum channel name length.
    ChannelLen,
    /// `EXCEPTS` - ban exception list mode.
    Excepts,
    /// `INVEX` - invite exception list mode.
    Invex,
    /// `KICKLEN` - maximum kick reason length.
    KickLen,
    /// `MAXLIST` - entry limits for list modes.
    MaxList,
}

impl Capability {
    /// Every capability, in the order they are rendered.
    pub const ALL: [Capability; 9] = [
        Capability::CaseMapping,
        Capability::ChanTypes,
        Capability::ChanLimit,
        Capability::ChanModes,
        Capability::ChannelLen,
        Capability::Excepts,
        Capability::Invex,
        Capability::KickLen,
        Capability::MaxList,
    ];

    /// The token name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseMapping => "CASEMAPPING",
            Self::ChanTypes => "CHANTYPES",
            Self::ChanLimit => "CHANLIMIT",
            Self::ChanModes => "CHANMODES",
            Self::ChannelLen => "CHANNELLEN",
            Self::Excepts => "EXCEPTS",
            Self::Invex => "INVEX",
            Self::KickLen => "KICKLEN",
            Self::MaxList => "MAXLIST",
        }
    }

    /// Whether a server may withdraw this token (`-KEY`), returning the field
    /// to unset.
    pub fn is_resettable(&self) -> bool {
        matches!(
            self,
            Self::CaseMapping | Self::ChanTypes | Self::ChannelLen | Self::Excepts | Self::Invex
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = UnknownCapability;

    /// Token names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCapability(s.to_owned()))
    }
}
