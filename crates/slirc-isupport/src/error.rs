//! Error types for capability validation.
//!
//! Every rejected update falls into exactly one [`ErrorKind`], so callers can
//! decide per token whether to disconnect, warn or carry on.

use thiserror::Error;

use crate::capability::Capability;

/// Convenience type alias for Results using [`CapabilityError`].
pub type Result<T, E = CapabilityError> = std::result::Result<T, E>;

/// The closed set of reasons a capability update can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorKind {
    /// The raw value does not match the token's grammar.
    Format,
    /// The value is well-formed but contradicts another accepted capability.
    Logic,
    /// The value is protocol-legal but not implemented here.
    Unsupported,
}

impl ErrorKind {
    /// Short lowercase label, used as a structured logging field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Logic => "logic",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A rejected capability update.
///
/// The store is left exactly as it was before the failed call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// Malformed value.
    #[error("invalid value {value:?} for {capability}")]
    Format {
        /// The capability being set.
        capability: Capability,
        /// The raw value as received.
        value: String,
    },

    /// Value conflicts with the rest of the advertised capabilities.
    #[error("{capability}={value}: {conflict}")]
    Logic {
        /// The capability whose validation failed.
        capability: Capability,
        /// The value that failed, rendered in token syntax.
        value: String,
        /// Which cross-field constraint was violated.
        conflict: Conflict,
    },

    /// Syntactically valid but unimplemented value.
    #[error("{capability}={value} is not supported")]
    Unsupported {
        /// The capability being set.
        capability: Capability,
        /// The raw value as received.
        value: String,
    },
}

impl CapabilityError {
    pub(crate) fn format(capability: Capability, value: &str) -> Self {
        Self::Format {
            capability,
            value: value.to_owned(),
        }
    }

    pub(crate) fn logic(capability: Capability, value: impl ToString, conflict: Conflict) -> Self {
        Self::Logic {
            capability,
            value: value.to_string(),
            conflict,
        }
    }

    pub(crate) fn unsupported(capability: Capability, value: &str) -> Self {
        Self::Unsupported {
            capability,
            value: value.to_owned(),
        }
    }

    /// Which of the three error classes this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::Logic { .. } => ErrorKind::Logic,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// The capability whose validation failed.
    ///
    /// For a rolled-back `CHANMODES` update this names the dependent
    /// capability that no longer held, not `CHANMODES` itself.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Format { capability, .. }
            | Self::Logic { capability, .. }
            | Self::Unsupported { capability, .. } => *capability,
        }
    }

    /// The offending value.
    pub fn value(&self) -> &str {
        match self {
            Self::Format { value, .. }
            | Self::Logic { value, .. }
            | Self::Unsupported { value, .. } => value,
        }
    }
}

/// Cross-capability constraint violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Conflict {
    /// A `CHANLIMIT` key uses a prefix missing from `CHANTYPES`.
    #[error("channel prefix(es) {prefixes:?} not defined in CHANTYPES {chantypes:?}")]
    UnknownPrefix {
        /// The offending key set.
        prefixes: String,
        /// The channel prefixes in effect.
        chantypes: String,
    },

    /// An `EXCEPTS`/`INVEX` flag that is not a list (type A) mode.
    #[error("mode {flag:?} is not a list mode according to CHANMODES (list modes: {list_modes:?})")]
    NotListMode {
        /// The offending flag.
        flag: char,
        /// The type A modes in effect.
        list_modes: String,
    },

    /// `MAXLIST` does not cover exactly the type A modes.
    #[error("MAXLIST covers {covered:?} but CHANMODES list modes are {list_modes:?}")]
    ListCoverage {
        /// Union of all `MAXLIST` keys.
        covered: String,
        /// The type A modes in effect.
        list_modes: String,
    },
}

/// A token name that is not one of the supported capabilities.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(
    /// The unrecognised token name.
    pub String,
);
