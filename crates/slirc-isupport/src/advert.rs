//! Feeding `RPL_ISUPPORT` parameters into a store.
//!
//! The caller extracts the 005 parameter list from the wire message; this
//! module splits it into entries, applies them to a [`ServerCapabilities`]
//! and decides per rejected entry what to do via a [`Policy`].

use tracing::{debug, trace, warn};

use crate::capability::Capability;
use crate::error::{CapabilityError, ErrorKind};
use crate::store::ServerCapabilities;

/// One parameter from an ISUPPORT line.
///
/// - `KEY` and `KEY=VALUE` set a capability (a bare key has an empty value)
/// - `-KEY` withdraws a previously advertised capability
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IsupportEntry<'a> {
    /// `KEY` or `KEY=VALUE`.
    Set {
        /// The token key (e.g. `CHANTYPES`).
        key: &'a str,
        /// Everything after the first `=`, or empty.
        value: &'a str,
    },
    /// `-KEY`.
    Negate {
        /// The token key without the leading `-`.
        key: &'a str,
    },
}

impl<'a> IsupportEntry<'a> {
    /// The token key.
    pub fn key(&self) -> &'a str {
        match self {
            Self::Set { key, .. } | Self::Negate { key } => *key,
        }
    }
}

/// Split ISUPPORT parameters into entries.
///
/// The caller passes the parameters after the target nickname. Parsing stops
/// at the first parameter starting with `:` (the trailing "are supported by
/// this server" text); empty parameters are skipped.
///
/// # Example
///
/// ```
/// use slirc_isupport::advert::{parse_params, IsupportEntry};
///
/// let entries = parse_params(&["CHANTYPES=#", "EXCEPTS", "-INVEX", ":are supported"]);
/// assert_eq!(entries.len(), 3);
/// assert_eq!(entries[1], IsupportEntry::Set { key: "EXCEPTS", value: "" });
/// assert_eq!(entries[2], IsupportEntry::Negate { key: "INVEX" });
/// ```
pub fn parse_params<'a>(params: &[&'a str]) -> Vec<IsupportEntry<'a>> {
    let mut entries = Vec::with_capacity(params.len());
    for &p in params {
        if p.starts_with(':') {
            break;
        }
        if p.is_empty() {
            continue;
        }
        if let Some(key) = p.strip_prefix('-') {
            entries.push(IsupportEntry::Negate { key });
            continue;
        }
        let (key, value) = p.split_once('=').unwrap_or((p, ""));
        entries.push(IsupportEntry::Set { key, value });
    }
    entries
}

/// What to do with an entry the store rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Drop the entry silently (logged at debug level).
    Ignore,
    /// Drop the entry and log a warning.
    Warn,
    /// Stop applying and return the error.
    Abort,
}

/// Per-[`ErrorKind`] handling of rejected entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policy {
    /// Malformed values.
    pub format: Action,
    /// Values contradicting other capabilities.
    pub logic: Action,
    /// Valid but unimplemented values.
    pub unsupported: Action,
}

impl Default for Policy {
    /// Warn on bad values, abort on an unsupported case mapping: names could
    /// not be compared correctly on such a server.
    fn default() -> Self {
        Self {
            format: Action::Warn,
            logic: Action::Warn,
            unsupported: Action::Abort,
        }
    }
}

impl Policy {
    /// A policy that applies one action to every kind of error.
    pub fn uniform(action: Action) -> Self {
        Self {
            format: action,
            logic: action,
            unsupported: action,
        }
    }

    /// The action configured for `kind`.
    pub fn action_for(&self, kind: ErrorKind) -> Action {
        match kind {
            ErrorKind::Format => self.format,
            ErrorKind::Logic => self.logic,
            ErrorKind::Unsupported => self.unsupported,
        }
    }
}

/// An entry the store rejected, with the error it produced.
///
/// `capability` is the token that was dropped. It can differ from
/// `error.capability()`: a rolled-back `CHANMODES` carries the error of the
/// dependent capability that no longer held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    /// The token whose value was not stored.
    pub capability: Capability,
    /// Why the store refused it.
    pub error: CapabilityError,
}

/// Outcome of [`apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Capabilities set successfully, in order.
    pub accepted: Vec<Capability>,
    /// Capabilities withdrawn by `-KEY` entries.
    pub reset: Vec<Capability>,
    /// Entries the store rejected under an `ignore` or `warn` action.
    pub rejected: Vec<Rejected>,
    /// Keys this store does not track.
    pub unknown: Vec<String>,
}

impl ApplyReport {
    /// Returns true if no entry was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ApplyReport) {
        self.accepted.extend(other.accepted);
        self.reset.extend(other.reset);
        self.rejected.extend(other.rejected);
        self.unknown.extend(other.unknown);
    }
}

/// Apply entries to `caps` in order.
///
/// Unknown keys are skipped. A rejected entry is handled according to
/// `policy`; on [`Action::Abort`] the error is returned and the entries
/// before it stay applied.
pub fn apply(
    caps: &mut ServerCapabilities,
    entries: &[IsupportEntry<'_>],
    policy: &Policy,
) -> Result<ApplyReport, CapabilityError> {
    let mut report = ApplyReport::default();

    for entry in entries {
        let key = entry.key();
        let Ok(capability) = key.parse::<Capability>() else {
            trace!(key = %key, "Skipping untracked ISUPPORT token");
            report.unknown.push(key.to_owned());
            continue;
        };

        match *entry {
            IsupportEntry::Negate { .. } => {
                if caps.reset(capability) {
                    debug!(key = %capability, "Capability withdrawn");
                    report.reset.push(capability);
                } else {
                    debug!(key = %capability, "Capability cannot be withdrawn, keeping value");
                }
            }
            IsupportEntry::Set { value, .. } => match caps.set(capability, value) {
                Ok(v) => {
                    debug!(key = %capability, value = %v, "Capability accepted");
                    report.accepted.push(capability);
                }
                Err(e) => {
                    let kind = e.kind();
                    match policy.action_for(kind) {
                        Action::Ignore => {
                            debug!(key = %capability, value = %value, kind = kind.as_str(), error = %e, "Capability rejected");
                        }
                        Action::Warn => {
                            warn!(key = %capability, value = %value, kind = kind.as_str(), error = %e, "Capability rejected");
                        }
                        Action::Abort => return Err(e),
                    }
                    report.rejected.push(Rejected { capability, error: e });
                }
            },
        }
    }

    Ok(report)
}

/// Split a parameter list and apply it.
pub fn apply_params(
    caps: &mut ServerCapabilities,
    params: &[&str],
    policy: &Policy,
) -> Result<ApplyReport, CapabilityError> {
    apply(caps, &parse_params(params), policy)
}
