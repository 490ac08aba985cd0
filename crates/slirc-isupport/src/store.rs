//! The capability store.
//!
//! [`ServerCapabilities`] holds one [`Field`] per supported ISUPPORT token and
//! only ever exposes a mutually consistent combination of them:
//!
//! - every `CHANLIMIT` key is a subset of `CHANTYPES` (checked when
//!   `CHANLIMIT` is set)
//! - `EXCEPTS` and `INVEX` are type A modes in `CHANMODES`
//! - the `MAXLIST` keys cover exactly the type A modes in `CHANMODES`
//!
//! Tokens may arrive in any order. A flag or list limit accepted before
//! `CHANMODES` is re-checked when `CHANMODES` arrives, and a `CHANMODES`
//! update that would break one of them is rolled back.

use std::borrow::Cow;

use crate::capability::Capability;
use crate::casemap::{ascii_eq, ascii_to_lower, CaseMapping};
use crate::chanmodes::ChanModes;
use crate::error::{CapabilityError, Conflict, Result};
use crate::field::Field;
use crate::limits::{charset, charset_str, parse_count, CharSet, LimitMap};
use crate::value::CapabilityValue;

/// `CHANTYPES` in effect before a server says otherwise.
pub const DEFAULT_CHANTYPES: &str = "#&";
/// `CHANNELLEN` in effect before a server says otherwise.
pub const DEFAULT_CHANNELLEN: u32 = 200;
/// Flag used for a bare `EXCEPTS` token.
pub const DEFAULT_EXCEPTS: char = 'e';
/// Flag used for a bare `INVEX` token.
pub const DEFAULT_INVEX: char = 'I';

/// Validated server capabilities for one connection.
///
/// Mutation goes through [`set`](Self::set) and [`reset`](Self::reset), both
/// of which take `&mut self`; a failed `set` leaves the store unchanged.
///
/// # Example
///
/// ```
/// use slirc_isupport::{Capability, ServerCapabilities};
///
/// let mut caps = ServerCapabilities::new();
/// caps.set(Capability::ChanModes, "beI,k,l,imnt").unwrap();
/// caps.set(Capability::Excepts, "").unwrap();
///
/// assert_eq!(caps.excepts().get(), Some(&'e'));
/// assert!(caps.set(Capability::Invex, "k").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerCapabilities {
    casemapping: Field<CaseMapping>,
    chantypes: Field<CharSet>,
    chanlimit: Field<LimitMap>,
    chanmodes: Field<ChanModes>,
    channellen: Field<Option<u32>>,
    excepts: Field<char>,
    invex: Field<char>,
    kicklen: Field<Option<u32>>,
    maxlist: Field<LimitMap>,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerCapabilities {
    /// A store holding only the defaulted capabilities: `CASEMAPPING=ascii`,
    /// `CHANTYPES=#&` and `CHANNELLEN=200`.
    ///
    /// These three start out as `Validated` with their default value. After a
    /// [`reset`](Self::reset) they read as `Unset` instead, with the same
    /// default still in effect through the `effective_*` getters. Code that
    /// only needs the value in force should use those getters.
    pub fn new() -> Self {
        Self {
            casemapping: Field::Validated(CaseMapping::Ascii),
            chantypes: Field::Validated(charset(DEFAULT_CHANTYPES)),
            chanlimit: Field::Unset,
            chanmodes: Field::Unset,
            channellen: Field::Validated(Some(DEFAULT_CHANNELLEN)),
            excepts: Field::Unset,
            invex: Field::Unset,
            kicklen: Field::Unset,
            maxlist: Field::Unset,
        }
    }

    /// Parse, validate and store one capability.
    ///
    /// Returns the new value on success. On error the store is exactly as it
    /// was before the call.
    pub fn set(&mut self, capability: Capability, raw: &str) -> Result<CapabilityValue> {
        match capability {
            Capability::CaseMapping => self.set_casemapping(raw),
            Capability::ChanTypes => self.set_chantypes(raw),
            Capability::ChanLimit => self.set_chanlimit(raw),
            Capability::ChanModes => self.set_chanmodes(raw),
            Capability::ChannelLen => {
                let len = parse_length(capability, raw)?;
                self.channellen = Field::Validated(len);
                Ok(CapabilityValue::ChannelLen(len))
            }
            Capability::KickLen => {
                let len = parse_length(capability, raw)?;
                self.kicklen = Field::Validated(len);
                Ok(CapabilityValue::KickLen(len))
            }
            Capability::Excepts => {
                let flag = parse_flag(capability, raw, DEFAULT_EXCEPTS)?;
                self.check_list_flag(capability, flag)?;
                self.excepts = Field::Validated(flag);
                Ok(CapabilityValue::Excepts(flag))
            }
            Capability::Invex => {
                let flag = parse_flag(capability, raw, DEFAULT_INVEX)?;
                self.check_list_flag(capability, flag)?;
                self.invex = Field::Validated(flag);
                Ok(CapabilityValue::Invex(flag))
            }
            Capability::MaxList => self.set_maxlist(raw),
        }
    }

    /// Return a withdrawable capability to unset.
    ///
    /// Returns false, leaving the store untouched, for capabilities that
    /// cannot be withdrawn (see [`Capability::is_resettable`]). Resetting is
    /// not cross-checked against other capabilities.
    ///
    /// A withdrawn field reads as [`Field::Unset`], even for the capabilities
    /// a fresh store starts with as `Validated` defaults. The default is still
    /// what [`effective_casemapping`](Self::effective_casemapping),
    /// [`effective_chantypes`](Self::effective_chantypes) and
    /// [`effective_channellen`](Self::effective_channellen) return.
    pub fn reset(&mut self, capability: Capability) -> bool {
        match capability {
            Capability::CaseMapping => self.casemapping = Field::Unset,
            Capability::ChanTypes => self.chantypes = Field::Unset,
            Capability::ChannelLen => self.channellen = Field::Unset,
            Capability::Excepts => self.excepts = Field::Unset,
            Capability::Invex => self.invex = Field::Unset,
            Capability::ChanLimit
            | Capability::ChanModes
            | Capability::KickLen
            | Capability::MaxList => return false,
        }
        true
    }

    /// The current value of any capability.
    pub fn get(&self, capability: Capability) -> Field<CapabilityValue> {
        match capability {
            Capability::CaseMapping => self.casemapping.clone().map(CapabilityValue::CaseMapping),
            Capability::ChanTypes => self.chantypes.clone().map(CapabilityValue::ChanTypes),
            Capability::ChanLimit => self.chanlimit.clone().map(CapabilityValue::ChanLimit),
            Capability::ChanModes => self.chanmodes.clone().map(CapabilityValue::ChanModes),
            Capability::ChannelLen => self.channellen.clone().map(CapabilityValue::ChannelLen),
            Capability::Excepts => self.excepts.clone().map(CapabilityValue::Excepts),
            Capability::Invex => self.invex.clone().map(CapabilityValue::Invex),
            Capability::KickLen => self.kicklen.clone().map(CapabilityValue::KickLen),
            Capability::MaxList => self.maxlist.clone().map(CapabilityValue::MaxList),
        }
    }

    // ---- typed accessors ------------------------------------------------

    /// `CASEMAPPING`.
    pub fn casemapping(&self) -> &Field<CaseMapping> {
        &self.casemapping
    }

    /// `CHANTYPES`.
    pub fn chantypes(&self) -> &Field<CharSet> {
        &self.chantypes
    }

    /// `CHANLIMIT`.
    pub fn chanlimit(&self) -> &Field<LimitMap> {
        &self.chanlimit
    }

    /// `CHANMODES`.
    pub fn chanmodes(&self) -> &Field<ChanModes> {
        &self.chanmodes
    }

    /// `CHANNELLEN`. A validated `None` means unlimited.
    pub fn channellen(&self) -> &Field<Option<u32>> {
        &self.channellen
    }

    /// `EXCEPTS`.
    pub fn excepts(&self) -> &Field<char> {
        &self.excepts
    }

    /// `INVEX`.
    pub fn invex(&self) -> &Field<char> {
        &self.invex
    }

    /// `KICKLEN`. A validated `None` means unlimited.
    pub fn kicklen(&self) -> &Field<Option<u32>> {
        &self.kicklen
    }

    /// `MAXLIST`.
    pub fn maxlist(&self) -> &Field<LimitMap> {
        &self.maxlist
    }

    /// The case mapping in effect, falling back to `ascii`.
    pub fn effective_casemapping(&self) -> CaseMapping {
        self.casemapping.get().copied().unwrap_or_default()
    }

    /// The channel prefixes in effect, falling back to `#&`.
    pub fn effective_chantypes(&self) -> Cow<'_, CharSet> {
        match &self.chantypes {
            Field::Validated(set) => Cow::Borrowed(set),
            Field::Unset => Cow::Owned(charset(DEFAULT_CHANTYPES)),
        }
    }

    /// The channel name limit in effect, falling back to 200.
    pub fn effective_channellen(&self) -> Option<u32> {
        match self.channellen {
            Field::Validated(len) => len,
            Field::Unset => Some(DEFAULT_CHANNELLEN),
        }
    }

    /// Lowercase a nick or channel name under the case mapping in effect.
    ///
    /// Only `ascii` can be stored, so this is plain ASCII folding.
    pub fn irc_to_lower(&self, name: &str) -> String {
        ascii_to_lower(name)
    }

    /// Compare two nick or channel names under the case mapping in effect.
    pub fn irc_eq(&self, a: &str, b: &str) -> bool {
        ascii_eq(a, b)
    }

    // ---- per-field setters ----------------------------------------------

    fn set_casemapping(&mut self, raw: &str) -> Result<CapabilityValue> {
        let mapping = CaseMapping::from_token(raw)
            .ok_or_else(|| CapabilityError::format(Capability::CaseMapping, raw))?;
        if !mapping.is_supported() {
            return Err(CapabilityError::unsupported(Capability::CaseMapping, raw));
        }
        self.casemapping = Field::Validated(mapping);
        Ok(CapabilityValue::CaseMapping(mapping))
    }

    // Narrowing CHANTYPES does not re-check an accepted CHANLIMIT.
    fn set_chantypes(&mut self, raw: &str) -> Result<CapabilityValue> {
        let types = charset(raw);
        self.chantypes = Field::Validated(types.clone());
        Ok(CapabilityValue::ChanTypes(types))
    }

    fn set_chanlimit(&mut self, raw: &str) -> Result<CapabilityValue> {
        let limits =
            LimitMap::parse(raw).ok_or_else(|| CapabilityError::format(Capability::ChanLimit, raw))?;

        let conflict = {
            let chantypes = self.effective_chantypes();
            limits
                .iter()
                .find(|(keys, _)| !keys.is_subset(&chantypes))
                .map(|(prefixes, _)| Conflict::UnknownPrefix {
                    prefixes: charset_str(prefixes),
                    chantypes: charset_str(&chantypes),
                })
        };
        if let Some(conflict) = conflict {
            return Err(CapabilityError::logic(Capability::ChanLimit, &limits, conflict));
        }

        self.chanlimit = Field::Validated(limits.clone());
        Ok(CapabilityValue::ChanLimit(limits))
    }

    fn set_chanmodes(&mut self, raw: &str) -> Result<CapabilityValue> {
        let modes =
            ChanModes::parse(raw).ok_or_else(|| CapabilityError::format(Capability::ChanModes, raw))?;

        let previous = std::mem::replace(&mut self.chanmodes, Field::Validated(modes.clone()));
        if let Err(e) = self.recheck_dependents() {
            self.chanmodes = previous;
            return Err(e);
        }
        Ok(CapabilityValue::ChanModes(modes))
    }

    fn set_maxlist(&mut self, raw: &str) -> Result<CapabilityValue> {
        let limits =
            LimitMap::parse(raw).ok_or_else(|| CapabilityError::format(Capability::MaxList, raw))?;
        self.check_maxlist(&limits)?;
        self.maxlist = Field::Validated(limits.clone());
        Ok(CapabilityValue::MaxList(limits))
    }

    // ---- cross-field checks ---------------------------------------------

    /// Run the accepted flags and list limits through their checks against
    /// the current `CHANMODES`.
    fn recheck_dependents(&self) -> Result<()> {
        if let Some(&flag) = self.excepts.get() {
            self.check_list_flag(Capability::Excepts, flag)?;
        }
        if let Some(&flag) = self.invex.get() {
            self.check_list_flag(Capability::Invex, flag)?;
        }
        if let Some(limits) = self.maxlist.get() {
            self.check_maxlist(limits)?;
        }
        Ok(())
    }

    /// A flag must be a type A mode once `CHANMODES` is known.
    fn check_list_flag(&self, capability: Capability, flag: char) -> Result<()> {
        let Some(modes) = self.chanmodes.get() else {
            return Ok(());
        };
        if modes.list_modes().contains(&flag) {
            return Ok(());
        }
        Err(CapabilityError::logic(
            capability,
            flag,
            Conflict::NotListMode {
                flag,
                list_modes: charset_str(modes.list_modes()),
            },
        ))
    }

    /// `MAXLIST` keys must cover exactly the type A modes.
    fn check_maxlist(&self, limits: &LimitMap) -> Result<()> {
        let Some(modes) = self.chanmodes.get() else {
            return Ok(());
        };
        let covered = limits.covered();
        if &covered == modes.list_modes() {
            return Ok(());
        }
        Err(CapabilityError::logic(
            Capability::MaxList,
            limits,
            Conflict::ListCoverage {
                covered: charset_str(&covered),
                list_modes: charset_str(modes.list_modes()),
            },
        ))
    }
}

/// `CHANNELLEN` / `KICKLEN`: empty means unlimited, and lengths beyond
/// `u32::MAX` are stored as `u32::MAX`.
fn parse_length(capability: Capability, raw: &str) -> Result<Option<u32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_count(raw)
        .map(Some)
        .ok_or_else(|| CapabilityError::format(capability, raw))
}

/// `EXCEPTS` / `INVEX`: empty means the default flag, otherwise one character.
fn parse_flag(capability: Capability, raw: &str, default: char) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(default),
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(CapabilityError::format(capability, raw)),
    }
}
