//! Behaviour of the capability store across token sequences.

use slirc_isupport::limits::charset;
use slirc_isupport::{
    Capability, CapabilityValue, CaseMapping, ChanModes, Conflict, ErrorKind, Field,
    IsupportBuilder, ServerCapabilities,
};

fn kind(result: Result<CapabilityValue, slirc_isupport::CapabilityError>) -> Option<ErrorKind> {
    result.err().map(|e| e.kind())
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn fresh_store_defaults() {
    let caps = ServerCapabilities::new();

    assert_eq!(caps.chantypes(), &Field::Validated(charset("#&")));
    assert_eq!(caps.channellen(), &Field::Validated(Some(200)));
    assert_eq!(caps.casemapping(), &Field::Validated(CaseMapping::Ascii));

    for cap in [
        Capability::ChanLimit,
        Capability::ChanModes,
        Capability::Excepts,
        Capability::Invex,
        Capability::KickLen,
        Capability::MaxList,
    ] {
        assert_eq!(caps.get(cap), Field::Unset, "{cap} should start unset");
    }
}

// =============================================================================
// CASEMAPPING
// =============================================================================

#[test]
fn casemapping_rfc_variants_unsupported() {
    let mut caps = ServerCapabilities::new();
    let before = caps.clone();

    assert_eq!(kind(caps.set(Capability::CaseMapping, "rfc1459")), Some(ErrorKind::Unsupported));
    assert_eq!(
        kind(caps.set(Capability::CaseMapping, "strict-rfc1459")),
        Some(ErrorKind::Unsupported)
    );
    assert_eq!(kind(caps.set(Capability::CaseMapping, "utf-8")), Some(ErrorKind::Format));
    assert_eq!(kind(caps.set(Capability::CaseMapping, "")), Some(ErrorKind::Format));
    assert_eq!(kind(caps.set(Capability::CaseMapping, "Ascii")), Some(ErrorKind::Format));

    assert_eq!(caps, before);
}

// =============================================================================
// CHANTYPES / CHANLIMIT
// =============================================================================

#[test]
fn chanlimit_prefix_must_be_chantype() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanTypes, "#").unwrap();

    let err = caps.set(Capability::ChanLimit, "#&:10").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Logic);
    assert!(matches!(
        err,
        slirc_isupport::CapabilityError::Logic {
            conflict: Conflict::UnknownPrefix { .. },
            ..
        }
    ));
    assert_eq!(caps.chanlimit(), &Field::Unset);

    caps.set(Capability::ChanLimit, "#:10").unwrap();
    assert_eq!(caps.chanlimit().get().and_then(|l| l.limit_for('#')), Some(10));
}

#[test]
fn chanlimit_checked_against_default_prefixes() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanLimit, "#&:25").unwrap();
    assert_eq!(kind(caps.set(Capability::ChanLimit, "!:5")), Some(ErrorKind::Logic));

    // A withdrawn CHANTYPES falls back to the defaults
    caps.reset(Capability::ChanTypes);
    assert_eq!(caps.chantypes(), &Field::Unset);
    caps.set(Capability::ChanLimit, "&:5").unwrap();
}

#[test]
fn chanlimit_format_errors() {
    let mut caps = ServerCapabilities::new();
    for raw in ["", "#", "#:x", "#:10,#:20", "#:10,,&:5", ":10"] {
        assert_eq!(
            kind(caps.set(Capability::ChanLimit, raw)),
            Some(ErrorKind::Format),
            "CHANLIMIT={raw:?}"
        );
    }
    assert_eq!(caps.chanlimit(), &Field::Unset);
}

#[test]
fn narrowing_chantypes_keeps_chanlimit() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanLimit, "#&:10").unwrap();
    caps.set(Capability::ChanTypes, "#").unwrap();

    // Not re-checked: the limit stays as accepted
    assert!(caps.chanlimit().is_set());
    assert_eq!(caps.chantypes(), &Field::Validated(charset("#")));
}

#[test]
fn empty_chantypes_means_no_prefixes() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanTypes, "").unwrap();
    assert_eq!(caps.chantypes(), &Field::Validated(charset("")));
    assert_eq!(kind(caps.set(Capability::ChanLimit, "#:1")), Some(ErrorKind::Logic));
}

// =============================================================================
// CHANMODES and its dependents
// =============================================================================

#[test]
fn excepts_must_be_list_mode() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "a,b,c,d").unwrap();

    assert_eq!(kind(caps.set(Capability::Excepts, "e")), Some(ErrorKind::Logic));
    assert_eq!(caps.excepts(), &Field::Unset);
    // Bare EXCEPTS means `e`, which is still not a list mode here
    assert_eq!(kind(caps.set(Capability::Excepts, "")), Some(ErrorKind::Logic));

    caps.set(Capability::Excepts, "a").unwrap();
    assert_eq!(caps.excepts(), &Field::Validated('a'));
}

#[test]
fn invex_must_be_list_mode() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "beI,k,l,imnt").unwrap();

    let err = caps.set(Capability::Invex, "k").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Logic);
    assert_eq!(err.capability(), Capability::Invex);
    assert!(matches!(err, slirc_isupport::CapabilityError::Logic {
        conflict: Conflict::NotListMode { flag: 'k', .. },
        ..
    }));
    assert_eq!(caps.invex(), &Field::Unset);

    // Bare INVEX means `I`, a list mode here
    caps.set(Capability::Invex, "").unwrap();
    assert_eq!(caps.invex(), &Field::Validated('I'));
}

#[test]
fn chanmodes_update_rolls_back() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "a,b,c,d").unwrap();
    caps.set(Capability::Excepts, "a").unwrap();

    let err = caps.set(Capability::ChanModes, "x,y,z,w").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Logic);
    assert_eq!(err.capability(), Capability::Excepts);

    assert_eq!(caps.chanmodes(), &Field::Validated(ChanModes::new("a", "b", "c", "d")));
    assert_eq!(caps.excepts(), &Field::Validated('a'));
}

#[test]
fn chanmodes_rollback_restores_unset() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::Invex, "").unwrap();

    assert_eq!(kind(caps.set(Capability::ChanModes, "b,k,l,imnt")), Some(ErrorKind::Logic));
    assert_eq!(caps.chanmodes(), &Field::Unset);
    assert_eq!(caps.invex(), &Field::Validated('I'));

    caps.set(Capability::ChanModes, "bI,k,l,imnt").unwrap();
}

#[test]
fn chanmodes_wrong_group_count() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "b,k,l,t").unwrap();

    for raw in ["", "b,k,l", "b,k,l,t,X"] {
        assert_eq!(kind(caps.set(Capability::ChanModes, raw)), Some(ErrorKind::Format));
    }
    assert_eq!(caps.chanmodes(), &Field::Validated(ChanModes::new("b", "k", "l", "t")));
}

#[test]
fn maxlist_must_cover_list_modes_exactly() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "a,b,c,d").unwrap();

    assert_eq!(kind(caps.set(Capability::MaxList, "b:25")), Some(ErrorKind::Logic));
    assert_eq!(caps.maxlist(), &Field::Unset);
    caps.set(Capability::MaxList, "a:25").unwrap();

    caps.set(Capability::ChanModes, "ab,,,").unwrap_err();
    // Superset is not an exact match either
    assert_eq!(kind(caps.set(Capability::MaxList, "ab:25")), Some(ErrorKind::Logic));
    assert_eq!(caps.maxlist().get().and_then(|m| m.limit_for('a')), Some(25));
}

#[test]
fn maxlist_before_chanmodes_is_rechecked() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::MaxList, "beI:100").unwrap();

    assert_eq!(kind(caps.set(Capability::ChanModes, "bq,k,l,imnt")), Some(ErrorKind::Logic));
    caps.set(Capability::ChanModes, "Ibe,k,l,imnt").unwrap();
}

#[test]
fn maxlist_empty_is_format_error() {
    let mut caps = ServerCapabilities::new();
    assert_eq!(kind(caps.set(Capability::MaxList, "")), Some(ErrorKind::Format));
}

#[test]
fn flags_must_be_single_characters() {
    let mut caps = ServerCapabilities::new();
    assert_eq!(kind(caps.set(Capability::Excepts, "ee")), Some(ErrorKind::Format));
    assert_eq!(kind(caps.set(Capability::Invex, "IX")), Some(ErrorKind::Format));
}

// =============================================================================
// Lengths
// =============================================================================

#[test]
fn lengths_accept_empty_as_unlimited() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChannelLen, "").unwrap();
    assert_eq!(caps.channellen(), &Field::Validated(None));
    assert_eq!(caps.effective_channellen(), None);

    caps.set(Capability::KickLen, "307").unwrap();
    assert_eq!(caps.kicklen(), &Field::Validated(Some(307)));

    assert_eq!(kind(caps.set(Capability::KickLen, "long")), Some(ErrorKind::Format));
    assert_eq!(caps.kicklen(), &Field::Validated(Some(307)));

    caps.reset(Capability::ChannelLen);
    assert_eq!(caps.effective_channellen(), Some(200));
}

#[test]
fn lengths_beyond_u32_saturate() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::KickLen, "4294967296").unwrap();
    assert_eq!(caps.kicklen(), &Field::Validated(Some(u32::MAX)));

    caps.set(Capability::ChanModes, "b,k,l,t").unwrap();
    caps.set(Capability::MaxList, "b:10000000000").unwrap();
    assert_eq!(caps.maxlist().get().and_then(|m| m.limit_for('b')), Some(u32::MAX));
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn reset_defaults_read_unset_but_stay_in_effect() {
    let mut caps = ServerCapabilities::new();
    assert_eq!(caps.chantypes(), &Field::Validated(charset("#&")));

    for cap in [Capability::CaseMapping, Capability::ChanTypes, Capability::ChannelLen] {
        assert!(caps.reset(cap));
        assert_eq!(caps.get(cap), Field::Unset);
    }
    assert_eq!(caps.effective_casemapping(), CaseMapping::Ascii);
    assert_eq!(*caps.effective_chantypes(), charset("#&"));
    assert_eq!(caps.effective_channellen(), Some(200));
}

#[test]
fn reset_only_withdrawable_fields() {
    let mut caps = ServerCapabilities::new();
    caps.set(Capability::ChanModes, "b,k,l,t").unwrap();
    caps.set(Capability::MaxList, "b:10").unwrap();

    assert!(!caps.reset(Capability::ChanModes));
    assert!(!caps.reset(Capability::MaxList));
    assert!(caps.chanmodes().is_set());

    assert!(caps.reset(Capability::CaseMapping));
    assert_eq!(caps.casemapping(), &Field::Unset);
    assert_eq!(caps.effective_casemapping(), CaseMapping::Ascii);
}

// =============================================================================
// Re-setting current values
// =============================================================================

#[test]
fn resetting_current_values_never_errors() {
    let mut caps = ServerCapabilities::new();
    for (cap, raw) in [
        (Capability::ChanTypes, "#&!"),
        (Capability::ChanLimit, "#&:20,!:5"),
        (Capability::ChanModes, "beIq,k,fl,imnpst"),
        (Capability::Excepts, ""),
        (Capability::Invex, ""),
        (Capability::MaxList, "bq:100,eI:50"),
        (Capability::KickLen, ""),
        (Capability::ChannelLen, "64"),
    ] {
        caps.set(cap, raw).unwrap();
    }

    let snapshot = caps.clone();
    for cap in Capability::ALL {
        if let Field::Validated(value) = caps.get(cap) {
            let rendered = value.to_string();
            assert_eq!(caps.set(cap, &rendered), Ok(value), "{cap}={rendered}");
        }
    }
    assert_eq!(caps, snapshot);

    // The same holds when the rendered advertisement is replayed elsewhere
    let mut replay = ServerCapabilities::new();
    for token in IsupportBuilder::from_capabilities(&caps).tokens() {
        let (key, value) = token.split_once('=').unwrap();
        replay.set(key.parse().unwrap(), value).unwrap();
    }
    assert_eq!(replay, caps);
}
