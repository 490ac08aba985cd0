//! # slirc-isupport
//!
//! A validated store for the server capabilities an IRC server advertises in
//! `RPL_ISUPPORT` (numeric 005).
//!
//! ## Features
//!
//! - Typed parsing of `CASEMAPPING`, `CHANTYPES`, `CHANLIMIT`, `CHANMODES`,
//!   `CHANNELLEN`, `EXCEPTS`, `INVEX`, `KICKLEN` and `MAXLIST`
//! - Cross-token consistency checks that tolerate any arrival order
//! - Rollback of a `CHANMODES` update that would invalidate accepted tokens
//! - A three-way error taxonomy (format / logic / unsupported) for per-token
//!   policy decisions
//! - Rendering the store back into ISUPPORT tokens
//!
//! The store itself performs no I/O and no logging. The [`advert`] module
//! applies whole parameter lists and logs each outcome through `tracing`.

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use slirc_isupport::advert::{apply_params, Policy};
//! use slirc_isupport::{Capability, ErrorKind, ServerCapabilities};
//!
//! let mut caps = ServerCapabilities::new();
//! let params = ["CHANTYPES=#", "CHANMODES=beI,k,l,imnt", "EXCEPTS", "MAXLIST=bI:60,e:40"];
//! let report = apply_params(&mut caps, &params, &Policy::default()).unwrap();
//! assert!(report.is_clean());
//!
//! // A CHANMODES update that drops `e` would strand EXCEPTS, so it is refused
//! let err = caps.set(Capability::ChanModes, "bI,k,l,imnt").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Logic);
//! assert_eq!(caps.chanmodes().get().unwrap().to_string(), "Ibe,k,l,imnt");
//! ```

pub mod advert;
pub mod builder;
pub mod capability;
pub mod casemap;
pub mod chanmodes;
pub mod error;
pub mod field;
pub mod limits;
pub mod store;
pub mod value;

pub use self::advert::{
    apply, apply_params, parse_params, Action, ApplyReport, IsupportEntry, Policy, Rejected,
};
pub use self::builder::IsupportBuilder;
pub use self::capability::Capability;
pub use self::casemap::CaseMapping;
pub use self::chanmodes::{ChanModes, ModeKind};
pub use self::error::{CapabilityError, Conflict, ErrorKind, UnknownCapability};
pub use self::field::Field;
pub use self::limits::{CharSet, LimitMap};
pub use self::store::ServerCapabilities;
pub use self::value::CapabilityValue;
