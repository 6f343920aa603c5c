//! Data providers for time zone rules.
//!
//! This crate defines the [`ZoneRulesProvider`](provider::ZoneRulesProvider)
//! trait consumed by `tempora`, the records it produces, and, behind the
//! `tzif` feature, providers that read compiled TZif data either from the
//! bundled `jiff-tzdb` database or from a zoneinfo directory.
//!
//! The Gregorian equations used to evaluate POSIX transition rules live in
//! [`utils`] and are shared with `tempora`'s calendar math.

#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;
use core::fmt;

pub mod posix;
pub mod provider;
pub mod utils;

#[cfg(feature = "tzif")]
pub mod tzdb;
#[cfg(feature = "tzif")]
pub mod tzif;

#[cfg(feature = "tzif")]
pub use tzdb::{FsTzdbProvider, TzdbProvider};

/// An error produced while sourcing time zone rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneProviderError {
    /// The identifier is not known to the provider.
    UnknownIdentifier(String),
    /// The provider's data could not be read or was malformed.
    InvalidData(String),
    /// An internal invariant did not hold.
    Assert(&'static str),
}

impl fmt::Display for ZoneProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentifier(id) => write!(f, "unknown time zone identifier: {id}"),
            Self::InvalidData(msg) => write!(f, "invalid time zone data: {msg}"),
            Self::Assert(msg) => write!(f, "time zone provider assertion failed: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZoneProviderError {}
