//! Realm (FreeIPA) host management.
//!
//! A thin wrapper over the `ipa` admin binary: command composition plus
//! screening of the textual output for error markers. The binary itself
//! and the Kerberos credential cache are host-process concerns.

mod error;
mod ipa;
mod runner;

pub use error::RealmError;
pub use ipa::{IpaClient, IpaClientBuilder};
pub use runner::{CommandRunner, ShellRunner};
