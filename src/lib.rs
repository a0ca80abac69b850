//! Environment discovery for Puppet module trees, plus a thin realm
//! (FreeIPA) host-management client.
//!
//! The core of the crate turns a raw Puppet settings snapshot into a table
//! of named environments, each mapping to one or more module-search
//! directories. Three generations of configuration shape are supported at
//! once: an explicit `main.environments` list, a per-section `modulepath`
//! scan, and dynamic environments whose modulepath contains a
//! `$environment` placeholder expanded per subdirectory found on disk.

pub mod config;
pub mod puppet;
pub mod realm;
mod error;

pub use config::{ConfigError, ConfigReader, RawConfig};
pub use error::Error;
pub use puppet::{Environment, EnvironmentResolver};
