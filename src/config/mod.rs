//! Raw Puppet settings access.

mod error;
mod raw;
mod reader;

pub use error::ConfigError;
pub use raw::{RawConfig, Section};
pub use reader::{ConfigReader, PuppetConfReader, TomlConfigReader};
