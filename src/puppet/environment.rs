use std::fmt;

use serde::Serialize;

use crate::config::{ConfigError, ConfigReader};
use crate::error::Error;

use super::class::{ClassScanner, PuppetClass};
use super::resolver::EnvironmentResolver;

/// A named Puppet environment and its module-search directories.
///
/// Instances are built fresh on every discovery call and are immutable
/// afterwards; there is no identity beyond name equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    name: String,
    paths: Vec<String>,
}

impl Environment {
    /// Creates an environment. Both fields are mandatory: a missing name
    /// or an empty path list is a configuration error, not a default.
    pub fn new(name: impl Into<String>, paths: Vec<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        if paths.is_empty() {
            return Err(ConfigError::MissingPaths { environment: name });
        }
        Ok(Self { name, paths })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Discovers all environments.
    ///
    /// Re-reads the configuration and re-resolves from scratch on every
    /// call; callers wanting a stable view should hold on to the result.
    pub fn all(
        reader: &dyn ConfigReader,
        resolver: &EnvironmentResolver,
    ) -> Result<Vec<Environment>, Error> {
        let config = reader.read()?;
        resolver
            .resolve(&config)
            .into_iter()
            .map(|(name, path)| {
                let paths = path.split(':').map(str::to_string).collect();
                Environment::new(name, paths).map_err(Error::from)
            })
            .collect()
    }

    /// Finds an environment by exact name; `Ok(None)` when absent.
    pub fn find(
        reader: &dyn ConfigReader,
        resolver: &EnvironmentResolver,
        name: &str,
    ) -> Result<Option<Environment>, Error> {
        Ok(Self::all(reader, resolver)?
            .into_iter()
            .find(|e| e.name == name))
    }

    /// Lists the classes found under this environment's paths, in path
    /// order, preserving the scanner's per-path order.
    pub fn classes(&self, scanner: &dyn ClassScanner) -> Vec<PuppetClass> {
        self.paths
            .iter()
            .flat_map(|path| scanner.scan_directory(path))
            .collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
