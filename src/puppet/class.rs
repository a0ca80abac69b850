use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata for a single Puppet class, e.g. `apache` or `apache::ssl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuppetClass {
    module: Option<String>,
    name: String,
}

impl PuppetClass {
    /// Parses a qualified class name; everything before the first `::` is
    /// the module, the remainder is the class name.
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once("::") {
            Some((module, name)) => Self {
                module: Some(module.to_string()),
                name: name.to_string(),
            },
            None => Self {
                module: None,
                name: qualified.to_string(),
            },
        }
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PuppetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{module}::{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Directory-scanning collaborator that extracts class metadata from the
/// manifests under a module path. The scan itself lives outside this
/// crate; [`Environment::classes`](super::Environment::classes) only
/// concatenates its results.
pub trait ClassScanner: Send + Sync + std::fmt::Debug {
    fn scan_directory(&self, path: &str) -> Vec<PuppetClass>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unqualified() {
        let class = PuppetClass::parse("ntp");
        assert_eq!(class.module(), None);
        assert_eq!(class.name(), "ntp");
        assert_eq!(class.to_string(), "ntp");
    }

    #[test]
    fn test_parse_qualified() {
        let class = PuppetClass::parse("apache::ssl::cert");
        assert_eq!(class.module(), Some("apache"));
        assert_eq!(class.name(), "ssl::cert");
        assert_eq!(class.to_string(), "apache::ssl::cert");
    }
}
