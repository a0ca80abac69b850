use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Settings of a single configuration section.
pub type Section = BTreeMap<String, String>;

/// A read-only snapshot of Puppet settings: section name mapped to the
/// settings defined in that section.
///
/// Section names are plain strings rather than a fixed schema because most
/// sections are environment names only known at runtime; `main`, `master`
/// and `puppetmasterd` are merely conventional. A setting that is not
/// present in a section is treated as nil.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig {
    sections: BTreeMap<String, Section>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a single setting, `None` if the section or setting is absent.
    pub fn setting(&self, section: &str, name: &str) -> Option<&str> {
        self.sections.get(section)?.get(name).map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Iterates over all sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.sections.iter()
    }

    /// Sets a single value, creating the section if needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl From<BTreeMap<String, Section>> for RawConfig {
    fn from(sections: BTreeMap<String, Section>) -> Self {
        Self { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_lookup() {
        let mut config = RawConfig::new();
        config.set("main", "confdir", "/etc/puppet");

        assert_eq!(config.setting("main", "confdir"), Some("/etc/puppet"));
        assert_eq!(config.setting("main", "modulepath"), None);
        assert_eq!(config.setting("master", "confdir"), None);
    }

    #[test]
    fn test_sections_iterate_in_name_order() {
        let mut config = RawConfig::new();
        config.set("zeta", "modulepath", "/z");
        config.set("alpha", "modulepath", "/a");

        let names: Vec<&str> = config.sections().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
