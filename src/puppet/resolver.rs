//! Environment table resolution.
//!
//! Turns a [`RawConfig`] snapshot into a table of environment name →
//! colon-delimited modulepath. Three configuration shapes are handled:
//! an explicit `main.environments` list, a scan for sections carrying a
//! `modulepath`, and dynamic environments whose modulepath embeds a
//! `$environment` placeholder expanded per subdirectory found on disk.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::RawConfig;

use super::lister::{DirectoryLister, FsLister};

/// Environment synthesized when the configuration yields nothing usable.
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Module directory used when neither `main` nor `master` define one.
pub const DEFAULT_MODULE_PATH: &str = "/etc/puppet/modules";

/// Substituted for `$confdir` when `main.confdir` is not set.
pub const DEFAULT_CONFDIR: &str = "/etc/puppet";

const CONFDIR_VAR: &str = "$confdir";
const ENVIRONMENT_VAR: &str = "$environment";

/// Resolves environment tables from raw settings snapshots.
///
/// Stateless apart from the directory-listing seam: every call to
/// [`resolve`](Self::resolve) works from scratch on the snapshot it is
/// given, so repeated calls over unchanged config and filesystem yield
/// identical tables.
#[derive(Debug)]
pub struct EnvironmentResolver {
    lister: Box<dyn DirectoryLister>,
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentResolver {
    /// Creates a resolver backed by the real filesystem.
    pub fn new() -> Self {
        Self {
            lister: Box::new(FsLister),
        }
    }

    /// Creates a resolver with a custom directory lister.
    pub fn with_lister(lister: Box<dyn DirectoryLister>) -> Self {
        Self { lister }
    }

    /// Resolves the full environment table: name → colon-delimited
    /// modulepath. Never fails; the worst case is a single synthesized
    /// default environment.
    pub fn resolve(&self, config: &RawConfig) -> BTreeMap<String, String> {
        let base = discover(config);
        let expanded = self.expand(config, &base);

        expanded
            .into_iter()
            .filter(|(name, path)| !name.is_empty() && !path.is_empty())
            .collect()
    }

    /// Expands `$confdir` and `$environment` placeholders.
    ///
    /// The base table stays immutable; all edits land in a fresh working
    /// copy so that expansion never iterates what it is mutating.
    fn expand(
        &self,
        config: &RawConfig,
        base: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        let confdir = config.setting("main", "confdir").unwrap_or(DEFAULT_CONFDIR);
        let mut table = base.clone();

        for (name, raw_path) in base {
            let path = raw_path.replace(CONFDIR_VAR, confdir);
            // Write the substitution back only while this entry is still
            // the original one; a dynamic expansion of an earlier
            // environment may already have claimed the same name.
            if path != *raw_path && table.get(name) == Some(raw_path) {
                table.insert(name.clone(), path.clone());
            }

            let segments: Vec<&str> = path.split(':').collect();
            for segment in segments.iter().copied() {
                if !segment.contains(ENVIRONMENT_VAR) {
                    continue;
                }

                // Drop the dynamic segment from this environment's entry;
                // static segments of the same entry survive unchanged.
                let statics: Vec<&str> = segments
                    .iter()
                    .copied()
                    .filter(|s| *s != segment)
                    .collect();
                if statics.is_empty() {
                    table.remove(name);
                } else {
                    table.insert(name.clone(), statics.join(":"));
                }

                // One environment per matching child of the scan base.
                let scan_base = scan_base_of(segment);
                for child in self.lister.list_children(&scan_base) {
                    if !is_valid_environment_name(&child) {
                        continue;
                    }
                    let child_path = segment.replace(ENVIRONMENT_VAR, &child);
                    table.insert(child, child_path);
                }
            }
        }

        table
    }
}

/// Builds the pre-expansion table: steps 1 (environment-list discovery or
/// modulepath scan) and 2 (empty-result fallback).
fn discover(config: &RawConfig) -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();

    if let Some(names) = config.setting("main", "environments") {
        for name in names.split(',') {
            if let Some(path) = config.setting(name, "modulepath") {
                table.insert(name.to_string(), path.to_string());
            }
        }
    } else {
        // Older configs have no environments list; any section carrying a
        // modulepath acts as an environment.
        for (section, settings) in config.sections() {
            if let Some(path) = settings.get("modulepath") {
                table.insert(section.clone(), path.clone());
            }
        }
        table.remove("main");
        // A master-daemon section "might" also define a modulepath; drop
        // it unless it is the only candidate left.
        if table.len() > 1 {
            table.remove("puppetmasterd");
        }
    }

    if table.is_empty() {
        let path = config
            .setting("main", "modulepath")
            .or_else(|| config.setting("master", "modulepath"))
            .unwrap_or(DEFAULT_MODULE_PATH);
        warn!("no environments found, falling back to default ({DEFAULT_ENVIRONMENT} - {path})");
        table.insert(DEFAULT_ENVIRONMENT.to_string(), path.to_string());
    }

    table
}

/// Everything from the placeholder onward collapses into a trailing
/// separator, leaving the directory to scan for children.
fn scan_base_of(segment: &str) -> String {
    let idx = segment.find(ENVIRONMENT_VAR).unwrap_or(segment.len());
    let mut base = segment[..idx].to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

/// Allow-list for directory-derived environment names. Excludes dotfiles,
/// `.`/`..` and anything with shell-hostile characters.
fn is_valid_environment_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
