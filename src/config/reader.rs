//! Configuration readers.
//!
//! A [`ConfigReader`] produces a fresh [`RawConfig`] snapshot on every call;
//! the resolver never caches, so readers should be cheap to re-invoke.

use std::path::{Path, PathBuf};

use super::{ConfigError, RawConfig};

/// Source of raw Puppet settings.
///
/// Implementations must tolerate arbitrary extra sections beyond the
/// conventional `main`/`master`/`puppetmasterd`, since environment names
/// appear as sections of their own.
pub trait ConfigReader: Send + Sync + std::fmt::Debug {
    fn read(&self) -> Result<RawConfig, ConfigError>;
}

/// Reads a `puppet.conf`-style INI file.
///
/// `[section]` headers group `key = value` settings; lines before the first
/// header belong to `main`. Blank lines and `#`/`;` comments are skipped.
#[derive(Debug, Clone)]
pub struct PuppetConfReader {
    path: PathBuf,
}

impl PuppetConfReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigReader for PuppetConfReader {
    fn read(&self) -> Result<RawConfig, ConfigError> {
        let contents = read_file(&self.path)?;
        parse_puppet_conf(&contents, &self.path)
    }
}

/// Reads a [`RawConfig`] snapshot from a TOML file, one `[section]` table
/// per configuration section.
#[derive(Debug, Clone)]
pub struct TomlConfigReader {
    path: PathBuf,
}

impl TomlConfigReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigReader for TomlConfigReader {
    fn read(&self) -> Result<RawConfig, ConfigError> {
        let contents = read_file(&self.path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::TomlError {
            path: self.path.clone(),
            source: e,
        })
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses INI-style content into a [`RawConfig`].
fn parse_puppet_conf(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    let mut config = RawConfig::new();
    let mut section = String::from("main");

    for (line_num, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            match header.strip_suffix(']') {
                Some(name) if !name.trim().is_empty() => {
                    section = name.trim().to_string();
                    continue;
                }
                _ => {
                    return Err(ConfigError::ParseError {
                        path: path.to_path_buf(),
                        line: line_num + 1,
                        message: format!("malformed section header: {line}"),
                    });
                }
            }
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let value = line[eq_pos + 1..].trim();
            if key.is_empty() {
                return Err(ConfigError::ParseError {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    message: format!("setting without a name: {line}"),
                });
            }
            config.set(&section, key, value);
        } else {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: line_num + 1,
                message: format!("expected 'key = value', got: {line}"),
            });
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_puppet_conf_sections_and_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "confdir = /etc/puppet\n\
             # a comment\n\
             [master]\n\
             modulepath = /etc/puppet/modules\n\
             [production]\n\
             modulepath = /srv/puppet/production"
        )
        .unwrap();

        let config = PuppetConfReader::new(file.path()).read().unwrap();
        assert_eq!(config.setting("main", "confdir"), Some("/etc/puppet"));
        assert_eq!(
            config.setting("master", "modulepath"),
            Some("/etc/puppet/modules")
        );
        assert_eq!(
            config.setting("production", "modulepath"),
            Some("/srv/puppet/production")
        );
    }

    #[test]
    fn test_puppet_conf_missing_file() {
        let reader = PuppetConfReader::new("/nonexistent/puppet.conf");
        assert!(matches!(
            reader.read(),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_puppet_conf_invalid_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[main]\nthis is not a setting").unwrap();

        let result = PuppetConfReader::new(file.path()).read();
        assert!(matches!(
            result,
            Err(ConfigError::ParseError { line: 2, .. })
        ));
    }

    #[test]
    fn test_toml_reader_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[main]\nenvironments = \"prod,test\"\n\n[prod]\nmodulepath = \"/a/modules\""
        )
        .unwrap();

        let config = TomlConfigReader::new(file.path()).read().unwrap();
        assert_eq!(config.setting("main", "environments"), Some("prod,test"));
        assert_eq!(config.setting("prod", "modulepath"), Some("/a/modules"));
    }
}
