use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RealmError {
    #[error("missing realm setting: {0}")]
    MissingSetting(&'static str),

    #[error("keytab not readable at {0}")]
    KeytabNotFound(PathBuf),

    #[error("insufficient access: {0}")]
    Kerberos(String),

    #[error("ipa command failed: {0}")]
    Command(String),

    #[error("failed to run ipa: {0}")]
    Io(#[from] std::io::Error),
}
