use crate::config::ConfigError;
use crate::realm::RealmError;
use thiserror::Error;

/// Top-level error type for the puppet-proxy library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("realm error: {0}")]
    Realm(#[from] RealmError),
}
