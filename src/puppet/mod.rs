//! Puppet environment discovery.

mod class;
mod environment;
mod lister;
mod resolver;

pub use class::{ClassScanner, PuppetClass};
pub use environment::Environment;
pub use lister::{DirectoryLister, FsLister};
pub use resolver::{
    EnvironmentResolver, DEFAULT_CONFDIR, DEFAULT_ENVIRONMENT, DEFAULT_MODULE_PATH,
};
