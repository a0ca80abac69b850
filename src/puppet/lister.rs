use std::fs;

/// Directory-listing seam used by dynamic environment expansion.
///
/// A missing or unreadable directory yields an empty list rather than an
/// error: a dynamic modulepath pointing at a directory that does not exist
/// yet simply produces no environments.
pub trait DirectoryLister: Send + Sync + std::fmt::Debug {
    /// Returns the names (last path component only) of the immediate
    /// children of `base_dir`.
    fn list_children(&self, base_dir: &str) -> Vec<String>;
}

/// Real-filesystem lister. Children are returned sorted so that repeated
/// resolutions over an unchanged tree produce identical tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list_children(&self, base_dir: &str) -> Vec<String> {
        let entries = match fs::read_dir(base_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}
