//! Where document text comes from.

use crate::error::Unavailable;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Yields the full text of a named document. Reads are synchronous and never retried.
pub trait ContentSource {
    fn read(&self, name: &str) -> Result<String, Unavailable>;
}

/// Reads documents from the filesystem; names are paths, relative to `root` when set.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self { root: Some(root.as_ref().to_path_buf()) }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl ContentSource for FsSource {
    fn read(&self, name: &str) -> Result<String, Unavailable> {
        let path = self.path_for(name);
        fs::read_to_string(&path).map_err(|e| {
            if path.is_dir() {
                Unavailable::IsDirectory
            } else {
                Unavailable::from_io(e)
            }
        })
    }
}

/// In-memory documents keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.docs.insert(name.into(), content.into());
        self
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self { docs: iter.into_iter().map(|(n, c)| (n.into(), c.into())).collect() }
    }
}

impl ContentSource for MemorySource {
    fn read(&self, name: &str) -> Result<String, Unavailable> {
        self.docs.get(name).cloned().ok_or(Unavailable::NotFound)
    }
}
