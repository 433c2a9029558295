use super::PageSink;
use crate::error::{ConvertError, Result};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory sink for testing. Does NOT touch the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
    failing: HashSet<PathBuf>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `relative` fail with a permission error.
    pub fn failing_on(mut self, relative: impl Into<PathBuf>) -> Self {
        self.failing.insert(relative.into());
        self
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, relative: &Path, contents: &str) -> Result<PathBuf> {
        if self.failing.contains(relative) {
            return Err(ConvertError::io(
                relative,
                io::Error::new(io::ErrorKind::PermissionDenied, "write refused"),
            ));
        }
        self.files
            .insert(relative.to_path_buf(), contents.to_string());
        Ok(relative.to_path_buf())
    }
}
