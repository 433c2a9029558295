use super::PageSink;
use crate::error::{ConvertError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes pages below a root directory, creating directories as needed.
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
        }
        Ok(())
    }
}

impl PageSink for FileSink {
    fn write_page(&mut self, relative: &Path, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }
        fs::write(&path, contents).map_err(|e| ConvertError::io(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("md"));

        let written = sink
            .write_page(Path::new("daily/2021-01-02.md"), "- hello")
            .unwrap();

        assert_eq!(written, dir.path().join("md/daily/2021-01-02.md"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "- hello");
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());

        sink.write_page(Path::new("P.md"), "old content").unwrap();
        let written = sink.write_page(Path::new("P.md"), "new").unwrap();

        assert_eq!(fs::read_to_string(written).unwrap(), "new");
    }

    #[test]
    fn reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is needed.
        fs::write(dir.path().join("Books"), "").unwrap();
        let mut sink = FileSink::new(dir.path());

        match sink.write_page(Path::new("Books/Dune.md"), "x") {
            Err(ConvertError::Io { path, .. }) => assert!(path.starts_with(dir.path())),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
