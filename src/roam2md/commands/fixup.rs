use crate::commands::{CmdMessage, CmdResult, Failure, Stage};
use crate::error::{ConvertError, Result};
use crate::fixup::apply_all;
use crate::store::PAGE_EXT;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Applies the Markdown fixups to every `.md` file below `root`, in place.
///
/// Files are independent: one that cannot be read or written is recorded as
/// a failure and the walk continues. Only a missing `root` is fatal.
pub fn run(root: &Path) -> Result<CmdResult> {
    if !root.is_dir() {
        return Err(ConvertError::io(
            root,
            io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut result = CmdResult::default();
    let mut scanned = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                log::error!("cannot read {}: {}", path.display(), err);
                result.failures.push(Failure {
                    stage: Stage::Fixup,
                    path,
                    page: None,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        let is_page = entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == PAGE_EXT);
        if !is_page {
            continue;
        }

        scanned += 1;
        match fix_file(path) {
            Ok(true) => result.fixed.push(path.to_path_buf()),
            Ok(false) => {}
            Err(err) => {
                log::error!("fixup failed: {}", err);
                result.failures.push(Failure {
                    stage: Stage::Fixup,
                    path: path.to_path_buf(),
                    page: None,
                    reason: err.to_string(),
                });
            }
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Fixed {} of {} Markdown files under {}.",
        result.fixed.len(),
        scanned,
        root.display()
    )));
    for failure in &result.failures {
        result.messages.push(CmdMessage::error(format!(
            "Failed to fix {}: {}",
            failure.path.display(),
            failure.reason
        )));
    }
    Ok(result)
}

/// Rewrites one file in place. Returns whether anything changed.
pub fn fix_file(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    match apply_all(&content) {
        Cow::Borrowed(_) => Ok(false),
        Cow::Owned(fixed) => {
            fs::write(path, fixed).map_err(|e| ConvertError::io(path, e))?;
            log::debug!("fixed {}", path.display());
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("daily")).unwrap();
        fs::write(dir.path().join("Physics.md"), "- Energy: $$E=mc^2$$").unwrap();
        fs::write(dir.path().join("daily/2021-01-02.md"), "- __important__").unwrap();
        fs::write(dir.path().join("Clean.md"), "- nothing here").unwrap();
        fs::write(dir.path().join("notes.txt"), "__untouched__").unwrap();
        dir
    }

    #[test]
    fn rewrites_markdown_files_recursively() {
        let dir = vault();
        let result = run(dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("Physics.md")).unwrap(),
            "- Energy: $E=mc^2$"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("daily/2021-01-02.md")).unwrap(),
            "- *important*"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "__untouched__"
        );
        assert_eq!(result.fixed.len(), 2);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = vault();
        run(dir.path()).unwrap();
        let physics = fs::read_to_string(dir.path().join("Physics.md")).unwrap();

        let again = run(dir.path()).unwrap();

        assert!(again.fixed.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("Physics.md")).unwrap(),
            physics
        );
    }

    #[test]
    fn unreadable_file_does_not_stop_the_pass() {
        let dir = vault();
        fs::write(dir.path().join("Binary.md"), b"\xff\xfe\x00_").unwrap();

        let result = run(dir.path()).unwrap();

        assert_eq!(result.fixed.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].path.ends_with("Binary.md"));
        assert!(result.has_failures(Stage::Fixup));
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(&dir.path().join("md")),
            Err(ConvertError::Io { .. })
        ));
    }
}
