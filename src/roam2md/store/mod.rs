//! # Output Layer
//!
//! The converter hands each rendered page to a [`PageSink`] together with a
//! path relative to the vault root. Where the bytes end up is the sink's
//! business:
//!
//! - [`fs::FileSink`]: writes under an output directory (production)
//! - [`memory::MemorySink`]: keeps files in a map (testing)
//!
//! ## Vault Layout
//!
//! ```text
//! md/
//! ├── Project X.md
//! ├── Books/
//! │   └── Dune.md         # page titled "Books/Dune"
//! └── daily/
//!     └── 2021-01-02.md   # page titled "January 2nd, 2021"
//! ```

use crate::error::Result;
use crate::model::Page;
use std::path::{Component, Path, PathBuf};

pub mod fs;
pub mod memory;

pub const PAGE_EXT: &str = "md";

/// Destination for rendered pages.
pub trait PageSink {
    /// Write `contents` to `relative`, replacing any existing file.
    /// Returns the location written to.
    fn write_page(&mut self, relative: &Path, contents: &str) -> Result<PathBuf>;
}

/// Relative output path for a page, or `None` when the title leaves nothing
/// usable for a file name.
///
/// Slashes in titles become directories. Empty, `.` and `..` segments are
/// dropped so a title can never escape the vault root.
pub fn page_path(page: &Page, daily_dir: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    if page.daily && !daily_dir.is_empty() {
        path.push(daily_dir);
    }

    let segments: Vec<&str> = page
        .title
        .split('/')
        .filter(|segment| {
            !segment.trim().is_empty()
                && matches!(Path::new(segment).components().next(), Some(Component::Normal(_)))
        })
        .collect();
    let (file, dirs) = segments.split_last()?;

    for dir in dirs {
        path.push(dir);
    }
    path.push(format!("{}.{}", file, PAGE_EXT));
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(title: &str) -> Page {
        Page {
            daily: true,
            ..Page::new(title, vec![])
        }
    }

    #[test]
    fn plain_pages_go_to_the_root() {
        assert_eq!(
            page_path(&Page::new("Project X", vec![]), "daily"),
            Some(PathBuf::from("Project X.md"))
        );
    }

    #[test]
    fn daily_pages_go_to_the_daily_dir() {
        assert_eq!(
            page_path(&daily("2021-01-02"), "daily"),
            Some(PathBuf::from("daily/2021-01-02.md"))
        );
        assert_eq!(
            page_path(&daily("2021-01-02"), ""),
            Some(PathBuf::from("2021-01-02.md"))
        );
    }

    #[test]
    fn slashes_become_directories() {
        assert_eq!(
            page_path(&Page::new("Books/Sci-Fi/Dune", vec![]), "daily"),
            Some(PathBuf::from("Books/Sci-Fi/Dune.md"))
        );
    }

    #[test]
    fn titles_cannot_escape_the_root() {
        assert_eq!(
            page_path(&Page::new("../../etc/passwd", vec![]), "daily"),
            Some(PathBuf::from("etc/passwd.md"))
        );
        assert_eq!(page_path(&Page::new("", vec![]), "daily"), None);
        assert_eq!(page_path(&Page::new("/ /", vec![]), "daily"), None);
    }
}
