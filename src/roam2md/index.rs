//! # Reference Index
//!
//! Built once per run from the whole forest, then shared read-only with the
//! renderer.
//!
//! Construction makes two passes:
//!
//! 1. Record every block uid with its raw text and the (output) title of the
//!    page that owns it.
//! 2. Scan every block's text for references. A target found in the index is
//!    marked *referenced*; that is what earns the target block an anchor
//!    (`^uid`) when rendered. Targets that are not in the index are kept as
//!    [`MissingReference`]s so strict runs can refuse to write anything.
//!
//! The second pass needs the complete uid table, since a block may reference
//! a block from a page that comes later in the export.

use crate::model::Page;
use crate::references;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub text: String,
    pub page: String,
}

/// A reference whose target uid does not exist in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub uid: String,
    /// Output title of the page containing the dangling reference.
    pub page: String,
}

#[derive(Debug, Default)]
pub struct ReferenceIndex {
    entries: HashMap<String, IndexEntry>,
    referenced: HashSet<String>,
    missing: Vec<MissingReference>,
}

impl ReferenceIndex {
    pub fn build(pages: &[Page]) -> Self {
        let mut index = Self::default();

        for page in pages {
            for (_, block) in page.walk() {
                let Some(uid) = block.id() else { continue };
                if index.entries.contains_key(uid) {
                    log::warn!(
                        "duplicate block uid {} on page \"{}\", keeping the first",
                        uid,
                        page.title
                    );
                    continue;
                }
                index.entries.insert(
                    uid.to_string(),
                    IndexEntry {
                        text: block.text.clone(),
                        page: page.title.clone(),
                    },
                );
            }
        }

        for page in pages {
            for (_, block) in page.walk() {
                for reference in references::scan(&block.text) {
                    if index.entries.contains_key(reference.uid) {
                        index.referenced.insert(reference.uid.to_string());
                    } else {
                        index.missing.push(MissingReference {
                            uid: reference.uid.to_string(),
                            page: page.title.clone(),
                        });
                    }
                }
            }
        }

        log::info!(
            "indexed {} block uids, {} referenced, {} dangling references",
            index.entries.len(),
            index.referenced.len(),
            index.missing.len()
        );
        index
    }

    pub fn get(&self, uid: &str) -> Option<&IndexEntry> {
        self.entries.get(uid)
    }

    pub fn is_referenced(&self, uid: &str) -> bool {
        self.referenced.contains(uid)
    }

    pub fn missing(&self) -> &[MissingReference] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn referenced_count(&self) -> usize {
        self.referenced.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn forest() -> Vec<Page> {
        vec![
            Page::new(
                "Project X",
                vec![
                    Block::new("See ((abc123)) and {{embed: ((later0001))}}"),
                    Block::new("Do the thing")
                        .with_uid("abc123")
                        .with_children(vec![Block::new("unreferenced").with_uid("lonely")]),
                ],
            ),
            Page::new(
                "Later",
                vec![
                    Block::new("target").with_uid("later0001"),
                    Block::new("dangling ((nowhere))"),
                ],
            ),
        ]
    }

    #[test]
    fn indexes_uids_with_owning_page() {
        let index = ReferenceIndex::build(&forest());
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.get("abc123"),
            Some(&IndexEntry {
                text: "Do the thing".into(),
                page: "Project X".into(),
            })
        );
        assert_eq!(index.get("later0001").unwrap().page, "Later");
        assert_eq!(index.get("lonely").unwrap().text, "unreferenced");
    }

    #[test]
    fn marks_only_referenced_targets() {
        let index = ReferenceIndex::build(&forest());
        assert!(index.is_referenced("abc123"));
        assert!(index.is_referenced("later0001"));
        assert!(!index.is_referenced("lonely"));
        assert_eq!(index.referenced_count(), 2);
    }

    #[test]
    fn records_dangling_references() {
        let index = ReferenceIndex::build(&forest());
        assert_eq!(
            index.missing(),
            &[MissingReference {
                uid: "nowhere".into(),
                page: "Later".into(),
            }]
        );
        assert!(!index.is_referenced("nowhere"));
    }

    #[test]
    fn first_duplicate_uid_wins() {
        let pages = vec![
            Page::new("A", vec![Block::new("first").with_uid("dup")]),
            Page::new("B", vec![Block::new("second").with_uid("dup")]),
        ];
        let index = ReferenceIndex::build(&pages);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("dup").unwrap().page, "A");
    }

    #[test]
    fn empty_uids_are_not_indexed() {
        let pages = vec![Page::new("A", vec![Block::new("x").with_uid("")])];
        assert!(ReferenceIndex::build(&pages).is_empty());
    }
}
