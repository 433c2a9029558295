//! Typed page/block forest built from a Roam export.
//!
//! Everything here is plain data: the loader builds it once, the indexer and
//! renderer only borrow it.

/// A node of a page's outline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub uid: Option<String>,
    pub text: String,
    /// Heading level (1-3 in Roam), rendered as `#` markers.
    pub heading: Option<u8>,
    pub children: Vec<Block>,
    pub create_time: Option<i64>,
    pub edit_time: Option<i64>,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_heading(mut self, level: u8) -> Self {
        self.heading = Some(level);
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// The identifier, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }
}

/// A top-level note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Output title: sanitized, and `YYYY-MM-DD` for daily notes.
    pub title: String,
    /// Title exactly as it appeared in the export.
    pub source_title: String,
    pub daily: bool,
    pub children: Vec<Block>,
    pub create_time: Option<i64>,
    pub edit_time: Option<i64>,
}

impl Page {
    pub fn new(title: impl Into<String>, children: Vec<Block>) -> Self {
        let title = title.into();
        Self {
            source_title: title.clone(),
            title,
            children,
            ..Self::default()
        }
    }

    /// Depth-first walk over every block, yielding `(depth, block)` in
    /// document order. Top-level blocks have depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.children)
    }
}

/// Depth-first block iterator. A clone continues from the same position;
/// call [`Page::walk`] again for a fresh traversal.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, std::slice::Iter<'a, Block>)>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [Block]) -> Self {
        Self {
            stack: vec![(0, roots.iter())],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, iter) = self.stack.last_mut()?;
            let depth = *depth;
            match iter.next() {
                Some(block) => {
                    if !block.children.is_empty() {
                        self.stack.push((depth + 1, block.children.iter()));
                    }
                    return Some((depth, block));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Makes a page title safe to use as a file name and link target.
pub fn sanitize_title(title: &str) -> String {
    title
        .replace(':', " -")
        .chars()
        .filter(|c| !matches!(c, '"' | '^' | '\\'))
        .collect()
}
