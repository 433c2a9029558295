//! # Markdown Renderer
//!
//! Turns a page's block tree into Obsidian outline lines, one per block:
//!
//! ```text
//! - top level block
//! 	- child (one tab per level)
//! 	- ## heading child
//! - referenced block  ^abc123
//! ```
//!
//! Block text goes through a fixed pipeline before emission: references are
//! resolved against the [`ReferenceIndex`], then daily-note links are
//! rewritten to their `YYYY-MM-DD` titles. A block gets a trailing anchor
//! only when something else in the export points at it.
//!
//! Rendering never fails. A reference the index cannot resolve is kept as
//! raw text and logged; strict runs reject those before rendering starts.

use crate::daily;
use crate::index::ReferenceIndex;
use crate::model::{Block, Page, Walk};
use crate::references::{self, RefKind, Reference};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How a resolved reference is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `text [[Page#^uid]]` for every reference form.
    #[default]
    Inline,
    /// `[[Page#^uid|text]]`, and `![[Page#^uid]]` transclusion for embeds.
    Alias,
}

/// Obsidian block ids may not contain underscores.
pub fn anchor_id(uid: &str) -> String {
    uid.replace('_', "")
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer<'i> {
    index: &'i ReferenceIndex,
    link_style: LinkStyle,
}

impl<'i> Renderer<'i> {
    pub fn new(index: &'i ReferenceIndex) -> Self {
        Self {
            index,
            link_style: LinkStyle::default(),
        }
    }

    pub fn with_link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }

    /// Lazily renders the page. Call again for a fresh pass; the output is
    /// the same every time.
    pub fn lines<'p>(&self, page: &'p Page) -> PageLines<'p, 'i> {
        PageLines {
            renderer: *self,
            walk: page.walk(),
        }
    }

    /// The whole page as file contents, lines joined by `\n`.
    pub fn render_page(&self, page: &Page) -> String {
        self.lines(page).collect::<Vec<_>>().join("\n")
    }

    pub fn render_block(&self, depth: usize, block: &Block) -> String {
        let indent = "\t".repeat(depth);
        let mut line = format!("{}- ", indent);
        if let Some(level) = block.heading.filter(|level| *level > 0) {
            line.push_str(&"#".repeat(level as usize));
            line.push(' ');
        }

        let mut trail: Vec<String> = block.id().map(str::to_string).into_iter().collect();
        let resolved = self.resolve_all(&block.text, &mut trail);
        let text = daily::replace_daylinks(&resolved);
        let continuation = format!("\n{}  ", indent);
        line.push_str(&text.lines().collect::<Vec<_>>().join(&continuation));

        if let Some(uid) = block.id().filter(|uid| self.index.is_referenced(uid)) {
            line.push_str("  ^");
            line.push_str(&anchor_id(uid));
        }
        line
    }

    /// Resolves references, then normalizes daily-note links.
    pub fn render_text(&self, text: &str) -> String {
        let resolved = self.resolve_all(text, &mut Vec::new());
        daily::replace_daylinks(&resolved).into_owned()
    }

    /// `trail` holds the uids being expanded; a reference back into it is a
    /// cycle and stays raw.
    fn resolve_all<'t>(&self, text: &'t str, trail: &mut Vec<String>) -> Cow<'t, str> {
        references::replace(text, |reference| self.resolve(reference, trail))
    }

    fn resolve(&self, reference: &Reference<'_>, trail: &mut Vec<String>) -> Option<String> {
        let uid = reference.uid;
        let Some(entry) = self.index.get(uid) else {
            log::warn!("unresolved block reference (({})), left as is", uid);
            return None;
        };
        if trail.iter().any(|seen| seen == uid) {
            log::warn!("cyclic block reference (({})), left as is", uid);
            return None;
        }

        trail.push(uid.to_string());
        let text = self.resolve_all(&entry.text, trail).into_owned();
        trail.pop();

        let target = format!("{}#^{}", entry.page, anchor_id(uid));
        let replacement = match (self.link_style, reference.kind) {
            (LinkStyle::Inline, _) => format!("{} [[{}]]", text, target),
            (LinkStyle::Alias, RefKind::Embed) => format!("![[{}]]", target),
            (LinkStyle::Alias, _) => format!("[[{}|{}]]", target, text),
        };
        Some(replacement)
    }
}

/// Iterator over a page's rendered lines, in document order.
#[derive(Debug, Clone)]
pub struct PageLines<'p, 'i> {
    renderer: Renderer<'i>,
    walk: Walk<'p>,
}

impl Iterator for PageLines<'_, '_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.walk
            .next()
            .map(|(depth, block)| self.renderer.render_block(depth, block))
    }
}
