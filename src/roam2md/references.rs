//! Block reference syntax.
//!
//! Three forms point at another block by uid:
//!
//! - reference: `((uid))`
//! - embed: `{{embed: ((uid))}}` or `{{[[embed]]: ((uid))}}`
//! - mention: `{{mentions: ((uid))}}` or `{{[[mentions]]: ((uid))}}`
//!
//! Anything that does not match exactly is plain text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\{\{(?:\[\[)?(embed|mentions)(?:\]\])?:\s*\(\(([\w-]+)\)\)\s*\}\}|\(\(([\w-]+)\)\)",
    )
    .expect("valid block reference regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Reference,
    Embed,
    Mention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'t> {
    pub kind: RefKind,
    pub uid: &'t str,
    /// The full matched syntax, e.g. `{{embed: ((uid))}}`.
    pub raw: &'t str,
}

fn from_captures<'t>(caps: &Captures<'t>) -> Reference<'t> {
    let raw = caps.get(0).map_or("", |m| m.as_str());
    match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(kind), Some(uid), _) => Reference {
            kind: if kind.as_str() == "embed" {
                RefKind::Embed
            } else {
                RefKind::Mention
            },
            uid: uid.as_str(),
            raw,
        },
        (_, _, Some(uid)) => Reference {
            kind: RefKind::Reference,
            uid: uid.as_str(),
            raw,
        },
        _ => unreachable!("reference regex always captures a uid"),
    }
}

/// All references in `text`, leftmost first, non-overlapping.
pub fn scan(text: &str) -> impl Iterator<Item = Reference<'_>> {
    REFERENCE_RE.captures_iter(text).map(|caps| from_captures(&caps))
}

/// Replaces every reference for which `resolve` returns a replacement.
/// References it declines are kept verbatim.
pub fn replace<'t, F>(text: &'t str, mut resolve: F) -> Cow<'t, str>
where
    F: FnMut(&Reference<'_>) -> Option<String>,
{
    REFERENCE_RE.replace_all(text, |caps: &Captures| {
        let reference = from_captures(caps);
        resolve(&reference).unwrap_or_else(|| reference.raw.to_string())
    })
}
