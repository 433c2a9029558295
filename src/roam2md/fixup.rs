//! Markdown dialect fixups applied to written files.
//!
//! Each rule is a plain `&str -> Cow<str>` function so it can be tested on
//! its own. [`apply_all`] runs them in a fixed order.
//!
//! Delimiters are matched as maximal runs: only a run of exactly two
//! characters opens or closes a span, and the span closes at the very next
//! run. `____x____` and `$$$a$$$` are therefore left alone, and running the
//! set twice changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static DOLLAR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$+").expect("valid dollar regex"));
static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("valid underscore regex"));

pub type Rule = fn(&str) -> Cow<'_, str>;

/// Rules in application order.
pub const RULES: [(&str, Rule); 2] = [
    ("collapse-math", collapse_math),
    ("rewrite-italics", rewrite_italics),
];

/// `$$x$$` -> `$x$`
pub fn collapse_math(text: &str) -> Cow<'_, str> {
    rewrite_pairs(&DOLLAR_RUN_RE, text, "$")
}

/// `__x__` -> `*x*`
pub fn rewrite_italics(text: &str) -> Cow<'_, str> {
    rewrite_pairs(&UNDERSCORE_RUN_RE, text, "*")
}

/// Replaces each pair of consecutive two-character runs with `marker`.
fn rewrite_pairs<'t>(runs: &Regex, text: &'t str, marker: &str) -> Cow<'t, str> {
    let runs: Vec<_> = runs.find_iter(text).collect();
    let mut out = String::new();
    let mut last = 0;
    let mut i = 0;
    while i + 1 < runs.len() {
        let (open, close) = (runs[i], runs[i + 1]);
        if open.len() != 2 || close.len() != 2 {
            i += 1;
            continue;
        }
        out.push_str(&text[last..open.start()]);
        out.push_str(marker);
        out.push_str(&text[open.end()..close.start()]);
        out.push_str(marker);
        last = close.end();
        i += 2;
    }

    if last == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

pub fn apply_all(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    for (name, rule) in RULES {
        let changed = match rule(&out) {
            Cow::Owned(changed) => changed,
            Cow::Borrowed(_) => continue,
        };
        log::trace!("fixup rule {} matched", name);
        out = Cow::Owned(changed);
    }
    out
}
