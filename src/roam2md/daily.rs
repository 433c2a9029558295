//! Daily-note titles.
//!
//! Roam names daily pages like `January 2nd, 2021`. Obsidian expects
//! `2021-01-02`, both as the file name and as the link target.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_PATTERN: &str = r"(January|February|March|April|May|June|July|August|September|October|November|December) ([0-9]{1,2})[a-z]{2}, ([0-9]{4})";

static DAILY_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{}$", DATE_PATTERN)).expect("valid daily title regex"));
static DAYLINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\[\[{}\]\]", DATE_PATTERN)).expect("valid daily link regex")
});

/// Parses a daily-note title. Returns `None` for anything that is not a
/// valid calendar date in Roam's format.
pub fn parse_daily_title(title: &str) -> Option<NaiveDate> {
    DAILY_TITLE_RE.captures(title).and_then(|caps| date_from(&caps))
}

/// `YYYY-MM-DD`
pub fn iso_title(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Rewrites `[[January 2nd, 2021]]` links to `[[2021-01-02]]`. Links that
/// look like dates but are not (e.g. February 30th) are left alone.
pub fn replace_daylinks(text: &str) -> Cow<'_, str> {
    DAYLINK_RE.replace_all(text, |caps: &Captures| match date_from(caps) {
        Some(date) => format!("[[{}]]", iso_title(date)),
        None => caps[0].to_string(),
    })
}

fn date_from(caps: &Captures) -> Option<NaiveDate> {
    let month = MONTHS.iter().position(|m| *m == &caps[1])? as u32 + 1;
    let day = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_daily_titles() {
        let date = parse_daily_title("January 2nd, 2021").unwrap();
        assert_eq!(iso_title(date), "2021-01-02");

        let date = parse_daily_title("December 31st, 1999").unwrap();
        assert_eq!(iso_title(date), "1999-12-31");

        let date = parse_daily_title("March 23rd, 2020").unwrap();
        assert_eq!(iso_title(date), "2020-03-23");
    }

    #[test]
    fn rejects_non_daily_titles() {
        assert_eq!(parse_daily_title("Project X"), None);
        assert_eq!(parse_daily_title("January 2nd, 2021 retro"), None);
        assert_eq!(parse_daily_title("Jan 2nd, 2021"), None);
        assert_eq!(parse_daily_title("February 30th, 2021"), None);
    }

    #[test]
    fn rewrites_daylinks() {
        assert_eq!(
            replace_daylinks("met on [[January 2nd, 2021]] and [[May 5th, 2020]]"),
            "met on [[2021-01-02]] and [[2020-05-05]]"
        );
    }

    #[test]
    fn leaves_other_links_alone() {
        let text = "see [[Project X]] and [[February 30th, 2021]]";
        assert_eq!(replace_daylinks(text), text);
        assert!(matches!(replace_daylinks("no links"), Cow::Borrowed(_)));
    }
}
