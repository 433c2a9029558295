use crate::commands::{CmdMessage, CmdResult, ConvertStats, Failure, Stage};
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::index::ReferenceIndex;
use crate::model::Page;
use crate::render::{LinkStyle, Renderer};
use crate::store::{page_path, PageSink};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub daily_dir: String,
    pub link_style: LinkStyle,
    pub strict: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::from(&ConvertConfig::default())
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            daily_dir: config.daily_dir.clone(),
            link_style: config.link_style,
            strict: config.strict_references,
        }
    }
}

/// Indexes the forest, then renders and writes every page.
///
/// Write failures are collected in the result and the remaining pages are
/// still written. In strict mode a dangling reference aborts the run before
/// anything is written.
pub fn run<S: PageSink>(
    pages: &[Page],
    sink: &mut S,
    options: &ConvertOptions,
) -> Result<CmdResult> {
    let index = ReferenceIndex::build(pages);

    if options.strict {
        if let Some(missing) = index.missing().first() {
            return Err(ConvertError::MissingReference {
                id: missing.uid.clone(),
                page: missing.page.clone(),
            });
        }
    }

    let renderer = Renderer::new(&index).with_link_style(options.link_style);
    let mut result = CmdResult::default();
    let mut stats = ConvertStats {
        indexed_uids: index.len(),
        referenced_uids: index.referenced_count(),
        dangling_references: index.missing().len(),
        ..ConvertStats::default()
    };
    let mut seen = HashSet::new();

    for page in pages {
        let Some(relative) = page_path(page, &options.daily_dir) else {
            log::warn!("skipping page with unusable title {:?}", page.source_title);
            stats.skipped_pages += 1;
            continue;
        };
        if !seen.insert(relative.clone()) {
            log::warn!(
                "page \"{}\" overwrites an earlier page at {}",
                page.title,
                relative.display()
            );
        }

        let contents = renderer.render_page(page);
        match sink.write_page(&relative, &contents) {
            Ok(path) => {
                log::debug!("wrote {}", path.display());
                stats.pages += 1;
                if page.daily {
                    stats.daily_pages += 1;
                }
                result.written.push(path);
            }
            Err(err) => {
                log::error!("failed to write page \"{}\": {}", page.title, err);
                result.failures.push(Failure {
                    stage: Stage::Write,
                    path: relative,
                    page: Some(page.title.clone()),
                    reason: err.to_string(),
                });
            }
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Converted {} pages ({} daily notes), {} of {} block uids referenced.",
        stats.pages, stats.daily_pages, stats.referenced_uids, stats.indexed_uids
    )));
    if stats.skipped_pages > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} pages without a usable title.",
            stats.skipped_pages
        )));
    }
    if stats.dangling_references > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} references point at blocks missing from the export; left as is.",
            stats.dangling_references
        )));
    }
    for failure in &result.failures {
        result.messages.push(CmdMessage::error(format!(
            "Failed to write page \"{}\": {}",
            failure.page.as_deref().unwrap_or_default(),
            failure.reason
        )));
    }

    result.stats = Some(stats);
    Ok(result)
}
