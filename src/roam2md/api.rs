//! # API Facade
//!
//! A thin layer over the commands: it loads the export, picks the output
//! sink and threads the [`ConvertConfig`] through. The CLI only talks to this
//! type.
//!
//! `ConvertApi<S: PageSink>` is generic over where pages go:
//! - Production: `ConvertApi<FileSink>`, writing under `config.output_dir`
//! - Testing: `ConvertApi<MemorySink>`
//!
//! The fixup pass always works on the filesystem, on `config.output_dir`
//! unless told otherwise.

use crate::commands::{self, convert::ConvertOptions, CmdResult};
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::loader;
use crate::store::fs::FileSink;
use crate::store::PageSink;
use std::path::Path;

pub struct ConvertApi<S: PageSink> {
    sink: S,
    config: ConvertConfig,
}

impl ConvertApi<FileSink> {
    /// Writes into `config.output_dir`.
    pub fn for_output_dir(config: ConvertConfig) -> Self {
        let sink = FileSink::new(&config.output_dir);
        Self::new(sink, config)
    }
}

impl<S: PageSink> ConvertApi<S> {
    pub fn new(sink: S, config: ConvertConfig) -> Self {
        Self { sink, config }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Converts an export file, then runs the fixups if configured.
    pub fn convert(&mut self, input: &Path) -> Result<CmdResult> {
        log::info!("loading {}", input.display());
        let pages = loader::load_file(input)?;
        self.convert_pages(&pages)
    }

    /// Same as [`ConvertApi::convert`] for an export already in memory.
    pub fn convert_export(&mut self, json: &str) -> Result<CmdResult> {
        let pages = loader::parse_export(json)?;
        self.convert_pages(&pages)
    }

    fn convert_pages(&mut self, pages: &[crate::model::Page]) -> Result<CmdResult> {
        let options = ConvertOptions::from(&self.config);
        let mut result = commands::convert::run(pages, &mut self.sink, &options)?;
        if !self.config.fixup {
            return Ok(result);
        }
        if result.written.is_empty() {
            log::info!("no pages written, skipping fixup");
            result.add_message(CmdMessage::info("No pages written; fixup skipped."));
        } else {
            result.merge(commands::fixup::run(&self.config.output_dir)?);
        }
        Ok(result)
    }

    /// Runs the Markdown fixups over `dir`, or the configured output dir.
    pub fn fixup(&self, dir: Option<&Path>) -> Result<CmdResult> {
        commands::fixup::run(dir.unwrap_or(&self.config.output_dir))
    }

    pub fn show_config(&self) -> CmdResult {
        CmdResult::default().with_config(self.config.clone())
    }
}

pub use crate::commands::{CmdMessage, ConvertStats, Failure, MessageLevel, Stage};
pub use crate::render::LinkStyle;
