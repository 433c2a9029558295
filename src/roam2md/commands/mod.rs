use crate::config::ConvertConfig;
use std::path::PathBuf;

pub mod convert;
pub mod fixup;

/// Severity of a line of command output; the CLI picks the colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    fn at(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::at(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::at(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::at(MessageLevel::Warning, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::at(MessageLevel::Error, content)
    }
}

/// Which pass a non-fatal failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Write,
    Fixup,
}

/// A file the run could not produce or fix. The run carries on past these.
#[derive(Debug, Clone)]
pub struct Failure {
    pub stage: Stage,
    pub path: PathBuf,
    /// Output title, for write failures.
    pub page: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    pub pages: usize,
    pub daily_pages: usize,
    pub skipped_pages: usize,
    pub indexed_uids: usize,
    pub referenced_uids: usize,
    pub dangling_references: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub written: Vec<PathBuf>,
    pub fixed: Vec<PathBuf>,
    pub failures: Vec<Failure>,
    pub stats: Option<ConvertStats>,
    pub config: Option<ConvertConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_failures(&self, stage: Stage) -> bool {
        self.failures.iter().any(|f| f.stage == stage)
    }

    /// Appends the outcome of a follow-up pass.
    pub fn merge(&mut self, other: CmdResult) {
        self.written.extend(other.written);
        self.fixed.extend(other.fixed);
        self.failures.extend(other.failures);
        self.messages.extend(other.messages);
        if other.stats.is_some() {
            self.stats = other.stats;
        }
        if other.config.is_some() {
            self.config = other.config;
        }
    }
}
