use crate::error::{ConvertError, Result};
use crate::render::LinkStyle;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "roam2md.json";
const DEFAULT_OUTPUT_DIR: &str = "md";
const DEFAULT_DAILY_DIR: &str = "daily";

/// Conversion settings, read from `roam2md.json`.
///
/// Every key is optional. Command-line flags win over the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Root of the generated vault.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Subdirectory of `output_dir` for daily notes. Empty keeps them at the root.
    #[serde(default = "default_daily_dir")]
    pub daily_dir: String,

    #[serde(default)]
    pub link_style: LinkStyle,

    /// Abort before writing anything if a reference target is missing.
    #[serde(default)]
    pub strict_references: bool,

    /// Run the Markdown fixups right after converting.
    #[serde(default)]
    pub fixup: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_daily_dir() -> String {
    DEFAULT_DAILY_DIR.to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            daily_dir: default_daily_dir(),
            link_style: LinkStyle::default(),
            strict_references: false,
            fixup: false,
        }
    }
}

impl ConvertConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&config_path)
    }

    /// Load a specific config file. Unlike [`ConvertConfig::load`] the file must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ConvertError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolves the effective config: an explicit file, else `roam2md.json`
    /// in `cwd`, else the one in the user config directory, else defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("using config {}", path.display());
            return Self::load_file(path);
        }

        let candidates = std::iter::once(cwd.to_path_buf()).chain(global_config_dir());
        for dir in candidates {
            if dir.join(CONFIG_FILENAME).exists() {
                log::debug!("using config from {}", dir.display());
                return Self::load(&dir);
            }
        }
        Ok(Self::default())
    }
}

fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "roam2md", "roam2md").map(|dirs| dirs.config_dir().to_path_buf())
}
