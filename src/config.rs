//! The optional `code-to-pdf.toml` configuration file.
//!
//! Every key is optional; anything given on the command line wins over the file, and
//! anything missing from both falls back to the built-in defaults.

use crate::job::{default_engine_path, MarkupMode, RenderOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked for in the current directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "code-to-pdf.toml";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Directory to read source files from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// Directory the PDFs are written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Path to the wkhtmltopdf executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wkhtmltopdf: Option<PathBuf>,
    pub markup: MarkupMode,
    /// Globs (relative to the input directory) of files to leave out
    pub exclude: Vec<String>,
    pub respect_ignore_files: bool,
    pub options: RenderOptions,
}

impl Configuration {
    /// Load and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `path` if given, otherwise the default file if it exists, otherwise defaults
    pub fn discover(path: Option<&Path>) -> Result<Configuration> {
        match path {
            Some(path) => Configuration::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Configuration::load(default_path)
                } else {
                    Ok(Configuration::default())
                }
            }
        }
    }

    /// A fully spelled-out configuration, used as the starting point written by `init`
    pub fn template() -> Configuration {
        Configuration {
            input: Some(PathBuf::from("src")),
            output: Some(PathBuf::from("pdfs")),
            wkhtmltopdf: Some(default_engine_path()),
            ..Configuration::default()
        }
    }
}
