//! The immutable description of a single conversion run.

use derive_builder::Builder;
use globset::GlobMatcher;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flags forwarded to the rendering engine. Everything is suppressed by default so a
/// source file can never pull in remote content while being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Don't load images referenced by the markup
    pub suppress_images: bool,
    /// Don't run any javascript found in the markup
    pub suppress_scripts: bool,
    /// Don't turn links to external resources into PDF links
    pub suppress_external_links: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            suppress_images: true,
            suppress_scripts: true,
            suppress_external_links: true,
        }
    }
}

/// How file contents are placed into the markup template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// `<`, `>` and `&` are escaped so the text shows up exactly as written
    #[default]
    Escaped,
    /// The text is pasted in byte for byte; markup characters in the file are interpreted
    Verbatim,
}

/// The platform's usual wkhtmltopdf install location. Never checked for existence.
pub fn default_engine_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\wkhtmltopdf\bin\wkhtmltopdf.exe")
    } else {
        PathBuf::from("/usr/local/bin/wkhtmltopdf")
    }
}

#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct ConversionJob {
    input_root: PathBuf,
    output_root: PathBuf,
    #[builder(default)]
    options: RenderOptions,
    #[builder(default = "default_engine_path()")]
    engine_path: PathBuf,
    #[builder(default)]
    markup: MarkupMode,
    /// Files whose path relative to the input root matches any of these are skipped
    #[builder(setter(each(name = "exclude", into)), default)]
    excludes: Vec<GlobMatcher>,
    /// Honour .gitignore / .ignore files and skip hidden entries while walking
    #[builder(default)]
    respect_ignore_files: bool,
}

impl ConversionJob {
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    pub fn markup(&self) -> MarkupMode {
        self.markup
    }

    pub fn excludes(&self) -> &[GlobMatcher] {
        &self.excludes
    }

    pub fn respect_ignore_files(&self) -> bool {
        self.respect_ignore_files
    }
}
