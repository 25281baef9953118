//! The rendering engines that turn markup into a PDF on disk.

use crate::job::RenderOptions;
use anyhow::Result;
use std::path::Path;

mod wkhtmltopdf;
pub use wkhtmltopdf::*;

pub trait RenderEngine {
    /// Render `markup` into a document at `destination`. The destination's parent directory
    /// already exists when this is called.
    fn render(&self, markup: &str, destination: &Path, options: &RenderOptions) -> Result<()>;
}

impl<E: RenderEngine + ?Sized> RenderEngine for &E {
    fn render(&self, markup: &str, destination: &Path, options: &RenderOptions) -> Result<()> {
        (**self).render(markup, destination, options)
    }
}
