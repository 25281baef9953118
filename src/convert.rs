//! The `convert` command: merges the command line with the configuration file, builds the
//! job, and runs it against wkhtmltopdf.

use crate::cli::ConvertArgs;
use crate::config::Configuration;
use crate::converter::{Converter, Summary};
use crate::engine::Wkhtmltopdf;
use crate::job::{ConversionJob, ConversionJobBuilder, MarkupMode};
use anyhow::{Context, Result};
use globset::Glob;
use log::{debug, info};

/// Run a full conversion pass
pub fn run(args: &ConvertArgs) -> Result<Summary> {
    let config = Configuration::discover(args.config.as_deref())?;
    let job = build_job(args, config)?;

    let engine = Wkhtmltopdf::new(job.engine_path());
    debug!("rendering with {}", engine.executable().display());

    let converter = Converter::new(job, engine);
    debug!(
        "converting {} into {}",
        converter.job().input_root().display(),
        converter.job().output_root().display()
    );
    let summary = converter.process_directory();
    debug!("{} file(s) attempted", summary.total());
    info!("All files have been processed. ({summary})");
    Ok(summary)
}

/// Command line arguments take precedence over the configuration file
pub fn build_job(args: &ConvertArgs, config: Configuration) -> Result<ConversionJob> {
    let Configuration {
        input,
        output,
        wkhtmltopdf,
        markup,
        exclude,
        respect_ignore_files,
        mut options,
    } = config;

    let input = args
        .input
        .clone()
        .or(input)
        .context("No input directory given on the command line or in the config file")?;
    let output = args
        .output
        .clone()
        .or(output)
        .context("No output directory given on the command line or in the config file")?;

    options.suppress_images &= !args.allow_images;
    options.suppress_scripts &= !args.allow_javascript;
    options.suppress_external_links &= !args.allow_external_links;

    let markup = if args.verbatim {
        MarkupMode::Verbatim
    } else {
        markup
    };

    let mut builder = ConversionJobBuilder::default();
    builder
        .input_root(input)
        .output_root(output)
        .options(options)
        .markup(markup)
        .respect_ignore_files(args.respect_ignore_files || respect_ignore_files);

    if let Some(path) = args.wkhtmltopdf.clone().or(wkhtmltopdf) {
        builder.engine_path(path);
    }

    for pattern in exclude.iter().chain(args.excludes.iter()) {
        let glob = Glob::new(pattern)
            .with_context(|| format!("Invalid exclude glob: {pattern}"))?
            .compile_matcher();
        builder.exclude(glob);
    }

    builder.build().context("Failed to build conversion job")
}
