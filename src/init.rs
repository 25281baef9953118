//! The `init` command: writes a configuration file with every setting spelled out so it
//! can be edited rather than written from scratch.

use crate::cli::InitArgs;
use crate::config::Configuration;
use anyhow::{bail, Context, Result};

pub fn run(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            args.path.display()
        );
    }

    let config = toml::to_string_pretty(&Configuration::template())
        .context("Failed to convert configuration to TOML")?;
    std::fs::write(&args.path, config)
        .with_context(|| format!("Failed to write {}", args.path.display()))?;
    println!("{} written!", args.path.display());

    Ok(())
}
