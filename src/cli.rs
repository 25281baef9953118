use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Directory to read source files from (overrides `input` in the config file)
    pub input: Option<PathBuf>,

    /// Directory the PDFs are written to, mirroring the input layout (overrides `output`)
    pub output: Option<PathBuf>,

    /// Configuration file to load instead of ./code-to-pdf.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the wkhtmltopdf executable
    #[arg(long, value_name = "PATH", env = "WKHTMLTOPDF")]
    pub wkhtmltopdf: Option<PathBuf>,

    /// Let the engine load images referenced by the files
    #[arg(long)]
    pub allow_images: bool,

    /// Let the engine run javascript found in the files
    #[arg(long)]
    pub allow_javascript: bool,

    /// Keep links to external resources in the output
    #[arg(long)]
    pub allow_external_links: bool,

    /// Paste file contents into the markup without escaping them
    #[arg(long)]
    pub verbatim: bool,

    /// Skip files whose path relative to the input directory matches this glob
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Honour .gitignore / .ignore files and skip hidden files
    #[arg(long)]
    pub respect_ignore_files: bool,
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Where to write the configuration file
    #[arg(default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts every supported source file under the input directory into a PDF
    Convert(ConvertArgs),
    /// Writes a code-to-pdf.toml config file with every setting spelled out
    Init(InitArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}
