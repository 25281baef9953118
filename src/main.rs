use anyhow::Result;
use cli::Cli;
use std::process::ExitCode;

mod cli;
mod config;
mod convert;
mod converter;
mod discovery;
mod engine;
mod init;
mod job;
mod markup;
#[cfg(test)]
mod test_log;

fn main() -> ExitCode {
    use clap::Parser;
    let cli = Cli::parse();

    // conversion progress is the program's output, so it goes to stdout
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
    log::debug!("cli: {cli:?}");

    if let Err(e) = try_main(&cli) {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Convert(args) => convert::run(args).map(|_| ()),
        cli::Commands::Init(args) => init::run(args),
    }
}
