use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vdj_import::cli;
use vdj_import::web;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("vdj_import=debug,info")
    } else {
        EnvFilter::new("vdj_import=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Headers(args) => {
            cli::headers::run(&args, cli.format)?;
        }
        cli::Commands::Validate(args) => {
            let can_run = cli::validate::run(args, cli.format)?;
            if !can_run {
                return Ok(ExitCode::FAILURE);
            }
        }
        cli::Commands::Formats(args) => {
            cli::formats::run(&args, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
