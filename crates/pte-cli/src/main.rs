use std::process::ExitCode;

use clap::Parser;
use pte_core::errors::CoreError;
use pte_db::ServiceError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

/// Invalid invocation: bad flag value or failed validation.
const EXIT_USAGE: u8 = 2;
/// Logical failure: not found, storage, transport.
const EXIT_FAILURE: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("pte error: {error:#}");
            ExitCode::from(exit_code(&error))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose, cli.command.is_long_running())?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;
    context::warn_unconfigured(&config);

    match cli.command {
        cli::Commands::Db { action } => commands::db::handle(&action, &config, &flags).await,
        cli::Commands::Bot { action } => commands::bot::handle(&action, &config).await,
        command => {
            let ctx = context::AppContext::init(config).await?;
            commands::dispatch::dispatch(command, &ctx, &flags).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool, long_running: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else if long_running {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PTE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> u8 {
    let invalid = error.chain().any(|cause| {
        cause
            .downcast_ref::<ServiceError>()
            .is_some_and(ServiceError::is_validation)
            || cause
                .downcast_ref::<CoreError>()
                .is_some_and(CoreError::is_validation)
    });
    if invalid { EXIT_USAGE } else { EXIT_FAILURE }
}
