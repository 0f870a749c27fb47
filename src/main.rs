//! netkit - Main CLI entry point

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netkit_cli::app::App;
use netkit_cli::cli::Cli;
use netkit_cli::config::Config;
use netkit_cli::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run_application(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(source) = e.source() {
                eprintln!("Caused by: {}", source);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run_application(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    let app = App::new(&config)?;

    // Racing against ctrl-c drops the command future on interrupt, which
    // aborts in-flight probe tasks and kills their child processes.
    tokio::select! {
        result = app.run(cli.command) => result.map(|()| ExitCode::SUCCESS),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("received interrupt signal, shutting down");
            Ok(ExitCode::from(130))
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "netkit_cli=debug" } else { "netkit_cli=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
