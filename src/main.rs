use std::process::ExitCode;

use clap::Parser;
use pair_mcp_gateway::cli::{self, Cli};
use pair_mcp_gateway::infra::{self, config::Config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(command) = cli.command {
        return cli::run_commands(command).await;
    }

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    infra::logging::init(&cfg);
    infra::logging::install_panic_hook();

    match infra::boot::run_server(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "gateway stopped");
            ExitCode::FAILURE
        }
    }
}
