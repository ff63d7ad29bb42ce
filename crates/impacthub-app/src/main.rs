use std::sync::Arc;

use clap::Parser;
use impacthub_infrastructure::logging;

use impacthub_lib::presentation::bootstrap::load_config;
use impacthub_lib::presentation::checkout::TerminalCheckoutWidget;
use impacthub_lib::presentation::cli::Cli;
use impacthub_lib::presentation::commands;
use impacthub_lib::presentation::error::CommandError;
use impacthub_lib::presentation::output::Printer;
use impacthub_lib::presentation::state::AppState;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let printer = Printer::new(cli.json);

    if let Err(e) = run(cli, &printer).await {
        report(&e, &printer);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, printer: &Printer) -> Result<(), CommandError> {
    let config = load_config(cli.api_url, cli.data_dir)?;

    if let Err(e) = logging::init_logger(config.log_dir(), cli.verbose) {
        logging::init_console_logger();
        tracing::warn!("File logging unavailable, using stderr only: {}", e);
    }
    tracing::info!(api_url = %config.api_base_url(), "ImpactHub client starting");

    let state = AppState::initialize(config, Arc::new(TerminalCheckoutWidget)).await?;
    commands::run(cli.command, &state, printer).await
}

fn report(error: &CommandError, printer: &Printer) {
    tracing::error!(code = error.code, "{}", error.message);

    if printer.is_json() {
        if let Ok(body) = serde_json::to_string_pretty(error) {
            eprintln!("{}", body);
            return;
        }
    }

    if error.is_session_expired() {
        eprintln!("{} Run `impacthub login <username>` to sign in.", error.message);
    } else {
        eprintln!("Error: {}", error.message);
    }
}
