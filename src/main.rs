use clap::Parser;
use context_creator::cli::CliArgs;
use context_creator::copy::ContextCreatorConfig;
use context_creator::copy_project_context;
use context_creator::logger::initialize_logger;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger(cli_args.verbose);

    let config = ContextCreatorConfig::from(cli_args);
    match copy_project_context(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
