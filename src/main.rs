use anyhow::Context;
use mailform::prelude::*;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

async fn run() -> anyhow::Result<()> {
    let config = FormConfig::from_env()?;

    let gateway = OpenAIGateway::with_config(config.gateway_config())
        .context("failed to build the HTTP client")?;
    let broker = LlmBroker::new(config.model.clone(), Arc::new(gateway))
        .with_config(config.completion_config());
    let controller = ConversationController::default();

    let stdin = io::stdin();
    let mut shell = FormShell::new(controller, broker, stdin.lock(), io::stdout());
    shell.run().await.context("the form stopped unexpectedly")?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more.
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
