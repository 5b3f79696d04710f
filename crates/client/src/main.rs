use std::process::ExitCode;

use clap::Parser;
use ninjatab::{
    config::{Cli, load as load_config},
    error::Result,
    store::AuthStore,
};

mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match load_config(&cli.overrides) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ninjatab={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, settings: ninjatab::AppConfig) -> Result<()> {
    let client = ninjatab::Client::new(&settings.base_url);
    let mut auth = AuthStore::new(client, settings.session_path.clone());
    auth.restore()?;
    commands::dispatch(cli.command, &mut auth).await
}
