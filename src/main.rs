use clap::Parser;
use slack_notifier::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, merger) = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;
    merger.log_sources();

    tracing::debug!(
        version = slack_notifier::pkg_version(),
        "Starting {}",
        settings.application.name
    );

    cli::execute_command(&cli, settings).await?;

    Ok(())
}
