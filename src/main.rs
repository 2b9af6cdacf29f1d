use clap::Parser;

use ping_notifier::cli::{Cli, CommandHandler, Commands, ConfigurationMerger};
use ping_notifier::logger::init_logger;
use ping_notifier::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --env wins over ambient environment detection; it has to be
    // in place before the loader decides which files to read.
    if let Some(env) = &cli.env {
        let app_env: ping_notifier::config::Environment = env.clone().into();
        unsafe {
            std::env::set_var("PING_APP_ENV", app_env.as_str());
        }
    }

    let merger = ConfigurationMerger::from_config_path(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    let settings = merger
        .merge_cli_args(&cli)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| anyhow::anyhow!("Invalid logger configuration: {}", e))?;
    init_logger(logger_config)?;

    match cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            let handler = CommandHandler::new(settings);
            handler
                .handle_serve(true)
                .await
                .map_err(|e| anyhow::anyhow!("Dry run failed: {}", e))?;
            Ok(())
        }
        // `serve` is the default command
        _ => Server::new(settings).run().await,
    }
}
