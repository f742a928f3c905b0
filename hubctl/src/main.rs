use clap::Parser;
use hubctl::{Config, Workspace, cli, config::Args, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    telemetry::init_telemetry(&config.log_level)?;
    tracing::debug!("{:?}", args);

    let mut workspace = Workspace::from_config(&config)?;

    if let Err(e) = cli::run(args.command, args.json, &mut workspace).await {
        eprintln!("error: {}", e.user_message());
        let health = workspace.status().snapshot();
        if !health.available {
            eprintln!("API unavailable at {}", config.api.base_url);
        }
        tracing::debug!(error = ?e, last_error = ?health.last_error, "Command failed");
        std::process::exit(1);
    }

    Ok(())
}
