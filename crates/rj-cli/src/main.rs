use anyhow::Context;
use clap::Parser;
use rj_config::RjConfig;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rj error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = RjConfig::load_with_dotenv().context("failed to load configuration")?;
    context::warn_unconfigured(&config);

    let seed = context::load_seed(&flags, &config)?;
    let ctx = context::AppContext::init(config, seed)
        .await
        .context("failed to initialize rolejuggler context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ROLEJUGGLER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
