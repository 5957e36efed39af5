use anyhow::Context;
use bidgate_config::BidgateConfig;
use clap::Parser;

mod cli;

use cli::{Cli, Commands, SchemaArgs, ServeArgs};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("bidgate error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        Some(Commands::Schema(args)) => print_schema(&args),
        Some(Commands::Serve(args)) => serve(cli.config.as_deref(), &args).await,
        None => serve(cli.config.as_deref(), &ServeArgs::default()).await,
    }
}

async fn serve(config_path: Option<&std::path::Path>, args: &ServeArgs) -> anyhow::Result<()> {
    let mut config =
        BidgateConfig::load_with_dotenv(config_path).context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;
    bidgate_server::serve(&config).await
}

fn print_schema(args: &SchemaArgs) -> anyhow::Result<()> {
    let schema = bidgate_server::schema::schema_for_type(&args.type_name).with_context(|| {
        format!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            bidgate_server::schema::TYPE_NAMES.join(", ")
        )
    })?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("BIDGATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
