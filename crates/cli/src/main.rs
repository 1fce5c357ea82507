mod cli;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webpbin_core::{
    load_config, load_default_config, validate_config, ArgumentPolicy, Config, Invocation,
    ToolSet,
};

use cli::{Cli, Commands, IoArgs, Operation};
use output::StagedOutput;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    // Stdout carries the converted bytes, so logs go to stderr.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_config(explicit: Option<PathBuf>) -> Result<Config> {
    let path = explicit.or_else(|| std::env::var("WEBPBIN_CONFIG").ok().map(PathBuf::from));

    let config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_default_config().context("Failed to load default configuration")?,
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = resolve_config(cli.config)?;
    let tools = ToolSet::new(&config);

    match cli.command {
        Commands::Encode(io) => convert(tools.encode(), &io, None).await,
        Commands::Mux(io) => convert(tools.mux(), &io, None).await,
        Commands::Gif2webp(io) => convert(tools.gif2webp(), &io, None).await,
        Commands::Animate { io, second } => {
            convert(tools.animate(), &io, second.as_deref()).await
        }
        Commands::Clip(io) => convert(tools.clip(), &io, None).await,
        Commands::Mp3(io) => convert(tools.mp3(), &io, None).await,
        Commands::Version { operation } => {
            let version = match operation {
                Operation::Encode => tools.encode().version().await,
                Operation::Mux => tools.mux().version().await,
                Operation::Gif2webp => tools.gif2webp().version().await,
                Operation::Animate => tools.animate().version().await,
                Operation::Clip => tools.clip().version().await,
                Operation::Mp3 => tools.mp3().version().await,
            }
            .context("Version query failed")?;
            println!("{}", version);
            Ok(())
        }
    }
}

/// Wires files or stdio into the invocation and runs it once.
async fn convert<P: ArgumentPolicy>(
    mut invocation: Invocation<P>,
    io: &IoArgs,
    second: Option<&Path>,
) -> Result<()> {
    match (&io.input, second) {
        (Some(input), Some(second)) => {
            invocation.input_files(input, second);
        }
        (Some(input), None) => {
            invocation.input_file(input);
        }
        (None, Some(second)) => {
            invocation.input_with_file(tokio::io::stdin(), second);
        }
        (None, None) => {
            invocation.input(tokio::io::stdin());
        }
    }

    let staged = match &io.output {
        Some(path) => {
            let (staged, file) = StagedOutput::create(path)?;
            invocation.output(file);
            Some(staged)
        }
        None => {
            invocation.output(tokio::io::stdout());
            None
        }
    };

    let operation = invocation.policy().operation();
    debug!("Running {}", operation);
    invocation
        .run()
        .await
        .with_context(|| format!("{} failed", operation))?;

    if let Some(staged) = staged {
        staged.commit()?;
    }
    Ok(())
}
