//! Binary entrypoint: the photo source adapter and a headless viewer driver.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use slackin_viewer::client::http_client;
use slackin_viewer::config::Configuration;
use slackin_viewer::events::ViewerInput;
use slackin_viewer::logging;
use slackin_viewer::source::FlickrSource;
use slackin_viewer::tasks;
use slackin_viewer::viewer::{SharedPresentation, Viewer};
use slackin_viewer::web;

#[derive(Debug, Parser)]
#[command(
    name = "slackin-viewer",
    version,
    about = "Photo set adapter and lightbox viewer"
)]
struct Cli {
    /// Path to YAML config file; built-in defaults when omitted.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the photo set endpoint.
    Serve,
    /// Query the photo API once and print the adapter response to stdout.
    Fetch,
    /// Run a headless viewer driven by commands on stdin.
    View,
}

// `view` samples the presentation after `yield_now`, which only lets the
// viewer task run first on a single-threaded runtime.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = try_main().await {
        error!(error = ?err, "slackin-viewer exited with error");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = Configuration::load_or_default(cli.config.as_deref())?;
    info!(command = ?cli.command, config = ?cli.config, "starting slackin-viewer");

    match cli.command {
        Commands::Serve => {
            cfg.adapter.validate().context("invalid adapter configuration")?;
            cfg.upstream.validate().context("invalid upstream configuration")?;
            web::run(&cfg).await
        }
        Commands::Fetch => {
            cfg.upstream.validate().context("invalid upstream configuration")?;
            fetch_once(&cfg).await
        }
        Commands::View => {
            cfg.viewer.validate().context("invalid viewer configuration")?;
            run_headless_viewer(&cfg).await
        }
    }
}

async fn fetch_once(cfg: &Configuration) -> Result<()> {
    let client = http_client().context("failed to build http client")?;
    let photos = FlickrSource::new(client, cfg.upstream.clone())
        .fetch()
        .await
        .context("photo source request failed")?;
    println!("{}", serde_json::to_string(&photos)?);
    Ok(())
}

/// Reads one command per line (`open`, `next`, `esc`, `move`, ...) and
/// prints the presentation as JSON after each.
async fn run_headless_viewer(cfg: &Configuration) -> Result<()> {
    let (input_tx, input_rx) = mpsc::channel::<ViewerInput>(32);
    let cancel = CancellationToken::new();
    let presentation = SharedPresentation::new();

    let viewer = Viewer::new(presentation.clone(), &cfg.viewer);
    let viewer_task = tokio::spawn(tasks::viewer::run(viewer, input_rx, cancel.clone()));

    let client = http_client().context("failed to build http client")?;
    let fetch_task = tokio::spawn(tasks::fetch::run(
        client,
        cfg.viewer.source_url.clone(),
        input_tx.clone(),
        cancel.clone(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        match ViewerInput::from_command(line) {
            Some(input) => {
                if input_tx.send(input).await.is_err() {
                    warn!("viewer task stopped");
                    break;
                }
            }
            None => {
                warn!(command = line, "unknown command");
                continue;
            }
        }
        tokio::task::yield_now().await;
        let current = presentation.snapshot();
        debug!(classes = ?current.class_summary(), "presentation classes");
        let snapshot = serde_json::to_string(&current)?;
        stdout.write_all(snapshot.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    cancel.cancel();
    fetch_task.await.context("fetch task panicked")??;
    viewer_task.await.context("viewer task panicked")??;
    Ok(())
}
