//! CLI entry point for fmpd.

use anyhow::{Context, Result};
use clap::Parser;
use fmpd_core::download::{DownloadEngine, HttpClient, ItemOutcome, PipelineOptions};
use fmpd_core::input::cli_identifiers;
use fmpd_core::naming::Namer;
use fmpd_core::resolver::PhotoPageResolver;
use fmpd_core::read_cookie_header;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > verbose flag > default (info)
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries the written paths only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let cookies = read_cookie_header(&args.cookies_file).with_context(|| {
        format!(
            "cannot read cookie jar {}; export one from a logged-in browser session",
            args.cookies_file.display()
        )
    })?;
    debug!(?cookies, "cookie jar loaded");

    let client = HttpClient::new(&args.agent, &cookies).context("cannot set up HTTP client")?;
    let resolver = PhotoPageResolver::new(client.clone());
    let namer = Namer::compile(&args.name);
    let options = PipelineOptions {
        output_dir: args.output_dir.clone(),
        quiet: args.quiet,
        max_ordinal: args.max_ordinal,
        keep_going: args.keep_going,
    };
    let engine = DownloadEngine::new(Box::new(resolver), client, namer, options);

    let quiet = args.quiet;
    let stats = engine
        .run(cli_identifiers(args.identifiers), |outcome| {
            if let ItemOutcome::Written { path, .. } = outcome
                && !quiet
            {
                println!("{}", path.display());
            }
        })
        .await?;

    info!(
        written = stats.written(),
        unresolved = stats.unresolved(),
        failed = stats.failed(),
        ignored = stats.ignored(),
        "Download complete"
    );

    Ok(())
}
