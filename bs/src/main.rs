use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::debug;

use blogsearch::cli::{Cli, Command, OutputFormat};
use blogsearch::config::Config;
use blogsearch::{IndexStore, QueryEngine, parse, render};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Load the configured index into a fresh store
async fn open_store(config: &Config) -> Result<Arc<IndexStore>> {
    let loader = config.loader()?;
    let store = Arc::new(IndexStore::new());
    store
        .load_from(loader.as_ref())
        .await
        .context(format!("Failed to load search index from {}", loader.describe()))?;
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(path) = cli.index {
        config.index.path = path;
        config.index.url = None;
    }
    if let Some(url) = cli.url {
        config.index.url = Some(url);
    }

    debug!("blogsearch starting");

    match cli.command {
        Command::Search { query, format, limit } => {
            let raw = query.join(" ");
            let store = open_store(&config).await?;
            let engine = QueryEngine::new(store).with_max_query_chars(config.search.max_query_chars);
            let outcome = engine.run(&raw);
            let highlighter = config.highlighter();

            match format {
                OutputFormat::Text => {
                    for notice in &outcome.notices {
                        eprintln!("{} {}", "warning:".yellow(), notice);
                    }
                    println!("{}", render::render_text(&raw, &outcome, &highlighter, limit));
                }
                OutputFormat::Json => {
                    println!("{}", render::render_json(&outcome, &highlighter, limit)?);
                }
            }
        }
        Command::Parse { query } => {
            let parsed = parse(&query.join(" "));
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Highlight { text, keywords } => {
            println!("{}", config.highlighter().highlight(&text, &keywords));
        }
        Command::Stats => {
            let store = open_store(&config).await?;
            let snapshot = store.snapshot();
            let mut tags: Vec<String> = snapshot.posts.iter().flat_map(|p| p.tags.iter().cloned()).collect();
            tags.sort();
            tags.dedup();

            println!("Index: {}", config.loader()?.describe().cyan());
            println!("  Posts: {}", snapshot.posts.len());
            println!("  Tags: {}", tags.len());
            if let Some(generated_at) = &snapshot.generated_at {
                println!("  Generated: {}", render::format_date(generated_at));
            }
        }
    }

    Ok(())
}
