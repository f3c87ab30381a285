use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tokio::net::TcpListener;
use yt_transcript::{init_tracing, serve, AppState, Config, ServerArgs, YouTubeTranscriptApi};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_tracing(if args.verbose { "debug" } else { "info" });

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let bind_address = args.bind.clone().unwrap_or_else(|| config.bind_address.clone());

    let source = YouTubeTranscriptApi::new(&config)?;
    let state = AppState::new(Arc::new(source), config.language_preference());

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    println!("\n{} {}", "🎬".blue(), "YouTube Transcript Server".bold());
    println!(
        "{} Listening on {}",
        "→".blue(),
        format!("http://{}/api/transcript?videoId=<ID>", listener.local_addr()?).bold()
    );

    if let Err(e) = serve(listener, state).await {
        println!("{} Error: {}", "✗".red(), e);
        std::process::exit(1);
    }

    println!("{} Server stopped", "✓".green());
    Ok(())
}
