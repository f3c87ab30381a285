use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use yt_transcript::{
    init_tracing, run_cli, usage_failure, Args, Config, TranscriptResult, YouTubeTranscriptApi,
};

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn execute(args: &Args) -> TranscriptResult {
    let setup = load_config(args).and_then(|config| {
        let source = YouTubeTranscriptApi::new(&config)?;
        Ok((config, source))
    });

    match setup {
        Ok((config, source)) => {
            run_cli(args.video_id.as_deref(), &source, &config.language_preference()).await
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize");
            TranscriptResult::failure(format!("{:#}", e))
        }
    }
}

fn print_result(result: &TranscriptResult, pretty: bool) -> Result<()> {
    // stdout carries nothing but the JSON document
    let output = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            print_result(&usage_failure(&e), false)?;
            std::process::exit(1);
        }
    };
    init_tracing(if args.verbose { "debug" } else { "warn" });

    let result = execute(&args).await;
    print_result(&result, args.pretty)?;

    std::process::exit(if result.success { 0 } else { 1 });
}
