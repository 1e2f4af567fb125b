mod cli;
mod download;
mod errors;
mod logger;
mod utils;
mod video;

use std::process::ExitCode;

use clap::Parser;

use crate::{
    cli::Args,
    download::{Console, download_video},
    logger::ConsoleLogger,
    video::YtDlp,
};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();

    let args = Args::parse();
    let ytdlp = YtDlp::from_command_line(&args.yt_dlp);

    if args.check {
        return match ytdlp.version().await {
            Ok(version) => {
                println!("yt-dlp {}", version);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ yt-dlp is not available: {}", e);
                ExitCode::from(e.kind().exit_code())
            }
        };
    }

    log::info!("Downloading {} into {}", args.url, args.output.display());

    let mut console = Console::stdio();
    match download_video(
        &ytdlp,
        &ConsoleLogger,
        &args.url,
        &args.output,
        &args.format,
        &mut console,
    )
    .await
    {
        Ok(outcome) => {
            log::info!(
                "Finished {} ({}, {})",
                outcome.info.id,
                outcome.info.title.as_deref().unwrap_or("untitled"),
                outcome.info.ext.as_deref().unwrap_or("unknown format"),
            );
            if outcome.file.is_none() {
                log::warn!("no file path reported, look in {}", args.output.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{} failure: {}", e.kind(), e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::from(e.kind().exit_code())
        }
    }
}
