use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};
use tokio::fs;

use crate::errors::{DownloadError, DownloadResult, FailureKind};
use crate::logger::DownloadLogger;
use crate::utils::{is_tiktok_video_link, validate_url};
use crate::video::{DownloadOptions, Extractor, VideoInfo};

/// Where user-facing messages go. Diagnostics use the `log` facade instead.
pub struct Console<O, E> {
    pub out: O,
    pub err: E,
}

impl Console<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub info: VideoInfo,
    pub file: Option<PathBuf>,
}

/// Create `dir` if needed. Returns true when it had to be created.
///
/// A path that exists but is not a directory is an error.
pub async fn ensure_output_dir(dir: &Path) -> io::Result<bool> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", dir.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).await?;
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Download one video into `output_dir` and report the result on `console`.
///
/// Every failure is printed here and then returned, so the caller only has
/// to decide on the exit code.
pub async fn download_video<X, O, E>(
    extractor: &X,
    logger: &dyn DownloadLogger,
    url: &str,
    output_dir: &Path,
    format: &str,
    console: &mut Console<O, E>,
) -> DownloadResult<DownloadOutcome>
where
    X: Extractor,
    O: Write,
    E: Write,
{
    let result = run(extractor, logger, url, output_dir, format, &mut console.out).await;

    if let Err(e) = &result {
        // the original error matters more than a broken stderr
        let _ = report_failure(&mut console.err, e);
    }

    result
}

async fn run<X: Extractor, O: Write>(
    extractor: &X,
    logger: &dyn DownloadLogger,
    url: &str,
    output_dir: &Path,
    format: &str,
    out: &mut O,
) -> DownloadResult<DownloadOutcome> {
    let url = validate_url(url)?;
    if !is_tiktok_video_link(url) {
        warn!("{} does not look like a TikTok video link, trying anyway", url);
    }

    if ensure_output_dir(output_dir).await? {
        writeln!(out, "Created output directory: {}", output_dir.display())?;
    }

    let options = DownloadOptions::new(output_dir).with_format(format);

    writeln!(out, "\nAttempting to download video from: {}", url)?;
    info!(
        "Starting download: {} (format: {}, referer: {})",
        url,
        options.format,
        options.header("Referer").unwrap_or("none")
    );

    let info = extractor.extract_info(url, &options, logger).await?;
    let file = info.primary_file().map(Path::to_path_buf);

    match &file {
        Some(path) => {
            info!("Download successful: {}", path.display());
            writeln!(out, "\n✅ Successfully downloaded video to: {}", path.display())?;
        }
        None => {
            warn!("yt-dlp reported no files for video {}", info.id);
            writeln!(
                out,
                "\n✅ Download completed for video ID: {}. Check {} directory.",
                info.id,
                output_dir.display()
            )?;
        }
    }

    Ok(DownloadOutcome { info, file })
}

fn report_failure<E: Write>(err: &mut E, e: &DownloadError) -> io::Result<()> {
    match e.kind() {
        FailureKind::Download => {
            writeln!(err, "\n❌ A download error occurred: {}", e)?;
            writeln!(
                err,
                "Please ensure the URL is correct and the video is publicly accessible."
            )
        }
        FailureKind::Unexpected => writeln!(err, "\n❌ An unexpected error occurred: {}", e),
    }
}
