use std::{ffi::OsString, io, path::PathBuf, process::Stdio};

use log::{debug, info};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    process,
};

use crate::errors::{DownloadError, DownloadResult};
use crate::logger::{DownloadLogger, Severity, Stream, classify_line};
use crate::video::{DownloadOptions, VideoInfo};

/// Prefix of the stdout line carrying the info dict, so it can be told apart
/// from regular progress output.
const INFO_MARKER: &str = "[tiktok-downloader:info] ";

/// Read one line of tool output. Bytes that are not UTF-8 are replaced
/// rather than failing the read, and `\r` progress updates collapse to the
/// last one on the line.
async fn next_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let text = String::from_utf8_lossy(buf);
    let line = text
        .trim_end_matches(['\n', '\r'])
        .rsplit('\r')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();

    Ok(Some(line.to_string()))
}

/// Something that turns a page URL into a downloaded file.
pub trait Extractor {
    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions,
        logger: &dyn DownloadLogger,
    ) -> DownloadResult<VideoInfo>;
}

/// Drives the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Split a command such as `python3 -m yt_dlp` on whitespace.
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace();
        let program = parts.next().unwrap_or("yt-dlp");
        Self::new(program).with_leading_args(parts)
    }

    /// Arguments placed before everything else, e.g. a script path.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn base_command(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd
    }

    fn download_command(&self, url: &str, options: &DownloadOptions) -> process::Command {
        let mut cmd = self.base_command();
        cmd.args(options.to_args())
            .args(["--print", &format!("after_move:{}%()j", INFO_MARKER)])
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    pub async fn version(&self) -> DownloadResult<String> {
        let output = self
            .base_command()
            .arg("--version")
            .output()
            .await
            .map_err(|e| DownloadError::external_command(self.program_name(), e.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(DownloadError::external_command(
                self.program_name(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ))
        }
    }
}

impl Extractor for YtDlp {
    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions,
        logger: &dyn DownloadLogger,
    ) -> DownloadResult<VideoInfo> {
        let mut cmd = self.download_command(url, options);
        debug!("Running {:?}", cmd.as_std());

        let mut child = cmd
            .spawn()
            .map_err(|e| DownloadError::external_command(self.program_name(), e.to_string()))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(DownloadError::external_command(
                self.program_name(),
                "output pipes were not captured",
            ));
        };

        let read_stdout = async {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            let mut info_json = None;
            while let Some(line) = next_line(&mut reader, &mut buf).await? {
                if line.is_empty() {
                    continue;
                }
                match line.strip_prefix(INFO_MARKER) {
                    Some(json) => info_json = Some(json.to_string()),
                    None => {
                        let (severity, msg) = classify_line(Stream::Stdout, &line);
                        logger.log(severity, msg);
                    }
                }
            }
            Ok::<_, io::Error>(info_json)
        };

        let read_stderr = async {
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            let mut last_error = None;
            while let Some(line) = next_line(&mut reader, &mut buf).await? {
                if line.is_empty() {
                    continue;
                }
                let (severity, msg) = classify_line(Stream::Stderr, &line);
                if severity == Severity::Error {
                    last_error = Some(msg.to_string());
                }
                logger.log(severity, msg);
            }
            Ok::<_, io::Error>(last_error)
        };

        let (info_json, last_error) = tokio::join!(read_stdout, read_stderr);
        let status = child.wait().await?;
        info!("yt-dlp exit code: {:?}", status.code());

        if !status.success() {
            let message =
                last_error?.unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            return Err(DownloadError::extraction(url, message));
        }

        let info_json = info_json?.ok_or_else(|| {
            DownloadError::Parse("yt-dlp finished without reporting the video info".to_string())
        })?;

        VideoInfo::from_json(&info_json)
    }
}
