use std::fmt;

use strum::Display;

/// Everything that can go wrong while downloading a video
#[derive(Debug)]
pub enum DownloadError {
    /// yt-dlp reported a failure: bad URL, private or removed video, network
    Extraction { url: String, message: String },
    /// An external command could not be run
    ExternalCommand { command: String, stderr: String },
    /// Filesystem errors
    FileSystem(std::io::Error),
    /// yt-dlp output could not be decoded
    Parse(String),
    /// The URL is unusable
    InvalidUrl(String),
}

/// How a failure should be reported and which exit code it maps to.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    #[strum(to_string = "download")]
    Download,
    #[strum(to_string = "unexpected")]
    Unexpected,
}

impl FailureKind {
    pub fn exit_code(self) -> u8 {
        match self {
            FailureKind::Download => 1,
            FailureKind::Unexpected => 2,
        }
    }
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Extraction { url, message } => {
                write!(f, "could not download {}: {}", url, message)
            }
            DownloadError::ExternalCommand { command, stderr } => {
                write!(f, "failed to run {}: {}", command, stderr)
            }
            DownloadError::FileSystem(e) => write!(f, "filesystem error: {}", e),
            DownloadError::Parse(msg) => write!(f, "parse error: {}", msg),
            DownloadError::InvalidUrl(url) => write!(f, "invalid URL: {:?}", url),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::FileSystem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::FileSystem(err)
    }
}

impl From<serde_json::Error> for DownloadError {
    fn from(err: serde_json::Error) -> Self {
        DownloadError::Parse(format!("JSON parsing error: {}", err))
    }
}

impl DownloadError {
    pub fn extraction(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn external_command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::ExternalCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// Only failures reported by yt-dlp itself (or a URL it could never
    /// accept) count as download failures.
    pub fn kind(&self) -> FailureKind {
        match self {
            DownloadError::Extraction { .. } | DownloadError::InvalidUrl(_) => {
                FailureKind::Download
            }
            _ => FailureKind::Unexpected,
        }
    }
}

pub type DownloadResult<T> = Result<T, DownloadError>;
