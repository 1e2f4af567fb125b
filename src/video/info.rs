use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{DownloadError, DownloadResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestedDownload {
    pub filepath: PathBuf,
}

/// The parts of yt-dlp's info dict this tool reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub id: String,
    pub ext: Option<String>,
    pub title: Option<String>,
    pub requested_downloads: Vec<RequestedDownload>,
}

#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    filepath: Option<PathBuf>,
    #[serde(default)]
    requested_downloads: Vec<RequestedDownload>,
}

impl VideoInfo {
    /// Parse the JSON yt-dlp prints for a finished video
    pub fn from_json(json: &str) -> DownloadResult<Self> {
        let raw: YtDlpInfo = serde_json::from_str(json.trim())?;

        if raw.id.is_empty() {
            return Err(DownloadError::Parse(
                "yt-dlp returned an empty video id".to_string(),
            ));
        }

        // At the after_move stage yt-dlp only knows the final path of the
        // current format, not the full requested_downloads list.
        let requested_downloads = match (raw.requested_downloads.is_empty(), raw.filepath) {
            (true, Some(filepath)) => vec![RequestedDownload { filepath }],
            _ => raw.requested_downloads,
        };

        Ok(Self {
            id: raw.id,
            ext: raw.ext,
            title: raw.title,
            requested_downloads,
        })
    }

    pub fn primary_file(&self) -> Option<&Path> {
        self.requested_downloads
            .first()
            .map(|download| download.filepath.as_path())
    }
}
