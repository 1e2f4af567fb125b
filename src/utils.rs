use crate::errors::{DownloadError, DownloadResult};

/// Trim the URL and make sure it is something yt-dlp could fetch.
pub fn validate_url(url: &str) -> DownloadResult<&str> {
    let url = url.trim();
    let lower = url.to_lowercase();

    let has_scheme = lower.starts_with("https://") || lower.starts_with("http://");
    let has_host = url
        .split_once("://")
        .map_or(false, |(_, rest)| !rest.is_empty() && !rest.starts_with('/'));

    if has_scheme && has_host {
        Ok(url)
    } else {
        Err(DownloadError::invalid_url(url))
    }
}

pub fn is_tiktok_video_link(url: &str) -> bool {
    let url = url.trim().to_lowercase();

    let Some((_, rest)) = url.split_once("://") else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();

    // vm.tiktok.com and vt.tiktok.com are share links that redirect to /video/
    match host {
        "vm.tiktok.com" | "vt.tiktok.com" => rest.len() > host.len() + 1,
        "www.tiktok.com" | "tiktok.com" | "m.tiktok.com" => rest.contains("/video/"),
        _ => false,
    }
}
