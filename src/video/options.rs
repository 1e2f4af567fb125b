use std::path::{Path, PathBuf};

/// Filename pattern inside the output directory: `<video id>.<ext>`
pub const OUTPUT_FILENAME_TEMPLATE: &str = "%(id)s.%(ext)s";

pub const DEFAULT_FORMAT: &str = "best";

/// Mobile Safari on iOS 14; TikTok serves plain progressive MP4s to it.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1";

pub const REFERER: &str = "https://www.tiktok.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    FFmpegMetadata { add_metadata: bool },
}

impl PostProcessor {
    fn args(&self) -> Vec<String> {
        match self {
            PostProcessor::FFmpegMetadata { add_metadata: true } => {
                vec!["--embed-metadata".to_string()]
            }
            PostProcessor::FFmpegMetadata { add_metadata: false } => {
                vec!["--no-embed-metadata".to_string()]
            }
        }
    }
}

/// Everything yt-dlp is told about a single download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    pub output_template: PathBuf,
    pub format: String,
    pub no_playlist: bool,
    pub skip_download: bool,
    /// Header overrides in the order they are passed to yt-dlp
    pub http_headers: Vec<(String, String)>,
    pub quiet: bool,
    pub postprocessors: Vec<PostProcessor>,
}

impl DownloadOptions {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_template: output_dir.as_ref().join(OUTPUT_FILENAME_TEMPLATE),
            format: DEFAULT_FORMAT.to_string(),
            no_playlist: true,
            skip_download: false,
            http_headers: vec![
                ("User-Agent".to_string(), MOBILE_USER_AGENT.to_string()),
                ("Referer".to_string(), REFERER.to_string()),
            ],
            quiet: false,
            postprocessors: vec![PostProcessor::FFmpegMetadata {
                add_metadata: false,
            }],
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.http_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Render as yt-dlp command line arguments, without the URL.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            self.output_template.to_string_lossy().into_owned(),
            "-f".to_string(),
            self.format.clone(),
        ];

        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }

        for (name, value) in &self.http_headers {
            args.push("--add-header".to_string());
            args.push(format!("{}:{}", name, value));
        }

        // --print turns quiet mode on by itself, so the choice is always explicit
        args.push(if self.quiet { "--quiet" } else { "--no-quiet" }.to_string());

        if !self.skip_download {
            args.push("--no-simulate".to_string());
        }

        for pp in &self.postprocessors {
            args.extend(pp.args());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_headers_survive_format_override() {
        let options = DownloadOptions::new("out").with_format("worst");

        assert_eq!(options.format, "worst");
        assert_eq!(options.header("user-agent"), Some(MOBILE_USER_AGENT));
        assert_eq!(options.header("Referer"), Some(REFERER));
    }

    #[test]
    fn template_lives_in_output_dir() {
        let options = DownloadOptions::new("tiktok_downloads");
        assert_eq!(
            options.output_template,
            Path::new("tiktok_downloads").join("%(id)s.%(ext)s")
        );
    }

    #[test]
    fn renders_yt_dlp_arguments() {
        let args = DownloadOptions::new("dl").to_args();
        let template = Path::new("dl")
            .join(OUTPUT_FILENAME_TEMPLATE)
            .to_string_lossy()
            .into_owned();

        assert_eq!(
            args,
            vec![
                "-o".to_string(),
                template,
                "-f".to_string(),
                "best".to_string(),
                "--no-playlist".to_string(),
                "--add-header".to_string(),
                format!("User-Agent:{}", MOBILE_USER_AGENT),
                "--add-header".to_string(),
                "Referer:https://www.tiktok.com/".to_string(),
                "--no-quiet".to_string(),
                "--no-simulate".to_string(),
                "--no-embed-metadata".to_string(),
            ]
        );
    }

    #[test]
    fn quiet_and_skip_download_change_flags() {
        let mut options = DownloadOptions::new("dl");
        options.quiet = true;
        options.skip_download = true;
        options.no_playlist = false;
        options.postprocessors = vec![PostProcessor::FFmpegMetadata { add_metadata: true }];

        let args = options.to_args();
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.contains(&"--embed-metadata".to_string()));
        assert!(!args.contains(&"--no-simulate".to_string()));
        assert!(!args.contains(&"--no-playlist".to_string()));
    }
}
