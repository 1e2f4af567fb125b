use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_URL: &str = "https://www.tiktok.com/@tiktok/video/7300729731454170369";
pub const DEFAULT_OUTPUT_DIR: &str = "tiktok_downloads";

#[derive(Parser, Debug)]
#[command(version, about = "Download a single TikTok video with yt-dlp")]
pub struct Args {
    /// Video page URL
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// Directory the video is saved to
    #[arg(short, long, env = "TIKTOK_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// yt-dlp format selector
    #[arg(short, long, env = "TIKTOK_FORMAT", default_value = "best")]
    pub format: String,

    /// yt-dlp command, e.g. "python3 -m yt_dlp"
    #[arg(long = "yt-dlp", env = "YTDLP_PATH", default_value = "yt-dlp")]
    pub yt_dlp: String,

    /// Print the yt-dlp version and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn url_is_optional() {
        let args = Args::try_parse_from(["tiktok-downloader"]).unwrap();
        assert_eq!(args.url, DEFAULT_URL);
        assert!(!args.check);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tiktok-downloader",
            "-o",
            "/tmp/videos",
            "--format",
            "worst",
            "--yt-dlp",
            "python3 -m yt_dlp",
            "https://vm.tiktok.com/ZMabc123/",
        ])
        .unwrap();

        assert_eq!(args.url, "https://vm.tiktok.com/ZMabc123/");
        assert_eq!(args.output, PathBuf::from("/tmp/videos"));
        assert_eq!(args.format, "worst");
        assert_eq!(args.yt_dlp, "python3 -m yt_dlp");
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Args::try_parse_from(["tiktok-downloader", "https://a", "https://b"]).is_err());
    }
}
