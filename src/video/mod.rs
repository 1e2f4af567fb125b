pub mod info;
pub mod options;
pub mod ytdlp;

pub use info::{RequestedDownload, VideoInfo};
pub use options::DownloadOptions;
pub use ytdlp::{Extractor, YtDlp};
