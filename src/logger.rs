use strum::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Debug,
    Warning,
    Error,
}

/// Which pipe of the child process a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Callbacks yt-dlp output is routed through while a download runs.
pub trait DownloadLogger {
    fn debug(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);

    fn log(&self, severity: Severity, msg: &str) {
        match severity {
            Severity::Debug => self.debug(msg),
            Severity::Warning => self.warning(msg),
            Severity::Error => self.error(msg),
        }
    }
}

/// Console line for a message, or `None` when it should be hidden.
pub fn render(severity: Severity, msg: &str) -> Option<String> {
    match severity {
        Severity::Debug if msg.starts_with("[debug]") => None,
        Severity::Debug => Some(msg.to_string()),
        Severity::Warning => Some(format!("⚠️ WARNING: {}", msg)),
        Severity::Error => Some(format!("❌ ERROR: {}", msg)),
    }
}

/// Map a line of yt-dlp output to a severity, stripping yt-dlp's own prefix.
pub fn classify_line(stream: Stream, line: &str) -> (Severity, &str) {
    if stream == Stream::Stderr {
        if let Some(rest) = line.strip_prefix("ERROR: ") {
            return (Severity::Error, rest);
        }
        if let Some(rest) = line.strip_prefix("WARNING: ") {
            return (Severity::Warning, rest);
        }
    }
    (Severity::Debug, line)
}

/// Prints to stdout and mirrors everything into the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    fn print(&self, severity: Severity, msg: &str) {
        if let Some(line) = render(severity, msg) {
            println!("{}", line);
        }
    }
}

impl DownloadLogger for ConsoleLogger {
    fn debug(&self, msg: &str) {
        log::debug!("yt-dlp: {}", msg);
        self.print(Severity::Debug, msg);
    }

    fn warning(&self, msg: &str) {
        log::warn!("yt-dlp: {}", msg);
        self.print(Severity::Warning, msg);
    }

    fn error(&self, msg: &str) {
        log::error!("yt-dlp: {}", msg);
        self.print(Severity::Error, msg);
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::{DownloadLogger, Severity};

    /// Records every callback for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        pub lines: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingLogger {
        pub fn take(&self) -> Vec<(Severity, String)> {
            std::mem::take(&mut *self.lines.lock().unwrap())
        }

        fn push(&self, severity: Severity, msg: &str) {
            self.lines.lock().unwrap().push((severity, msg.to_string()));
        }
    }

    impl DownloadLogger for RecordingLogger {
        fn debug(&self, msg: &str) {
            self.push(Severity::Debug, msg);
        }

        fn warning(&self, msg: &str) {
            self.push(Severity::Warning, msg);
        }

        fn error(&self, msg: &str) {
            self.push(Severity::Error, msg);
        }
    }
}
