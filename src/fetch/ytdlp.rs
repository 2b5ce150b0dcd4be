//! Fetcher backed by the external `yt-dlp` program.
//!
//! The program runs with `--newline` so that every progress update is a line
//! of its own on stdout:
//!
//! ```text
//! [download]  42.3% of ~  10.00MiB at    1.20MiB/s ETA 00:05 (frag 3/20)
//! ```
//!
//! Those lines become [`TransferProgress`] events. When the program exits with
//! a failure, the last line it wrote to stderr becomes the error message.

use super::{Fetcher, ProgressFn};
use crate::download::status::UNKNOWN;
use crate::download::{Locator, TransferProgress};
use crate::error::{Error, Result};

use futures::future::{BoxFuture, FutureExt};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Parses one line of `yt-dlp --newline` output.
///
/// Returns `None` for lines that are not progress updates.
///
/// ```rust
/// use tranche::fetch::ytdlp::parse_progress_line;
///
/// let progress = parse_progress_line("[download]  42.3% of 10.00MiB at 1.20MiB/s ETA 00:05").unwrap();
/// assert_eq!(progress.percent, " 42.3%");
/// assert_eq!(progress.rate, "1.20MiB/s");
/// assert!(parse_progress_line("[download] Destination: clip.mp4").is_none());
/// ```
pub fn parse_progress_line(line: &str) -> Option<TransferProgress> {
    let rest = line.trim_start().strip_prefix("[download]")?;
    let mut tokens = rest.split_whitespace();
    let percent = tokens.next().filter(|token| token.ends_with('%'))?;
    let rate = tokens
        .skip_while(|token| *token != "at")
        .nth(1)
        .unwrap_or(UNKNOWN);
    Some(TransferProgress::new(format!("{:>6}", percent), rate))
}

/// Runs `yt-dlp` for every item.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: PathBuf,
    format: String,
    concurrent_fragments: u32,
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self {
            program: PathBuf::from("yt-dlp"),
            format: "best".to_string(),
            concurrent_fragments: 5,
        }
    }
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path or name of the program to run.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Format selector passed with `-f`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Fragments fetched in parallel for segmented streams.
    pub fn concurrent_fragments(mut self, fragments: u32) -> Self {
        self.concurrent_fragments = fragments.max(1);
        self
    }

    /// Command-line arguments for one download.
    pub fn args(&self, locator: &Locator, destination: &Path) -> Vec<OsString> {
        vec![
            "--newline".into(),
            "--no-warnings".into(),
            "-f".into(),
            self.format.clone().into(),
            "--concurrent-fragments".into(),
            self.concurrent_fragments.to_string().into(),
            "-o".into(),
            destination.as_os_str().to_owned(),
            "--".into(),
            locator.as_str().into(),
        ]
    }

    async fn download(
        &self,
        locator: &Locator,
        destination: &Path,
        on_progress: ProgressFn<'_>,
    ) -> Result<()> {
        debug!("Running {:?} for {}", self.program, locator);
        let mut child = Command::new(&self.program)
            .args(self.args(locator, destination))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::Fetch(format!("failed to start {}: {}", self.program.display(), e))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Internal("child stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Internal("child stderr was not captured".into()))?;

        let progress = async {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                if let Some(progress) = parse_progress_line(&line) {
                    on_progress(progress);
                }
            }
            Ok::<(), Error>(())
        };
        let last_error = async {
            let mut lines = BufReader::new(stderr).lines();
            let mut last = None;
            while let Ok(Some(line)) = lines.next_line().await {
                if !line.trim().is_empty() {
                    last = Some(line);
                }
            }
            last
        };

        let (progress, last_error) = tokio::join!(progress, last_error);
        progress?;

        let status = child.wait().await?;
        if status.success() {
            return Ok(());
        }

        Err(Error::Fetch(match last_error {
            Some(line) => line.trim_start_matches("ERROR: ").to_string(),
            None => format!("{} exited with {}", self.program.display(), status),
        }))
    }
}

impl Fetcher for YtDlpFetcher {
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        self.download(locator, destination, on_progress).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_progress() {
        let progress = parse_progress_line(
            "[download]  12.5% of ~  10.00MiB at    1.20MiB/s ETA 00:05 (frag 3/20)",
        )
        .unwrap();
        assert_eq!(progress.percent, " 12.5%");
        assert_eq!(progress.rate, "1.20MiB/s");
    }

    #[test]
    fn test_parse_finished_line_has_no_rate() {
        let progress = parse_progress_line("[download] 100% of   10.00MiB in 00:00:03").unwrap();
        assert_eq!(progress.percent, "  100%");
        assert_eq!(progress.rate, "N/A");
    }

    #[test]
    fn test_parse_ignores_other_lines() {
        assert!(parse_progress_line("[youtube] abc: Downloading webpage").is_none());
        assert!(parse_progress_line("[download] Destination: a.mp4").is_none());
        assert!(parse_progress_line("").is_none());
    }

    #[test]
    fn test_args_end_with_locator() {
        let fetcher = YtDlpFetcher::new().format("bestaudio").concurrent_fragments(0);
        let args = fetcher.args(&Locator::from("https://example.com/v"), Path::new("out/v.mp4"));
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[3], "bestaudio");
        assert_eq!(args[5], "1");
        assert_eq!(args[7], "out/v.mp4");
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/v"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_uses_last_stderr_line() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-ytdlp");
        std::fs::write(
            &script,
            "#!/bin/sh\necho '[download]  50.0% of 1.00MiB at 2.00MiB/s ETA 00:01'\necho 'ERROR: Video unavailable' >&2\nexit 1\n",
        )
        .unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let fetcher = YtDlpFetcher::new().program(&script);
        let mut seen = Vec::new();
        let mut on_progress = |progress: TransferProgress| seen.push(progress);
        let result = fetcher
            .fetch(
                &Locator::from("https://example.com/v"),
                &dir.path().join("v.mp4"),
                &mut on_progress,
            )
            .await;

        match result {
            Err(Error::Fetch(msg)) => assert_eq!(msg, "Video unavailable"),
            other => panic!("Expected fetch error, got {:?}", other),
        }
        assert_eq!(seen, vec![TransferProgress::new(" 50.0%", "2.00MiB/s")]);
    }
}
