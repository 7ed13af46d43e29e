//! UI/Progress presentation layer
//!
//! This module handles:
//! - The reporting channel: styled status lines for every phase of an install
//! - Download progress bars using indicatif
//! - Silent progress for tests and non-interactive callers
//!
//! Informational lines go to stdout, warnings and errors to stderr.

pub mod display;
pub mod prompt;

use std::fmt::Display;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print an informational line
pub fn info(message: impl Display) {
    println!("{message}");
}

/// Print a success line
pub fn success(message: impl Display) {
    println!("{} {message}", Style::new().green().bold().apply_to("✓"));
}

/// Print a warning line
pub fn warn(message: impl Display) {
    eprintln!("{} {message}", Style::new().yellow().bold().apply_to("warning:"));
}

/// Print an error line
pub fn error(message: impl Display) {
    eprintln!("{} {message}", Style::new().red().bold().apply_to("error:"));
}

/// Progress reporter for archive downloads
///
/// Lets the fetcher report byte counts without knowing whether anything is drawn.
pub trait ProgressReporter {
    /// Begin a download of `total` bytes (unknown when the server sends no length)
    fn start(&mut self, label: &str, total: Option<u64>);

    /// Record `bytes` more bytes written to disk
    fn advance(&mut self, bytes: u64);

    /// Download finished successfully
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Progress reporter drawing an indicatif bar on stderr
///
/// indicatif hides the bar on its own when stderr is not a terminal.
#[derive(Default)]
pub struct BarProgressReporter {
    bar: Option<ProgressBar>,
}

impl BarProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for BarProgressReporter {
    fn start(&mut self, label: &str, total: Option<u64>) {
        let bar = match total {
            Some(len) => {
                let style = ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                ProgressBar::new(len).with_style(style)
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {msg} {bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                ProgressBar::new_spinner().with_style(style)
            }
        };
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(bytes);
        }
    }

    fn finish(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.abandon();
        }
    }
}

/// Silent progress reporter
///
/// Counts bytes but draws nothing; used when stderr is not a terminal.
#[derive(Debug, Default)]
pub struct SilentProgressReporter {
    pub bytes: u64,
    pub finished: bool,
}

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _label: &str, _total: Option<u64>) {
        self.bytes = 0;
        self.finished = false;
    }

    fn advance(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    fn finish(&mut self) {
        self.finished = true;
        tracing::debug!(bytes = self.bytes, "download complete");
    }

    fn abandon(&mut self) {
        tracing::debug!(bytes = self.bytes, finished = self.finished, "download abandoned");
        self.finished = false;
    }
}
