//! Export destinations
//!
//! An [`ExportArtifact`] is delivered through an ordered chain of sinks:
//! the configured output directory, then the native save dialog, then the
//! working directory. A sink that cannot run in the current environment
//! reports [`ExportSinkError::Unavailable`] and the chain moves on without
//! surfacing it. A cancelled dialog ends the chain with
//! [`SinkOutcome::Cancelled`], which is not an error.

use pathpick_editor::ExportArtifact;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while delivering an export
#[derive(Error, Debug)]
pub enum ExportSinkError {
    /// The destination cannot be used here (no directory chosen, no display,
    /// no clipboard).
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Every destination in the chain was unavailable or failed.
    #[error("No export destination accepted the file")]
    NoDestination,
}

pub type Result<T> = std::result::Result<T, ExportSinkError>;

/// How an export ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Written(PathBuf),
    Copied,
    Cancelled,
}

/// A place an export can be delivered to
pub trait ExportSink {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome>;
}

fn write_into(dir: &Path, artifact: &ExportArtifact) -> Result<SinkOutcome> {
    let path = dir.join(&artifact.suggested_name);
    std::fs::write(&path, &artifact.content).map_err(|source| ExportSinkError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(SinkOutcome::Written(path))
}

/// Writes into a previously chosen directory.
#[derive(Debug, Clone, Default)]
pub struct DirectorySink {
    dir: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl ExportSink for DirectorySink {
    fn name(&self) -> &'static str {
        "output directory"
    }

    fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome> {
        match &self.dir {
            Some(dir) if dir.is_dir() => write_into(dir, artifact),
            _ => Err(ExportSinkError::Unavailable(self.name())),
        }
    }
}

/// Asks the user where to save through the native file dialog.
#[derive(Debug, Clone, Default)]
pub struct SaveDialogSink {
    start_dir: Option<PathBuf>,
}

impl SaveDialogSink {
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        Self { start_dir }
    }

    fn has_display() -> bool {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            return true;
        }
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    }
}

impl ExportSink for SaveDialogSink {
    fn name(&self) -> &'static str {
        "save dialog"
    }

    fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome> {
        if !Self::has_display() {
            return Err(ExportSinkError::Unavailable(self.name()));
        }

        let extension = artifact
            .suggested_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        let mut dialog = rfd::FileDialog::new()
            .set_title("Export path")
            .set_file_name(&artifact.suggested_name)
            .add_filter(extension.to_uppercase(), &[extension.as_str()]);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            return Ok(SinkOutcome::Cancelled);
        };
        std::fs::write(&path, &artifact.content).map_err(|source| ExportSinkError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(SinkOutcome::Written(path))
    }
}

/// Last resort: writes next to wherever the process was started.
#[derive(Debug, Clone)]
pub struct WorkingDirSink {
    dir: PathBuf,
}

impl WorkingDirSink {
    pub fn current() -> Self {
        Self {
            dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for WorkingDirSink {
    fn name(&self) -> &'static str {
        "working directory"
    }

    fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome> {
        write_into(&self.dir, artifact)
    }
}

/// Copies the preview text to the system clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipboardSink;

impl ExportSink for ClipboardSink {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|_| ExportSinkError::Unavailable(self.name()))?;
        clipboard
            .set_text(artifact.preview.clone())
            .map_err(|e| ExportSinkError::Clipboard(e.to_string()))?;
        // Some clipboard managers only pick up content from a live owner
        std::thread::sleep(std::time::Duration::from_millis(100));
        Ok(SinkOutcome::Copied)
    }
}

/// Ordered fallback over several sinks
#[derive(Default)]
pub struct ExportChain {
    sinks: Vec<Box<dyn ExportSink>>,
}

impl ExportChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory, then dialog (when `interactive`), then working directory.
    pub fn standard(output_dir: Option<PathBuf>, interactive: bool) -> Self {
        let mut chain = Self::new().with(DirectorySink::new(output_dir.clone()));
        if interactive {
            chain = chain.with(SaveDialogSink::new(output_dir));
        }
        chain.with(WorkingDirSink::current())
    }

    pub fn with(mut self, sink: impl ExportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Tries each sink in turn until one writes, copies or is cancelled.
    pub fn deliver(&self, artifact: &ExportArtifact) -> Result<SinkOutcome> {
        for sink in &self.sinks {
            match sink.deliver(artifact) {
                Ok(outcome) => {
                    info!(sink = sink.name(), ?outcome, "Export delivered");
                    return Ok(outcome);
                }
                Err(ExportSinkError::Unavailable(name)) => {
                    debug!(sink = name, "Export destination unavailable");
                }
                Err(e) => {
                    warn!(sink = sink.name(), error = %e, "Export destination failed, trying next");
                }
            }
        }
        Err(ExportSinkError::NoDestination)
    }
}
