use crate::aggregator::Document;
use crate::errors::ContextError;
use arboard::Clipboard;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs as async_fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::debug;

/// Where a finished [`Document`] ends up.
#[async_trait]
pub trait ContextSink: Send + Sync {
    async fn deliver(&self, document: &Document) -> Result<(), ContextError>;

    /// Human-readable destination, used in the run summary.
    fn describe(&self) -> String;
}

pub struct ClipboardSink;

#[async_trait]
impl ContextSink for ClipboardSink {
    async fn deliver(&self, document: &Document) -> Result<(), ContextError> {
        let text = document.as_str().to_owned();
        tokio::task::spawn_blocking(move || set_clipboard_text(text))
            .await
            .map_err(|e| ContextError::ClipboardWriteError(e.to_string()))??;
        debug!("Clipboard updated");
        Ok(())
    }

    fn describe(&self) -> String {
        "copied to clipboard".to_owned()
    }
}

fn set_clipboard_text(text: String) -> Result<(), ContextError> {
    debug!("Initializing clipboard");
    let mut clipboard =
        Clipboard::new().map_err(|e| ContextError::ClipboardInitError(e.to_string()))?;
    write_persistent(&mut clipboard, text)
        .map_err(|e| ContextError::ClipboardWriteError(e.to_string()))
}

/// X11 and Wayland clipboards are owned by the writing process, so the
/// contents are served until another application takes the selection.
#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn write_persistent(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    tracing::info!("Serving clipboard contents until another application replaces them");
    clipboard.set().wait().text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn write_persistent(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }
}

#[async_trait]
impl ContextSink for FileSink {
    async fn deliver(&self, document: &Document) -> Result<(), ContextError> {
        debug!("Writing context to {:?}", self.path);
        async_fs::write(&self.path, document.as_str().as_bytes())
            .await
            .map_err(|source| ContextError::OutputWriteError {
                path: self.path.clone(),
                source,
            })?;
        debug!("Wrote {} bytes to {:?}", document.as_str().len(), self.path);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("written to {}", self.path.display())
    }
}

pub struct StdoutSink;

#[async_trait]
impl ContextSink for StdoutSink {
    async fn deliver(&self, document: &Document) -> Result<(), ContextError> {
        let mut stdout = io::stdout();
        stdout.write_all(document.as_str().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }

    fn describe(&self) -> String {
        "written to stdout".to_owned()
    }
}

/// Picks exactly one sink: an output file wins, then the clipboard unless it
/// is disabled, then stdout.
pub fn select_sink(output: Option<PathBuf>, no_clipboard: bool) -> Box<dyn ContextSink> {
    match output {
        Some(path) => Box::new(FileSink::new(path)),
        None if !no_clipboard => Box::new(ClipboardSink),
        None => Box::new(StdoutSink),
    }
}
