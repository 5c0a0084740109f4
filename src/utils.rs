use crate::errors::ContextError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Forward-slash form of a path, with any leading `./` removed.
pub fn normalize_path(path: &Path) -> String {
    let path = path.strip_prefix("./").unwrap_or(path);
    path.to_string_lossy().replace('\\', "/")
}

/// UTF-8 when the bytes allow it, Latin-1 otherwise. Never fails.
pub fn decode_content(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            debug!("UTF-8 decode error ({}), falling back to Latin-1", e.utf8_error());
            e.into_bytes().iter().map(|&b| char::from(b)).collect()
        }
    }
}

pub fn try_read_file_content(path: &Path) -> Result<String, ContextError> {
    let bytes = fs::read(path)
        .map_err(|e| ContextError::FileReadError(format!("{}: {}", path.display(), e)))?;
    Ok(decode_content(bytes))
}

/// Reads a file for the document. Read failures become an inline marker so
/// one bad file doesn't sink the whole run.
pub fn read_file_content(path: &Path) -> String {
    debug!("Reading file content: {:?}", path);
    match try_read_file_content(path) {
        Ok(content) => {
            debug!("Read {} characters from {:?}", content.chars().count(), path);
            content
        }
        Err(e) => {
            warn!("{}", e);
            format!("[{}]", e)
        }
    }
}
