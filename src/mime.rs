use std::path::Path;

/// Guesses a MIME type for a path. `None` means the type is unknown.
pub trait MimeGuesser: Send + Sync {
    fn guess(&self, path: &Path) -> Option<&'static str>;
}

/// Extension lookup against the usual system MIME database entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionMimeTable;

impl MimeGuesser for ExtensionMimeTable {
    fn guess(&self, path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        mime_for_extension(&ext)
    }
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        // Text
        "txt" | "text" | "conf" | "def" | "list" | "log" | "in" | "ini" | "bat" | "c" | "h"
        | "cc" | "cxx" | "pl" | "srt" | "ksh" => Some("text/plain"),
        "py" => Some("text/x-python"),
        "md" | "markdown" => Some("text/markdown"),
        "html" | "htm" => Some("text/html"),
        "css" => Some("text/css"),
        "csv" => Some("text/csv"),
        "tsv" => Some("text/tab-separated-values"),
        "js" | "mjs" => Some("text/javascript"),
        "xml" | "xsl" => Some("text/xml"),
        "rst" => Some("text/x-rst"),
        "rtx" => Some("text/richtext"),
        "etx" => Some("text/x-setext"),
        "sgm" | "sgml" => Some("text/x-sgml"),
        "vcf" => Some("text/x-vcard"),
        "vtt" => Some("text/vtt"),
        "ics" => Some("text/calendar"),
        "asm" | "s" => Some("text/x-asm"),
        "java" => Some("text/x-java"),
        "hpp" | "hh" | "cpp" => Some("text/x-c++"),

        // Application
        "json" | "map" => Some("application/json"),
        "sh" => Some("application/x-sh"),
        "csh" => Some("application/x-csh"),
        "tcl" => Some("application/x-tcl"),
        "tex" => Some("application/x-tex"),
        "latex" => Some("application/x-latex"),
        "wasm" => Some("application/wasm"),
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "gz" => Some("application/gzip"),
        "tar" => Some("application/x-tar"),
        "doc" | "dot" => Some("application/msword"),
        "xls" => Some("application/vnd.ms-excel"),
        "ppt" => Some("application/vnd.ms-powerpoint"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "xlsx" => Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        "pptx" => {
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
        }
        "exe" | "bin" | "dll" | "so" | "o" | "obj" | "a" => Some("application/octet-stream"),
        "swf" => Some("application/x-shockwave-flash"),
        "pyc" | "pyo" => Some("application/x-python-code"),

        // Media
        "png" => Some("image/png"),
        "jpg" | "jpeg" | "jpe" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "ico" => Some("image/vnd.microsoft.icon"),
        "svg" => Some("image/svg+xml"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/x-wav"),
        "ogg" => Some("audio/ogg"),
        "mp4" => Some("video/mp4"),
        "mov" | "qt" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),
        "webm" => Some("video/webm"),
        "ts" => Some("video/mp2t"),

        _ => None,
    }
}

pub fn is_text_mime(mime: &str) -> bool {
    mime.starts_with("text/")
}
