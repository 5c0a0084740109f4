use crate::errors::ContextError;
use crate::ignore::IgnoreRules;
use crate::mime::{is_text_mime, ExtensionMimeTable, MimeGuesser};
use crate::tree::resolve_root;
use glob::Pattern;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};

/// Bytes read from a file of unknown type to decide whether it is text.
pub const SNIFF_LEN: u64 = 1024;

pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    "pyc", "pyo", "so", "o", "a", "lib", "dll", "exe", "bin", "dat", "db", "sqlite", "sqlite3",
    "db-shm", "db-wal", "jpg", "jpeg", "png", "gif", "bmp", "ico", "tiff", "mp3", "mp4", "avi",
    "mov", "flv", "wav", "ogg", "zip", "tar", "gz", "bz2", "7z", "rar", "pdf", "doc", "docx", "xls",
    "xlsx", "ppt", "pptx",
];

pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", ".vscode"];

pub const DEFAULT_EXCLUDE_FILES: &[&str] = &[
    // Version control
    ".gitignore",
    // Lock files
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "Gemfile.lock",
    // Generated assets
    "*.min.js",
    "*.min.css",
    "*.map",
    "yarn-error.log",
    "npm-debug.log",
    // Editor and tooling config
    ".editorconfig",
    ".prettierrc",
    ".eslintrc",
    ".stylelintrc",
    "tsconfig.json",
    "jsconfig.json",
    ".babelrc",
];

/// Source extensions that MIME databases tend to misreport.
pub const ALWAYS_TEXT_EXTENSIONS: &[&str] = &[
    "rs", "go", "ts", "tsx", "jsx", "vue", "svelte", "kt", "kts", "swift", "scala", "elm", "hs",
    "rb", "php", "pl", "ex", "exs", "erl", "hrl", "clj", "fs", "fsx",
];

/// The fixed rule tables consulted by [`FileFilter`].
///
/// Extensions are stored lowercase and without the leading dot.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub binary_extensions: HashSet<String>,
    pub excluded_dirs: HashSet<String>,
    pub excluded_files: Vec<String>,
    pub always_text_extensions: HashSet<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| -> HashSet<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        FilterConfig {
            binary_extensions: owned(DEFAULT_BINARY_EXTENSIONS),
            excluded_dirs: owned(DEFAULT_EXCLUDE_DIRS),
            excluded_files: DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            always_text_extensions: owned(ALWAYS_TEXT_EXTENSIONS),
        }
    }
}

/// Why a candidate was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAFile,
    BinaryExtension(String),
    ExcludedDirectory(String),
    ExcludedFile(String),
    ExcludePattern(String),
    Gitignored,
    NotText,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAFile => write!(f, "not a regular file"),
            Rejection::BinaryExtension(ext) => write!(f, "binary extension '.{}'", ext),
            Rejection::ExcludedDirectory(dir) => write!(f, "inside excluded directory '{}'", dir),
            Rejection::ExcludedFile(entry) => write!(f, "matches excluded file '{}'", entry),
            Rejection::ExcludePattern(pattern) => write!(f, "matches exclude pattern '{}'", pattern),
            Rejection::Gitignored => write!(f, "ignored by .gitignore"),
            Rejection::NotText => write!(f, "not a text file"),
        }
    }
}

/// A glob matched against the trailing segments of a root-relative path.
///
/// `*.log` looks at the file name only, `docs/*.md` at the last two
/// segments, and a leading `/` requires the whole relative path to match.
/// A `**` segment stands for zero or more directories.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    anchored: bool,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    AnyDepth,
    Glob(Pattern),
}

impl PathPattern {
    pub fn new(raw: &str) -> Result<Self, ContextError> {
        let anchored = raw.starts_with('/');
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "**" => Ok(Segment::AnyDepth),
                _ => Pattern::new(s).map(Segment::Glob),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ContextError::PatternError(format!("'{}': {}", raw, e)))?;
        Ok(PathPattern {
            raw: raw.to_string(),
            anchored,
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, relative: &Path) -> bool {
        let parts = path_segments(relative);
        if self.segments.is_empty() {
            return false;
        }
        if self.anchored {
            return match_segments(&self.segments, &parts);
        }
        (0..=parts.len()).any(|start| match_segments(&self.segments, &parts[start..]))
    }
}

/// Whole-sequence match of `segments` against `parts`.
fn match_segments(segments: &[Segment], parts: &[String]) -> bool {
    match segments.split_first() {
        None => parts.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=parts.len()).any(|skip| match_segments(rest, &parts[skip..]))
        }
        Some((Segment::Glob(pattern), rest)) => match parts.split_first() {
            Some((part, tail)) => pattern.matches(part) && match_segments(rest, tail),
            None => false,
        },
    }
}

fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn has_wildcard(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Something that can admit or reject a candidate file.
pub trait PathFilter {
    fn admits(&self, path: &Path) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn admits(&self, path: &Path) -> bool {
        self(path)
    }
}

/// The layered admit/reject decision for candidate files under one root.
///
/// Checks run in a fixed order and stop at the first rejection: regular file,
/// binary extension, excluded directory, excluded file, caller patterns,
/// `.gitignore`, then text detection.
pub struct FileFilter {
    root: PathBuf,
    config: FilterConfig,
    excluded_names: HashSet<String>,
    excluded_patterns: Vec<PathPattern>,
    extra_patterns: Vec<PathPattern>,
    ignore_rules: IgnoreRules,
    mime: Box<dyn MimeGuesser>,
}

impl FileFilter {
    pub fn new<P: AsRef<Path>>(
        root: P,
        use_gitignore: bool,
        exclude_patterns: &[String],
    ) -> Result<Self, ContextError> {
        Self::with_config(root, FilterConfig::default(), use_gitignore, exclude_patterns)
    }

    pub fn with_config<P: AsRef<Path>>(
        root: P,
        config: FilterConfig,
        use_gitignore: bool,
        exclude_patterns: &[String],
    ) -> Result<Self, ContextError> {
        let root = resolve_root(root.as_ref())?;
        debug!("Initializing FileFilter for directory: {:?}", root);
        debug!("Using gitignore: {}", use_gitignore);

        let mut excluded_names = HashSet::new();
        let mut excluded_patterns = Vec::new();
        for entry in &config.excluded_files {
            if has_wildcard(entry) {
                excluded_patterns.push(PathPattern::new(entry)?);
            } else {
                excluded_names.insert(entry.clone());
            }
        }

        let extra_patterns = exclude_patterns
            .iter()
            .map(|p| PathPattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        if !extra_patterns.is_empty() {
            debug!("Additional exclude patterns: {:?}", exclude_patterns);
        }

        let ignore_rules = if use_gitignore {
            IgnoreRules::load(&root)
        } else {
            IgnoreRules::NoRules
        };

        Ok(FileFilter {
            root,
            config,
            excluded_names,
            excluded_patterns,
            extra_patterns,
            ignore_rules,
            mime: Box::new(ExtensionMimeTable),
        })
    }

    /// Replaces the MIME lookup used for files outside the always-text list.
    pub fn with_mime_guesser<M: MimeGuesser + 'static>(mut self, mime: M) -> Self {
        self.mime = Box::new(mime);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs every check in order, reporting the first one that fails.
    /// Relative paths are resolved against the root.
    pub fn evaluate(&self, path: &Path) -> Result<(), Rejection> {
        let absolute = self.absolute(path);
        let path = absolute.as_path();
        if !path.is_file() {
            return Err(Rejection::NotAFile);
        }

        let ext = lowercase_extension(path);
        if let Some(ext) = ext.as_deref() {
            if self.config.binary_extensions.contains(ext) {
                return Err(Rejection::BinaryExtension(ext.to_string()));
            }
        }

        let relative = self.relative(path);
        if let Some(dir) = self.excluded_dir(&relative) {
            return Err(Rejection::ExcludedDirectory(dir));
        }
        if let Some(entry) = self.excluded_file(&relative) {
            return Err(Rejection::ExcludedFile(entry));
        }
        if let Some(pattern) = self.extra_patterns.iter().find(|p| p.matches(&relative)) {
            return Err(Rejection::ExcludePattern(pattern.as_str().to_string()));
        }
        if !self.ignore_rules.admits(path) {
            return Err(Rejection::Gitignored);
        }

        if self.is_text_file(path, ext.as_deref()) {
            Ok(())
        } else {
            Err(Rejection::NotText)
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        anchor_to_root(&self.root, path)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        let absolute = self.absolute(path);
        absolute
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| absolute.clone())
    }

    pub fn is_in_excluded_dir(&self, path: &Path) -> bool {
        self.excluded_dir(&self.relative(path)).is_some()
    }

    fn excluded_dir(&self, relative: &Path) -> Option<String> {
        path_segments(relative)
            .into_iter()
            .find(|segment| self.config.excluded_dirs.contains(segment))
    }

    pub fn is_excluded_file(&self, path: &Path) -> bool {
        self.excluded_file(&self.relative(path)).is_some()
    }

    fn excluded_file(&self, relative: &Path) -> Option<String> {
        let name = relative.file_name()?.to_string_lossy();
        if self.excluded_names.contains(&*name) {
            return Some(name.into_owned());
        }
        self.excluded_patterns
            .iter()
            .find(|p| p.matches(relative))
            .map(|p| p.as_str().to_string())
    }

    fn is_text_file(&self, path: &Path, ext: Option<&str>) -> bool {
        if ext.is_some_and(|e| self.config.always_text_extensions.contains(e)) {
            trace!("File is text (by extension override): {:?}", path);
            return true;
        }
        match self.mime.guess(path) {
            Some(mime) => {
                trace!("MIME type {} for {:?}", mime, path);
                is_text_mime(mime)
            }
            None => sniff_utf8(path),
        }
    }
}

impl PathFilter for FileFilter {
    fn admits(&self, path: &Path) -> bool {
        match self.evaluate(path) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping {:?}: {}", path, reason);
                false
            }
        }
    }
}

/// Joins relative paths onto `root`. Absolute paths that only reach the root
/// through a symlinked prefix are canonicalized.
pub(crate) fn anchor_to_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        return root.join(path);
    }
    if path.starts_with(root) {
        return path.to_path_buf();
    }
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Decodes the first [`SNIFF_LEN`] bytes as UTF-8. A multi-byte sequence cut
/// off by the read limit still counts as text; one cut off by end of file
/// does not.
pub fn sniff_utf8(path: &Path) -> bool {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(SNIFF_LEN).read_to_end(&mut head));
    if let Err(e) = read {
        warn!("Could not read {:?} for text detection: {}", path, e);
        return false;
    }
    match std::str::from_utf8(&head) {
        Ok(_) => true,
        // an unfinished sequence is only acceptable when the limit cut it
        Err(e) => e.error_len().is_none() && head.len() as u64 == SNIFF_LEN,
    }
}
