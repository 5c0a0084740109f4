use crate::errors::ContextError;
use crate::filter::{FileFilter, PathFilter};
use crate::language::get_file_type;
use crate::tree::FileTreeCreator;
use crate::utils::{normalize_path, read_file_content};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One admitted file, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub content: String,
    pub file_type: &'static str,
}

impl FileRecord {
    /// The relative path as it appears in the document header.
    pub fn display_path(&self) -> String {
        normalize_path(&self.relative_path)
    }

    pub fn render(&self) -> String {
        format!(
            "{}:\n```{}\n{}\n```",
            self.display_path(),
            self.file_type,
            self.content
        )
    }
}

/// The rendered records, sorted by relative path and joined by a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    files: Vec<(String, usize)>,
}

impl Document {
    pub fn from_records(mut records: Vec<FileRecord>) -> Self {
        records.sort_by_cached_key(FileRecord::display_path);
        let files = records
            .iter()
            .map(|r| (r.display_path(), r.content.chars().count()))
            .collect();
        let text = records
            .iter()
            .map(FileRecord::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        Document { text, files }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of characters in the document.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// `(relative path, content characters)` per included file, in document order.
    pub fn files(&self) -> &[(String, usize)] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Walks a root, filters its files and assembles the [`Document`].
pub struct ContextCreator<F: PathFilter = FileFilter> {
    tree_creator: FileTreeCreator,
    filter: F,
}

impl ContextCreator<FileFilter> {
    /// Uses the default [`FileFilter`] with `.gitignore` support enabled.
    pub fn new<P: AsRef<Path>>(root: P, exclude_patterns: &[String]) -> Result<Self, ContextError> {
        let tree_creator = FileTreeCreator::new(root)?;
        let filter = FileFilter::new(tree_creator.root(), true, exclude_patterns)?;
        Ok(ContextCreator {
            tree_creator,
            filter,
        })
    }
}

impl<F: PathFilter> ContextCreator<F> {
    pub fn with_filter<P: AsRef<Path>>(root: P, filter: F) -> Result<Self, ContextError> {
        let tree_creator = FileTreeCreator::new(root)?;
        Ok(ContextCreator {
            tree_creator,
            filter,
        })
    }

    pub fn root(&self) -> &Path {
        self.tree_creator.root()
    }

    /// Records for every admitted file, in traversal order.
    pub fn collect_records(&self) -> Vec<FileRecord> {
        let root = self.root();
        debug!("Iterating over files in {:?}", root);
        let file_tree = self.tree_creator.create_file_tree();

        let mut records = Vec::new();
        let mut excluded = 0;
        for (dir_path, files) in &file_tree {
            trace!("Processing directory: {:?} ({} files)", dir_path, files.len());
            for file_path in files {
                if !self.filter.admits(file_path) {
                    excluded += 1;
                    continue;
                }
                let relative_path = file_path
                    .strip_prefix(root)
                    .unwrap_or(file_path)
                    .to_path_buf();
                debug!("Including file: {:?}", relative_path);

                records.push(FileRecord {
                    path: file_path.clone(),
                    content: read_file_content(file_path),
                    file_type: get_file_type(file_path),
                    relative_path,
                });
            }
        }

        debug!(
            "Iteration complete. Included {} files, excluded {} files",
            records.len(),
            excluded
        );
        records
    }

    pub fn create_context(&self) -> Document {
        Document::from_records(self.collect_records())
    }
}
