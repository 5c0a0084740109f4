use crate::errors::ContextError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};
use walkdir::WalkDir;

/// Directory → the files directly inside it. One entry per visited directory.
pub type DirectoryTree = HashMap<PathBuf, Vec<PathBuf>>;

/// Enumerates every directory under a root along with its direct file entries.
///
/// Symlinked directories are listed by neither side of the mapping and are
/// never descended into. Symlinks to anything else are reported as files and
/// left for the inclusion filter to judge.
pub struct FileTreeCreator {
    root: PathBuf,
}

impl FileTreeCreator {
    /// Validates and resolves `root`. Fails before any traversal happens.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, ContextError> {
        let root = resolve_root(root.as_ref())?;
        debug!("Initializing FileTreeCreator for directory: {:?}", root);
        Ok(FileTreeCreator { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn create_file_tree(&self) -> DirectoryTree {
        debug!("Creating file tree for directory: {:?}", self.root);
        let mut tree = DirectoryTree::new();
        tree.insert(self.root.clone(), Vec::new());

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking directory: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                tree.entry(path.to_path_buf()).or_default();
                continue;
            }
            if file_type.is_symlink() && path.is_dir() {
                trace!("Not following symlinked directory: {:?}", path);
                continue;
            }

            match path.parent() {
                Some(parent) => tree
                    .entry(parent.to_path_buf())
                    .or_default()
                    .push(path.to_path_buf()),
                None => warn!("Skipping entry without parent: {:?}", path),
            }
        }

        let total_files: usize = tree.values().map(Vec::len).sum();
        debug!(
            "File tree created with {} directories and {} files",
            tree.len(),
            total_files
        );
        tree
    }
}

/// Resolves `root` to an absolute path and checks it names an existing directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, ContextError> {
    if !root.exists() {
        error!("Directory not found: {:?}", root);
        return Err(ContextError::RootNotFound(root.to_path_buf()));
    }
    let resolved = root.canonicalize()?;
    if !resolved.is_dir() {
        error!("Not a directory: {:?}", resolved);
        return Err(ContextError::RootNotADirectory(resolved));
    }
    Ok(resolved)
}
