use crate::filter::anchor_to_root;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Path-exclusion rules read from the `.gitignore` at the top of a root.
///
/// Matching follows git semantics: the last matching pattern wins and a
/// `!pattern` re-includes what an earlier line excluded. Patterns without a
/// slash apply at every depth.
pub enum IgnoreRules {
    NoRules,
    Compiled { root: PathBuf, rules: Gitignore },
}

impl IgnoreRules {
    /// Reads `<root>/.gitignore`. A missing or unreadable file yields
    /// [`IgnoreRules::NoRules`]; individual bad lines are skipped.
    pub fn load(root: &Path) -> Self {
        let gitignore_path = root.join(GITIGNORE_FILE_NAME);
        if !gitignore_path.is_file() {
            debug!("No .gitignore file found in {:?}", root);
            return IgnoreRules::NoRules;
        }
        debug!("Found .gitignore file: {:?}", gitignore_path);

        match fs::read_to_string(&gitignore_path) {
            Ok(content) => Self::from_lines(root, Some(gitignore_path), content.lines()),
            Err(e) => {
                warn!("Error reading .gitignore file {:?}: {}", gitignore_path, e);
                IgnoreRules::NoRules
            }
        }
    }

    /// Compiles pattern lines relative to `root`, in order.
    pub fn from_lines<'a, I>(root: &Path, source: Option<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match builder.add_line(source.clone(), line) {
                Ok(_) => {
                    pattern_count += 1;
                    trace!(".gitignore pattern: {}", line);
                }
                Err(e) => warn!("Skipping invalid .gitignore pattern '{}': {}", line, e),
            }
        }
        debug!(".gitignore contains {} usable patterns", pattern_count);

        match builder.build() {
            Ok(rules) => IgnoreRules::Compiled {
                root: root.to_path_buf(),
                rules,
            },
            Err(e) => {
                warn!("Failed to compile .gitignore rules, ignoring them: {}", e);
                IgnoreRules::NoRules
            }
        }
    }

    /// True when `path` should be included, i.e. it is not ignored.
    /// Relative paths are taken relative to the root.
    pub fn admits(&self, path: &Path) -> bool {
        let (root, rules) = match self {
            IgnoreRules::NoRules => return true,
            IgnoreRules::Compiled { root, rules } => (root, rules),
        };

        let absolute = anchor_to_root(root, path);
        // the matcher only understands paths beneath its root
        if !absolute.starts_with(root) {
            return true;
        }

        let is_dir = absolute.is_dir();
        let ignored = rules
            .matched_path_or_any_parents(&absolute, is_dir)
            .is_ignore();
        if ignored {
            debug!(
                "File is ignored by .gitignore: {:?}",
                absolute.strip_prefix(root).unwrap_or(&absolute)
            );
        }
        !ignored
    }

    pub fn is_empty(&self) -> bool {
        match self {
            IgnoreRules::NoRules => true,
            IgnoreRules::Compiled { rules, .. } => rules.is_empty(),
        }
    }
}
