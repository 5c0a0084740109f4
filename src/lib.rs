pub mod aggregator;
pub mod cli;
pub mod copy;
pub mod errors;
pub mod filter;
pub mod ignore;
pub mod language;
pub mod logger;
pub mod mime;
pub mod reporting;
pub mod sink;
pub mod tree;
pub mod trie;
pub mod utils;

pub use aggregator::{ContextCreator, Document, FileRecord};
pub use copy::{copy_project_context, ContextCreatorConfig};
pub use errors::ContextError;
pub use filter::{FileFilter, FilterConfig, PathFilter};
pub use crate::ignore::IgnoreRules;
pub use tree::{DirectoryTree, FileTreeCreator};
