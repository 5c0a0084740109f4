use crate::aggregator::Document;
use crate::trie::{Trie, TrieNode};
use std::path::Path;
use tracing::info;

/// One-line run summary, e.g. `Context copied to clipboard (120 characters, 3 files)`.
pub fn summary_line(document: &Document, destination: &str) -> String {
    format!(
        "Context {} ({} characters, {} files)",
        destination,
        document.char_count(),
        document.file_count()
    )
}

/// Logs the included files as a directory tree with character counts.
pub fn print_stats(document: &Document) {
    let mut trie = Trie::new();
    for (path, chars) in document.files() {
        trie.insert(Path::new(path), *chars);
    }
    for line in render_tree(&trie) {
        info!("{}", line);
    }
}

/// The tree as printable lines, headed by the overall total.
pub fn render_tree(trie: &Trie) -> Vec<String> {
    let root = trie.get_root();
    let mut lines = vec![format!("Overall ({} characters)", root.calculate_total_chars())];
    push_children(root, "", &mut lines);
    lines
}

fn push_children(node: &TrieNode, prefix: &str, lines: &mut Vec<String>) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        match child.char_count {
            Some(chars) if child.children.is_empty() => {
                lines.push(format!("{}{} {} ({} characters)", prefix, connector, name, chars));
            }
            _ => {
                lines.push(format!(
                    "{}{} 📂 {} ({} characters)",
                    prefix,
                    connector,
                    name,
                    child.calculate_total_chars()
                ));
                let new_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
                push_children(child, &new_prefix, lines);
            }
        }
    }
}
