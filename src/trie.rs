use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;

/// Represents a node in a path trie.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: BTreeMap<String, TrieNode>,
    pub char_count: Option<usize>,
}

impl TrieNode {
    /// Calculates the total number of characters in the subtree.
    pub fn calculate_total_chars(&self) -> usize {
        self.char_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(TrieNode::calculate_total_chars)
                .sum::<usize>()
    }
}

/// Files keyed by path component, each leaf carrying a character count.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Inserts a path with its character count into the trie.
    pub fn insert(&mut self, path: &Path, char_count: usize) {
        trace!("Inserting path: {:?} with {} characters", path, char_count);
        let mut current_node = &mut self.root;
        for component in path.iter() {
            let component_str = component.to_string_lossy().into_owned();
            current_node = current_node.children.entry(component_str).or_default();
        }
        if current_node.char_count.is_some() {
            trace!("Overwriting existing character count for path: {:?}", path);
        }
        current_node.char_count = Some(char_count);
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }
}
