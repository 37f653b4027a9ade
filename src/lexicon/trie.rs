use super::frequency::FrequencyTable;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct VocabNode {
    // BTreeMap keeps subtree traversal order fixed for a given tree.
    children: BTreeMap<char, usize>,
    bucket: Option<Vec<String>>,
}

/// Immutable prefix tree from codes to the words sharing them.
///
/// Nodes live in a single arena and refer to each other by index. Every
/// terminal bucket is sorted by descending frequency once, at build time,
/// and never re-sorted afterwards.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    nodes: Vec<VocabNode>,
    word_count: usize,
}

impl Default for VocabularyIndex {
    fn default() -> Self {
        Self {
            nodes: vec![VocabNode::default()],
            word_count: 0,
        }
    }
}

impl VocabularyIndex {
    /// Builds the index from `(code, word)` pairs. Empty codes or words are
    /// ignored and a word is stored at most once per code.
    pub fn build<I>(entries: I, frequencies: &FrequencyTable) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut index = Self::default();

        for (code, word) in entries {
            if code.is_empty() || word.is_empty() {
                continue;
            }
            let node_idx = index.descend_or_create(&code);
            let bucket = index.nodes[node_idx].bucket.get_or_insert_with(Vec::new);
            if !bucket.contains(&word) {
                bucket.push(word);
                index.word_count += 1;
            }
        }

        for node in index.nodes.iter_mut() {
            if let Some(bucket) = node.bucket.as_mut() {
                *bucket = frequencies.order_by_frequency(bucket.as_slice());
            }
        }

        index
    }

    fn descend_or_create(&mut self, code: &str) -> usize {
        let mut node_idx = 0;
        for symbol in code.chars() {
            node_idx = match self.nodes[node_idx].children.get(&symbol) {
                Some(&next) => next,
                None => {
                    let new_idx = self.nodes.len();
                    self.nodes.push(VocabNode::default());
                    self.nodes[node_idx].children.insert(symbol, new_idx);
                    new_idx
                }
            };
        }
        node_idx
    }

    fn descend(&self, code: &str) -> Option<usize> {
        let mut node_idx = 0;
        for symbol in code.chars() {
            node_idx = *self.nodes[node_idx].children.get(&symbol)?;
        }
        Some(node_idx)
    }

    /// Words whose code is exactly `code`, most frequent first.
    pub fn lookup_exact(&self, code: &str) -> &[String] {
        if code.is_empty() {
            return &[];
        }
        self.descend(code)
            .and_then(|idx| self.nodes[idx].bucket.as_deref())
            .unwrap_or(&[])
    }

    /// Words whose code starts with `code`.
    ///
    /// Buckets are concatenated in pre-order (a node's own bucket, then its
    /// children by ascending symbol). Order inside each bucket is kept; there
    /// is no resort across buckets.
    pub fn lookup_subtree(&self, code: &str) -> Vec<String> {
        if code.is_empty() {
            return Vec::new();
        }
        let Some(start) = self.descend(code) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if let Some(bucket) = &node.bucket {
                out.extend(bucket.iter().cloned());
            }
            stack.extend(node.children.values().rev().copied());
        }
        out
    }

    /// First symbols of every stored code.
    pub fn root_symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.nodes[0].children.keys().copied()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}
