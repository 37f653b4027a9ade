use super::frequency::FrequencyTable;
use super::trie::VocabularyIndex;
use std::collections::HashMap;

/// Cached candidate lists for one-symbol codes, the most frequent query.
///
/// Every list is duplicate-free, so the resolver can serve it borrowed.
#[derive(Debug, Clone, Default)]
pub struct SingleSymbolTable {
    map: HashMap<char, Vec<String>>,
}

impl SingleSymbolTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, Vec<String>)>,
    {
        let mut map = HashMap::new();
        for (symbol, words) in entries {
            let mut seen = Vec::with_capacity(words.len());
            for word in words {
                if !word.is_empty() && !seen.contains(&word) {
                    seen.push(word);
                }
            }
            map.insert(symbol, seen);
        }
        Self { map }
    }

    /// Precomputes the subtree of every root symbol, ordered by frequency.
    /// A word stored under several codes keeps only its first position.
    pub fn derive(index: &VocabularyIndex, frequencies: &FrequencyTable) -> Self {
        Self::from_entries(index.root_symbols().map(|symbol| {
            let subtree = index.lookup_subtree(symbol.encode_utf8(&mut [0; 4]));
            (symbol, frequencies.order_by_frequency(&subtree))
        }))
    }

    pub fn get(&self, symbol: char) -> Option<&[String]> {
        self.map.get(&symbol).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
