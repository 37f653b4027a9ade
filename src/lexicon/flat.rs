use super::frequency::FrequencyTable;
use std::collections::HashMap;

/// Code -> words, exact match only. Backs the non-tree lookup mode.
#[derive(Debug, Clone, Default)]
pub struct FlatCodeMap {
    map: HashMap<String, Vec<String>>,
}

impl FlatCodeMap {
    pub fn build<I>(entries: I, frequencies: &FrequencyTable) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (code, word) in entries {
            if code.is_empty() || word.is_empty() {
                continue;
            }
            let words = map.entry(code).or_default();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        for words in map.values_mut() {
            *words = frequencies.order_by_frequency(words.as_slice());
        }
        Self { map }
    }

    pub fn lookup(&self, code: &str) -> &[String] {
        self.map.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
