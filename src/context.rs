use std::collections::{HashMap, HashSet, VecDeque};

/// Maximum continuations returned for one context.
pub const CONTINUATION_LIMIT: usize = 500;

/// Trims and lower-cases a context word. Inner whitespace collapses to a
/// single space so a stray "new  york" still lines up with stored keys.
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the lookup prefix from the last two usable context words:
/// `"w1 w2 "`, or `"w1 "` when only one is available.
pub fn context_key<S: AsRef<str>>(context_words: &[S]) -> Option<(String, usize)> {
    let words: Vec<String> = context_words
        .iter()
        .map(|w| normalize_word(w.as_ref()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    let tail = &words[words.len().saturating_sub(2)..];
    let mut key = tail.join(" ");
    key.push(' ');
    Some((key, tail.len()))
}

/// Trigram counts keyed by normalised `"w1 w2 w3"` strings.
///
/// Entries are held in a key-sorted array, so a context prefix maps to one
/// contiguous range found by binary search instead of a scan of every key.
#[derive(Debug, Clone, Default)]
pub struct ContextModel {
    entries: Vec<(String, u64)>,
}

impl ContextModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are normalised; repeated keys have their counts summed.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut merged: HashMap<String, u64> = HashMap::new();
        for (key, count) in counts {
            let key = normalize_word(&key);
            if key.is_empty() {
                continue;
            }
            let slot = merged.entry(key).or_default();
            *slot = slot.saturating_add(count);
        }
        let mut entries: Vec<(String, u64)> = merged.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    pub fn count_of(&self, trigram: &str) -> u64 {
        let key = normalize_word(trigram);
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key.as_str()))
            .map(|i| self.entries[i].1)
            .unwrap_or(0)
    }

    pub fn continuations_for<S: AsRef<str>>(&self, context_words: &[S]) -> Vec<String> {
        self.continuations_with_limit(context_words, CONTINUATION_LIMIT)
    }

    /// Words that followed the context, most frequent first.
    ///
    /// With a single context word the match is `"w1 x y"` and only `x` is
    /// kept. Count ties are broken by key so output is fixed for a given model.
    pub fn continuations_with_limit<S: AsRef<str>>(
        &self,
        context_words: &[S],
        limit: usize,
    ) -> Vec<String> {
        let Some((prefix, width)) = context_key(context_words) else {
            return Vec::new();
        };

        let start = self
            .entries
            .partition_point(|(k, _)| k.as_str() < prefix.as_str());
        let mut matches: Vec<&(String, u64)> = self.entries[start..]
            .iter()
            .take_while(|(k, _)| k.starts_with(prefix.as_str()))
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (key, _) in matches {
            let rest = &key[prefix.len()..];
            let continuation = if width == 1 {
                rest.split(' ').next().unwrap_or("")
            } else {
                rest
            };
            if continuation.is_empty() || !seen.insert(continuation) {
                continue;
            }
            out.push(continuation.to_string());
            if out.len() >= limit {
                break;
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rolling window of the most recently confirmed words.
///
/// Owned by the caller; the resolver only ever borrows a snapshot.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    capacity: usize,
    words: VecDeque<String>,
}

impl ContextWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: VecDeque::with_capacity(capacity),
        }
    }

    /// Blank words are ignored.
    pub fn push(&mut self, word: &str) {
        let word = normalize_word(word);
        if word.is_empty() || self.capacity == 0 {
            return;
        }
        if self.words.len() == self.capacity {
            self.words.pop_front();
        }
        self.words.push_back(word);
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn words(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
