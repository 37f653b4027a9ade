use crate::config::{LookupMode, ResolverParams};
use crate::context::{normalize_word, ContextModel};
use crate::lexicon::{FlatCodeMap, FrequencyTable, SingleSymbolTable, VocabularyIndex};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Turns an ambiguous code plus recent words into ranked suggestions.
///
/// Holds only shared references to frozen tables, so one resolver (or many)
/// can serve concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct CandidateResolver<'a> {
    index: &'a VocabularyIndex,
    flat: &'a FlatCodeMap,
    shortcuts: &'a SingleSymbolTable,
    frequencies: &'a FrequencyTable,
    context: &'a ContextModel,
    params: ResolverParams,
}

impl<'a> CandidateResolver<'a> {
    pub fn new(
        index: &'a VocabularyIndex,
        flat: &'a FlatCodeMap,
        shortcuts: &'a SingleSymbolTable,
        frequencies: &'a FrequencyTable,
        context: &'a ContextModel,
        params: ResolverParams,
    ) -> Self {
        Self {
            index,
            flat,
            shortcuts,
            frequencies,
            context,
            params,
        }
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// `resolve` using the configured lookup mode.
    pub fn suggest<S: AsRef<str>>(&self, code: &str, context_words: &[S]) -> Vec<String> {
        self.resolve(code, context_words, self.params.mode == LookupMode::Tree)
    }

    /// Candidates for `code` before any context is applied, de-duplicated.
    pub fn base_candidates(&self, code: &str, use_tree_mode: bool) -> Vec<String> {
        self.base_list(code, use_tree_mode).into_owned()
    }

    // A shortcut hit is served straight from the table without copying it.
    fn base_list(&self, code: &str, use_tree_mode: bool) -> Cow<'a, [String]> {
        if code.is_empty() {
            return Cow::Borrowed(&[]);
        }

        if use_tree_mode {
            let mut symbols = code.chars();
            if let (Some(symbol), None) = (symbols.next(), symbols.next()) {
                if let Some(words) = self.shortcuts.get(symbol) {
                    return Cow::Borrowed(words);
                }
            }
            let subtree = self.index.lookup_subtree(code);
            Cow::Owned(dedup_in_order(self.frequencies.order_by_frequency(&subtree)))
        } else {
            Cow::Owned(dedup_in_order(
                self.frequencies.order_by_frequency(self.flat.lookup(code)),
            ))
        }
    }

    /// Ranked, duplicate-free suggestions for `code` given recent words.
    ///
    /// Without context this is the top of the base list. With context, base
    /// words are reordered by how often they followed the last one or two
    /// words; if none did, the head of the base list is used instead. Base
    /// words as long as the code are then appended after that selection.
    pub fn resolve<S: AsRef<str>>(
        &self,
        code: &str,
        context_words: &[S],
        use_tree_mode: bool,
    ) -> Vec<String> {
        let base = self.base_list(code, use_tree_mode);
        if base.is_empty() {
            return Vec::new();
        }

        let context: Vec<String> = context_words
            .iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        if context.is_empty() {
            return base.iter().take(self.params.top_k).cloned().collect();
        }

        let continuations = self
            .context
            .continuations_with_limit(&context, self.params.continuation_limit);

        // Membership only; rank comes from the continuation order.
        let mut by_lower: HashMap<String, &str> = HashMap::with_capacity(base.len());
        for word in base.iter() {
            by_lower.entry(word.to_lowercase()).or_insert(word.as_str());
        }

        let mut chosen: Vec<String> = Vec::new();
        for continuation in &continuations {
            if chosen.len() >= self.params.top_k {
                break;
            }
            if let Some(&word) = by_lower.get(continuation) {
                if !chosen.iter().any(|c| c == word) {
                    chosen.push(word.to_string());
                }
            }
        }

        if chosen.is_empty() {
            trace!("no context overlap for code '{}', using base fallback", code);
            chosen = base
                .iter()
                .take(self.params.fallback_limit)
                .cloned()
                .collect();
        }

        // Code length roughly tracks word length in the ambiguous scheme.
        // These are appended after the selection, never merged into its rank.
        let code_len = code.chars().count();
        let additional: Vec<&String> = base
            .iter()
            .filter(|w| w.chars().count() == code_len && !chosen.contains(*w))
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut result = Vec::with_capacity(chosen.len() + additional.len());
        for word in chosen.iter().chain(additional) {
            if seen.insert(word.clone()) {
                result.push(word.clone());
            }
        }
        result
    }
}

fn dedup_in_order(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(words.len());
    words
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
