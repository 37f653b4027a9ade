use std::collections::HashMap;

/// Word -> usage score. Absent words score 0.0.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    scores: HashMap<String, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative and non-finite scores are dropped; repeated words accumulate.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut scores: HashMap<String, f64> = HashMap::new();
        for (word, score) in entries {
            if word.is_empty() || !score.is_finite() || score < 0.0 {
                continue;
            }
            *scores.entry(word).or_default() += score;
        }
        Self { scores }
    }

    pub fn score_of(&self, word: &str) -> f64 {
        self.scores.get(word).copied().unwrap_or(0.0)
    }

    /// Stable descending sort by score; the input is left untouched.
    pub fn order_by_frequency<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = words
            .iter()
            .map(|w| (self.score_of(w.as_ref()), w.as_ref()))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, w)| w.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
