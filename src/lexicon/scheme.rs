use crate::error::{DwResult, DwellError};
use std::collections::HashMap;

/// Collapses letters onto ambiguous key symbols.
///
/// Built from comma separated groups such as `"abc,def,ghi"`; every letter in
/// a group encodes to the group's first letter, so `"bad"` becomes `"aad"`.
#[derive(Debug, Clone, Default)]
pub struct CodeScheme {
    symbols: HashMap<char, char>,
}

impl CodeScheme {
    pub fn parse(groups: &str) -> DwResult<Self> {
        let mut symbols = HashMap::new();
        for group in groups.split(',') {
            let group = group.trim().to_lowercase();
            let Some(symbol) = group.chars().next() else {
                return Err(DwellError::Config(format!(
                    "Empty key group in '{}'",
                    groups
                )));
            };
            for c in group.chars() {
                if symbols.insert(c, symbol).is_some() {
                    return Err(DwellError::Config(format!(
                        "Character '{}' appears in more than one key group",
                        c
                    )));
                }
            }
        }
        Ok(Self { symbols })
    }

    pub fn symbol_for(&self, c: char) -> Option<char> {
        c.to_lowercase()
            .next()
            .and_then(|lower| self.symbols.get(&lower).copied())
    }

    /// `None` if any character falls outside the scheme.
    pub fn encode(&self, word: &str) -> Option<String> {
        if word.is_empty() {
            return None;
        }
        word.chars().map(|c| self.symbol_for(c)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
