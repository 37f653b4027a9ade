use crate::config::{DataPaths, ResolverParams};
use crate::context::ContextModel;
use crate::error::{DwResult, DwellError};
use crate::lexicon::{CodeScheme, FlatCodeMap, FrequencyTable, SingleSymbolTable, VocabularyIndex};
use crate::loader::{load_frequencies, load_shortcuts, load_trigrams, load_vocabulary};
use crate::resolver::CandidateResolver;
use tracing::info;

/// Every table the resolver reads, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub index: VocabularyIndex,
    pub flat: FlatCodeMap,
    pub shortcuts: SingleSymbolTable,
    pub frequencies: FrequencyTable,
    pub context: ContextModel,
    pub scheme: Option<CodeScheme>,
}

impl Dataset {
    /// Builds the index and flat map from one set of vocabulary rows. The
    /// single-symbol table is derived from the index when none is given.
    pub fn from_parts(
        vocabulary: Vec<(String, String)>,
        frequencies: FrequencyTable,
        context: ContextModel,
        shortcuts: Option<SingleSymbolTable>,
        scheme: Option<CodeScheme>,
    ) -> Self {
        let index = VocabularyIndex::build(vocabulary.iter().cloned(), &frequencies);
        let flat = FlatCodeMap::build(vocabulary, &frequencies);
        let shortcuts =
            shortcuts.unwrap_or_else(|| SingleSymbolTable::derive(&index, &frequencies));

        Self {
            index,
            flat,
            shortcuts,
            frequencies,
            context,
            scheme,
        }
    }

    pub fn load(paths: &DataPaths) -> DwResult<Self> {
        let scheme = paths
            .key_groups
            .as_deref()
            .map(CodeScheme::parse)
            .transpose()?;

        let frequencies = load_frequencies(&paths.frequencies)?;
        let vocabulary = load_vocabulary(&paths.vocab, scheme.as_ref())?;
        if vocabulary.entries.is_empty() {
            return Err(DwellError::Validation(format!(
                "No usable vocabulary rows in {}",
                paths.vocab
            )));
        }
        let context = load_trigrams(&paths.trigrams)?;
        let shortcuts = match &paths.shortcuts {
            Some(path) => Some(load_shortcuts(path)?),
            None => None,
        };

        let dataset = Self::from_parts(vocabulary.entries, frequencies, context, shortcuts, scheme);
        info!(
            "📚 Dataset ready: {} words in {} trie nodes, {} frequencies, {} trigrams, {} shortcuts",
            dataset.index.word_count(),
            dataset.index.node_count(),
            dataset.frequencies.len(),
            dataset.context.len(),
            dataset.shortcuts.len()
        );
        Ok(dataset)
    }

    pub fn resolver(&self, params: ResolverParams) -> CandidateResolver<'_> {
        CandidateResolver::new(
            &self.index,
            &self.flat,
            &self.shortcuts,
            &self.frequencies,
            &self.context,
            params,
        )
    }

    /// Maps typed letters onto the code alphabet. Without a scheme the
    /// letters already are the code; unmapped letters are dropped.
    pub fn encode_input(&self, typed: &str) -> String {
        match &self.scheme {
            Some(scheme) => typed.chars().filter_map(|c| scheme.symbol_for(c)).collect(),
            None => typed.to_string(),
        }
    }
}
