pub mod flat;
pub mod frequency;
pub mod scheme;
pub mod shortcut;
pub mod trie;

pub use self::flat::FlatCodeMap;
pub use self::frequency::FrequencyTable;
pub use self::scheme::CodeScheme;
pub use self::shortcut::SingleSymbolTable;
pub use self::trie::VocabularyIndex;
