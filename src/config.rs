use crate::error::{DwResult, DwellError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

/// How the resolver obtains base candidates for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Prefix lookup over the trie (plus the single-symbol shortcut).
    #[default]
    Tree,
    /// Exact lookup over the flat code map.
    Flat,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverParams {
    /// Cap for the empty-context list and the context-reranked list.
    #[arg(long, default_value_t = 5)]
    pub top_k: usize,

    /// Base candidates kept when context and base candidates do not intersect.
    #[arg(long, default_value_t = 15)]
    pub fallback_limit: usize,

    #[arg(long, default_value_t = 500)]
    pub continuation_limit: usize,

    #[arg(long, default_value = "tree")]
    pub mode: LookupMode,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            top_k: 5,
            fallback_limit: 15,
            continuation_limit: 500,
            mode: LookupMode::Tree,
        }
    }
}

impl ResolverParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DwResult<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> DwResult<()> {
        if self.top_k == 0 {
            return Err(DwellError::Config("top_k must be at least 1".to_string()));
        }
        if self.fallback_limit == 0 {
            return Err(DwellError::Config(
                "fallback_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays flags the user actually typed; defaults never clobber file values.
    pub fn merge_from_cli(&mut self, cli_params: &ResolverParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field.clone();
                }
            };
        }

        update_if_present!(top_k);
        update_if_present!(fallback_limit);
        update_if_present!(continuation_limit);
        update_if_present!(mode);
    }
}

#[derive(Args, Debug, Clone)]
pub struct DataPaths {
    #[arg(global = true, long, default_value = "data/vocab.tsv")]
    pub vocab: String,

    #[arg(global = true, long, default_value = "data/frequencies.tsv")]
    pub frequencies: String,

    #[arg(global = true, long, default_value = "data/trigrams.tsv")]
    pub trigrams: String,

    /// Precomputed single-symbol table; derived from the vocabulary when omitted.
    #[arg(global = true, long)]
    pub shortcuts: Option<String>,

    /// Comma separated key groups, e.g. "abc,def,ghi". Enables word-only vocabulary rows.
    #[arg(global = true, long)]
    pub key_groups: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SessionParams {
    /// Number of confirmed words kept as context.
    #[arg(long, default_value_t = 2)]
    pub context_window: usize,

    /// External reranker command (reads JSON on stdin, prints a JSON array).
    #[arg(long)]
    pub rerank_cmd: Option<String>,

    #[arg(long, default_value_t = 300)]
    pub rerank_timeout_ms: u64,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            context_window: 2,
            rerank_cmd: None,
            rerank_timeout_ms: 300,
        }
    }
}
