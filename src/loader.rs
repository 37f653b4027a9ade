use crate::context::ContextModel;
use crate::error::DwResult;
use crate::lexicon::{CodeScheme, FrequencyTable, SingleSymbolTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub struct RawVocabulary {
    /// `(code, word)` pairs in file order.
    pub entries: Vec<(String, String)>,
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader)
}

pub fn load_vocabulary<P: AsRef<Path>>(
    path: P,
    scheme: Option<&CodeScheme>,
) -> DwResult<RawVocabulary> {
    debug!("Loading vocabulary from: {:?}", path.as_ref());
    let file = File::open(path)?;
    load_vocabulary_from_reader(file, scheme)
}

/// Rows are `code<TAB>word`. A bare `word` row is encoded with `scheme`
/// and skipped when there is no scheme or the word falls outside it.
pub fn load_vocabulary_from_reader<R: Read>(
    reader: R,
    scheme: Option<&CodeScheme>,
) -> DwResult<RawVocabulary> {
    let mut rdr = tsv_reader(reader);
    let mut entries = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let Ok(rec) = result else {
            skipped += 1;
            continue;
        };
        let first = rec.get(0).map(str::trim).unwrap_or("");
        let second = rec.get(1).map(str::trim).unwrap_or("");

        let pair = match (first.is_empty(), second.is_empty()) {
            (false, false) => Some((first.to_string(), second.to_string())),
            (false, true) => scheme
                .and_then(|s| s.encode(first))
                .map(|code| (code, first.to_string())),
            _ => None,
        };

        match pair {
            Some(p) => entries.push(p),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unusable vocabulary rows", skipped);
    }
    debug!("   -> Loaded {} vocabulary entries", entries.len());
    Ok(RawVocabulary { entries })
}

pub fn load_frequencies<P: AsRef<Path>>(path: P) -> DwResult<FrequencyTable> {
    debug!("Loading frequencies from: {:?}", path.as_ref());
    let file = File::open(path)?;
    load_frequencies_from_reader(file)
}

pub fn load_frequencies_from_reader<R: Read>(reader: R) -> DwResult<FrequencyTable> {
    let mut rdr = tsv_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0;

    for rec in rdr.records().flatten() {
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        let word = rec[0].trim();
        match rec[1].trim().parse::<f64>() {
            Ok(score) if !word.is_empty() && score.is_finite() && score >= 0.0 => {
                rows.push((word.to_string(), score));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid frequency rows", skipped);
    }
    let table = FrequencyTable::from_entries(rows);
    debug!("   -> Loaded {} word frequencies", table.len());
    Ok(table)
}

pub fn load_trigrams<P: AsRef<Path>>(path: P) -> DwResult<ContextModel> {
    debug!("Loading trigrams from: {:?}", path.as_ref());
    let file = File::open(path)?;
    load_trigrams_from_reader(file)
}

/// Rows are `w1 w2 w3<TAB>count`; anything that is not three words is dropped.
pub fn load_trigrams_from_reader<R: Read>(reader: R) -> DwResult<ContextModel> {
    let mut rdr = tsv_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0;

    for rec in rdr.records().flatten() {
        if rec.len() < 2 || rec[0].split_whitespace().count() != 3 {
            skipped += 1;
            continue;
        }
        match rec[1].trim().parse::<u64>() {
            Ok(count) => rows.push((rec[0].to_string(), count)),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid trigram rows", skipped);
    }
    let model = ContextModel::from_counts(rows);
    debug!("   -> Loaded {} trigram keys", model.len());
    Ok(model)
}

pub fn load_shortcuts<P: AsRef<Path>>(path: P) -> DwResult<SingleSymbolTable> {
    debug!("Loading single-symbol table from: {:?}", path.as_ref());
    let file = File::open(path)?;
    load_shortcuts_from_reader(file)
}

/// Rows are `symbol<TAB>word1,word2,...`, words already in display order.
pub fn load_shortcuts_from_reader<R: Read>(reader: R) -> DwResult<SingleSymbolTable> {
    let mut rdr = tsv_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0;

    for rec in rdr.records().flatten() {
        let key = rec.get(0).map(str::trim).unwrap_or("");
        let mut symbols = key.chars();
        let (Some(symbol), None) = (symbols.next(), symbols.next()) else {
            skipped += 1;
            continue;
        };
        let words: Vec<String> = rec
            .get(1)
            .unwrap_or("")
            .split(',')
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        rows.push((symbol, words));
    }

    if skipped > 0 {
        warn!("Skipped {} invalid shortcut rows", skipped);
    }
    Ok(SingleSymbolTable::from_entries(rows))
}
