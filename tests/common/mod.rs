#![allow(dead_code)] // Not every test binary uses every fixture.

use dwellword::config::ResolverParams;
use dwellword::context::ContextModel;
use dwellword::lexicon::FrequencyTable;
use dwellword::Dataset;

pub fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(c, w)| (c.to_string(), w.to_string()))
        .collect()
}

pub fn freqs(entries: &[(&str, f64)]) -> FrequencyTable {
    FrequencyTable::from_entries(entries.iter().map(|(w, f)| (w.to_string(), *f)))
}

pub fn trigrams(entries: &[(&str, u64)]) -> ContextModel {
    ContextModel::from_counts(entries.iter().map(|(k, c)| (k.to_string(), *c)))
}

/// Code "a" -> apple, ant, art (in that frequency order).
pub fn orchard(context: ContextModel) -> Dataset {
    Dataset::from_parts(
        pairs(&[("a", "ant"), ("a", "apple"), ("a", "art")]),
        freqs(&[("apple", 50.0), ("ant", 30.0), ("art", 20.0)]),
        context,
        None,
        None,
    )
}

/// A small multi-level vocabulary.
///
///   ca  -> cat, cab          cr -> car, cry
///   crt -> cart, curt        d  -> do
///   dg  -> dog, dig          tw -> two, to, up      twr -> tower
pub fn garage() -> Dataset {
    Dataset::from_parts(
        pairs(&[
            ("ca", "cat"),
            ("ca", "cab"),
            ("cr", "car"),
            ("cr", "cry"),
            ("crt", "cart"),
            ("crt", "curt"),
            ("d", "do"),
            ("dg", "dog"),
            ("dg", "dig"),
            ("tw", "to"),
            ("tw", "two"),
            ("tw", "up"),
            ("twr", "tower"),
        ]),
        freqs(&[
            ("cat", 40.0),
            ("cab", 5.0),
            ("car", 60.0),
            ("cry", 10.0),
            ("cart", 25.0),
            ("curt", 2.0),
            ("do", 90.0),
            ("dog", 30.0),
            ("dig", 8.0),
            ("two", 50.0),
            ("to", 40.0),
            ("up", 5.0),
            ("tower", 30.0),
        ]),
        trigrams(&[
            ("the old cart", 7),
            ("the old car", 5),
            ("old cab driver", 4),
            ("old cart wheel", 3),
            ("i have two", 10),
            ("i have tower", 1),
            ("walk to school", 9),
            ("hot dog stand", 6),
        ]),
        None,
        None,
    )
}

pub fn params() -> ResolverParams {
    ResolverParams::default()
}

pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}
