use dwellword::lexicon::CodeScheme;
use dwellword::loader::{
    load_frequencies, load_frequencies_from_reader, load_shortcuts_from_reader, load_trigrams,
    load_trigrams_from_reader, load_vocabulary, load_vocabulary_from_reader,
};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

// --- VOCABULARY ---

#[test]
fn test_vocabulary_parses_code_word_rows() {
    let data = "a\tapple\nab\tabout\n";
    let raw = load_vocabulary_from_reader(Cursor::new(data), None).unwrap();
    assert_eq!(
        raw.entries,
        vec![
            ("a".to_string(), "apple".to_string()),
            ("ab".to_string(), "about".to_string())
        ]
    );
}

#[test]
fn test_vocabulary_trims_and_skips_bad_rows() {
    let data = " a \t apple \n\t\norphan\n\tnocode\n";
    let raw = load_vocabulary_from_reader(Cursor::new(data), None).unwrap();
    assert_eq!(raw.entries.len(), 1);
    assert_eq!(raw.entries[0], ("a".to_string(), "apple".to_string()));
}

#[test]
fn test_vocabulary_encodes_bare_words_with_scheme() {
    let scheme = CodeScheme::parse("abc,def,ghi,jkl,mno,pqrs,tuv,wxyz").unwrap();
    let data = "bad\ngood\nhi!\nzz\tbuzz\n";
    let raw = load_vocabulary_from_reader(Cursor::new(data), Some(&scheme)).unwrap();
    assert_eq!(
        raw.entries,
        vec![
            ("aad".to_string(), "bad".to_string()),
            ("gmmd".to_string(), "good".to_string()),
            ("zz".to_string(), "buzz".to_string()),
        ]
    );
}

#[test]
fn test_vocabulary_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "th\tthe").unwrap();
    writeln!(file, "th\tthy").unwrap();
    let raw = load_vocabulary(file.path(), None).unwrap();
    assert_eq!(raw.entries.len(), 2);
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(load_vocabulary("/definitely/not/here.tsv", None).is_err());
    assert!(load_frequencies("/definitely/not/here.tsv").is_err());
    assert!(load_trigrams("/definitely/not/here.tsv").is_err());
}

// --- FREQUENCIES ---

#[test]
fn test_frequencies_parse_and_reject_invalid_scores() {
    let data = "apple\t50\nant\t12.5\nbad\t-3\nworse\tNaN\nword\tabc\nlonely\n";
    let table = load_frequencies_from_reader(Cursor::new(data)).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.score_of("apple"), 50.0);
    assert_eq!(table.score_of("ant"), 12.5);
    assert_eq!(table.score_of("bad"), 0.0);
}

#[test]
fn test_frequencies_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "the\t1000").unwrap();
    writeln!(file, "the\t5").unwrap();
    let table = load_frequencies(file.path()).unwrap();
    assert_eq!(table.score_of("the"), 1005.0);
}

// --- TRIGRAMS ---

#[test]
fn test_trigrams_require_three_words() {
    let data = "the red apple\t9\nThe Red Ant\t2\ntoo short\t4\none two three four\t1\nx y z\tmany\n";
    let model = load_trigrams_from_reader(Cursor::new(data)).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.count_of("the red ant"), 2);
    assert_eq!(model.continuations_for(&["the", "red"]), ["apple", "ant"]);
}

// --- SHORTCUTS ---

#[test]
fn test_shortcuts_parse_symbol_rows() {
    let data = "a\tapple, ant ,,art\nab\tnope\nb\t\n";
    let table = load_shortcuts_from_reader(Cursor::new(data)).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get('a').unwrap(), ["apple", "ant", "art"]);
    assert!(table.get('b').unwrap().is_empty());
    assert!(table.get('c').is_none());
}
