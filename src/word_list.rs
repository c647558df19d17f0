use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Read the words of a list file.
///
/// A `.json` file holds an object whose keys are the words (values, usually
/// definitions, are ignored). Anything else is read as one word per line.
pub fn read_words(path: &Path) -> io::Result<Vec<String>> {
    let file = BufReader::new(File::open(path)?);
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => parse_json(file),
        _ => parse_lines(file),
    }
}

pub fn parse_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut words = vec![];
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

pub fn parse_json(reader: impl Read) -> io::Result<Vec<String>> {
    let entries: BTreeMap<String, serde::de::IgnoredAny> = serde_json::from_reader(reader)?;
    Ok(entries.into_iter().map(|(word, _)| word).collect())
}


#[test]
fn test_lines() {
    let words = parse_lines(&b"cat\n  dog \n\nbird\r\n"[..]).unwrap();
    assert_eq!(words, vec!["cat", "dog", "bird"]);
}

#[test]
fn test_json() {
    let text = r#"{"zebra": "a striped animal", "cat": "a small feline", "at": {"pos": "preposition"}}"#;
    let words = parse_json(text.as_bytes()).unwrap();
    assert_eq!(words, vec!["at", "cat", "zebra"]);

    let err = parse_json(&b"[\"cat\"]"[..]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
