use std::time::Instant;

use fst::{Map, Set, Streamer};
use dashmap::DashMap;
use rayon::prelude::*;

use super::{Letter, LetterSet};

/// The words that can be played, and the letters found around each of their substrings
pub struct Dictionary {
    words: Set<Vec<u8>>,
    /// For every substring of every word, the union of the letters of all the
    /// words containing it. Used to give up on a partial word as soon as the
    /// hand cannot possibly grow it into a word.
    ///
    /// This over-approximates: a letter being there does not mean a word can
    /// actually be completed with it.
    contains: Map<Vec<u8>>,
}

impl Dictionary {
    /// Build the dictionary and its substring index from a list of words.
    ///
    /// Words are trimmed and lowercased, the ones with anything else than
    /// `a-z` in them are skipped.
    pub fn build<I, S>(words: I) -> Result<Dictionary, fst::Error>
    where
        I: IntoIterator<Item=S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut words = words.into_iter().filter_map(|w| {
            let normalized = normalize(w.as_ref());
            if normalized.is_none() {
                log::warn!("skipping {:?}, it is not only made of letters", w.as_ref());
            }
            normalized
        }).collect::<Vec<_>>();
        words.par_sort_unstable();
        words.dedup();
        log::info!("{} words sorted in {:?}", words.len(), Instant::now() - start);

        let start = Instant::now();
        let index: DashMap<Vec<u8>, u32> = DashMap::new();
        words.par_iter().for_each(|word| {
            let word = word.as_bytes();
            let letters = word.iter().map(|&b| Letter(b)).collect::<LetterSet>();
            for len in 1..=word.len() {
                for begin in 0..=(word.len() - len) {
                    let mut entry = index.entry(word[begin..begin + len].to_vec()).or_insert(0);
                    *entry.value_mut() |= letters.bits();
                }
            }
        });
        let mut substrings = index.iter()
            .map(|entry| (entry.key().clone(), *entry.value() as u64))
            .collect::<Vec<_>>();
        substrings.par_sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        log::info!("{} substrings indexed in {:?}", substrings.len(), Instant::now() - start);

        Ok(Dictionary {
            words: Set::from_iter(words)?,
            contains: Map::from_iter(substrings)?,
        })
    }

    /// Rebuild the substring index around a precompiled set of words
    pub fn from_set(set: &Set<impl AsRef<[u8]>>) -> Result<Dictionary, fst::Error> {
        let mut words = Vec::with_capacity(set.len());
        let mut stream = set.stream();
        while let Some(word) = stream.next() {
            words.push(String::from_utf8_lossy(word).into_owned());
        }
        Self::build(words)
    }

    pub fn is_word(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }

    /// The letters of the words that contain `substring`, `None` if no word does
    pub fn contains(&self, substring: &[u8]) -> Option<LetterSet> {
        self.contains.get(substring).map(|bits| LetterSet::from_bits(bits as u32))
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The word trimmed and in lowercase, `None` if it has anything else than letters
pub fn normalize(word: &str) -> Option<String> {
    let word = word.trim().to_lowercase();
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase()) {
        Some(word)
    } else {
        None
    }
}


#[cfg(test)]
fn letters(s: &str) -> LetterSet {
    s.bytes().map(Letter).collect()
}

#[test]
fn test_substrings_cover_their_words() {
    let words = ["cat", "at", "cats", "ca", "tacos"];
    let dict = Dictionary::build(words.iter()).unwrap();

    for word in &words {
        let word = word.as_bytes();
        for len in 1..=word.len() {
            for begin in 0..=(word.len() - len) {
                let mask = dict.contains(&word[begin..begin + len]).expect("substring indexed");
                for &l in word {
                    assert!(mask.contains(Letter(l)));
                }
            }
        }
    }

    // "at" is in cat and cats, "ta" only in tacos
    assert_eq!(dict.contains(b"at"), Some(letters("cats")));
    assert_eq!(dict.contains(b"ta"), Some(letters("tacos")));
    assert_eq!(dict.contains(b"ts"), Some(letters("cats")));
    assert_eq!(dict.contains(b"co"), Some(letters("tacos")));
    assert_eq!(dict.contains(b"tc"), None);
}

#[test]
fn test_words() {
    let dict = Dictionary::build(vec!["Cat ", "at", "at", "c4t", "", "ca"]).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(dict.is_word(b"cat"));
    assert!(dict.is_word(b"ca"));
    assert!(!dict.is_word(b"c4t"));
    // substrings are not words
    assert!(!dict.is_word(b"t"));
    assert!(dict.contains(b"t").is_some());
}

#[test]
fn test_empty() {
    let dict = Dictionary::build(Vec::<String>::new()).unwrap();
    assert!(dict.is_empty());
    assert_eq!(dict.contains(b"a"), None);
    assert!(!dict.is_word(b""));
}

#[test]
fn test_from_set() {
    let set = Set::from_iter(vec!["at", "cat"]).unwrap();
    let dict = Dictionary::from_set(&set).unwrap();
    assert!(dict.is_word(b"cat"));
    assert_eq!(dict.contains(b"a"), Some(letters("act")));
}
