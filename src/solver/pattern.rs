use typed_arena::Arena;

use super::{Dictionary, Hand, LetterSet};
use crate::board::BLANK;

/// A word found on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    /// The whole word, letters already on the line included
    pub word: String,
    /// Offset of the first letter of the word on the line
    pub start: usize,
    /// The hand once the blanks of the word have been filled
    pub remaining: Hand,
}

/// A partially filled line waiting to be grown
struct Attempt<'a> {
    pattern: &'a mut [u8],
    hand: Hand,
    /// Letters worth trying: held in the hand, and not ruled out by the dictionary
    letters: LetterSet,
    /// Blanks after the anchor that are still to fill, nearest first
    ahead: &'a [usize],
    /// Blanks before the anchor that are still to fill, nearest first
    behind: &'a [usize],
}

/// Find all the words that can be made on `line` by filling the blanks
/// nearest to `anchor` with letters from `hand`.
///
/// The line is grown outward one blank at a time, on each side of the anchor
/// independently. A word always spans from the blank before it to the blank
/// after it, so it contains every letter already on the line in between.
///
/// The same word can be returned more than once when it is reachable by
/// growing both sides in a different order.
pub fn match_pattern(line: &[u8], hand: &Hand, anchor: usize, dictionary: &Dictionary) -> Vec<WordMatch> {
    let mut found = vec![];

    let ahead = (anchor.saturating_add(1)..line.len())
        .filter(|&i| line[i] == BLANK)
        .collect::<Vec<_>>();
    let behind = (0..anchor.min(line.len()))
        .rev()
        .filter(|&i| line[i] == BLANK)
        .collect::<Vec<_>>();

    // Buffers live until the end of the match, one line per attempt pushed.
    let arena = Arena::new();
    let mut attempts = vec![Attempt {
        pattern: arena.alloc_extend(line.iter().copied()),
        hand: hand.clone(),
        letters: hand.letters(),
        ahead: &ahead[..],
        behind: &behind[..],
    }];

    while let Some(Attempt { pattern, hand, letters, ahead, behind }) = attempts.pop() {
        for letter in letters.iter() {
            let next_hand = hand.remove(letter);
            let mut next_letters = letters;
            if next_hand.count(letter) == 0 {
                next_letters.remove(letter);
            }

            if let Some(&gap) = ahead.first() {
                let start = behind.first().map_or(0, |&g| g + 1);
                let end = ahead.get(1).copied().unwrap_or(pattern.len());
                pattern[gap] = letter.0;
                if let Some(letters) = check_span(&pattern[start..end], start, &next_hand, next_letters, dictionary, &mut found) {
                    attempts.push(Attempt {
                        pattern: arena.alloc_extend(pattern.iter().copied()),
                        hand: next_hand.clone(),
                        letters,
                        ahead: &ahead[1..],
                        behind,
                    });
                }
                pattern[gap] = BLANK;
            }

            if let Some(&gap) = behind.first() {
                let start = behind.get(1).map_or(0, |&g| g + 1);
                let end = ahead.first().copied().unwrap_or(pattern.len());
                pattern[gap] = letter.0;
                if let Some(letters) = check_span(&pattern[start..end], start, &next_hand, next_letters, dictionary, &mut found) {
                    // once grown backward, the blank ahead closes the word for good
                    attempts.push(Attempt {
                        pattern: arena.alloc_extend(pattern[..end].iter().copied()),
                        hand: next_hand,
                        letters,
                        ahead: &[],
                        behind: &behind[1..],
                    });
                }
                pattern[gap] = BLANK;
            }
        }
    }

    found
}

/// Record `span` if it is a word, and give the letters that may still grow it
fn check_span(
    span: &[u8], start: usize,
    hand: &Hand, letters: LetterSet,
    dictionary: &Dictionary,
    found: &mut Vec<WordMatch>,
) -> Option<LetterSet> {
    if dictionary.is_word(span) {
        found.push(WordMatch {
            word: span.iter().map(|&b| b as char).collect(),
            start,
            remaining: hand.clone(),
        });
    }
    let letters = letters.intersection(dictionary.contains(span)?);
    if letters.is_empty() {
        None
    } else {
        Some(letters)
    }
}


#[cfg(test)]
fn find(words: &[&str], line: &str, hand: &str, anchor: usize) -> Vec<(String, usize, String)> {
    let dict = Dictionary::build(words.iter()).unwrap();
    let hand: Hand = hand.parse().unwrap();
    match_pattern(line.as_bytes(), &hand, anchor, &dict)
        .into_iter()
        .map(|m| (m.word, m.start, m.remaining.to_string()))
        .collect()
}

#[test]
fn test_fill_before_anchor() {
    assert_eq!(
        find(&["cat", "at", "cats", "ca"], "_at", "c", 1),
        vec![("cat".to_string(), 0, "".to_string())],
    );
}

#[test]
fn test_grow_both_sides() {
    let found = find(&["cat", "at", "cats", "ca"], "_at__", "cs", 1);
    assert_eq!(found, vec![
        ("cat".to_string(), 0, "s".to_string()),
        ("cats".to_string(), 0, "".to_string()),
    ]);
}

#[test]
fn test_join_existing_letters() {
    assert_eq!(
        find(&["bats"], "ba_s", "t", 0),
        vec![("bats".to_string(), 0, "".to_string())],
    );
    // a blank further away is never filled before the nearest one
    assert_eq!(find(&["bats"], "b__s", "t", 0), vec![]);
}

#[test]
fn test_prune_without_letters() {
    // "cat" is part of "cats" but the hand has no "s" left to get there
    assert_eq!(find(&["cats"], "_at__", "c", 1), vec![]);
    assert_eq!(find(&["cats"], "_at__", "cz", 1), vec![]);
}

#[test]
fn test_no_blank() {
    assert_eq!(find(&["cat"], "cat", "abc", 0), vec![]);
    assert_eq!(find(&["cat"], "cat", "", 0), vec![]);
}
