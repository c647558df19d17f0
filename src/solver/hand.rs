use std::fmt;
use std::str::FromStr;

use super::{Letter, LetterSet};
use crate::ALPHABET_SIZE;

/// The tiles held by the player
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Hand {
    letters: [u8; ALPHABET_SIZE],
    /// The total number of tiles left
    n_total: u32,
}

impl Hand {
    pub fn new(letters: [u8; ALPHABET_SIZE]) -> Hand {
        let n_total = letters.iter().map(|&i| i as u32).sum::<u32>();
        Hand {
            letters,
            n_total,
        }
    }

    pub fn count(&self, letter: Letter) -> u8 {
        self.letters[letter.index()]
    }

    pub fn len(&self) -> usize {
        self.n_total as usize
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    /// The letters held at least once
    pub fn letters(&self) -> LetterSet {
        (0..ALPHABET_SIZE)
            .filter(|&i| self.letters[i] > 0)
            .map(Letter::from_index)
            .collect()
    }

    /// A copy of the hand with one `letter` less, unchanged if there is none
    pub fn remove(&self, letter: Letter) -> Hand {
        let mut tmp = self.clone();
        if tmp.letters[letter.index()] > 0 {
            tmp.letters[letter.index()] -= 1;
            tmp.n_total -= 1;
        }
        tmp
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    InvalidLetter(char),
    TooManyTiles(Letter),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HandError::InvalidLetter(c) => write!(f, "hand contains {:?}, which is not a letter", c),
            HandError::TooManyTiles(l) => write!(f, "hand holds more than {} tiles of letter {}", u8::MAX, l),
        }
    }
}

impl std::error::Error for HandError {}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Hand, HandError> {
        let mut letters = [0u8; ALPHABET_SIZE];
        for c in s.trim().chars() {
            let letter = Some(c)
                .filter(char::is_ascii)
                .and_then(|c| Letter::from_byte(c as u8))
                .ok_or(HandError::InvalidLetter(c))?;
            let slot = &mut letters[letter.index()];
            *slot = slot.checked_add(1).ok_or(HandError::TooManyTiles(letter))?;
        }
        Ok(Hand::new(letters))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..ALPHABET_SIZE {
            for _ in 0..self.letters[i] {
                write!(f, "{}", Letter::from_index(i))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{} letters]", self, self.n_total)
    }
}


#[test]
fn test_parse() {
    let hand: Hand = "baNana".parse().unwrap();
    assert_eq!(hand.len(), 6);
    assert_eq!(hand.count(Letter(b'a')), 3);
    assert_eq!(hand.count(Letter(b'n')), 2);
    assert_eq!(hand.to_string(), "aaabnn");
    assert_eq!(hand.letters(), b"abn".iter().map(|&l| Letter(l)).collect::<LetterSet>());

    assert_eq!("ab1".parse::<Hand>(), Err(HandError::InvalidLetter('1')));
    assert_eq!("é".parse::<Hand>(), Err(HandError::InvalidLetter('é')));
    assert!("".parse::<Hand>().unwrap().is_empty());
}

#[test]
fn test_remove() {
    let hand: Hand = "cat".parse().unwrap();
    let after = hand.remove(Letter(b'c'));
    assert_eq!(after.to_string(), "at");
    assert_eq!(hand.to_string(), "act");
    assert!(!after.letters().contains(Letter(b'c')));

    // nothing to remove
    assert_eq!(after.remove(Letter(b'c')), after);
    assert!(after.remove(Letter(b'a')).remove(Letter(b't')).is_empty());
}
