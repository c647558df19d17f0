use super::Letter;
use crate::ALPHABET_SIZE;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    // bit i is one if the i-th letter of the alphabet is in it
    bits: u32,
}

impl LetterSet {
    pub fn empty() -> Self {
        Self { bits: 0 }
    }
    pub fn from_bits(bits: u32) -> Self {
        Self { bits: bits & Self::ALPHABET.bits }
    }
    pub fn bits(&self) -> u32 {
        self.bits
    }
    pub fn contains(&self, letter: Letter) -> bool {
        self.bits & (1 << letter.index()) != 0
    }
    pub fn insert(&mut self, letter: Letter) {
        self.bits |= 1 << letter.index()
    }
    pub fn remove(&mut self, letter: Letter) {
        self.bits &= !(1 << letter.index())
    }
    pub fn union(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits }
    }
    pub fn intersection(self, other: Self) -> Self {
        Self { bits: self.bits & other.bits }
    }
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// The letters of the set, in alphabetical order
    pub fn iter(self) -> impl Iterator<Item=Letter> {
        (0..ALPHABET_SIZE)
            .filter(move |&i| self.bits & (1 << i) != 0)
            .map(Letter::from_index)
    }

    pub const ALPHABET: Self = Self { bits: (1 << ALPHABET_SIZE) - 1 };
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<Letter> for LetterSet {
   fn from_iter<T>(iter: T) -> Self where T: IntoIterator<Item=Letter> {
       let mut tmp = Self::default();
       iter.into_iter().for_each(|l| tmp.insert(l));
       tmp
    }
}

use std::fmt;

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == Self::ALPHABET {
            write!(f, ".")
        } else {
            write!(f, "[")?;
            for l in self.iter() {
                write!(f, "{}", l)?;
            }
            write!(f, "]")
        }
    }
}


#[test]
fn letter_set() {
    let empty = LetterSet::empty();
    for l in b'a'..=b'z' {
        assert_eq!(empty.contains(Letter(l)), false);
    }
    assert!(empty.is_empty());

    let some = b"gqffz";
    let not_empty: LetterSet = some.iter().map(|&i| Letter(i)).collect();
    for &i in some {
        assert!(not_empty.contains(Letter(i)));
    }
    for l in b'a'..=b'z' {
        if some.iter().any(|&i| i == l) {
            continue
        }
        assert_eq!(not_empty.contains(Letter(l)), false);
    }
    assert_eq!(not_empty.len(), 4);
    assert_eq!(format!("{:?}", not_empty), "[fgqz]");

    let mut fewer = not_empty;
    fewer.remove(Letter(b'q'));
    assert!(!fewer.contains(Letter(b'q')));
    assert_eq!(fewer.intersection(not_empty), fewer);
    assert_eq!(fewer.union(not_empty), not_empty);

    assert_eq!(LetterSet::ALPHABET.len(), 26);
    assert_eq!(LetterSet::from_bits(u32::MAX), LetterSet::ALPHABET);
    assert_eq!(format!("{:?}", LetterSet::ALPHABET), ".");
}
