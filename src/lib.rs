
pub mod board;
pub mod solver;
pub mod word_list;

use std::fmt;

pub use board::{Board, FormatError, Owner, Square, Table};
pub use solver::{Search, Solver};
pub use solver::dictionary::Dictionary;
pub use solver::hand::{Hand, HandError};
pub use solver::letter_set::LetterSet;

/// Number of letters in the alphabet the game is played with
pub const ALPHABET_SIZE: usize = 26;

// only lowercase ascii letters are represented, uppercase input is folded
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(pub u8);

impl Letter {
    pub fn from_byte(byte: u8) -> Option<Letter> {
        if byte.is_ascii_alphabetic() {
            Some(Letter(byte.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Rank in the alphabet, 0 for `a`
    pub fn index(self) -> usize {
        (self.0 - b'a') as usize
    }

    pub fn from_index(index: usize) -> Letter {
        debug_assert!(index < ALPHABET_SIZE);
        Letter(b'a' + index as u8)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
         write!(f, "{}", (self.0 as char).escape_default())
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
         write!(f, "{}", self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn perp(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// A cell of the board, `x` is the column and `y` the row
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;
    /// The coordinate that changes in that direction
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Vertical => &self.y,
            Direction::Horizontal => &self.x,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    /// The coordinate that changes in that direction
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Vertical => &mut self.y,
            Direction::Horizontal => &mut self.x,
        }
    }
}

/// A position together with the direction we are walking in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Placement(pub Position, pub Direction);

impl Placement {
    pub fn next(mut self) -> Self {
        self.0[self.1] = self.0[self.1].saturating_add(1);
        self
    }

    /// Stepping back from the first row/column wraps around to a position
    /// that is outside of any board, so lookups there find nothing
    pub fn back(mut self) -> Self {
        self.0[self.1] = self.0[self.1].wrapping_sub(1);
        self
    }

    pub fn advance(mut self, steps: usize) -> Self {
        self.0[self.1] = self.0[self.1].saturating_add(steps);
        self
    }

    /// A placement at the same position, but different direction
    pub fn perp(self) -> Self {
        Self(self.0, self.1.perp())
    }
}

/// Where a word lies on the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WordPosition {
    pub placement: Placement,
    pub length: usize,
}

impl WordPosition {
    pub fn origin(&self) -> Position {
        self.placement.0
    }

    pub fn direction(&self) -> Direction {
        self.placement.1
    }

    pub fn is_horizontal(&self) -> bool {
        self.direction() == Direction::Horizontal
    }

    pub fn cells(&self) -> impl Iterator<Item=Position> {
        let placement = self.placement;
        (0..self.length).map(move |i| placement.advance(i).0)
    }
}

/// A word laid on the board by the player
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordMove {
    /// First cell of the word, and the direction it is read in
    pub placement: Placement,
    /// The whole span between the surrounding blanks, letters already on the board included
    pub word: String,
    /// What is left in the hand once the word is played
    pub hand_after: Hand,
    /// Whether the word touches (or overwrites) a tile of an opponent
    pub kill: bool,
}

impl WordMove {
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn position(&self) -> WordPosition {
        WordPosition {
            placement: self.placement,
            length: self.word.len(),
        }
    }
}

impl fmt::Display for WordMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arrow = match self.placement.1 {
            Direction::Horizontal => "→",
            Direction::Vertical => "↓",
        };
        write!(f, "{}{}{}", arrow, self.placement.0, self.word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// Clears every unowned tile around the player's word
    Bomb,
    Word(WordMove),
}

impl Move {
    pub fn word(&self) -> Option<&WordMove> {
        match self {
            Move::Word(word) => Some(word),
            Move::Bomb => None,
        }
    }

    pub fn is_kill(&self) -> bool {
        self.word().map_or(false, |word| word.kill)
    }

    /// Whether the hand is empty after this move, a bomb never empties it
    pub fn empties_hand(&self) -> bool {
        self.word().map_or(false, |word| word.hand_after.is_empty())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Bomb => write!(f, "BOOM"),
            Move::Word(word) => word.fmt(f),
        }
    }
}

/// The moves leading from the initial board to a terminal state, in order
pub type MoveChain = Vec<Move>;


#[test]
fn test_placement_walk() {
    let start = Placement(Position::new(2, 5), Direction::Horizontal);

    assert_eq!(start.next().0, Position::new(3, 5));
    assert_eq!(start.back().0, Position::new(1, 5));
    assert_eq!(start.advance(4).0, Position::new(6, 5));
    assert_eq!(start.perp().next().0, Position::new(2, 6));

    let corner = Placement(Position::new(0, 0), Direction::Vertical);
    assert_eq!(corner.back().0.y, usize::MAX);
    // once off the board, stepping forward stays off it
    assert_eq!(corner.back().next().0.y, usize::MAX);
}

#[test]
fn test_word_position_cells() {
    let vertical = WordPosition {
        placement: Placement(Position::new(4, 1), Direction::Vertical),
        length: 3,
    };
    assert_eq!(
        vertical.cells().collect::<Vec<_>>(),
        vec![Position::new(4, 1), Position::new(4, 2), Position::new(4, 3)],
    );
    assert!(!vertical.is_horizontal());
}

#[test]
fn test_move_display() {
    let word = WordMove {
        placement: Placement(Position::new(0, 3), Direction::Horizontal),
        word: "cat".to_string(),
        hand_after: Hand::default(),
        kill: false,
    };
    assert_eq!(Move::Word(word.clone()).to_string(), "→(0, 3)cat");
    assert_eq!(Move::Bomb.to_string(), "BOOM");
    assert!(Move::Word(word).empties_hand());
    assert!(!Move::Bomb.empties_hand());
}
