use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{Direction, Letter, Placement, Position, WordMove, WordPosition};

/// How an empty cell is written in board text and in scanned lines
pub const BLANK: u8 = b'_';

// The area cleared by a bomb, relative to the origin of the player's word.
// Ranges are half open, and stretched along the word by its length.
const BOMB_LEFT: usize = 3;
const BOMB_RIGHT: usize = 4;
const BOMB_UP: usize = 2;
const BOMB_DOWN: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    Filled(Letter),
}

impl Square {
    pub fn letter(&self) -> Option<Letter> {
        match self {
            Square::Filled(letter) => Some(*letter),
            Square::Empty => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Square::Filled(letter) => letter.0,
            Square::Empty => BLANK,
        }
    }
}

/// Who placed the tile of a cell: 0 is nobody, 1 the current player, and
/// anything above identifies another player
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Owner(pub u8);

impl Owner {
    pub const NONE: Owner = Owner(0);
    pub const PLAYER: Owner = Owner(1);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
    pub fn is_opponent(self) -> bool {
        self.0 > Self::PLAYER.0
    }
}

/// A row-major grid, whose cells are only copied when a clone is modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    width: usize,
    height: usize,
    cells: Arc<Vec<T>>,
}

impl<T> Table<T> {
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(cells.len(), width * height, "cells do not fill a {}x{} table", width, height);
        Self {
            width,
            height,
            cells: Arc::new(cells),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn cells(&self) -> &[T] {
        &self.cells[..]
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        if pos.x < self.width && pos.y < self.height {
            self.cells.get(pos.x + pos.y * self.width)
        } else {
            None
        }
    }
    pub fn set(&mut self, pos: Position, val: T) where T: Clone {
        assert!(pos.x < self.width && pos.y < self.height, "{} is outside of the table", pos);
        Arc::make_mut(&mut self.cells)[pos.x + pos.y * self.width] = val
    }

    /// Whether both tables still use the same storage
    pub fn shares_cells_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    Empty,
    OddLineCount(usize),
    /// Line numbers start at 1
    RaggedLine { line: usize, expected: usize, found: usize },
    InvalidTile { x: usize, y: usize, found: char },
    InvalidOwner { x: usize, y: usize, found: char },
    OwnedBlank { x: usize, y: usize },
    NoPlayerWord,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::Empty => write!(f, "the board is empty"),
            FormatError::OddLineCount(n) => write!(
                f, "uneven number of lines ({}), expected as many letter lines as owner lines", n,
            ),
            FormatError::RaggedLine { line, expected, found } => write!(
                f, "line {} is {} characters long instead of {}", line, found, expected,
            ),
            FormatError::InvalidTile { x, y, found } => write!(
                f, "{:?} at ({}, {}) is neither a letter nor a blank ({})", found, x, y, BLANK as char,
            ),
            FormatError::InvalidOwner { x, y, found } => write!(
                f, "owner {:?} of ({}, {}) is not a digit", found, x, y,
            ),
            FormatError::OwnedBlank { x, y } => write!(f, "blank at ({}, {}) has an owner", x, y),
            FormatError::NoPlayerWord => write!(f, "no tile is owned by the player (1)"),
        }
    }
}

impl std::error::Error for FormatError {}

/// The grid of tiles, who owns them, and where the player's last word is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Table<Square>,
    owners: Table<Owner>,
    player: WordPosition,
}

impl Board {
    /// Read a board made of two blocks of lines of the same size: first the
    /// letters (with `_` for blanks), then the owner digit of each cell.
    ///
    /// The player's word starts at the smallest column and row of the cells
    /// owned by the player, and is horizontal if they are all on one row.
    pub fn load(text: &str) -> Result<Board, FormatError> {
        let lines = text.lines().map(|l| l.chars().collect::<Vec<_>>()).collect::<Vec<_>>();
        if lines.is_empty() {
            return Err(FormatError::Empty)
        }
        if lines.len() % 2 != 0 {
            return Err(FormatError::OddLineCount(lines.len()))
        }
        let width = lines[0].len();
        if let Some((i, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(FormatError::RaggedLine { line: i + 1, expected: width, found: line.len() })
        }
        if width == 0 {
            return Err(FormatError::Empty)
        }

        let height = lines.len() / 2;
        let (letter_lines, owner_lines) = lines.split_at(height);

        let mut tiles = Vec::with_capacity(width * height);
        let mut owners = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let c = letter_lines[y][x];
                let square = if c == BLANK as char {
                    Square::Empty
                } else {
                    Some(c)
                        .filter(char::is_ascii_alphabetic)
                        .and_then(|c| Letter::from_byte(c as u8))
                        .map(Square::Filled)
                        .ok_or(FormatError::InvalidTile { x, y, found: c })?
                };
                let o = owner_lines[y][x];
                let owner = o.to_digit(10)
                    .map(|d| Owner(d as u8))
                    .ok_or(FormatError::InvalidOwner { x, y, found: o })?;
                if square == Square::Empty && !owner.is_none() {
                    return Err(FormatError::OwnedBlank { x, y })
                }
                tiles.push(square);
                owners.push(owner);
            }
        }

        let owners = Table::from_cells(width, height, owners);
        let player = find_player(&owners).ok_or(FormatError::NoPlayerWord)?;
        log::debug!("loaded a {}x{} board, player word at {:?}", width, height, player);

        Ok(Board {
            tiles: Table::from_cells(width, height, tiles),
            owners,
            player,
        })
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }
    pub fn height(&self) -> usize {
        self.tiles.height()
    }
    pub fn tiles(&self) -> &Table<Square> {
        &self.tiles
    }
    pub fn owners(&self) -> &Table<Owner> {
        &self.owners
    }

    /// The player's last word, which the next word must be built from
    pub fn player(&self) -> WordPosition {
        self.player
    }

    pub fn letter(&self, pos: Position) -> Option<Letter> {
        self.tiles.get(pos).and_then(Square::letter)
    }
    pub fn owner(&self, pos: Position) -> Option<Owner> {
        self.owners.get(pos).copied()
    }

    /// The whole row (horizontal) or column (vertical) going through `through`,
    /// blanks written as `BLANK`
    pub fn line(&self, dir: Direction, through: Position) -> Vec<u8> {
        let mut start = through;
        start[dir] = 0;
        let mut head = Placement(start, dir);
        let mut line = Vec::with_capacity(self.width().max(self.height()));
        while let Some(square) = self.tiles.get(head.0) {
            line.push(square.to_byte());
            head = head.next();
        }
        line
    }

    /// The board after a bomb went off on the player's word: every tile
    /// around it that nobody owns is blown away
    pub fn bomb(&self) -> Board {
        let origin = self.player.origin();
        let stretch = self.player.length.saturating_sub(1);
        let (stretch_x, stretch_y) = match self.player.direction() {
            Direction::Horizontal => (stretch, 0),
            Direction::Vertical => (0, stretch),
        };
        let x_from = origin.x.saturating_sub(BOMB_LEFT);
        let x_to = (origin.x + BOMB_RIGHT + stretch_x).min(self.width());
        let y_from = origin.y.saturating_sub(BOMB_UP);
        let y_to = (origin.y + BOMB_DOWN + stretch_y).min(self.height());

        let mut tiles = self.tiles.clone();
        for y in y_from..y_to {
            for x in x_from..x_to {
                let pos = Position::new(x, y);
                if self.owner(pos) == Some(Owner::NONE) && self.letter(pos).is_some() {
                    tiles.set(pos, Square::Empty);
                }
            }
        }

        Board {
            tiles,
            owners: self.owners.clone(),
            player: self.player,
        }
    }

    /// The board after the player laid `play`: its letters belong to the
    /// player, and the previous word of the player belongs to nobody anymore
    pub fn place_word(&self, play: &WordMove) -> Board {
        let mut tiles = self.tiles.clone();
        let mut owners = self.owners.clone();
        let position = play.position();

        for (pos, byte) in position.cells().zip(play.word.bytes()) {
            tiles.set(pos, Square::Filled(Letter(byte)));
            owners.set(pos, Owner::PLAYER);
        }
        for pos in self.player.cells() {
            owners.set(pos, Owner::NONE);
        }

        Board {
            tiles,
            owners,
            player: position,
        }
    }
}

fn find_player(owners: &Table<Owner>) -> Option<WordPosition> {
    let mut cells = (0..owners.height())
        .flat_map(|y| (0..owners.width()).map(move |x| Position::new(x, y)))
        .filter(|&pos| owners.get(pos).map_or(false, |o| o.is_player()));

    let first = cells.next()?;
    let mut origin = first;
    let mut length = 1;
    let mut same_row = true;
    for pos in cells {
        origin.x = origin.x.min(pos.x);
        origin.y = origin.y.min(pos.y);
        same_row &= pos.y == first.y;
        length += 1;
    }

    let dir = if same_row { Direction::Horizontal } else { Direction::Vertical };
    Some(WordPosition {
        placement: Placement(origin, dir),
        length,
    })
}

impl FromStr for Board {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Board, FormatError> {
        Board::load(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.cells().chunks(self.width()) {
            for square in row {
                write!(f, "{}", square.to_byte() as char)?;
            }
            writeln!(f)?;
        }
        for row in self.owners.cells().chunks(self.width()) {
            for owner in row {
                write!(f, "{}", owner.0)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[test]
fn test_load() {
    let board = Board::load("\
        _at__\n\
        b_Cd_\n\
        01100\n\
        20000\n").unwrap();

    assert_eq!(board.width(), 5);
    assert_eq!(board.height(), 2);
    assert_eq!(board.letter(Position::new(2, 1)), Some(Letter(b'c')));
    assert_eq!(board.letter(Position::new(1, 1)), None);
    assert_eq!(board.letter(Position::new(5, 0)), None);
    assert_eq!(board.owner(Position::new(0, 1)), Some(Owner(2)));
    assert_eq!(board.player(), WordPosition {
        placement: Placement(Position::new(1, 0), Direction::Horizontal),
        length: 2,
    });
    assert_eq!(board.line(Direction::Horizontal, Position::new(3, 1)), b"b_cd_".to_vec());
    assert_eq!(board.line(Direction::Vertical, Position::new(2, 0)), b"tc".to_vec());

    // printed the way it is read, letters in lowercase
    assert_eq!(board.to_string(), "_at__\nb_cd_\n01100\n20000\n");
    assert_eq!(board.to_string().parse::<Board>(), Ok(board));
}

#[test]
fn test_load_vertical_player() {
    let board: Board = "a_\nt_\n10\n10".parse().unwrap();
    assert_eq!(board.player(), WordPosition {
        placement: Placement(Position::new(0, 0), Direction::Vertical),
        length: 2,
    });

    let single: Board = "_a\n01".parse().unwrap();
    assert_eq!(single.player().direction(), Direction::Horizontal);
    assert_eq!(single.player().length, 1);
}

#[test]
fn test_load_errors() {
    assert_eq!(Board::load(""), Err(FormatError::Empty));
    assert_eq!(Board::load("ab\n11\n00"), Err(FormatError::OddLineCount(3)));
    assert_eq!(
        Board::load("ab\nabc\n11\n00"),
        Err(FormatError::RaggedLine { line: 2, expected: 2, found: 3 }),
    );
    assert_eq!(
        Board::load("a-\n10"),
        Err(FormatError::InvalidTile { x: 1, y: 0, found: '-' }),
    );
    assert_eq!(
        Board::load("ab\n1x"),
        Err(FormatError::InvalidOwner { x: 1, y: 0, found: 'x' }),
    );
    assert_eq!(Board::load("a_\n13"), Err(FormatError::OwnedBlank { x: 1, y: 0 }));
    assert_eq!(Board::load("ab\n02"), Err(FormatError::NoPlayerWord));
}

#[cfg(test)]
fn filled_board(width: usize, height: usize, owned: &[(usize, usize, u8)]) -> Board {
    let mut text = String::new();
    for _ in 0..height {
        text.push_str(&"z".repeat(width));
        text.push('\n');
    }
    for y in 0..height {
        for x in 0..width {
            let owner = owned.iter()
                .find(|&&(ox, oy, _)| (ox, oy) == (x, y))
                .map_or(0, |&(_, _, o)| o);
            text.push_str(&owner.to_string());
        }
        text.push('\n');
    }
    Board::load(&text).unwrap()
}

#[test]
fn test_bomb_area() {
    let board = filled_board(14, 12, &[(5, 5, 1), (6, 5, 1), (7, 5, 1), (3, 4, 2)]);
    assert_eq!(board.player().length, 3);
    assert!(board.player().is_horizontal());

    let bombed = board.bomb();
    for y in 0..12 {
        for x in 0..14 {
            let pos = Position::new(x, y);
            let in_area = (2..11).contains(&x) && (3..9).contains(&y);
            let owned = !board.owner(pos).unwrap().is_none();
            assert_eq!(
                bombed.letter(pos).is_none(), in_area && !owned,
                "unexpected tile at {}", pos,
            );
        }
    }
    assert!(bombed.owners().shares_cells_with(board.owners()));
    assert_eq!(bombed.player(), board.player());
}

#[test]
fn test_bomb_clamped_vertical() {
    let board = filled_board(4, 8, &[(0, 0, 1), (0, 1, 1)]);
    assert!(!board.player().is_horizontal());

    let bombed = board.bomb();
    for y in 0..8 {
        for x in 0..4 {
            let pos = Position::new(x, y);
            let cleared = bombed.letter(pos).is_none();
            // columns 0..4, rows 0..5
            assert_eq!(cleared, y < 5 && board.owner(pos) == Some(Owner::NONE), "at {}", pos);
        }
    }
}

#[test]
fn test_place_word() {
    let board: Board = "_at__\n_____\n01100\n00000".parse().unwrap();
    let play = WordMove {
        placement: Placement(Position::new(0, 0), Direction::Horizontal),
        word: "cat".to_string(),
        hand_after: "s".parse().unwrap(),
        kill: false,
    };

    let next = board.place_word(&play);
    // the cells of the previous word are released, even the ones reused
    assert_eq!(next.to_string(), "cat__\n_____\n10000\n00000\n");
    assert_eq!(next.player(), play.position());
    // the parent is untouched
    assert_eq!(board.to_string(), "_at__\n_____\n01100\n00000\n");
    assert!(!next.tiles().shares_cells_with(board.tiles()));
}
