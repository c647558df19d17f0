use super::Dictionary;
use crate::{Board, Placement};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Some word made across the played word is not in the dictionary
    Invalid,
    Valid {
        /// The played word touches, or covers, a tile of another player
        kill: bool,
    },
}

/// Check the words formed across `word` when it is played at `placement`.
///
/// For each letter, the letters directly before and after it in the
/// perpendicular direction make a word with it, which has to be in the
/// dictionary when it is longer than the letter alone.
pub fn validate(board: &Board, placement: Placement, word: &[u8], dictionary: &Dictionary) -> Verdict {
    let mut kill = false;
    let mut buffer = Vec::with_capacity(board.width().max(board.height()));

    for (i, &letter) in word.iter().enumerate() {
        let cell = placement.advance(i).perp();
        buffer.clear();

        kill |= walk(board, cell, Placement::back, &mut buffer);
        buffer.reverse();
        buffer.push(letter);
        kill |= board.owner(cell.0).map_or(false, |o| o.is_opponent());
        kill |= walk(board, cell, Placement::next, &mut buffer);

        if buffer.len() > 1 && !dictionary.is_word(&buffer) {
            return Verdict::Invalid
        }
    }

    Verdict::Valid { kill }
}

/// Push the letters met stepping away from `cell` until a blank or the edge of
/// the board, and tell whether the neighbour of `cell` belongs to an opponent
fn walk(board: &Board, cell: Placement, step: impl Fn(Placement) -> Placement, buffer: &mut Vec<u8>) -> bool {
    let mut head = step(cell);
    let touches = board.owner(head.0).map_or(false, |o| o.is_opponent());
    while let Some(letter) = board.letter(head.0) {
        buffer.push(letter.0);
        head = step(head);
    }
    touches
}


#[cfg(test)]
fn check(words: &[&str], board: &str, x: usize, y: usize, dir: crate::Direction, word: &str) -> Verdict {
    let dict = Dictionary::build(words.iter()).unwrap();
    let board: Board = board.parse().unwrap();
    validate(&board, Placement(crate::Position::new(x, y), dir), word.as_bytes(), &dict)
}

#[test]
fn test_lone_letter() {
    use crate::Direction::*;

    let board = "___\n_a_\n___\n000\n010\n000";
    assert_eq!(check(&[], board, 0, 0, Horizontal, "b"), Verdict::Valid { kill: false });
    assert_eq!(check(&[], board, 2, 2, Vertical, "b"), Verdict::Valid { kill: false });
}

#[test]
fn test_kill() {
    use crate::Direction::*;

    let board = "_at\na__\n011\n200";
    // "ca" is made downward, touching the opponent's "a"
    assert_eq!(check(&["cat", "ca"], board, 0, 0, Horizontal, "cat"), Verdict::Valid { kill: true });
    assert_eq!(check(&["cat"], board, 0, 0, Horizontal, "cat"), Verdict::Invalid);

    // two blanks away is not touching
    let far = "_at\n___\na__\n011\n000\n200";
    assert_eq!(check(&["cat"], far, 0, 0, Horizontal, "cat"), Verdict::Valid { kill: false });
}

#[test]
fn test_vertical_word() {
    use crate::Direction::*;

    let board = "c_\n__\n10\n00";
    assert_eq!(check(&["ca"], board, 1, 0, Vertical, "at"), Verdict::Valid { kill: false });
    assert_eq!(check(&["cb"], board, 1, 0, Vertical, "at"), Verdict::Invalid);

    let opponent = "c__\n___\n__b\n300\n000\n001";
    assert_eq!(check(&["ca"], opponent, 1, 0, Vertical, "at"), Verdict::Valid { kill: true });
}
