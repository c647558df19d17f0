
pub mod dictionary;
pub mod hand;
pub mod letter_set;
pub mod pattern;
pub mod validator;

use std::collections::VecDeque;
use std::time::Instant;

use rayon::prelude::*;

use super::Letter;
use super::{
    Board,
    Move,
    MoveChain,
    Placement,
    WordMove,
};

use dictionary::Dictionary;
use hand::Hand;
use letter_set::LetterSet;
use pattern::match_pattern;
use validator::{validate, Verdict};

/// Finds the moves a player can chain from a board
pub struct Solver {
    dictionary: Dictionary,
}

impl Solver {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The words that can be built on the player's word with `hand`: along it,
    /// or across any of its letters. Only the ones that make valid words
    /// across themselves are kept.
    pub fn candidates(&self, board: &Board, hand: &Hand) -> Vec<WordMove> {
        let player = board.player();
        let along = player.direction();
        let across = along.perp();
        let origin = player.origin();

        let mut found = vec![];
        for m in match_pattern(&board.line(along, origin), hand, origin[along], &self.dictionary) {
            let mut start = origin;
            start[along] = m.start;
            found.push((Placement(start, along), m));
        }
        for cell in player.cells() {
            for m in match_pattern(&board.line(across, cell), hand, cell[across], &self.dictionary) {
                let mut start = cell;
                start[across] = m.start;
                found.push((Placement(start, across), m));
            }
        }

        found.into_iter().filter_map(|(placement, m)| {
            match validate(board, placement, m.word.as_bytes(), &self.dictionary) {
                Verdict::Invalid => None,
                Verdict::Valid { kill } => Some(WordMove {
                    placement,
                    word: m.word,
                    hand_after: m.remaining,
                    kill,
                }),
            }
        }).collect()
    }

    /// Lazily enumerate every chain of moves reachable from `board` with `hand`.
    ///
    /// A chain ends when the hand is empty, when it holds `max_depth` words,
    /// or when no word can be played anymore. Up to `bombs` bombs can be set
    /// off: at the start, and after each word.
    ///
    /// `max_depth` of `None` means no limit; the search still ends as every
    /// word uses at least one tile of the hand.
    pub fn search(&self, board: Board, hand: Hand, bombs: u32, max_depth: Option<usize>) -> Search<'_> {
        let mut search = Search {
            solver: self,
            stack: vec![],
            ready: VecDeque::new(),
            max_depth: max_depth.unwrap_or(usize::MAX).max(1),
            explored: 0,
        };
        search.seed(board, hand, bombs);
        search
    }

    /// Same chains as `search`, the branches below the initial states
    /// being explored on the rayon thread pool. Order is unspecified.
    pub fn search_par(&self, board: Board, hand: Hand, bombs: u32, max_depth: Option<usize>) -> Vec<MoveChain> {
        let start = Instant::now();

        let mut search = self.search(board, hand, bombs, max_depth);
        let roots = std::mem::take(&mut search.stack);
        for state in roots {
            search.expand(state);
        }
        let Search { stack, ready, max_depth, explored, .. } = search;
        log::debug!("{} branches to explore in parallel", stack.len());

        let mut chains = ready.into_iter().collect::<Vec<_>>();
        chains.par_extend(stack.into_par_iter().flat_map(|state| {
            Search {
                solver: self,
                stack: vec![state],
                ready: VecDeque::new(),
                max_depth,
                explored: 0,
            }.collect::<Vec<_>>()
        }));

        log::info!(
            "{} chains found in {:?} (after {} states explored sequentially)",
            chains.len(), Instant::now() - start, explored,
        );
        chains
    }
}

/// A point of the search: where a chain of moves has led
struct State {
    board: Board,
    hand: Hand,
    chain: MoveChain,
    bombs: u32,
    /// Number of the next word in the chain, from 1
    depth: usize,
}

/// The move chains of a search, computed as they are pulled.
///
/// States waiting to be explored are kept on an explicit stack, depth first.
pub struct Search<'s> {
    solver: &'s Solver,
    stack: Vec<State>,
    /// Chains found complete, not yet handed out
    ready: VecDeque<MoveChain>,
    max_depth: usize,
    explored: usize,
}

impl<'s> Search<'s> {
    fn seed(&mut self, board: Board, hand: Hand, bombs: u32) {
        if bombs > 0 {
            let bombed = State {
                board: board.bomb(),
                hand: hand.clone(),
                chain: vec![Move::Bomb],
                bombs: bombs - 1,
                depth: 1,
            };
            self.stack.push(State { board, hand, chain: vec![], bombs, depth: 1 });
            self.stack.push(bombed);
        } else {
            self.stack.push(State { board, hand, chain: vec![], bombs, depth: 1 });
        }
    }

    fn expand(&mut self, state: State) {
        let State { board, hand, chain, bombs, depth } = state;
        self.explored += 1;

        let candidates = self.solver.candidates(&board, &hand);
        log::trace!(
            "{} candidates with {:?} after {} moves ({} bombs left)",
            candidates.len(), hand, chain.len(), bombs,
        );
        if candidates.is_empty() {
            // a dead end is as far as this chain goes
            self.ready.push_back(chain);
            return
        }

        for play in candidates {
            let next_board = board.place_word(&play);
            let next_hand = play.hand_after.clone();
            let mut next_chain = Vec::with_capacity(chain.len() + 2);
            next_chain.extend(chain.iter().cloned());
            next_chain.push(Move::Word(play));

            if next_hand.is_empty() || depth >= self.max_depth {
                self.ready.push_back(next_chain);
                continue
            }

            if bombs > 0 {
                let mut bomb_chain = next_chain.clone();
                bomb_chain.push(Move::Bomb);
                let bombed = State {
                    board: next_board.bomb(),
                    hand: next_hand.clone(),
                    chain: bomb_chain,
                    bombs: bombs - 1,
                    depth: depth + 1,
                };
                self.stack.push(State { board: next_board, hand: next_hand, chain: next_chain, bombs, depth: depth + 1 });
                self.stack.push(bombed);
            } else {
                self.stack.push(State { board: next_board, hand: next_hand, chain: next_chain, bombs, depth: depth + 1 });
            }
        }
    }

    /// Number of states expanded so far
    pub fn explored(&self) -> usize {
        self.explored
    }
}

impl<'s> Iterator for Search<'s> {
    type Item = MoveChain;

    fn next(&mut self) -> Option<MoveChain> {
        loop {
            if let Some(chain) = self.ready.pop_front() {
                return Some(chain)
            }
            let state = self.stack.pop()?;
            self.expand(state);
        }
    }
}


#[cfg(test)]
fn solver(words: &[&str]) -> Solver {
    Solver::new(Dictionary::build(words.iter()).unwrap())
}

#[cfg(test)]
fn show(chain: &[Move]) -> String {
    chain.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
const CAT: &[&str] = &["cat", "at", "cats", "ca"];

#[test]
fn test_single_word() {
    let solver = solver(CAT);
    let board: Board = "_at_\n____\n0110\n0000".parse().unwrap();

    let chains = solver.search(board, "c".parse().unwrap(), 0, None).collect::<Vec<_>>();
    assert_eq!(chains.iter().map(|c| show(c)).collect::<Vec<_>>(), vec!["→(0, 0)cat"]);
    assert!(chains[0][0].empties_hand());
    assert!(!chains[0][0].is_kill());
}

#[test]
fn test_bomb_branch() {
    let solver = solver(CAT);
    let board: Board = "_at_\n____\n0110\n0000".parse().unwrap();

    let chains = solver.search(board, "c".parse().unwrap(), 1, None).map(|c| show(&c)).collect::<Vec<_>>();
    assert_eq!(chains, vec!["BOOM →(0, 0)cat", "→(0, 0)cat"]);
}

#[test]
fn test_chain_of_words() {
    let solver = solver(CAT);
    let board: Board = "_at__\n01100".parse().unwrap();
    let hand: Hand = "cs".parse().unwrap();

    let chains = solver.search(board.clone(), hand.clone(), 0, None).map(|c| show(&c)).collect::<Vec<_>>();
    assert_eq!(chains, vec!["→(0, 0)cats", "→(0, 0)cat →(0, 0)cats"]);

    let chains = solver.search(board, hand, 0, Some(1)).map(|c| show(&c)).collect::<Vec<_>>();
    assert_eq!(chains, vec!["→(0, 0)cat", "→(0, 0)cats"]);
}

#[test]
fn test_candidates() {
    let solver = solver(&["at", "as", "ta", "sat"]);
    let show_all = |moves: Vec<WordMove>| moves.iter().map(|m| m.to_string()).collect::<Vec<_>>();

    // only the column through the "a" of a horizontal "at" can take the "s"
    let horizontal: Board = "___\nat_\n___\n000\n110\n000".parse().unwrap();
    assert_eq!(show_all(solver.candidates(&horizontal, &"s".parse().unwrap())), vec!["↓(0, 1)as"]);

    // and the row through the "a" of a vertical one
    let vertical: Board = "_a_\n_t_\n___\n010\n010\n000".parse().unwrap();
    assert_eq!(show_all(solver.candidates(&vertical, &"s".parse().unwrap())), vec!["→(1, 0)as"]);
}

#[test]
fn test_dead_end() {
    let solver = solver(CAT);
    let board: Board = "_at_\n0110".parse().unwrap();

    let chains = solver.search(board, "z".parse().unwrap(), 0, None).collect::<Vec<_>>();
    assert_eq!(chains, vec![MoveChain::new()]);
}

#[test]
fn test_lazy() {
    let solver = solver(CAT);
    let board: Board = "_at__\n01100".parse().unwrap();

    let mut search = solver.search(board, "cs".parse().unwrap(), 0, None);
    assert!(search.next().is_some());
    assert_eq!(search.explored(), 1);
}

#[cfg(test)]
const ARENA: &str = "\
    _______\n\
    _______\n\
    __at___\n\
    _a_____\n\
    _______\n\
    0000000\n\
    0000000\n\
    0011000\n\
    0200000\n\
    0000000\n";

#[cfg(test)]
const ARENA_WORDS: &[&str] = &[
    "at", "cat", "cats", "ca", "ta", "tab", "tabs", "bat", "bats", "as", "sat", "tas", "scat",
];

#[test]
fn test_chains_replay() {
    let solver = solver(ARENA_WORDS);
    let board: Board = ARENA.parse().unwrap();
    let hand: Hand = "cbst".parse().unwrap();

    for &max_depth in &[None, Some(2)] {
        let chains = solver.search(board.clone(), hand.clone(), 1, max_depth).collect::<Vec<_>>();
        assert!(!chains.is_empty());
        assert!(chains.iter().any(|c| c.iter().any(Move::is_kill)));

        for chain in &chains {
            let mut current = board.clone();
            let mut current_hand = hand.clone();
            let mut words = 0;
            for m in chain {
                match m {
                    Move::Bomb => current = current.bomb(),
                    Move::Word(play) => {
                        assert!(
                            solver.candidates(&current, &current_hand).contains(play),
                            "{} cannot be played in {}", play, show(chain),
                        );
                        current = current.place_word(play);
                        current_hand = play.hand_after.clone();
                        words += 1;
                    },
                }
            }

            let exhausted = current_hand.is_empty();
            let too_deep = max_depth == Some(words);
            let stuck = solver.candidates(&current, &current_hand).is_empty();
            assert!(exhausted || too_deep || stuck, "{} should not have ended", show(chain));
        }
    }
}

#[test]
fn test_repeatable_and_parallel() {
    let solver = solver(ARENA_WORDS);
    let board: Board = ARENA.parse().unwrap();
    let hand: Hand = "cbst".parse().unwrap();

    let first = solver.search(board.clone(), hand.clone(), 1, None).map(|c| show(&c)).collect::<Vec<_>>();
    let second = solver.search(board.clone(), hand.clone(), 1, None).map(|c| show(&c)).collect::<Vec<_>>();
    assert_eq!(first, second);

    let mut sequential = first;
    let mut parallel = solver.search_par(board, hand, 1, None).iter().map(|c| show(c)).collect::<Vec<_>>();
    sequential.sort();
    parallel.sort();
    assert_eq!(sequential, parallel);
}
