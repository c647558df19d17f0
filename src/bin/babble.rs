
use fst::Set;

use std::convert::TryInto;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use std::path::PathBuf;
use structopt::StructOpt;

use babble::{Board, Dictionary, Hand, Move, MoveChain, Solver};

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum FileOrString {
    File { file: PathBuf },
    String(String),
}

impl FileOrString {
    pub fn read_to_string(self) -> io::Result<String> {
        match self {
            Self::String(s) => Ok(s),
            Self::File { file } => std::fs::read_to_string(file),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// The words that are allowed to be played.
    ///
    /// A `.txt` file with one word per line, a `.json` object whose keys are
    /// the words, or a `.fst` file generated with `make_fst`
    dictionary: PathBuf,

    /// The board as a string or the file containing it (more info in `Opt`)
    board: FileOrString,

    /// The letters in hand, asked for when missing
    hand: Option<String>,

    /// The number of bombs that can be used, asked for when missing
    bombs: Option<u32>,

    /// The largest number of words in a chain, not present means no limit
    max_depth: Option<usize>,

    /// The number of chains shown, not present means all chains are shown
    n_shown: Option<usize>,

    #[serde(default)]
    parallel: bool,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "babble", about = "Find the chains of words a player can lay from their last word")]
struct Opt {
    /// The config file, if not present only the environment (`BABBLE_*`) and options are used
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The words that are allowed to be played.
    ///
    /// A `.txt` file with one word per line, a `.json` object whose keys are
    /// the words, or a `.fst` file generated with `make_fst`
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// The board file. The first half of the lines are the letters, with
    /// underscores for empty squares; the second half are the owners of each
    /// square: 0 for nobody, 1 for the player, 2 and more for the others
    #[structopt(short = "b", long = "board")]
    board_file: Option<String>,

    /// The letters in hand
    #[structopt(short = "t", long = "hand")]
    hand: Option<String>,

    /// The number of bombs that can be used
    #[structopt(short = "x", long = "bombs")]
    bombs: Option<u32>,

    /// The largest number of words in a chain
    #[structopt(short = "m", long = "max-depth")]
    max_depth: Option<usize>,

    /// The number of chains shown, not present means all chains are shown
    #[structopt(short = "n", long = "number-shown")]
    n_shown: Option<usize>,

    /// Explore the branches on all cores, chains come out in no particular order
    #[structopt(short = "p", long = "parallel")]
    parallel: bool,
}

fn load_config(opt: Opt) -> Result<Settings, config::ConfigError> {
    let mut s = config::Config::new();

    if let Some(f) = opt.config {
        s.merge(config::File::with_name(&f))?;
    }

    s.merge(config::Environment::with_prefix("BABBLE"))?;

    if let Some(d) = opt.dict {
        s.set("dictionary", d)?;
    }
    if let Some(b) = opt.board_file {
        s.set("board.file", b)?;
    }
    if let Some(t) = opt.hand {
        s.set("hand", t)?;
    }
    if let Some(b) = opt.bombs {
        s.set::<i64>("bombs", b.into())?;
    }
    if let Some(m) = opt.max_depth {
        s.set::<i64>("max_depth", m.try_into().unwrap_or(i64::MAX))?;
    }
    if let Some(n) = opt.n_shown {
        s.set::<i64>("n_shown", n.try_into().unwrap_or(i64::MAX))?;
    }
    if opt.parallel {
        s.set("parallel", true)?;
    }

    s.try_into()
}

fn ask(question: &str) -> String {
    print!("{}", question);
    io::stdout().flush().expect("flush stdout");
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).expect("read answer");
    answer.trim().to_string()
}

fn load_dictionary(path: PathBuf) -> Dictionary {
    let start = Instant::now();
    let dictionary = match path.extension().and_then(|s| s.to_str()) {
        Some("fst") => {
            let data = std::fs::read(&path).expect("reading the words fst file");
            let set = Set::new(data).expect("converting fst file in set");
            Dictionary::from_set(&set)
        },
        _ => {
            let words = babble::word_list::read_words(&path)
                .expect("reading the words list file");
            Dictionary::build(words)
        },
    }.expect("building the dictionary");
    log::info!("dictionary of {} words ready in {:?}", dictionary.len(), Instant::now() - start);
    dictionary
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();

    let conf = load_config(opt).expect("config");

    let board = conf.board.read_to_string().expect("read board");
    let board = Board::load(&board).expect("invalid board");
    print!("{}", board);

    let hand = conf.hand.unwrap_or_else(|| ask("Enter hand: "));
    let hand: Hand = hand.parse().expect("invalid hand");
    let bombs = match conf.bombs {
        Some(bombs) => bombs,
        None => ask("Bombs: ").parse::<u32>().expect("invalid number of bombs"),
    };

    let solver = Solver::new(load_dictionary(conf.dictionary));

    let start = Instant::now();
    let chains: Box<dyn Iterator<Item=MoveChain> + '_> = if conf.parallel {
        Box::new(solver.search_par(board, hand, bombs, conf.max_depth).into_iter())
    } else {
        Box::new(solver.search(board, hand, bombs, conf.max_depth))
    };

    let mut n_chains = 0;
    for chain in chains.take(conf.n_shown.unwrap_or(usize::MAX)) {
        println!("{}", format_chain(&chain));
        n_chains += 1;
    }
    log::info!("{} chains shown in {:?}", n_chains, Instant::now() - start);
}

/// One chain per line, chains killing an opponent or emptying the hand are tagged
fn format_chain(chain: &[Move]) -> String {
    let tag = if chain.iter().any(Move::is_kill) {
        "kill"
    } else if chain.iter().any(Move::empties_hand) {
        "done"
    } else {
        ""
    };
    format!(
        "{:<4}  {}",
        tag,
        chain.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" "),
    )
}
