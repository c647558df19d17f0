
use fst::SetBuilder;

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use std::path::PathBuf;
use structopt::StructOpt;

use babble::solver::dictionary::normalize;
use babble::word_list::read_words;

#[derive(Debug, StructOpt)]
#[structopt(name = "make_fst", about = "Compile a word list into a fst file, which is faster to load")]
struct Opt {
    /// The input list. One word per line, or a `.json` object whose keys are the words
    #[structopt(short = "i", long = "input-list", parse(from_os_str))]
    list_file: PathBuf,

    /// Where to write the compiled set of words
    #[structopt(short = "o", long = "output-fst", parse(from_os_str))]
    fst_file: PathBuf,
}

fn main() {
    simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).init().unwrap();

    let Opt { list_file, fst_file } = Opt::from_args();

    let start = Instant::now();
    let listed = read_words(&list_file).expect("reading the words list file");
    let mut words = listed.iter().filter_map(|w| normalize(w)).collect::<Vec<_>>();
    log::info!(
        "{} words loaded in {:?} ({} skipped)",
        words.len(), Instant::now() - start, listed.len() - words.len(),
    );

    let start = Instant::now();
    words.sort_unstable();
    words.dedup();
    log::info!("{} distinct words sorted in {:?}", words.len(), Instant::now() - start);

    let start = Instant::now();
    let wtr = BufWriter::new(File::create(fst_file).expect("creating the words fst file"));
    let mut build = SetBuilder::new(wtr).expect("builder writing to fst file");
    build.extend_iter(words).expect("adding sorted words");
    build.finish().expect("writing the end of the fst file");
    log::info!("dictionary written in {:?}", Instant::now() - start);
}
