//! Example: solving a board from a dictionary file.
//!
//! Loads a word list (one word per line), builds the trie once, solves a board and
//! prints the words found in alphabetical order, with timings on stderr.
//!
//! Run with: cargo run --example solve -- [DICTIONARY] [WIDTH] [HEIGHT] [LETTERS]
//!
//! Without a dictionary file a small built-in word list is used. Set `RUST_LOG=debug`
//! to see every dictionary entry that was skipped.

use std::env;
use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

use itertools::Itertools;
use libboggle::boggle::dictionary::{build_legal_trie, build_legal_trie_from_file};
use libboggle::boggle::{Arena, Solver};

const BUILTIN_WORDS: [&str; 12] = [
    "bad", "bade", "bead", "bed", "box", "bread", "brave", "dove", "orb", "ox", "verb", "yob",
];

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let dictionary = args.next();
    let width: usize = args.next().map_or(Ok(3), |a| a.parse())?;
    let height: usize = args.next().map_or(Ok(3), |a| a.parse())?;
    let letters = args.next().unwrap_or_else(|| "yoxrbaved".to_owned());

    let arena = Arena::new();
    let t_load = Instant::now();
    let (trie, summary) = match &dictionary {
        Some(path) => build_legal_trie_from_file(&arena, path)?,
        None => build_legal_trie(&arena, BUILTIN_WORDS),
    };
    let load_secs = t_load.elapsed().as_secs_f64();

    let solver = Solver::new(trie);
    let t_solve = Instant::now();
    let found = solver.solve(width, height, &letters)?;
    let solve_secs = t_solve.elapsed().as_secs_f64();

    println!("Words found: {}", found.len());
    println!("{}", found.iter().sorted().join(", "));

    eprintln!(
        "{} words loaded in {load_secs:.3}s, {width}x{height} board solved in {solve_secs:.3}s",
        summary.accepted
    );
    Ok(())
}
