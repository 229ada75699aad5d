//! Loads a grammar from a file and walks one derivation to completion,
//! picking the first admissible terminal at every step.
//!
//! ```text
//! cargo run --example derive -- path/to/grammar.txt
//! ```

use std::{env, fs, process};

use cfg_guide::Guide;

fn main() {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: derive <grammar-file>");
            process::exit(1);
        }
    };

    let grammar_text = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("failed to read {path}: {e}");
        process::exit(1);
    });

    let guide = Guide::new(&grammar_text).unwrap_or_else(|e| {
        eprintln!("failed to compile grammar: {e}");
        process::exit(1);
    });

    let mut state = None;
    let mut chosen = None;
    let mut derivation = Vec::new();

    loop {
        let next = guide
            .next_terminals(state, chosen)
            .unwrap_or_else(|e| {
                eprintln!("derivation failed: {e}");
                process::exit(1);
            });

        let Some((symbol, next_state)) = next.into_iter().next() else {
            break;
        };

        derivation.push(symbol.content().to_string());
        state = Some(next_state);
        chosen = Some(symbol);
    }

    println!("{}", derivation.join(" "));
}
