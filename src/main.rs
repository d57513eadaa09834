//! Sumito -- an Abalone engine driven by a line-based command protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Positions come from `layout <name>` or `load <path>` (the two-line text
//! format); `moves`, `boards`, `apply`, and `go` operate on the current
//! position.

use std::fs;
use std::io::{self, BufRead};

use sumito::engine::Engine;
use sumito::protocol::parser::{parse_command, Command};

/// Runs the main command loop, reading from stdin and writing to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::NewGame => {
                engine.new_game();
            }
            Command::Layout { name } => {
                if let Err(e) = engine.set_layout(&name) {
                    eprintln!("{}", e);
                }
            }
            Command::Load { path } => match fs::read_to_string(&path) {
                Ok(text) => {
                    if let Err(e) = engine.set_position(&text) {
                        eprintln!("{}", e);
                    }
                }
                Err(e) => eprintln!("failed to read {}: {}", path, e),
            },
            Command::Config { path } => match fs::read_to_string(&path) {
                Ok(text) => {
                    if let Err(e) = engine.set_config(&text) {
                        eprintln!("{}", e);
                    }
                }
                Err(e) => eprintln!("failed to read {}: {}", path, e),
            },
            Command::Show => {
                engine.handle_show(&mut out);
            }
            Command::Moves => {
                engine.handle_moves(&mut out);
            }
            Command::Boards => {
                engine.handle_boards(&mut out);
            }
            Command::Apply { action } => {
                if let Err(e) = engine.apply(&action) {
                    eprintln!("{}", e);
                }
            }
            Command::Go { first } => {
                engine.handle_go(&mut out, first);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
