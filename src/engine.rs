//! Engine state management.
//!
//! Holds the current position and search configuration, and handles the
//! commands of the stdin loop. The engine never guesses at intent: a bad
//! position, config, or action is reported and the state left unchanged.

use std::io::Write;

use crate::board::{Layout, State};
use crate::movegen;
use crate::protocol::notation::{
    format_board_line, format_state, parse_action, parse_state,
};
use crate::resolve;
use crate::search::{SearchConfig, Searcher};

/// Move countdown for games started with the `layout` command.
const DEFAULT_MOVE_LIMIT: i32 = 40;
/// Per-move allowance recorded for games started with `layout`.
const DEFAULT_MOVE_TIME_MS: u64 = 30_000;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    position: Option<State>,
    config: SearchConfig,
    searcher: Searcher,
}

impl Engine {
    /// Creates an engine with the default search configuration and no
    /// position.
    pub fn new() -> Engine {
        let config = SearchConfig::default();
        Engine {
            position: None,
            searcher: Searcher::from_config(&config),
            config,
        }
    }

    pub fn position(&self) -> Option<&State> {
        self.position.as_ref()
    }

    /// Resets all engine state for a new game. The search configuration
    /// survives; the cache does not.
    pub fn new_game(&mut self) {
        self.position = None;
        self.searcher = Searcher::from_config(&self.config);
    }

    /// Starts a fresh game on a named layout.
    pub fn set_layout(&mut self, name: &str) -> Result<(), String> {
        match Layout::from_name(name) {
            Some(layout) => {
                self.position =
                    Some(State::initial(layout, DEFAULT_MOVE_LIMIT, DEFAULT_MOVE_TIME_MS));
                Ok(())
            }
            None => Err(format!("unknown layout: {}", name)),
        }
    }

    /// Sets the current position from the two-line text form.
    pub fn set_position(&mut self, text: &str) -> Result<(), String> {
        match parse_state(text) {
            Ok(state) => {
                self.position = Some(state);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse position: {}", e)),
        }
    }

    /// Replaces the search configuration from a JSON document and rebuilds
    /// the searcher around it.
    pub fn set_config(&mut self, json: &str) -> Result<(), String> {
        match serde_json::from_str::<SearchConfig>(json) {
            Ok(config) => {
                self.searcher = Searcher::from_config(&config);
                self.config = config;
                Ok(())
            }
            Err(e) => Err(format!("failed to parse config: {}", e)),
        }
    }

    /// Applies an externally chosen action given in its display form.
    /// Illegal actions leave the position untouched.
    pub fn apply(&mut self, action_text: &str) -> Result<(), String> {
        let state = match &self.position {
            Some(s) => *s,
            None => return Err("apply: no position set".to_string()),
        };
        let action = parse_action(action_text).map_err(|e| e.to_string())?;
        match resolve::apply(&state, &action) {
            Ok(next) => {
                self.position = Some(next);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// Prints the current position in its text form.
    pub fn handle_show<W: Write>(&self, out: &mut W) {
        match &self.position {
            Some(state) => writeln!(out, "{}", format_state(state)).unwrap(),
            None => eprintln!("show: no position set"),
        }
        out.flush().unwrap();
    }

    /// Prints every legal action for the side to move, one per line.
    pub fn handle_moves<W: Write>(&self, out: &mut W) {
        let state = match &self.position {
            Some(s) => s,
            None => {
                eprintln!("moves: no position set");
                return;
            }
        };
        for action in movegen::actions(state) {
            writeln!(out, "{}", action).unwrap();
        }
        out.flush().unwrap();
    }

    /// Prints the board line of every successor position, in the same
    /// order as `handle_moves`.
    pub fn handle_boards<W: Write>(&self, out: &mut W) {
        let state = match &self.position {
            Some(s) => s,
            None => {
                eprintln!("boards: no position set");
                return;
            }
        };
        for action in movegen::actions(state) {
            let next = resolve::result(state, &action);
            writeln!(out, "{}", format_board_line(&next.board)).unwrap();
        }
        out.flush().unwrap();
    }

    /// Runs the search and prints `bestmove <action>` after any info
    /// lines. The chosen action is not applied; that is the caller's call.
    pub fn handle_go<W: Write>(&mut self, out: &mut W, first_move: bool) {
        let state = match &self.position {
            Some(s) => *s,
            None => {
                eprintln!("go: no position set");
                return;
            }
        };
        if state.is_terminal() {
            eprintln!("go: position is terminal");
            return;
        }
        let result = self
            .searcher
            .search(&state, self.config.max_depth, first_move, out);
        writeln!(out, "bestmove {}", result.action).unwrap();
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
