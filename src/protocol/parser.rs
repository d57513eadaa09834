//! Command parser for the engine's stdin loop.

/// A parsed server-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset engine state for a new game.
    NewGame,

    /// Set up a fresh position on a named layout.
    Layout { name: String },

    /// Load a position file in the two-line text format.
    Load { path: String },

    /// Load a JSON search configuration file.
    Config { path: String },

    /// Print the current position in its text form.
    Show,

    /// Print every legal action for the side to move.
    Moves,

    /// Print the board line of every successor position.
    Boards,

    /// Apply an externally chosen action, given in its display form.
    Apply { action: String },

    /// Search for the best action; `first` requests the randomized
    /// opening choice.
    Go { first: bool },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines and unknown or malformed commands,
/// complaining to stderr for the latter.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb {
        "newgame" => Some(Command::NewGame),
        "show" => Some(Command::Show),
        "moves" => Some(Command::Moves),
        "boards" => Some(Command::Boards),
        "quit" => Some(Command::Quit),

        "go" => match rest {
            "" => Some(Command::Go { first: false }),
            "first" => Some(Command::Go { first: true }),
            other => {
                eprintln!("malformed go: unexpected argument '{}'", other);
                None
            }
        },

        "layout" | "load" | "config" | "apply" if rest.is_empty() => {
            eprintln!("malformed {}: missing argument", verb);
            None
        }
        "layout" => Some(Command::Layout { name: rest.to_string() }),
        "load" => Some(Command::Load { path: rest.to_string() }),
        "config" => Some(Command::Config { path: rest.to_string() }),
        "apply" => Some(Command::Apply { action: rest.to_string() }),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands_parse() {
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("  show "), Some(Command::Show));
        assert_eq!(parse_command("moves"), Some(Command::Moves));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn go_takes_an_optional_first_flag() {
        assert_eq!(parse_command("go"), Some(Command::Go { first: false }));
        assert_eq!(parse_command("go first"), Some(Command::Go { first: true }));
        assert_eq!(parse_command("go fast"), None);
    }

    #[test]
    fn arguments_are_captured_verbatim() {
        assert_eq!(
            parse_command("layout belgian-daisy"),
            Some(Command::Layout { name: "belgian-daisy".to_string() })
        );
        assert_eq!(
            parse_command("load tests/fixtures/opening.input"),
            Some(Command::Load { path: "tests/fixtures/opening.input".to_string() })
        );
        assert_eq!(
            parse_command("apply [C3, C4] PosX"),
            Some(Command::Apply { action: "[C3, C4] PosX".to_string() })
        );
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert_eq!(parse_command("layout"), None);
        assert_eq!(parse_command("load "), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("hover"), None);
    }
}
