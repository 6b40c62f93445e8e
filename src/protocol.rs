//! The line grammar spoken by clients.
//!
//! ```text
//! LINE ::= "look" | "help" | "bye"
//!        | "dig" SP INT SP INT | "flag" SP INT SP INT | "deflag" SP INT SP INT
//! SP   ::= " "
//! INT  ::= "-"? [0-9]+
//! ```
//!
//! Coordinates are not bounds-checked here; the board treats out-of-range
//! inputs as no-ops.

/// Help text sent for the `help` command and for any invalid line.
pub const HELP_TEXT: &str =
    "Follow the command format: look | help | bye | dig X Y | flag X Y | deflag X Y";

/// One parsed client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Look,
    Help,
    Bye,
    Dig { x: i64, y: i64 },
    Flag { x: i64, y: i64 },
    Deflag { x: i64, y: i64 },
}

impl Command {
    /// Parse one line, already stripped of its terminator. Anything
    /// outside the grammar (empty lines, wrong arity, doubled spaces,
    /// tabs, non-integer coordinates) yields `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let mut tokens = line.split(' ');
        let keyword = tokens.next()?;
        let command = match keyword {
            "look" | "help" | "bye" => {
                if tokens.next().is_some() {
                    return None;
                }
                match keyword {
                    "look" => Command::Look,
                    "help" => Command::Help,
                    _ => Command::Bye,
                }
            }
            "dig" | "flag" | "deflag" => {
                let x = parse_int(tokens.next()?)?;
                let y = parse_int(tokens.next()?)?;
                if tokens.next().is_some() {
                    return None;
                }
                match keyword {
                    "dig" => Command::Dig { x, y },
                    "flag" => Command::Flag { x, y },
                    _ => Command::Deflag { x, y },
                }
            }
            _ => return None,
        };
        Some(command)
    }
}

/// `-?[0-9]+`, stricter than `str::parse` (which would take a leading `+`).
fn parse_int(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
