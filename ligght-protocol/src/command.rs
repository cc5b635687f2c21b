//! Serial console commands
//!
//! The console is line based. Bytes are fed one at a time into a
//! [`CommandReader`], which yields a parsed command at every line end.

use heapless::Vec;
use ligght_core::program::TransitionState;
use ligght_core::state::{Event, LightState};

/// Longest accepted console line (without terminator)
pub const MAX_LINE_LEN: usize = 48;

/// Commands understood by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleCommand {
    /// Print the command list
    Help,
    /// Print version information
    Version,
    /// Switch the operating mode
    SetState(LightState),
    /// Force transition states; requires debug mode
    SetTransitionState {
        main: TransitionState,
        secondary: TransitionState,
    },
}

/// Console input errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line holds no command
    Empty,
    /// First word is not a known command
    UnknownCommand,
    /// Command needs an argument that was not given
    MissingArgument,
    /// Argument is not a valid code
    InvalidArgument,
    /// Too many arguments
    TrailingArguments,
    /// Line exceeds [`MAX_LINE_LEN`]
    LineTooLong,
    /// Line is not valid UTF-8
    InvalidEncoding,
}

impl ConsoleCommand {
    /// Parse one console line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name {
            "help" => ConsoleCommand::Help,
            "version" => ConsoleCommand::Version,
            "set_state" => {
                let code = parse_code(words.next())?;
                ConsoleCommand::SetState(
                    LightState::from_code(code).ok_or(CommandError::InvalidArgument)?,
                )
            }
            "set_transition_state" => {
                let main = parse_transition(words.next())?;
                // A single value applies to both streams
                let secondary = match words.next() {
                    Some(word) => parse_transition(Some(word))?,
                    None => main,
                };
                ConsoleCommand::SetTransitionState { main, secondary }
            }
            _ => return Err(CommandError::UnknownCommand),
        };

        if words.next().is_some() {
            return Err(CommandError::TrailingArguments);
        }
        Ok(command)
    }

    /// Sequencer event for commands that change the lights
    pub fn to_event(&self) -> Option<Event> {
        match *self {
            ConsoleCommand::SetState(mode) => Some(Event::SelectMode(mode)),
            ConsoleCommand::SetTransitionState { main, secondary } => {
                Some(Event::ForceTransition { main, secondary })
            }
            ConsoleCommand::Help | ConsoleCommand::Version => None,
        }
    }
}

fn parse_code(word: Option<&str>) -> Result<u8, CommandError> {
    word.ok_or(CommandError::MissingArgument)?
        .parse()
        .map_err(|_| CommandError::InvalidArgument)
}

fn parse_transition(word: Option<&str>) -> Result<TransitionState, CommandError> {
    TransitionState::from_code(parse_code(word)?).ok_or(CommandError::InvalidArgument)
}

/// Assembles console lines from single bytes
#[derive(Debug, Default)]
pub struct CommandReader {
    buf: Vec<u8, MAX_LINE_LEN>,
    /// Current line overflowed; discard until the terminator
    overflowed: bool,
}

impl CommandReader {
    /// Create an empty reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte
    ///
    /// Returns a result at every non-empty line end (`\n` or `\r`), `None`
    /// while a line is still being received.
    pub fn feed(&mut self, byte: u8) -> Option<Result<ConsoleCommand, CommandError>> {
        match byte {
            b'\n' | b'\r' => {
                let overflowed = core::mem::take(&mut self.overflowed);
                if overflowed {
                    self.buf.clear();
                    return Some(Err(CommandError::LineTooLong));
                }
                if self.buf.is_empty() {
                    // CRLF or blank line
                    return None;
                }
                let result = match core::str::from_utf8(&self.buf) {
                    Ok(line) => ConsoleCommand::parse(line),
                    Err(_) => Err(CommandError::InvalidEncoding),
                };
                self.buf.clear();
                Some(result)
            }
            _ => {
                if !self.overflowed && self.buf.push(byte).is_err() {
                    self.overflowed = true;
                    self.buf.clear();
                }
                None
            }
        }
    }
}
