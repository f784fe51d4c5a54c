//! REPL Module
//!
//! Command parsing and the per-session state driving the interactive prompt.
//!
//! # Commands
//! - `help` - List commands
//! - `exit` - Leave the explorer
//! - `map` / `mapb` - Page forward / backward through location areas
//! - `explore <location>` - List creatures found in a location area
//! - `catch <pokemon>` - Try to catch a creature
//! - `inspect <pokemon>` - Show a caught creature's details
//! - `pokedex` - List caught creatures

mod command;
mod session;

pub use command::{Command, COMMANDS};
pub use session::{Flow, Session, PROMPT};
