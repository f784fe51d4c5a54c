//! Command parsing
//!
//! Turns a line of user input into a [`Command`].

use crate::error::{PokedexError, Result};

/// Name and description of every command, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the names of the next page of location areas"),
    ("mapb", "Displays the names of the previous page of location areas"),
    ("explore <location>", "Lists the Pokemon found in a location area"),
    ("catch <pokemon>", "Attempts to catch a Pokemon"),
    ("inspect <pokemon>", "Shows details of a caught Pokemon"),
    ("pokedex", "Lists all caught Pokemon"),
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses one input line.
    ///
    /// Input is trimmed and lower-cased. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "help" => no_arguments("help", &args).map(|_| Command::Help)?,
            "exit" => no_arguments("exit", &args).map(|_| Command::Exit)?,
            "map" => no_arguments("map", &args).map(|_| Command::Map)?,
            "mapb" => no_arguments("mapb", &args).map(|_| Command::MapBack)?,
            "pokedex" => no_arguments("pokedex", &args).map(|_| Command::Pokedex)?,
            "explore" => Command::Explore(single_argument("explore", "location", &args)?),
            "catch" => Command::Catch(single_argument("catch", "pokemon", &args)?),
            "inspect" => Command::Inspect(single_argument("inspect", "pokemon", &args)?),
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn no_arguments(command: &str, args: &[&str]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(PokedexError::UnexpectedArguments(command.to_string()))
    }
}

fn single_argument(command: &'static str, argument: &'static str, args: &[&str]) -> Result<String> {
    match args {
        [] => Err(PokedexError::MissingArgument { command, argument }),
        [value] => Ok(value.to_string()),
        _ => Err(PokedexError::UnexpectedArguments(command.to_string())),
    }
}
